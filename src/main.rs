//! Vivarium - headless habitat runner
//!
//! Hatches one or more eggs into a habitat and advances the simulation a
//! fixed number of ticks, logging population summaries along the way.

use clap::Parser;
use vivarium::core::config::SimulationConfig;
use vivarium::core::error::Result;
use vivarium::habitat::{EggCatalog, HabitatReadout};
use vivarium::population::SimulationEvent;
use vivarium::world::Simulation;

#[derive(Parser, Debug)]
#[command(name = "vivarium", about = "Headless habitat creature simulation")]
struct Args {
    /// RNG seed; the same seed reproduces the same run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of ticks to run
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Habitat temperature in Celsius
    #[arg(long, default_value_t = 20)]
    temperature: i32,

    /// Habitat humidity in percent
    #[arg(long, default_value_t = 10)]
    humidity: i32,

    /// Habitat half-extent in units
    #[arg(long, default_value_t = 5.0)]
    size: f32,

    /// TOML file of egg presets; the built-in baseline egg is used if omitted
    #[arg(long)]
    eggs: Option<std::path::PathBuf>,

    /// Ticks between population summaries
    #[arg(long, default_value_t = 100)]
    report_every: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vivarium=info".into()),
        )
        .init();

    let args = Args::parse();

    let habitat = HabitatReadout {
        temperature: args.temperature,
        humidity: args.humidity,
        size: args.size,
    };
    let catalog = match &args.eggs {
        Some(path) => EggCatalog::load(path)?,
        None => EggCatalog::with_defaults(),
    };

    let mut sim = Simulation::new(SimulationConfig::default(), habitat, args.seed)?;
    for egg in catalog.iter() {
        sim.hatch_egg(egg);
    }
    tracing::info!(
        population = sim.population.len(),
        eggs = catalog.len(),
        "habitat seeded"
    );

    let mut births: u64 = 0;
    let mut deaths: u64 = 0;

    for tick in 1..=args.ticks {
        for event in sim.tick(args.dt) {
            match event {
                SimulationEvent::Hatched {
                    id,
                    group,
                    position,
                } => {
                    tracing::debug!(?id, %group, ?position, "hatched");
                    births += 1;
                }
                SimulationEvent::Died { id, cause } => {
                    tracing::debug!(?id, ?cause, "died");
                    deaths += 1;
                }
                SimulationEvent::Bred { parent, count } => {
                    tracing::debug!(?parent, count, "bred");
                }
                SimulationEvent::Fed { id, energy_gain } => {
                    tracing::trace!(?id, energy_gain, "fed");
                }
            }
        }

        if tick % args.report_every == 0 {
            tracing::info!(
                tick,
                clock_secs = sim.clock() as f64,
                population = sim.population.len(),
                food = sim.food.len(),
                births,
                deaths,
                "tick summary"
            );
        }

        if sim.population.is_empty() {
            tracing::warn!(tick, "habitat is empty; stopping early");
            break;
        }
    }

    println!(
        "ran {} ticks ({:.1}s simulated): {} hatched, {} died, {} alive",
        sim.ticks(),
        sim.clock(),
        births,
        deaths,
        sim.population.len()
    );

    Ok(())
}
