//! In-crate habitat collaborators and the simulation harness
//!
//! The animal core only talks to boundary traits; this module supplies the
//! concrete environment: a bounded plane to move on, a food field to sense
//! and eat from, a feeder that drops food over time, and a [`Simulation`]
//! harness that wires them to the population for headless runs and tests.

pub mod food;

pub use food::FoodField;

use crate::behavior::MovementPort;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Pose, Tick, Vec2};
use crate::habitat::{EggPreset, HabitatReadout};
use crate::population::{PopulationManager, SimulationEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Flat habitat floor that clamps movement to `[-size, size]` on both axes
///
/// This is the movement boundary contract the state machine relies on for
/// its "never leaves the map" guarantee.
#[derive(Debug, Clone, Copy)]
pub struct BoundedPlane {
    size: f32,
}

impl BoundedPlane {
    pub fn new(size: f32) -> Self {
        Self { size }
    }
}

impl MovementPort for BoundedPlane {
    fn advance_forward(&self, pose: &mut Pose, distance: f32) -> Vec2 {
        let next = pose.position + pose.forward() * distance;
        pose.position = Vec2::new(
            next.x.clamp(-self.size, self.size),
            next.y.clamp(-self.size, self.size),
        );
        pose.position
    }
}

/// Periodic food drop, mirroring a habitat feeder
#[derive(Debug, Clone)]
pub struct Feeder {
    /// Whether the feeder drops anything at all
    pub enabled: bool,
    /// Items per drop
    pub production: u32,
    /// Seconds between drops
    pub production_rate: f32,
    /// Seconds a dropped item lasts before despawning
    pub food_lifetime: f32,

    timer: f32,
}

impl Default for Feeder {
    fn default() -> Self {
        Self {
            enabled: true,
            production: 10,
            production_rate: 1.0,
            food_lifetime: 10.0,
            timer: 0.0,
        }
    }
}

impl Feeder {
    fn tick(
        &mut self,
        dt: f32,
        now: f32,
        extent: f32,
        food: &mut FoodField,
        rng: &mut impl rand::Rng,
    ) {
        if self.timer < self.production_rate {
            self.timer += dt;
        } else if self.enabled {
            food.scatter(self.production, extent, now, self.food_lifetime, rng);
            self.timer = 0.0;
        }
    }
}

/// Complete headless habitat: population, food, and environment wiring
///
/// The caller controls time: each [`tick`](Simulation::tick) advances the
/// whole world by `dt` simulated seconds and returns the events that
/// occurred, so tests can fast-forward deterministically.
pub struct Simulation {
    pub habitat: HabitatReadout,
    pub population: PopulationManager,
    pub food: FoodField,
    pub feeder: Feeder,

    /// Environment RNG, separate from the population's so feeder noise
    /// does not perturb hatch rolls
    env_rng: ChaCha8Rng,
    clock: f32,
    ticks: Tick,
    food_energy: i32,
    contact_radius: f32,
}

impl Simulation {
    pub fn new(config: SimulationConfig, habitat: HabitatReadout, seed: u64) -> Result<Self> {
        config.validate().map_err(SimError::InvalidConfig)?;

        Ok(Self {
            habitat,
            food_energy: config.food_energy,
            contact_radius: config.contact_radius,
            population: PopulationManager::new(config, seed),
            food: FoodField::new(),
            feeder: Feeder::default(),
            env_rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            clock: 0.0,
            ticks: 0,
        })
    }

    /// Hatch a clutch from an egg preset into the habitat
    pub fn hatch_egg(&mut self, preset: &EggPreset) -> Vec<SimulationEvent> {
        self.population.hatch_egg(preset, &self.habitat)
    }

    /// Simulated seconds elapsed so far
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Ticks run so far
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    /// Advance the whole habitat by `dt` simulated seconds
    pub fn tick(&mut self, dt: f32) -> Vec<SimulationEvent> {
        self.clock += dt;
        self.ticks += 1;

        // Environment first: drop new food, drop stale food.
        self.feeder.tick(
            dt,
            self.clock,
            self.habitat.size,
            &mut self.food,
            &mut self.env_rng,
        );
        self.food.expire(self.clock);

        // Then the animals.
        let terrain = BoundedPlane::new(self.habitat.size);
        let mut events = self
            .population
            .tick(dt, &self.habitat, &self.food, &terrain);

        // Contact feeding: an animal standing on food eats it. Claims are
        // at-most-once, so two animals can never share one item.
        let food_energy = self.food_energy;
        let contact_radius = self.contact_radius;
        for animal in self.population.iter_mut() {
            for _ in self.food.claim_within(animal.position(), contact_radius) {
                animal.feed(food_energy);
                tracing::debug!(id = ?animal.id(), energy = animal.energy() as f64, "ate food");
                events.push(SimulationEvent::Fed {
                    id: animal.id(),
                    energy_gain: food_energy,
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_plane_clamps_position() {
        let plane = BoundedPlane::new(5.0);
        let mut pose = Pose::new(Vec2::new(4.5, 0.0), 0.0);

        // Walking east far past the edge pins the animal at the boundary.
        for _ in 0..10 {
            plane.advance_forward(&mut pose, 1.0);
        }
        assert_eq!(pose.position.x, 5.0);
        assert_eq!(pose.position.y, 0.0);
    }

    #[test]
    fn test_feeder_drops_on_schedule() {
        let mut feeder = Feeder {
            production: 4,
            production_rate: 1.0,
            ..Default::default()
        };
        let mut food = FoodField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // First second accumulates; the drop lands on the step after.
        let mut clock = 0.0;
        for _ in 0..12 {
            clock += 0.1;
            feeder.tick(0.1, clock, 5.0, &mut food, &mut rng);
        }
        assert_eq!(food.len(), 4);
    }

    #[test]
    fn test_disabled_feeder_drops_nothing() {
        let mut feeder = Feeder {
            enabled: false,
            ..Default::default()
        };
        let mut food = FoodField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut clock = 0.0;
        for _ in 0..50 {
            clock += 0.1;
            feeder.tick(0.1, clock, 5.0, &mut food, &mut rng);
        }
        assert!(food.is_empty());
    }

    #[test]
    fn test_contact_feeding_consumes_food() {
        let config = SimulationConfig {
            mutation_chance: 0.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, HabitatReadout::default(), 9).unwrap();
        sim.feeder.enabled = false;
        sim.hatch_egg(&EggPreset::default());

        // Pile food directly on one animal.
        let target = sim.population.iter().next().map(|a| a.id()).unwrap();
        let pos = sim.population.get(target).unwrap().position();
        let before = sim.population.get(target).unwrap().energy();
        sim.food.spawn(pos, f32::MAX);

        let events = sim.tick(0.01);

        let fed = events
            .iter()
            .any(|e| matches!(e, SimulationEvent::Fed { id, .. } if *id == target));
        assert!(fed, "expected a Fed event for the animal standing on food");
        assert!(sim.food.is_empty());
        // 10 energy gained, essentially nothing burned in 0.01 s.
        let after = sim.population.get(target).unwrap().energy();
        assert!(after > before + 9.0);
    }
}
