//! Population manager - owns the set of live animals
//!
//! Drives every animal's lifecycle tick, then applies the resulting death
//! and birth requests. Births and deaths are deferred to the end of the
//! tick: a child spawned mid-tick is never ticked in the tick that created
//! it, and removal order cannot disturb the sequential pass.

use crate::animal::{Animal, DeathCause, TickOutcome};
use crate::behavior::{MovementPort, PerceptionPort};
use crate::core::config::SimulationConfig;
use crate::core::types::{AnimalId, Pose, Vec2};
use crate::genetics::StatBlock;
use crate::habitat::{EggPreset, HabitatReadout};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Events generated while ticking the population, for logs and tests
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// An animal hatched (from an egg or a brood)
    Hatched {
        id: AnimalId,
        group: String,
        position: Vec2,
    },
    /// An animal died and was removed
    Died { id: AnimalId, cause: DeathCause },
    /// An animal produced a brood
    Bred { parent: AnimalId, count: u32 },
    /// An animal walked over food and ate it
    Fed { id: AnimalId, energy_gain: i32 },
}

/// Owns every live animal and the spawn/destroy bookkeeping around them
pub struct PopulationManager {
    animals: Vec<Animal>,
    next_id: u64,
    config: SimulationConfig,
    rng: ChaCha8Rng,
}

impl PopulationManager {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            animals: Vec::new(),
            next_id: 0,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn alloc_id(&mut self) -> AnimalId {
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Hatch a clutch of animals from an egg preset
    ///
    /// Spawns between `min_children` and `max_children - 1` animals (the
    /// clutch roll is half-open) at random positions inside the habitat
    /// bounds. Each gets a fresh copy of the preset stats, mutated once.
    pub fn hatch_egg(
        &mut self,
        preset: &EggPreset,
        habitat: &HabitatReadout,
    ) -> Vec<SimulationEvent> {
        let clutch = if preset.max_children > preset.min_children {
            self.rng.gen_range(preset.min_children..preset.max_children)
        } else {
            preset.min_children
        };

        let mut events = Vec::with_capacity(clutch as usize);
        for _ in 0..clutch {
            let extent = habitat.size;
            let position = Vec2::new(
                self.rng.gen_range(-extent..=extent),
                self.rng.gen_range(-extent..=extent),
            );
            let event = self.spawn(
                preset.stat_block(),
                preset.min_children,
                preset.max_children,
                Pose::new(position, 0.0),
            );
            events.push(event);
        }

        tracing::info!(group = %preset.group, clutch, "hatched egg");
        events
    }

    fn spawn(
        &mut self,
        stats: StatBlock,
        min_children: u32,
        max_children: u32,
        pose: Pose,
    ) -> SimulationEvent {
        let id = self.alloc_id();
        let animal = Animal::hatch(
            id,
            stats,
            min_children,
            max_children,
            pose,
            &self.config,
            &mut self.rng,
        );

        tracing::debug!(
            ?id,
            group = %animal.stats().group,
            size = animal.stats().size as f64,
            energy_cost = animal.energy_cost() as f64,
            "animal hatched"
        );

        let event = SimulationEvent::Hatched {
            id,
            group: animal.stats().group.clone(),
            position: animal.position(),
        };
        self.animals.push(animal);
        event
    }

    /// Advance every live animal by `dt` simulated seconds
    ///
    /// Animals are processed strictly sequentially over the list as it
    /// stood at the start of the call. Deaths are removed and broods are
    /// spawned only after the pass completes.
    pub fn tick(
        &mut self,
        dt: f32,
        habitat: &HabitatReadout,
        perception: &dyn PerceptionPort,
        movement: &dyn MovementPort,
    ) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let mut dead: Vec<usize> = Vec::new();
        // Parent stats are snapshotted here so removals cannot invalidate
        // the brood requests.
        let mut broods: Vec<(AnimalId, StatBlock, u32, u32, Pose, u32)> = Vec::new();

        let live_count = self.animals.len();
        for i in 0..live_count {
            let outcome =
                self.animals[i].tick(dt, habitat, perception, movement, &self.config, &mut self.rng);

            match outcome {
                TickOutcome::Alive => {}
                TickOutcome::Died(cause) => {
                    let id = self.animals[i].id();
                    tracing::debug!(?id, ?cause, "animal died");
                    events.push(SimulationEvent::Died { id, cause });
                    dead.push(i);
                }
                TickOutcome::Bred(count) => {
                    let parent = &self.animals[i];
                    broods.push((
                        parent.id(),
                        parent.stats().clone(),
                        parent.min_children(),
                        parent.max_children(),
                        parent.pose(),
                        count,
                    ));
                }
            }
        }

        // Remove the dead back-to-front so earlier indices stay valid.
        for &i in dead.iter().rev() {
            self.animals.swap_remove(i);
        }

        // Spawn broods next to their parents, offset one spacing per child.
        for (parent_id, stats, min_children, max_children, parent_pose, count) in broods {
            tracing::debug!(parent = ?parent_id, count, "brood produced");
            events.push(SimulationEvent::Bred {
                parent: parent_id,
                count,
            });
            for child in 0..count {
                let offset = self.config.birth_spacing * (child + 1) as f32;
                let pose = Pose::new(
                    parent_pose.position + Vec2::new(offset, 0.0),
                    0.0,
                );
                events.push(self.spawn(stats.clone(), min_children, max_children, pose));
            }
        }

        events
    }

    /// Feed a specific animal, e.g. from an inspection tool
    ///
    /// Returns false when the animal no longer exists.
    pub fn feed(&mut self, id: AnimalId, amount: i32) -> bool {
        match self.animals.iter_mut().find(|a| a.id() == id) {
            Some(animal) => {
                animal.feed(amount);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Animal> {
        self.animals.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }
}
