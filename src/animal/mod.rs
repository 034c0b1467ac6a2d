//! Animal aggregate: stats, energy economy, and vital checks
//!
//! An animal owns one frozen stat block, one energy reserve, one behavior
//! state, and its pose. Each tick runs the comfort check, steps the behavior
//! controller, burns energy once per simulated second, and resolves death
//! or breeding. Death and comfort violations are expected terminal outcomes
//! routed as data, never errors.

use crate::behavior::{BehaviorState, MovementPort, PerceptionPort, StepContext};
use crate::core::config::SimulationConfig;
use crate::core::types::{AnimalId, Pose, Vec2};
use crate::genetics::StatBlock;
use crate::habitat::HabitatReadout;
use rand::Rng;

/// Why an animal died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Habitat conditions outside the comfort band the constitution allows
    Discomfort,
    /// Energy reserve ran out
    Starvation,
}

/// Result of one lifecycle tick, consumed by the population manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    Died(DeathCause),
    /// Still alive and produced a brood of this many children
    Bred(u32),
}

/// One live creature in the habitat
#[derive(Debug, Clone)]
pub struct Animal {
    id: AnimalId,
    pose: Pose,
    stats: StatBlock,

    /// Current energy reserve; hatches equal to `stats.size`
    energy: f32,
    /// Accumulates dt; every full second burns `energy_cost`
    energy_timer: f32,
    /// Energy burned per simulated second, frozen at hatch
    energy_cost: f32,
    /// Seconds the hatch reserve lasts without food, frozen at hatch
    max_lifetime: f32,

    /// Brood size bounds inherited from the egg preset
    min_children: u32,
    max_children: u32,

    state: BehaviorState,
}

impl Animal {
    /// Hatch an animal from a stat block copy
    ///
    /// The block is mutated exactly once, here, before the energy figures
    /// are derived; it never mutates again for this animal's life.
    pub fn hatch(
        id: AnimalId,
        mut stats: StatBlock,
        min_children: u32,
        max_children: u32,
        pose: Pose,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Self {
        stats.mutate(rng, config.mutation_chance, config.mutation_amount);

        let energy_cost = stats.energy_cost();
        let max_lifetime = stats.max_lifetime_without_food();
        let state = BehaviorState::initial(&pose, &Self::step_context(0.0, &stats, config), rng);

        Self {
            id,
            pose,
            energy: stats.size,
            energy_timer: 0.0,
            energy_cost,
            max_lifetime,
            min_children,
            max_children,
            stats,
            state,
        }
    }

    fn step_context(dt: f32, stats: &StatBlock, config: &SimulationConfig) -> StepContext {
        StepContext {
            dt,
            dexterity: stats.dexterity,
            sensing: stats.sensing,
            sec_per_full_turn: config.sec_per_full_turn,
            wander_duration: config.wander_duration,
        }
    }

    /// Advance this animal by `dt` simulated seconds
    ///
    /// Order matters: comfort check, behavior step, energy decay, death
    /// check, breed check. Breeding is only evaluated when the animal
    /// survived every earlier check this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        habitat: &HabitatReadout,
        perception: &dyn PerceptionPort,
        movement: &dyn MovementPort,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> TickOutcome {
        let tolerance = self.stats.constitution * 2;
        let too_cold_or_hot = (habitat.temperature - self.stats.comfort_temp).abs() > tolerance;
        // Humidity is one-directional: only excess humidity kills.
        let too_humid = habitat.humidity - self.stats.comfort_moisture > tolerance;
        if too_cold_or_hot || too_humid {
            return TickOutcome::Died(DeathCause::Discomfort);
        }

        let ctx = Self::step_context(dt, &self.stats, config);
        if let Some(next) = self.state.step(&ctx, &mut self.pose, perception, movement, rng) {
            self.state = next;
        }

        // Burn energy once per full simulated second. The remainder stays
        // in the accumulator so total decay is independent of step size.
        self.energy_timer += dt;
        while self.energy_timer >= 1.0 {
            self.energy_timer -= 1.0;
            self.energy -= self.energy_cost;
        }

        if self.energy <= 0.0 {
            return TickOutcome::Died(DeathCause::Starvation);
        }

        if self.energy >= config.energy_to_breed {
            self.energy -= config.breed_cost;
            let count = rng.gen_range(self.min_children..=self.max_children);
            return TickOutcome::Bred(count);
        }

        TickOutcome::Alive
    }

    /// Add energy, unconditionally and with no upper clamp
    ///
    /// Callable at any time by collaborators: contact feeding, an
    /// inspection tool, or tests.
    pub fn feed(&mut self, amount: i32) {
        self.energy += amount as f32;
    }

    // === Inspection surface (read-only) ===

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec2 {
        self.pose.position
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn energy_cost(&self) -> f32 {
        self.energy_cost
    }

    /// Name of the active behavior state
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// Seconds the current reserve lasts without further food
    pub fn remaining_lifetime(&self) -> f32 {
        self.energy / self.energy_cost
    }

    /// Seconds the hatch reserve would have lasted without food
    pub fn max_lifetime_without_food(&self) -> f32 {
        self.max_lifetime
    }

    pub fn min_children(&self) -> u32 {
        self.min_children
    }

    pub fn max_children(&self) -> u32 {
        self.max_children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FoodId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct NoFood;

    impl PerceptionPort for NoFood {
        fn find_nearest_food(&self, _: Vec2, _: Vec2, _: f32) -> Option<FoodId> {
            None
        }

        fn food_position(&self, _: FoodId) -> Option<Vec2> {
            None
        }
    }

    struct OpenPlane;

    impl MovementPort for OpenPlane {
        fn advance_forward(&self, pose: &mut Pose, distance: f32) -> Vec2 {
            pose.position = pose.position + pose.forward() * distance;
            pose.position
        }
    }

    fn base_stats() -> StatBlock {
        StatBlock {
            group: "test".into(),
            size: 25.0,
            constitution: 10,
            strength: 5,
            dexterity: 5,
            sensing: 5,
            comfort_temp: 20,
            comfort_moisture: 10,
        }
    }

    fn frozen_config() -> SimulationConfig {
        // No mutation so hatch figures are exactly the preset's.
        SimulationConfig {
            mutation_chance: 0.0,
            ..Default::default()
        }
    }

    fn hatch_test_animal(config: &SimulationConfig) -> Animal {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        Animal::hatch(
            AnimalId(1),
            base_stats(),
            5,
            10,
            Pose::default(),
            config,
            &mut rng,
        )
    }

    #[test]
    fn test_hatch_derives_energy_figures_once() {
        let animal = hatch_test_animal(&frozen_config());
        assert_eq!(animal.energy(), 25.0);
        assert!((animal.energy_cost() - 4.5).abs() < 1e-6);
        assert!((animal.max_lifetime_without_food() - 25.0 / 4.5).abs() < 1e-5);
        assert_eq!(animal.state_name(), "Scanning");
    }

    #[test]
    fn test_energy_decay_is_step_size_independent() {
        let config = frozen_config();
        let habitat = HabitatReadout::default();

        let mut coarse = hatch_test_animal(&config);
        let mut fine = hatch_test_animal(&config);
        let mut rng_a = ChaCha8Rng::seed_from_u64(5);
        let mut rng_b = ChaCha8Rng::seed_from_u64(5);

        // 3 simulated seconds as 3 big steps vs 300 small ones.
        for _ in 0..3 {
            coarse.tick(1.0, &habitat, &NoFood, &OpenPlane, &config, &mut rng_a);
        }
        for _ in 0..300 {
            fine.tick(0.01, &habitat, &NoFood, &OpenPlane, &config, &mut rng_b);
        }

        // energy_cost = 4.5, so both lose 13.5 over 3 s.
        assert!((coarse.energy() - (25.0 - 13.5)).abs() < 1e-3);
        assert!((fine.energy() - (25.0 - 13.5)).abs() < 1e-3);
    }

    #[test]
    fn test_comfort_band_scales_with_constitution() {
        let config = frozen_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        // constitution 10 tolerates a delta of 20 either way.
        let mut animal = hatch_test_animal(&config);
        let ok = HabitatReadout {
            temperature: 40,
            ..Default::default()
        };
        assert_eq!(
            animal.tick(0.1, &ok, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Alive
        );

        let mut animal = hatch_test_animal(&config);
        let too_hot = HabitatReadout {
            temperature: 45,
            ..Default::default()
        };
        assert_eq!(
            animal.tick(0.1, &too_hot, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Died(DeathCause::Discomfort)
        );
    }

    #[test]
    fn test_humidity_check_is_one_directional() {
        let config = frozen_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        // Far too dry: survives. The check only punishes excess humidity.
        let mut animal = hatch_test_animal(&config);
        let bone_dry = HabitatReadout {
            humidity: -1000,
            ..Default::default()
        };
        assert_eq!(
            animal.tick(0.1, &bone_dry, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Alive
        );

        // comfort_moisture 10, constitution 10: 31% humidity is lethal.
        let mut animal = hatch_test_animal(&config);
        let swamp = HabitatReadout {
            humidity: 31,
            ..Default::default()
        };
        assert_eq!(
            animal.tick(0.1, &swamp, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Died(DeathCause::Discomfort)
        );
    }

    #[test]
    fn test_starvation_death() {
        let config = frozen_config();
        let habitat = HabitatReadout::default();
        let mut animal = hatch_test_animal(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        // 25 energy at 4.5/s runs out within 6 simulated seconds.
        let mut outcome = TickOutcome::Alive;
        for _ in 0..10 {
            outcome = animal.tick(1.0, &habitat, &NoFood, &OpenPlane, &config, &mut rng);
            if outcome != TickOutcome::Alive {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Died(DeathCause::Starvation));
    }

    #[test]
    fn test_discomfort_takes_precedence_over_starvation() {
        let config = frozen_config();
        let mut animal = hatch_test_animal(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        // Drain the reserve below zero, then tick in a lethal habitat:
        // both conditions hold, and the outcome is still a single death.
        animal.energy = -1.0;
        let lethal = HabitatReadout {
            temperature: 100,
            ..Default::default()
        };
        assert_eq!(
            animal.tick(0.1, &lethal, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Died(DeathCause::Discomfort)
        );
    }

    #[test]
    fn test_feed_then_breed() {
        let config = SimulationConfig {
            mutation_chance: 0.0,
            energy_to_breed: 10.0,
            breed_cost: 4.0,
            ..Default::default()
        };
        let habitat = HabitatReadout::default();
        let mut animal = hatch_test_animal(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        animal.energy = 9.0;
        assert_eq!(
            animal.tick(0.1, &habitat, &NoFood, &OpenPlane, &config, &mut rng),
            TickOutcome::Alive
        );

        animal.feed(5);
        assert_eq!(animal.energy(), 14.0);

        // Above the threshold now: the next tick breeds and charges the cost.
        let outcome = animal.tick(0.1, &habitat, &NoFood, &OpenPlane, &config, &mut rng);
        match outcome {
            TickOutcome::Bred(count) => {
                assert!((5..=10).contains(&count), "brood of {}", count);
            }
            other => panic!("expected a brood, got {:?}", other),
        }
        assert!((animal.energy() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_remaining_lifetime_tracks_energy() {
        let config = frozen_config();
        let mut animal = hatch_test_animal(&config);
        assert!((animal.remaining_lifetime() - 25.0 / 4.5).abs() < 1e-5);
        animal.feed(9);
        assert!((animal.remaining_lifetime() - 34.0 / 4.5).abs() < 1e-5);
    }
}
