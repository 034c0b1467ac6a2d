//! Simulation configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Configuration shared by every animal in the habitat
///
/// These values set the pacing of the energy economy. Changing them shifts
/// how quickly populations boom and starve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    // === MUTATION ===
    /// Probability that any single stat mutates at hatch (0.0-1.0)
    ///
    /// Each stat rolls independently, so a chance of 0.3 mutates roughly
    /// two of the seven heritable fields per hatch.
    pub mutation_chance: f32,

    /// Maximum offset applied to a mutated core stat
    ///
    /// Core stats (strength, constitution, dexterity, sensing) shift by up
    /// to this much in either direction. Size and the comfort preferences
    /// shift by up to twice this much.
    pub mutation_amount: i32,

    // === ENERGY ECONOMY ===
    /// Energy spent when an animal breeds
    ///
    /// Subtracted the moment a brood is produced. Should stay well below
    /// `energy_to_breed` or breeding immediately starves the parent.
    pub breed_cost: f32,

    /// Energy reserve an animal must reach before it breeds
    ///
    /// Acts as a savings threshold: animals below it spend everything on
    /// staying alive.
    pub energy_to_breed: f32,

    /// Energy gained per food item eaten
    pub food_energy: i32,

    // === BEHAVIOR PACING ===
    /// Seconds a full 360 degree scan takes
    ///
    /// Smaller values make animals snap to new directions; larger values
    /// leave them vulnerable to starving mid-turn.
    pub sec_per_full_turn: f32,

    /// Seconds an animal walks forward before scanning again
    pub wander_duration: f32,

    // === CONTACT ===
    /// Distance at which an animal eats a food item it walks over
    pub contact_radius: f32,

    /// Spacing between siblings when a brood is placed next to the parent
    pub birth_spacing: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mutation_chance: 0.3,
            mutation_amount: 2,

            breed_cost: 30.0,
            energy_to_breed: 50.0,
            food_energy: 10,

            sec_per_full_turn: 1.0,
            wander_duration: 1.0,

            contact_radius: 1.0,
            birth_spacing: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(format!(
                "mutation_chance ({}) must be within 0.0-1.0",
                self.mutation_chance
            ));
        }

        if self.mutation_amount < 0 {
            return Err(format!(
                "mutation_amount ({}) must be non-negative",
                self.mutation_amount
            ));
        }

        if self.breed_cost > self.energy_to_breed {
            return Err(format!(
                "breed_cost ({}) should be <= energy_to_breed ({}) so breeding cannot starve the parent outright",
                self.breed_cost, self.energy_to_breed
            ));
        }

        if self.sec_per_full_turn <= 0.0 || self.wander_duration <= 0.0 {
            return Err("Behavior durations must be positive".into());
        }

        if self.contact_radius <= 0.0 {
            return Err("contact_radius must be positive".into());
        }

        Ok(())
    }
}
