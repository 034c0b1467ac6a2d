//! Habitat conditions and egg presets
//!
//! The animal core never owns the environment; it reads a [`HabitatReadout`]
//! snapshot each tick and compares the two scalars against its comfort stats.

pub mod egg;

pub use egg::{EggCatalog, EggPreset};

use serde::{Deserialize, Serialize};

/// Read-only snapshot of habitat conditions, polled once per tick per animal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HabitatReadout {
    /// Ambient temperature in Celsius
    pub temperature: i32,
    /// Ambient humidity in percent
    pub humidity: i32,
    /// Habitat half-extent; positions are clamped to `[-size, size]` on both axes
    pub size: f32,
}

impl Default for HabitatReadout {
    fn default() -> Self {
        Self {
            temperature: 20,
            humidity: 10,
            size: 5.0,
        }
    }
}
