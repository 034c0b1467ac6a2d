//! Egg presets - named bundles of starting stats for hatching animals

use crate::core::error::{Result, SimError};
use crate::genetics::StatBlock;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting stats for one line of animals
///
/// Presets are authored in TOML and validated on load; the animal core
/// assumes every field already satisfies its floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EggPreset {
    /// Group tag carried by every animal hatched from this egg
    pub group: String,

    /// Smallest brood size
    #[serde(default = "default_min_children")]
    pub min_children: u32,
    /// Largest brood size
    #[serde(default = "default_max_children")]
    pub max_children: u32,

    /// Ideal temperature in Celsius
    #[serde(default = "default_comfort_temp")]
    pub comfort_temp: i32,
    /// Ideal humidity in percent
    #[serde(default = "default_comfort_moisture")]
    pub comfort_moisture: i32,

    /// Body size in cm
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_constitution")]
    pub constitution: i32,
    #[serde(default = "default_strength")]
    pub strength: i32,
    #[serde(default = "default_dexterity")]
    pub dexterity: i32,
    #[serde(default = "default_sensing")]
    pub sensing: i32,
}

fn default_min_children() -> u32 {
    5
}
fn default_max_children() -> u32 {
    10
}
fn default_comfort_temp() -> i32 {
    20
}
fn default_comfort_moisture() -> i32 {
    10
}
fn default_size() -> f32 {
    25.0
}
fn default_constitution() -> i32 {
    10
}
fn default_strength() -> i32 {
    5
}
fn default_dexterity() -> i32 {
    5
}
fn default_sensing() -> i32 {
    5
}

impl Default for EggPreset {
    fn default() -> Self {
        Self {
            group: "unnamed".into(),
            min_children: default_min_children(),
            max_children: default_max_children(),
            comfort_temp: default_comfort_temp(),
            comfort_moisture: default_comfort_moisture(),
            size: default_size(),
            constitution: default_constitution(),
            strength: default_strength(),
            dexterity: default_dexterity(),
            sensing: default_sensing(),
        }
    }
}

impl EggPreset {
    /// Check the floors the animal core relies on
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| {
            Err(SimError::InvalidPreset(self.group.clone(), reason))
        };

        if self.min_children < 1 {
            return fail("min_children must be at least 1".into());
        }
        if self.max_children < self.min_children {
            return fail(format!(
                "max_children ({}) below min_children ({})",
                self.max_children, self.min_children
            ));
        }
        if self.size < 0.1 {
            return fail(format!("size ({}) below floor 0.1", self.size));
        }
        for (name, value) in [
            ("constitution", self.constitution),
            ("strength", self.strength),
            ("dexterity", self.dexterity),
            ("sensing", self.sensing),
        ] {
            if value < 1 {
                return fail(format!("{} ({}) below floor 1", name, value));
            }
        }

        Ok(())
    }

    /// Copy the preset's heritable fields into a fresh stat block
    pub fn stat_block(&self) -> StatBlock {
        StatBlock {
            group: self.group.clone(),
            size: self.size,
            constitution: self.constitution,
            strength: self.strength,
            dexterity: self.dexterity,
            sensing: self.sensing,
            comfort_temp: self.comfort_temp,
            comfort_moisture: self.comfort_moisture,
        }
    }
}

/// A named collection of egg presets loaded from a TOML file
#[derive(Debug, Clone, Default)]
pub struct EggCatalog {
    eggs: Vec<EggPreset>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    egg: Vec<EggPreset>,
}

impl EggCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in catalog with a single baseline egg
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(EggPreset {
            group: "baseline".into(),
            ..Default::default()
        });
        catalog
    }

    /// Load and validate a catalog from a TOML file
    ///
    /// The file holds `[[egg]]` tables; any invalid preset rejects the
    /// whole file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&text)?;

        let mut catalog = Self::new();
        for egg in file.egg {
            egg.validate()?;
            catalog.add(egg);
        }
        Ok(catalog)
    }

    pub fn add(&mut self, egg: EggPreset) {
        self.eggs.push(egg);
    }

    pub fn get(&self, group: &str) -> Option<&EggPreset> {
        self.eggs.iter().find(|e| e.group == group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EggPreset> {
        self.eggs.iter()
    }

    pub fn len(&self) -> usize {
        self.eggs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eggs.is_empty()
    }
}
