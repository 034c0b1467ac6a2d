//! Vivarium - habitat creature simulation
//!
//! A population of animals senses food, wanders, hunts, breeds, mutates,
//! and dies inside a bounded habitat. The caller drives time explicitly
//! through tick calls, so runs are deterministic for a fixed seed.

pub mod animal;
pub mod behavior;
pub mod core;
pub mod genetics;
pub mod habitat;
pub mod population;
pub mod world;
