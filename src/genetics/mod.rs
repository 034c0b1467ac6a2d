//! Heritable stats and the mutation operator

pub mod statblock;

pub use statblock::StatBlock;
