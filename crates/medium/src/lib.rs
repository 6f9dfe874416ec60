//! Transfer media imported from snapshots: material mixes, mix families
//! and the position-dependent query surface used by the propagation
//! engine.

pub mod imported_medium;
pub mod mix;
pub mod mix_family;

#[cfg(test)]
mod mix_test;

pub use imported_medium::{ImportedMedium, ImportedMediumConfig, MediumError, MixOption};
pub use mix::{MaterialMix, MaterialType, MeanInterstellarDustMix, NeutralHydrogenGasMix};
pub use mix_family::{MaterialMixFamily, SelectMixFamily};
