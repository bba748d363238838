//! Biome system: leaf tags and the decision tree that picks one per sample.
//!
//! Classification is a pure function of a [`crate::PhysicsSample`] and the
//! planet's sea level. The host driver maps tags to whatever blocks or
//! registry entries it uses.

mod classifier;
mod tag;

pub use classifier::BiomeClassifier;
pub use tag::{BiomeCategory, BiomeTag};
