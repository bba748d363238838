//! Planetary surface physics: tectonics, terrain, climate, and biome classification.
//!
//! A [`PlanetPhysics`] derives every physical quantity of a column from the
//! planet seed and profile. A [`PhysicsEngine`] holds many planets keyed by
//! id. Climate layers are cached per chunk and the caches are purged region
//! by region as the host driver reports generated chunks.

mod blend;
mod chunk;
mod engine;
mod error;
mod heightmap;
mod noise_source;
mod planet;
mod profile;
mod region_cache;
mod sample;
mod tectonics;

pub mod biome;
pub mod climate;

pub use biome::{BiomeCategory, BiomeClassifier, BiomeTag};
pub use blend::{lerp, overlay, smoothstep};
pub use chunk::{CHUNK_SIZE, ChunkPos};
pub use climate::{ClimateMaps, HabitabilityMap, MoistureMap, TemperatureMap, WindMap};
pub use engine::PhysicsEngine;
pub use error::EngineError;
pub use heightmap::{TerrainHeightMap, TerrainParams};
pub use noise_source::{NoiseChannel, NoiseSource};
pub use planet::PlanetPhysics;
pub use profile::{PlanetId, PlanetProfile};
pub use region_cache::{CacheLayer, CacheStats, RegionCache, RegionKey, RegionState};
pub use sample::{PhysicsSample, WindSample};
pub use tectonics::{
    MAX_VOLATILITY, TectonicVolatilityManager, VolatilitySample, level_for_normalized_distance,
};

/// Re-exported configuration types.
pub use strata_config::{CacheConfig, Config, PlanetConfig};
