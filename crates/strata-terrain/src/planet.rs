//! Per-planet orchestrator owning every layer and the shared region cache.

use std::sync::Arc;

use strata_config::{CacheConfig, Config};
use tracing::debug;

use crate::biome::{BiomeClassifier, BiomeTag};
use crate::chunk::ChunkPos;
use crate::climate::ClimateMaps;
use crate::heightmap::TerrainHeightMap;
use crate::noise_source::NoiseSource;
use crate::profile::{PlanetId, PlanetProfile};
use crate::region_cache::{CacheStats, RegionCache, RegionState};
use crate::sample::{PhysicsSample, WindSample};
use crate::tectonics::TectonicVolatilityManager;

/// Surface physics of one planet.
///
/// Every layer shares one noise source and one [`RegionCache`]. All methods
/// take `&self` and are safe to call from many threads at once.
pub struct PlanetPhysics {
    profile: Arc<PlanetProfile>,
    cache: Arc<RegionCache>,
    tectonics: Arc<TectonicVolatilityManager>,
    terrain: Arc<TerrainHeightMap>,
    climate: ClimateMaps,
    classifier: BiomeClassifier,
}

impl PlanetPhysics {
    /// Build a planet with caching enabled.
    pub fn new(profile: PlanetProfile, cache_config: &CacheConfig) -> Self {
        Self::with_caching(profile, cache_config, true)
    }

    /// Build a planet, optionally with every cache disabled.
    ///
    /// Uncached planets recompute the full dependency chain on every call and
    /// return the same values as cached ones.
    pub fn with_caching(profile: PlanetProfile, cache_config: &CacheConfig, caching: bool) -> Self {
        let profile = Arc::new(profile);
        let noise = Arc::new(NoiseSource::new(profile.seed));
        let cache = Arc::new(RegionCache::new(profile.id, cache_config, caching));

        let volatility_capacity = if caching {
            cache_config.volatility_cache_capacity
        } else {
            0
        };
        let tectonics = Arc::new(TectonicVolatilityManager::new(
            Arc::clone(&profile),
            Arc::clone(&noise),
            volatility_capacity,
        ));
        let terrain = Arc::new(TerrainHeightMap::new(
            Arc::clone(&profile),
            Arc::clone(&noise),
            Some(Arc::clone(&tectonics)),
            Arc::clone(&cache),
        ));
        let climate = ClimateMaps::new(&profile, &noise, &terrain, &cache);
        let classifier = BiomeClassifier::new(profile.sea_level);

        debug!(
            "Built planet {} '{}' (seed {}, radius {}, caching {})",
            profile.id, profile.name, profile.seed, profile.radius, caching
        );

        Self {
            profile,
            cache,
            tectonics,
            terrain,
            climate,
            classifier,
        }
    }

    /// Build a planet from a full configuration, honoring
    /// `debug.disable_caching`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_caching(
            PlanetProfile::from_config(&config.planet),
            &config.cache,
            !config.debug.disable_caching,
        )
    }

    /// Planet id.
    pub fn id(&self) -> PlanetId {
        self.profile.id
    }

    /// Planet profile.
    pub fn profile(&self) -> &PlanetProfile {
        &self.profile
    }

    /// Every physical quantity at `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> PhysicsSample {
        let tectonic = self.tectonics.sample(x, z);
        PhysicsSample {
            terrain_height: self.terrain.sample(x, z),
            tectonic_activity: tectonic.activity,
            volatility_level: tectonic.level,
            temperature: self.climate.temperature.sample(x, z),
            wind: self.climate.wind.sample(x, z),
            moisture: self.climate.moisture.sample(x, z),
            habitability: self.climate.habitability.sample(x, z),
        }
    }

    /// Biome at `(x, z)`.
    pub fn biome(&self, x: i32, z: i32) -> BiomeTag {
        self.classify(&self.sample(x, z))
    }

    /// Sample and biome together, without sampling twice.
    pub fn sample_with_biome(&self, x: i32, z: i32) -> (PhysicsSample, BiomeTag) {
        let sample = self.sample(x, z);
        let biome = self.classify(&sample);
        (sample, biome)
    }

    /// Classify an already computed sample.
    pub fn classify(&self, sample: &PhysicsSample) -> BiomeTag {
        self.classifier.classify(sample)
    }

    /// Absolute terrain height at `(x, z)`.
    pub fn terrain_height(&self, x: i32, z: i32) -> f64 {
        self.terrain.sample(x, z)
    }

    /// Tectonic-activity signal at `(x, z)`.
    pub fn tectonic_activity(&self, x: i32, z: i32) -> f64 {
        self.tectonics.tectonic_activity(x, z)
    }

    /// Volatility level at `(x, z)`.
    pub fn volatility_level(&self, x: i32, z: i32) -> u8 {
        self.tectonics.volatility_level(x, z)
    }

    /// Temperature of the chunk containing `(x, z)`.
    pub fn temperature(&self, x: i32, z: i32) -> f64 {
        self.climate.temperature.sample(x, z)
    }

    /// Wind of the chunk containing `(x, z)`.
    pub fn wind(&self, x: i32, z: i32) -> WindSample {
        self.climate.wind.sample(x, z)
    }

    /// Moisture of the chunk containing `(x, z)`.
    pub fn moisture(&self, x: i32, z: i32) -> f64 {
        self.climate.moisture.sample(x, z)
    }

    /// Habitability of the chunk containing `(x, z)`.
    pub fn habitability(&self, x: i32, z: i32) -> f64 {
        self.climate.habitability.sample(x, z)
    }

    /// Tectonics layer.
    pub fn tectonics(&self) -> &TectonicVolatilityManager {
        &self.tectonics
    }

    /// Terrain layer.
    pub fn terrain(&self) -> &TerrainHeightMap {
        &self.terrain
    }

    /// Climate layers.
    pub fn climate(&self) -> &ClimateMaps {
        &self.climate
    }

    /// Driver hook: region `(region_x, region_z)` was loaded.
    pub fn mark_region_active(&self, region_x: i32, region_z: i32) -> RegionState {
        self.cache.mark_region_active(region_x, region_z)
    }

    /// Driver hook: chunk `(chunk_x, chunk_z)` finished generating.
    pub fn mark_chunk_generated(&self, chunk_x: i32, chunk_z: i32) -> RegionState {
        self.cache.mark_chunk_generated(ChunkPos::new(chunk_x, chunk_z))
    }

    /// Driver hook: region `(region_x, region_z)` was unloaded.
    pub fn mark_region_inactive(&self, region_x: i32, region_z: i32) {
        self.cache.mark_region_inactive(region_x, region_z);
    }

    /// Lifecycle state of region `(region_x, region_z)`.
    pub fn region_state(&self, region_x: i32, region_z: i32) -> RegionState {
        self.cache.state(self.cache.region_key(region_x, region_z))
    }

    /// Region index containing chunk `(chunk_x, chunk_z)`.
    pub fn region_of_chunk(&self, chunk_x: i32, chunk_z: i32) -> (i32, i32) {
        ChunkPos::new(chunk_x, chunk_z).region(self.cache.region_size())
    }

    /// Climate cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Region cache, for inspection.
    pub fn region_cache(&self) -> &RegionCache {
        &self.cache
    }

    /// Drop every cache and lifecycle marker.
    pub fn clear(&self) {
        self.cache.clear();
        self.tectonics.clear();
        debug!("Cleared caches for planet {}", self.profile.id);
    }
}
