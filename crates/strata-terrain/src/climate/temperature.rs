//! Surface temperature from latitude, elevation, and local variation.

use std::sync::Arc;

use crate::chunk::ChunkPos;
use crate::heightmap::TerrainHeightMap;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;

/// Cooling at the poles relative to the equator, in °C.
const POLAR_COOLING: f64 = 40.0;
/// Lapse rate: °C lost per world unit above sea level.
const LAPSE_RATE: f64 = 0.2;
/// Amplitude of local temperature noise, in °C.
const LOCAL_VARIATION: f64 = 5.0;
const NOISE_FREQUENCY: f64 = 0.002;

/// Latitude contribution at `z`: 0 at the equator, −40 °C at a quarter
/// circumference and beyond.
pub fn latitude_effect(profile: &PlanetProfile, z: f64) -> f64 {
    let latitude = (z.abs() / profile.quarter_circumference()).min(1.0);
    -POLAR_COOLING * latitude
}

/// Elevation contribution: −20 °C per 100 units above sea level, none below.
pub fn elevation_cooling(elevation: f64) -> f64 {
    -LAPSE_RATE * elevation.max(0.0)
}

/// Temperature in °C, sampled per chunk.
pub struct TemperatureMap {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    terrain: Option<Arc<TerrainHeightMap>>,
    cache: Arc<RegionCache>,
}

impl TemperatureMap {
    /// Create the stage. Without terrain every column counts as sea level.
    pub fn new(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        terrain: Option<Arc<TerrainHeightMap>>,
        cache: Arc<RegionCache>,
    ) -> Self {
        Self {
            profile,
            noise,
            terrain,
            cache,
        }
    }

    /// Temperature for the chunk containing `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> f64 {
        let chunk = ChunkPos::containing(x, z);
        self.cache.temperature(chunk, || {
            let (cx, cz) = chunk.center();
            self.compute(cx, cz)
        })
    }

    /// Temperature at exactly `(x, z)` with no caching of its own.
    pub fn compute(&self, x: i32, z: i32) -> f64 {
        let profile = &self.profile;
        let height = self
            .terrain
            .as_ref()
            .map_or(profile.sea_level, |terrain| terrain.sample_chunk_center(x, z));

        let f = NOISE_FREQUENCY * profile.noise_scale;
        let local = self
            .noise
            .channel(NoiseChannel::Temperature, x as f64 * f, z as f64 * f);

        profile.base_surface_temperature
            + latitude_effect(profile, z as f64)
            + elevation_cooling(height - profile.sea_level)
            + local * LOCAL_VARIATION
    }
}
