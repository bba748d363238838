//! Moisture from planet water, wind transport, and distance to open water.

use std::sync::Arc;

use crate::chunk::ChunkPos;
use crate::climate::WindMap;
use crate::heightmap::TerrainHeightMap;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;

/// Probe radii in world units, nearest first.
pub const WATER_PROBE_RADII: [i32; 3] = [32, 64, 128];

const WATER_CONTENT_WEIGHT: f64 = 0.7;
const WIND_WEIGHT: f64 = 0.2;
const NOISE_WEIGHT: f64 = 0.1;
/// Bonus when the sample point itself is under water.
const SUBMERGED_BONUS: f64 = 0.3;
/// Penalty when no probe finds water.
const DRY_PENALTY: f64 = -0.2;
const NOISE_FREQUENCY: f64 = 0.003;

/// Water-distance contribution for water first found at `radius`.
///
/// `None` means no probe found water.
pub fn water_distance_effect(radius: Option<i32>) -> f64 {
    match radius {
        Some(r) => SUBMERGED_BONUS * (1.0 - f64::from(r - WATER_PROBE_RADII[0]) / 128.0),
        None => DRY_PENALTY,
    }
}

/// Moisture in `[0, 1]`, sampled per chunk.
pub struct MoistureMap {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    terrain: Option<Arc<TerrainHeightMap>>,
    wind: Option<Arc<WindMap>>,
    cache: Arc<RegionCache>,
}

impl MoistureMap {
    /// Create the stage.
    ///
    /// Without terrain the water probe contributes nothing; without wind the
    /// transport term uses calm air at the planet's baseline speed.
    pub fn new(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        terrain: Option<Arc<TerrainHeightMap>>,
        wind: Option<Arc<WindMap>>,
        cache: Arc<RegionCache>,
    ) -> Self {
        Self {
            profile,
            noise,
            terrain,
            wind,
            cache,
        }
    }

    /// Moisture for the chunk containing `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> f64 {
        let chunk = ChunkPos::containing(x, z);
        self.cache.moisture(chunk, || {
            let (cx, cz) = chunk.center();
            self.compute(cx, cz)
        })
    }

    /// Moisture at exactly `(x, z)` with no caching of its own.
    pub fn compute(&self, x: i32, z: i32) -> f64 {
        let profile = &self.profile;
        let wind_speed = self
            .wind
            .as_ref()
            .map_or(profile.baseline_wind_speed(), |wind| wind.speed(x, z));

        let f = NOISE_FREQUENCY * profile.noise_scale;
        let local = self
            .noise
            .channel(NoiseChannel::Moisture, x as f64 * f, z as f64 * f);

        (profile.water_content * WATER_CONTENT_WEIGHT
            + wind_speed * WIND_WEIGHT
            + self.water_proximity(x, z)
            + local * NOISE_WEIGHT)
            .clamp(0.0, 1.0)
    }

    /// Probe the point and then the four cardinal directions at each radius,
    /// stopping at the first radius that finds water.
    fn water_proximity(&self, x: i32, z: i32) -> f64 {
        let Some(terrain) = &self.terrain else {
            return 0.0;
        };
        let sea_level = self.profile.sea_level;
        let is_water = |px: i32, pz: i32| terrain.sample_chunk_center(px, pz) < sea_level;

        if is_water(x, z) {
            return SUBMERGED_BONUS;
        }

        let found = WATER_PROBE_RADII.into_iter().find(|&r| {
            is_water(x.saturating_add(r), z)
                || is_water(x.saturating_sub(r), z)
                || is_water(x, z.saturating_add(r))
                || is_water(x, z.saturating_sub(r))
        });
        water_distance_effect(found)
    }
}
