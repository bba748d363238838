//! Wind speed and direction from terrain and temperature gradients.

use std::sync::Arc;

use glam::DVec2;

use crate::blend::det_length;
use crate::chunk::ChunkPos;
use crate::climate::TemperatureMap;
use crate::heightmap::TerrainHeightMap;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;
use crate::sample::WindSample;

/// Half-width of the central differences, in world units.
pub const GRADIENT_OFFSET: i32 = 64;

const ELEVATION_WEIGHT: f64 = 0.4;
const TEMPERATURE_WEIGHT: f64 = 0.2;
const NOISE_WEIGHT: f64 = 0.15;
/// Flows weaker than this have no direction.
const MIN_DIRECTION_MAGNITUDE: f64 = 0.001;
const NOISE_FREQUENCY: f64 = 0.004;

/// Wind, sampled per chunk.
///
/// Each computation reads four terrain and four temperature samples; both
/// come from the per-chunk caches.
pub struct WindMap {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    terrain: Option<Arc<TerrainHeightMap>>,
    temperature: Option<Arc<TemperatureMap>>,
    cache: Arc<RegionCache>,
}

impl WindMap {
    /// Create the stage. Missing dependencies contribute a flat gradient.
    pub fn new(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        terrain: Option<Arc<TerrainHeightMap>>,
        temperature: Option<Arc<TemperatureMap>>,
        cache: Arc<RegionCache>,
    ) -> Self {
        Self {
            profile,
            noise,
            terrain,
            temperature,
            cache,
        }
    }

    /// Wind for the chunk containing `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> WindSample {
        let chunk = ChunkPos::containing(x, z);
        self.cache.wind(chunk, || {
            let (cx, cz) = chunk.center();
            self.compute(cx, cz)
        })
    }

    /// Wind speed for the chunk containing `(x, z)`.
    pub fn speed(&self, x: i32, z: i32) -> f64 {
        self.sample(x, z).speed
    }

    /// Wind at exactly `(x, z)` with no caching of its own.
    pub fn compute(&self, x: i32, z: i32) -> WindSample {
        let elevation = self.terrain.as_ref().map_or(DVec2::ZERO, |terrain| {
            gradient(x, z, |px, pz| terrain.sample_chunk_center(px, pz))
        });
        let temperature = self
            .temperature
            .as_ref()
            .map_or(DVec2::ZERO, |temperature| {
                gradient(x, z, |px, pz| temperature.sample(px, pz))
            });

        let f = NOISE_FREQUENCY * self.profile.noise_scale;
        let local = self
            .noise
            .channel(NoiseChannel::Wind, x as f64 * f, z as f64 * f);

        let speed = (self.profile.baseline_wind_speed()
            + det_length(elevation.x, elevation.y) * ELEVATION_WEIGHT
            + det_length(temperature.x, temperature.y) * TEMPERATURE_WEIGHT
            + local * NOISE_WEIGHT)
            .clamp(0.0, 1.0);

        // Air flows downhill and from warm toward cold.
        let flow = -ELEVATION_WEIGHT * elevation - TEMPERATURE_WEIGHT * temperature;
        let magnitude = det_length(flow.x, flow.y);
        let direction = if magnitude < MIN_DIRECTION_MAGNITUDE {
            DVec2::ZERO
        } else {
            flow / magnitude
        };

        WindSample { speed, direction }
    }
}

/// Central-difference gradient of `field` around `(x, z)`.
///
/// Offsets saturate at the `i32` bounds; the difference is then taken over
/// the shortened span.
fn gradient(x: i32, z: i32, field: impl Fn(i32, i32) -> f64) -> DVec2 {
    let (x0, x1) = (x.saturating_sub(GRADIENT_OFFSET), x.saturating_add(GRADIENT_OFFSET));
    let (z0, z1) = (z.saturating_sub(GRADIENT_OFFSET), z.saturating_add(GRADIENT_OFFSET));
    let dx = (field(x1, z) - field(x0, z)) / f64::from(x1 - x0);
    let dz = (field(x, z1) - field(x, z0)) / f64::from(z1 - z0);
    DVec2::new(dx, dz)
}
