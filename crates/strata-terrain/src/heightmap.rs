//! Layered terrain elevation.
//!
//! Elevation is built from five noise layers, applied in order:
//!
//! 1. **Continental**: 4-octave fractal (1×, 3×, 9×, 27×) shaping coastlines.
//! 2. **Mountain**: ridge crests gated by a separate smooth large-scale field.
//! 3. **Erosion**: an atmosphere-weighted metric that wears down land.
//! 4. **Valley**: ridge-noise carving with a smoothly flattened floor.
//! 5. **Detail**: low-amplitude high-frequency octaves.
//!
//! Continental and mountain coordinates are domain-warped by the tectonic
//! activity signal so large features bend along fault lines. Every threshold
//! is a smoothstep and every addition an overlay blend, so the surface has no
//! first-derivative seams.

use std::sync::Arc;

use crate::blend::{lerp, overlay, smoothstep, to_unit};
use crate::chunk::ChunkPos;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;
use crate::tectonics::TectonicVolatilityManager;

/// Ridge values below this count as the inside of a valley.
const VALLEY_WIDTH: f64 = 0.12;
/// Valley floors start flattening past this centerness.
const VALLEY_FLATTEN_START: f64 = 0.05;
/// Erosion starts past this metric.
const EROSION_THRESHOLD: f64 = 0.55;
/// Largest share of above-sea height erosion removes.
const EROSION_MAX_REDUCTION: f64 = 0.75;
/// Half-width of the band around sea level over which erosion fades in.
const SHORE_BLEND: f64 = 2.0;
/// The z warp follows x at this ratio so faults bend rather than shear.
const WARP_Z_RATIO: f64 = 0.6;

/// Frequencies and amplitudes of the terrain layers.
///
/// Frequencies are in cycles per world unit before the planet's
/// `noise_scale` is applied. Amplitudes are in world units before the
/// planet's `terrain_scale` is applied (detail and valleys are not scaled).
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Frequency of the lowest continental octave. Default: 0.0015.
    pub continental_frequency: f64,
    /// Continental octave count. Default: 4.
    pub continental_octaves: u32,
    /// Frequency multiplier between continental octaves. Default: 3.0.
    pub continental_lacunarity: f64,
    /// Amplitude multiplier between continental octaves. Default: 0.5.
    pub continental_persistence: f64,
    /// Peak continental height above or below sea level. Default: 60.
    pub continental_amplitude: f64,
    /// Mountain crest frequency. Default: 0.004.
    pub mountain_frequency: f64,
    /// Frequency of the field gating mountain intensity. Default: 0.0008.
    pub mountain_gate_frequency: f64,
    /// Peak mountain height before overlay weighting. Default: 140.
    pub mountain_amplitude: f64,
    /// Erosion metric frequency. Default: 0.003.
    pub erosion_frequency: f64,
    /// Valley ridge frequency. Default: 0.0025.
    pub valley_frequency: f64,
    /// Maximum valley carving depth. Default: 22.
    pub valley_depth: f64,
    /// Target floor height (relative to sea level) that valleys flatten toward. Default: 3.
    pub valley_floor: f64,
    /// Frequency of the first detail octave. Default: 0.03.
    pub detail_frequency: f64,
    /// Detail octave count. Default: 2.
    pub detail_octaves: u32,
    /// Detail amplitude. Default: 3.
    pub detail_amplitude: f64,
    /// World-unit displacement at full tectonic activity. Default: 96.
    pub warp_strength: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            continental_frequency: 0.0015,
            continental_octaves: 4,
            continental_lacunarity: 3.0,
            continental_persistence: 0.5,
            continental_amplitude: 60.0,
            mountain_frequency: 0.004,
            mountain_gate_frequency: 0.0008,
            mountain_amplitude: 140.0,
            erosion_frequency: 0.003,
            valley_frequency: 0.0025,
            valley_depth: 22.0,
            valley_floor: 3.0,
            detail_frequency: 0.03,
            detail_octaves: 2,
            detail_amplitude: 3.0,
            warp_strength: 96.0,
        }
    }
}

/// Terrain elevation for one planet.
pub struct TerrainHeightMap {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    tectonics: Option<Arc<TectonicVolatilityManager>>,
    cache: Arc<RegionCache>,
    params: TerrainParams,
}

impl TerrainHeightMap {
    /// Create a heightmap with default layer parameters.
    ///
    /// Without a tectonics manager no domain warp is applied.
    pub fn new(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        tectonics: Option<Arc<TectonicVolatilityManager>>,
        cache: Arc<RegionCache>,
    ) -> Self {
        Self::with_params(profile, noise, tectonics, cache, TerrainParams::default())
    }

    /// Create a heightmap with custom layer parameters.
    pub fn with_params(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        tectonics: Option<Arc<TectonicVolatilityManager>>,
        cache: Arc<RegionCache>,
        params: TerrainParams,
    ) -> Self {
        Self {
            profile,
            noise,
            tectonics,
            cache,
            params,
        }
    }

    /// Layer parameters.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Planet profile this heightmap was built for.
    pub fn profile(&self) -> &PlanetProfile {
        &self.profile
    }

    /// Absolute terrain height at `(x, z)`, exact for the column.
    pub fn sample(&self, x: i32, z: i32) -> f64 {
        self.profile.sea_level + self.relative_elevation(x, z)
    }

    /// Height above (positive) or below (negative) sea level at `(x, z)`.
    pub fn elevation_above_sea_level(&self, x: i32, z: i32) -> f64 {
        self.relative_elevation(x, z)
    }

    /// Absolute terrain height at the center of the chunk containing `(x, z)`.
    ///
    /// This is the value the climate layers consume; it is cached per chunk.
    pub fn sample_chunk_center(&self, x: i32, z: i32) -> f64 {
        let chunk = ChunkPos::containing(x, z);
        self.cache.terrain(chunk, || {
            let (cx, cz) = chunk.center();
            self.sample(cx, cz)
        })
    }

    /// Elevation relative to sea level from every layer.
    pub fn relative_elevation(&self, x: i32, z: i32) -> f64 {
        let p = &self.params;
        let scale = self.profile.noise_scale;
        let (xf, zf) = (x as f64, z as f64);

        let warp = self
            .tectonics
            .as_ref()
            .map_or(0.0, |t| t.tectonic_activity(x, z) * p.warp_strength);
        let (wx, wz) = (xf + warp, zf - warp * WARP_Z_RATIO);

        let continental_noise = self.continental_noise(wx, wz);
        let mut height = continental_noise * p.continental_amplitude * self.profile.terrain_scale;

        height = overlay(height, self.mountain(wx, wz, continental_noise));
        height = self.erode(xf, zf, height);
        height = self.carve_valley(xf, zf, height);

        let df = p.detail_frequency * scale;
        let detail = self.noise.fractal(
            NoiseChannel::Detail,
            xf * df,
            zf * df,
            p.detail_octaves,
            2.0,
            0.5,
        );
        overlay(height, detail * p.detail_amplitude)
    }

    fn continental_noise(&self, wx: f64, wz: f64) -> f64 {
        let p = &self.params;
        let f = p.continental_frequency * self.profile.noise_scale;
        self.noise.fractal(
            NoiseChannel::Continental,
            wx * f,
            wz * f,
            p.continental_octaves,
            p.continental_lacunarity,
            p.continental_persistence,
        )
    }

    /// Mountain contribution (non-negative).
    fn mountain(&self, wx: f64, wz: f64, continental_noise: f64) -> f64 {
        let p = &self.params;
        let scale = self.profile.noise_scale;

        let mf = p.mountain_frequency * scale;
        let crest = 1.0 - self.noise.ridge(NoiseChannel::Mountain, wx * mf, wz * mf);
        let crest = crest * crest;

        let gf = p.mountain_gate_frequency * scale;
        let gate = to_unit(self.noise.channel(NoiseChannel::MountainGate, wx * gf, wz * gf));
        let intensity = 0.3 + 0.7 * smoothstep(0.35, 0.75, gate);

        // Ocean basins keep a quarter of their mountain relief as seamounts.
        let land = 0.25 + 0.75 * smoothstep(-0.2, 0.3, continental_noise);

        crest * intensity * land * p.mountain_amplitude * self.profile.terrain_scale
    }

    /// Reduce above-sea height where the erosion metric passes its threshold.
    fn erode(&self, x: f64, z: f64, height: f64) -> f64 {
        let f = self.params.erosion_frequency * self.profile.noise_scale;
        let weight = 0.5 + 0.5 * self.profile.atmospheric_density;
        let metric = to_unit(self.noise.channel(NoiseChannel::Erosion, x * f, z * f)) * weight;
        let reduction = smoothstep(EROSION_THRESHOLD, 1.0, metric) * EROSION_MAX_REDUCTION;
        let above_sea = smoothstep(-SHORE_BLEND, SHORE_BLEND, height);
        height - height * above_sea * reduction
    }

    fn carve_valley(&self, x: f64, z: f64, height: f64) -> f64 {
        let p = &self.params;
        let f = p.valley_frequency * self.profile.noise_scale;
        let ridge = self.noise.ridge(NoiseChannel::Valley, x * f, z * f);
        let centerness = valley_centerness(ridge);

        // Valleys only cut into land; the gate fades them out at the shore.
        let land = smoothstep(0.0, 20.0, height);
        let carved = height - centerness * centerness * p.valley_depth * land;

        let flatten = smoothstep(VALLEY_FLATTEN_START, 1.0, centerness) * land;
        lerp(carved, carved.min(p.valley_floor), flatten)
    }
}

/// How close a valley-ridge value is to the valley axis, in `[0, 1]`.
///
/// Flat at both ends so the carved profile has no slope break at the axis
/// or at the valley edge.
fn valley_centerness(ridge: f64) -> f64 {
    smoothstep(0.0, 1.0, 1.0 - ridge / VALLEY_WIDTH)
}
