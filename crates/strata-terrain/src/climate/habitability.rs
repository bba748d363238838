//! Habitability: weighted suitability score over every other layer.

use std::sync::Arc;

use crate::blend::to_unit;
use crate::chunk::ChunkPos;
use crate::climate::{MoistureMap, TemperatureMap, WindMap};
use crate::heightmap::TerrainHeightMap;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;

const TEMPERATURE_WEIGHT: f64 = 0.35;
const ELEVATION_WEIGHT: f64 = 0.25;
const HUMIDITY_WEIGHT: f64 = 0.20;
const WIND_WEIGHT: f64 = 0.10;
const NOISE_WEIGHT: f64 = 0.10;
const NOISE_FREQUENCY: f64 = 0.005;

/// Upper bound of the habitability score.
pub const MAX_HABITABILITY: f64 = 1.2;

/// 1.0 over [10, 30] °C, falling linearly to 0 at −20 °C and 60 °C.
pub fn temperature_factor(temperature: f64) -> f64 {
    if temperature <= -20.0 || temperature >= 60.0 {
        0.0
    } else if temperature < 10.0 {
        (temperature + 20.0) / 30.0
    } else if temperature <= 30.0 {
        1.0
    } else {
        (60.0 - temperature) / 30.0
    }
}

/// Lowlands and gentle hills score 1.0; shallows fade out by 40 units deep
/// and highlands by 250 units up.
pub fn elevation_factor(elevation: f64) -> f64 {
    if elevation < 0.0 {
        (1.0 + elevation / 40.0).max(0.0)
    } else if elevation <= 80.0 {
        1.0
    } else {
        (1.0 - (elevation - 80.0) / 170.0).max(0.0)
    }
}

/// Peaks at moisture 0.55 and falls to 0 at both ends of the range.
pub fn humidity_factor(moisture: f64) -> f64 {
    (1.0 - (moisture - 0.55).abs() / 0.55).clamp(0.0, 1.0)
}

/// 1.0 up to speed 0.6, 0.4 at 0.9, 0 at 1.0.
pub fn wind_penalty_factor(speed: f64) -> f64 {
    if speed <= 0.6 {
        1.0
    } else if speed <= 0.9 {
        1.0 - (speed - 0.6) / 0.3 * 0.6
    } else {
        (0.4 * (1.0 - (speed - 0.9) / 0.1)).max(0.0)
    }
}

/// Habitability in `[0, 1.2]`, sampled per chunk.
pub struct HabitabilityMap {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    terrain: Option<Arc<TerrainHeightMap>>,
    temperature: Option<Arc<TemperatureMap>>,
    wind: Option<Arc<WindMap>>,
    moisture: Option<Arc<MoistureMap>>,
    cache: Arc<RegionCache>,
}

impl HabitabilityMap {
    /// Create the stage. Each missing dependency is replaced by the planet
    /// baseline for that quantity.
    pub fn new(
        profile: Arc<PlanetProfile>,
        noise: Arc<NoiseSource>,
        terrain: Option<Arc<TerrainHeightMap>>,
        temperature: Option<Arc<TemperatureMap>>,
        wind: Option<Arc<WindMap>>,
        moisture: Option<Arc<MoistureMap>>,
        cache: Arc<RegionCache>,
    ) -> Self {
        Self {
            profile,
            noise,
            terrain,
            temperature,
            wind,
            moisture,
            cache,
        }
    }

    /// Habitability for the chunk containing `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> f64 {
        let chunk = ChunkPos::containing(x, z);
        self.cache.habitability(chunk, || {
            let (cx, cz) = chunk.center();
            self.compute(cx, cz)
        })
    }

    /// Habitability at exactly `(x, z)` with no caching of its own.
    pub fn compute(&self, x: i32, z: i32) -> f64 {
        let profile = &self.profile;

        let temperature = self
            .temperature
            .as_ref()
            .map_or(profile.base_surface_temperature, |t| t.sample(x, z));
        let elevation = self
            .terrain
            .as_ref()
            .map_or(0.0, |t| t.sample_chunk_center(x, z) - profile.sea_level);
        let moisture = self
            .moisture
            .as_ref()
            .map_or(profile.water_content, |m| m.sample(x, z));
        let wind_speed = self
            .wind
            .as_ref()
            .map_or(profile.baseline_wind_speed(), |w| w.speed(x, z));

        let f = NOISE_FREQUENCY * profile.noise_scale;
        let local = to_unit(
            self.noise
                .channel(NoiseChannel::Habitability, x as f64 * f, z as f64 * f),
        );

        let score = TEMPERATURE_WEIGHT * temperature_factor(temperature)
            + ELEVATION_WEIGHT * elevation_factor(elevation)
            + HUMIDITY_WEIGHT * humidity_factor(moisture)
            + WIND_WEIGHT * wind_penalty_factor(wind_speed)
            + NOISE_WEIGHT * local;

        (profile.base_habitability * score).clamp(0.0, MAX_HABITABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::test_support::earth;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_temperature_factor_shape() {
        assert_eq!(temperature_factor(-30.0), 0.0);
        assert_eq!(temperature_factor(-20.0), 0.0);
        assert!((temperature_factor(-5.0) - 0.5).abs() < EPSILON);
        assert_eq!(temperature_factor(10.0), 1.0);
        assert_eq!(temperature_factor(20.0), 1.0);
        assert_eq!(temperature_factor(30.0), 1.0);
        assert!((temperature_factor(45.0) - 0.5).abs() < EPSILON);
        assert_eq!(temperature_factor(60.0), 0.0);
        assert_eq!(temperature_factor(120.0), 0.0);
    }

    #[test]
    fn test_wind_penalty_shape() {
        assert_eq!(wind_penalty_factor(0.0), 1.0);
        assert_eq!(wind_penalty_factor(0.6), 1.0);
        assert!((wind_penalty_factor(0.9) - 0.4).abs() < EPSILON);
        assert!(wind_penalty_factor(1.0).abs() < EPSILON);
        assert!(wind_penalty_factor(0.75) < 1.0 && wind_penalty_factor(0.75) > 0.4);
    }

    #[test]
    fn test_elevation_factor_shape() {
        assert_eq!(elevation_factor(-40.0), 0.0);
        assert!((elevation_factor(-20.0) - 0.5).abs() < EPSILON);
        assert_eq!(elevation_factor(0.0), 1.0);
        assert_eq!(elevation_factor(80.0), 1.0);
        assert_eq!(elevation_factor(250.0), 0.0);
        assert_eq!(elevation_factor(1_000.0), 0.0);
    }

    #[test]
    fn test_humidity_factor_peak() {
        assert_eq!(humidity_factor(0.55), 1.0);
        assert_eq!(humidity_factor(0.0), 0.0);
        assert!(humidity_factor(1.0) > 0.0);
    }

    #[test]
    fn test_no_dependencies_uses_baselines() {
        let f = earth(19);
        let map = HabitabilityMap::new(
            Arc::clone(&f.profile),
            Arc::clone(&f.noise),
            None,
            None,
            None,
            None,
            f.cache,
        );
        let p = &f.profile;
        let fixed = TEMPERATURE_WEIGHT * temperature_factor(p.base_surface_temperature)
            + ELEVATION_WEIGHT
            + HUMIDITY_WEIGHT * humidity_factor(p.water_content)
            + WIND_WEIGHT * wind_penalty_factor(p.baseline_wind_speed());
        for i in 0..40 {
            let h = map.compute(i * 80, i * 40);
            let lo = p.base_habitability * fixed;
            let hi = p.base_habitability * (fixed + NOISE_WEIGHT);
            assert!(h >= lo - EPSILON && h <= hi + EPSILON, "h = {h}");
        }
    }

    proptest! {
        #[test]
        fn prop_score_bounded(
            temperature in -200.0f64..200.0,
            elevation in -500.0f64..500.0,
            moisture in 0.0f64..=1.0,
            wind in 0.0f64..=1.0,
            noise in 0.0f64..=1.0,
            base in 0.0f64..=1.2,
        ) {
            let score = TEMPERATURE_WEIGHT * temperature_factor(temperature)
                + ELEVATION_WEIGHT * elevation_factor(elevation)
                + HUMIDITY_WEIGHT * humidity_factor(moisture)
                + WIND_WEIGHT * wind_penalty_factor(wind)
                + NOISE_WEIGHT * noise;
            prop_assert!((0.0..=1.0 + EPSILON).contains(&score));
            let h = (base * score).clamp(0.0, MAX_HABITABILITY);
            prop_assert!((0.0..=MAX_HABITABILITY).contains(&h));
        }

        #[test]
        fn prop_factors_in_unit_range(v in -1_000.0f64..1_000.0) {
            prop_assert!((0.0..=1.0).contains(&temperature_factor(v)));
            prop_assert!((0.0..=1.0).contains(&elevation_factor(v)));
            prop_assert!((0.0..=1.0).contains(&humidity_factor(v / 1_000.0)));
            prop_assert!((0.0..=1.0).contains(&wind_penalty_factor(v.abs() / 1_000.0)));
        }
    }
}
