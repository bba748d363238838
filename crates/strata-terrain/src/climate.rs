//! Climate pipeline: temperature → wind → moisture → habitability.
//!
//! Each stage samples at the center of the query's chunk and caches the
//! result per chunk in the planet's [`RegionCache`]. A stage only holds
//! references to the stages it reads, so the dependency chain cannot form a
//! cycle. A stage whose dependency is absent substitutes the planet's
//! baseline value instead of failing.

mod habitability;
mod moisture;
mod temperature;
mod wind;

use std::sync::Arc;

pub use habitability::{
    HabitabilityMap, elevation_factor, humidity_factor, temperature_factor, wind_penalty_factor,
};
pub use moisture::{MoistureMap, WATER_PROBE_RADII, water_distance_effect};
pub use temperature::{TemperatureMap, elevation_cooling, latitude_effect};
pub use wind::{GRADIENT_OFFSET, WindMap};

use crate::heightmap::TerrainHeightMap;
use crate::noise_source::NoiseSource;
use crate::profile::PlanetProfile;
use crate::region_cache::RegionCache;

/// Every climate stage of one planet, wired in dependency order.
pub struct ClimateMaps {
    /// Temperature stage.
    pub temperature: Arc<TemperatureMap>,
    /// Wind stage.
    pub wind: Arc<WindMap>,
    /// Moisture stage.
    pub moisture: Arc<MoistureMap>,
    /// Habitability stage.
    pub habitability: Arc<HabitabilityMap>,
}

impl ClimateMaps {
    /// Build the full pipeline on top of a terrain map.
    pub fn new(
        profile: &Arc<PlanetProfile>,
        noise: &Arc<NoiseSource>,
        terrain: &Arc<TerrainHeightMap>,
        cache: &Arc<RegionCache>,
    ) -> Self {
        let temperature = Arc::new(TemperatureMap::new(
            Arc::clone(profile),
            Arc::clone(noise),
            Some(Arc::clone(terrain)),
            Arc::clone(cache),
        ));
        let wind = Arc::new(WindMap::new(
            Arc::clone(profile),
            Arc::clone(noise),
            Some(Arc::clone(terrain)),
            Some(Arc::clone(&temperature)),
            Arc::clone(cache),
        ));
        let moisture = Arc::new(MoistureMap::new(
            Arc::clone(profile),
            Arc::clone(noise),
            Some(Arc::clone(terrain)),
            Some(Arc::clone(&wind)),
            Arc::clone(cache),
        ));
        let habitability = Arc::new(HabitabilityMap::new(
            Arc::clone(profile),
            Arc::clone(noise),
            Some(Arc::clone(terrain)),
            Some(Arc::clone(&temperature)),
            Some(Arc::clone(&wind)),
            Some(Arc::clone(&moisture)),
            Arc::clone(cache),
        ));

        Self {
            temperature,
            wind,
            moisture,
            habitability,
        }
    }
}
