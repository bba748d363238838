//! Layers built without their dependencies fall back to planet baselines.

use std::sync::Arc;

use strata_terrain::*;

struct Parts {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    cache: Arc<RegionCache>,
    terrain: Arc<TerrainHeightMap>,
}

fn parts(seed: u64) -> Parts {
    let profile = Arc::new(PlanetProfile::earth_like(5, seed));
    let noise = Arc::new(NoiseSource::new(profile.seed));
    let cache = Arc::new(RegionCache::new(profile.id, &CacheConfig::default(), true));
    let tectonics = Arc::new(TectonicVolatilityManager::new(
        Arc::clone(&profile),
        Arc::clone(&noise),
        1024,
    ));
    let terrain = Arc::new(TerrainHeightMap::new(
        Arc::clone(&profile),
        Arc::clone(&noise),
        Some(tectonics),
        Arc::clone(&cache),
    ));
    Parts {
        profile,
        noise,
        cache,
        terrain,
    }
}

#[test]
fn test_temperature_without_terrain_matches_at_sea_level() {
    let p = parts(10);
    let with = TemperatureMap::new(
        Arc::clone(&p.profile),
        Arc::clone(&p.noise),
        Some(Arc::clone(&p.terrain)),
        Arc::clone(&p.cache),
    );
    let without = TemperatureMap::new(Arc::clone(&p.profile), Arc::clone(&p.noise), None, Arc::clone(&p.cache));

    let mut compared = 0;
    for i in -200..200 {
        let (x, z) = (i * 97, i * 41);
        // Below sea level there is no elevation cooling, so both agree.
        if p.terrain.sample_chunk_center(x, z) <= p.profile.sea_level {
            assert_eq!(with.compute(x, z), without.compute(x, z));
            compared += 1;
        } else {
            assert!(with.compute(x, z) <= without.compute(x, z));
        }
    }
    assert!(compared > 0, "expected some columns at or below sea level");
}

#[test]
fn test_wind_without_dependencies_is_directionless() {
    let p = parts(11);
    let wind = WindMap::new(Arc::clone(&p.profile), Arc::clone(&p.noise), None, None, Arc::clone(&p.cache));
    for i in 0..100 {
        let w = wind.sample(i * 16, -i * 16);
        assert_eq!(w.direction, glam::DVec2::ZERO);
        assert!((w.speed - p.profile.baseline_wind_speed()).abs() <= 0.15 + 1e-9);
    }
}

#[test]
fn test_habitability_without_dependencies_stays_bounded() {
    let p = parts(12);
    let map = HabitabilityMap::new(
        Arc::clone(&p.profile),
        Arc::clone(&p.noise),
        None,
        None,
        None,
        None,
        Arc::clone(&p.cache),
    );
    for i in -100..100 {
        let h = map.sample(i * 33, i * 17);
        assert!((0.0..=1.2).contains(&h));
    }
}

#[test]
fn test_heightmap_without_tectonics_is_total() {
    let p = parts(13);
    let bare = TerrainHeightMap::new(Arc::clone(&p.profile), Arc::clone(&p.noise), None, Arc::clone(&p.cache));
    for i in -100..100 {
        assert!(bare.sample(i * 101, i * -37).is_finite());
    }
}

#[test]
fn test_partial_pipeline_matches_full_pipeline_where_dependencies_agree() {
    // Moisture built on the same wind and terrain as the full pipeline must
    // reproduce the pipeline's values.
    let p = parts(14);
    let climate = ClimateMaps::new(&p.profile, &p.noise, &p.terrain, &p.cache);
    let moisture = MoistureMap::new(
        Arc::clone(&p.profile),
        Arc::clone(&p.noise),
        Some(Arc::clone(&p.terrain)),
        Some(Arc::clone(&climate.wind)),
        Arc::clone(&p.cache),
    );
    for i in -20..20 {
        let (x, z) = (i * 16 * 7 + 8, i * 16 * 3 + 8);
        assert_eq!(moisture.compute(x, z), climate.moisture.compute(x, z));
    }
}
