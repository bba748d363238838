//! Multi-planet registry.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use strata_config::CacheConfig;
use tracing::info;

use crate::biome::BiomeTag;
use crate::error::EngineError;
use crate::planet::PlanetPhysics;
use crate::profile::{PlanetId, PlanetProfile};
use crate::region_cache::RegionState;
use crate::sample::PhysicsSample;

/// Every planet the host knows about, keyed by id.
///
/// Each planet owns its own caches, so tearing one down never touches
/// another.
pub struct PhysicsEngine {
    planets: DashMap<PlanetId, Arc<PlanetPhysics>>,
    cache_config: CacheConfig,
}

impl PhysicsEngine {
    /// Create an empty engine whose planets use `cache_config`.
    pub fn new(cache_config: CacheConfig) -> Self {
        Self {
            planets: DashMap::new(),
            cache_config,
        }
    }

    /// Cache configuration applied to planets built by [`Self::register_planet`].
    pub fn cache_config(&self) -> &CacheConfig {
        &self.cache_config
    }

    /// Build and register a planet from its profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicatePlanet`] if the id is taken.
    pub fn register_planet(&self, profile: PlanetProfile) -> Result<Arc<PlanetPhysics>, EngineError> {
        self.insert(PlanetPhysics::new(profile, &self.cache_config))
    }

    /// Register an already built planet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicatePlanet`] if the id is taken.
    pub fn insert(&self, physics: PlanetPhysics) -> Result<Arc<PlanetPhysics>, EngineError> {
        let id = physics.id();
        match self.planets.entry(id) {
            Entry::Occupied(_) => Err(EngineError::DuplicatePlanet(id)),
            Entry::Vacant(slot) => {
                let physics = Arc::new(physics);
                info!("Registered planet {} '{}'", id, physics.profile().name);
                slot.insert(Arc::clone(&physics));
                Ok(physics)
            }
        }
    }

    /// Look a planet up.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPlanet`] if no planet has this id.
    pub fn planet(&self, id: PlanetId) -> Result<Arc<PlanetPhysics>, EngineError> {
        self.planets
            .get(&id)
            .map(|planet| Arc::clone(planet.value()))
            .ok_or(EngineError::UnknownPlanet(id))
    }

    /// Physics sample at `(x, z)` on planet `id`.
    pub fn sample(&self, id: PlanetId, x: i32, z: i32) -> Result<PhysicsSample, EngineError> {
        Ok(self.planet(id)?.sample(x, z))
    }

    /// Biome at `(x, z)` on planet `id`.
    pub fn biome(&self, id: PlanetId, x: i32, z: i32) -> Result<BiomeTag, EngineError> {
        Ok(self.planet(id)?.biome(x, z))
    }

    /// Forward [`PlanetPhysics::mark_region_active`].
    pub fn mark_region_active(
        &self,
        id: PlanetId,
        region_x: i32,
        region_z: i32,
    ) -> Result<RegionState, EngineError> {
        Ok(self.planet(id)?.mark_region_active(region_x, region_z))
    }

    /// Forward [`PlanetPhysics::mark_chunk_generated`].
    pub fn mark_chunk_generated(
        &self,
        id: PlanetId,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Result<RegionState, EngineError> {
        Ok(self.planet(id)?.mark_chunk_generated(chunk_x, chunk_z))
    }

    /// Forward [`PlanetPhysics::mark_region_inactive`].
    pub fn mark_region_inactive(
        &self,
        id: PlanetId,
        region_x: i32,
        region_z: i32,
    ) -> Result<(), EngineError> {
        self.planet(id)?.mark_region_inactive(region_x, region_z);
        Ok(())
    }

    /// Tear a planet down: drop its caches and remove it from the engine.
    ///
    /// Handles to the planet obtained earlier stay usable but start cold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPlanet`] if no planet has this id.
    pub fn clear_planet(&self, id: PlanetId) -> Result<(), EngineError> {
        let (_, planet) = self
            .planets
            .remove(&id)
            .ok_or(EngineError::UnknownPlanet(id))?;
        planet.clear();
        info!("Cleared planet {id}");
        Ok(())
    }

    /// Registered planet ids, ascending.
    pub fn planet_ids(&self) -> Vec<PlanetId> {
        let mut ids: Vec<PlanetId> = self.planets.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered planets.
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Returns `true` if no planets are registered.
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
