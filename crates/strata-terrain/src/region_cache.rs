//! Chunk-granularity climate caches with region-based lifecycle.
//!
//! Every climate layer caches one value per chunk, computed at the chunk
//! center. Chunks are grouped into square regions (32×32 chunks by default).
//! A region moves through three states:
//!
//! - **Unseen**: nothing cached, no chunks tracked.
//! - **Active**: first chunk touched; caches fill lazily and the driver's
//!   `mark_chunk_generated` calls are tracked.
//! - **Completed**: the tracked chunk count reached the completion threshold.
//!   Every cache for the region is dropped and only a completion marker is
//!   kept. Later samples in the region recompute directly without caching.
//!
//! Values are deterministic, so concurrent inserts for the same chunk are
//! idempotent and a lost race only costs a recomputation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::{DashMap, DashSet};
use hashbrown::{HashMap, HashSet};
use strata_config::CacheConfig;
use tracing::{debug, trace};

use crate::chunk::ChunkPos;
use crate::profile::PlanetId;
use crate::sample::WindSample;

/// Coarse lifecycle key: one region of one planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey {
    /// Owning planet.
    pub planet: PlanetId,
    /// Region index along x.
    pub region_x: i32,
    /// Region index along z.
    pub region_z: i32,
}

/// Lifecycle state of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionState {
    /// Never touched.
    Unseen,
    /// Touched; caches may hold values.
    Active,
    /// Completion threshold reached; caches purged.
    Completed,
}

/// Cached climate layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheLayer {
    /// Terrain height at chunk center.
    Terrain,
    /// Temperature.
    Temperature,
    /// Wind speed and direction.
    Wind,
    /// Moisture.
    Moisture,
    /// Habitability.
    Habitability,
}

/// Snapshot of cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a cache.
    pub hits: u64,
    /// Lookups that computed and stored a value.
    pub misses: u64,
    /// Lookups in completed regions, recomputed without caching.
    pub bypassed: u64,
    /// Regions that reached completion.
    pub completed_regions: u64,
    /// Cache entries dropped by region purges.
    pub purged_entries: u64,
}

/// One layer's values, grouped by region so a purge is a single removal.
struct LayerStore<T> {
    regions: DashMap<RegionKey, HashMap<ChunkPos, T>>,
}

impl<T: Copy> LayerStore<T> {
    fn new() -> Self {
        Self {
            regions: DashMap::new(),
        }
    }

    fn get(&self, key: RegionKey, chunk: ChunkPos) -> Option<T> {
        self.regions
            .get(&key)
            .and_then(|region| region.get(&chunk).copied())
    }

    /// Insert unless present; returns the stored value.
    fn insert(&self, key: RegionKey, chunk: ChunkPos, value: T) -> T {
        let mut region = self.regions.entry(key).or_default();
        *region.entry(chunk).or_insert(value)
    }

    fn remove_region(&self, key: RegionKey) -> usize {
        self.regions
            .remove(&key)
            .map_or(0, |(_, region)| region.len())
    }

    fn len_in(&self, key: RegionKey) -> usize {
        self.regions.get(&key).map_or(0, |region| region.len())
    }

    fn clear(&self) {
        self.regions.clear();
    }
}

/// Per-planet climate cache and region lifecycle tracker.
pub struct RegionCache {
    planet: PlanetId,
    region_size: i32,
    completion_threshold: usize,
    enabled: bool,
    /// Chunks reported generated, per not-yet-completed region.
    tracked: DashMap<RegionKey, HashSet<ChunkPos>>,
    /// Regions the driver currently has loaded.
    active: DashSet<RegionKey>,
    /// Completion markers.
    completed: DashSet<RegionKey>,
    terrain: LayerStore<f64>,
    temperature: LayerStore<f64>,
    wind: LayerStore<WindSample>,
    moisture: LayerStore<f64>,
    habitability: LayerStore<f64>,
    hits: AtomicU64,
    misses: AtomicU64,
    bypassed: AtomicU64,
    completed_count: AtomicU64,
    purged: AtomicU64,
}

impl RegionCache {
    /// Create a cache for `planet`. With `enabled == false` every lookup
    /// recomputes; lifecycle tracking still runs.
    pub fn new(planet: PlanetId, config: &CacheConfig, enabled: bool) -> Self {
        Self {
            planet,
            region_size: config.region_size_chunks.max(1),
            completion_threshold: config.completion_threshold.max(1),
            enabled,
            tracked: DashMap::new(),
            active: DashSet::new(),
            completed: DashSet::new(),
            terrain: LayerStore::new(),
            temperature: LayerStore::new(),
            wind: LayerStore::new(),
            moisture: LayerStore::new(),
            habitability: LayerStore::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            bypassed: AtomicU64::new(0),
            completed_count: AtomicU64::new(0),
            purged: AtomicU64::new(0),
        }
    }

    /// Whether lookups are cached at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Region edge length in chunks.
    pub fn region_size(&self) -> i32 {
        self.region_size
    }

    /// Chunk count that completes a region.
    pub fn completion_threshold(&self) -> usize {
        self.completion_threshold
    }

    /// Region key for region indices on this cache's planet.
    pub fn region_key(&self, region_x: i32, region_z: i32) -> RegionKey {
        RegionKey {
            planet: self.planet,
            region_x,
            region_z,
        }
    }

    /// Region containing `chunk`.
    pub fn region_of(&self, chunk: ChunkPos) -> RegionKey {
        let (region_x, region_z) = chunk.region(self.region_size);
        self.region_key(region_x, region_z)
    }

    /// Current lifecycle state of a region.
    pub fn state(&self, key: RegionKey) -> RegionState {
        if self.completed.contains(&key) {
            RegionState::Completed
        } else if self.active.contains(&key) || self.tracked.contains_key(&key) {
            RegionState::Active
        } else {
            RegionState::Unseen
        }
    }

    /// Driver hook: the region is loaded. Completed regions stay completed.
    pub fn mark_region_active(&self, region_x: i32, region_z: i32) -> RegionState {
        let key = self.region_key(region_x, region_z);
        if self.completed.contains(&key) {
            return RegionState::Completed;
        }
        self.active.insert(key);
        self.tracked.entry(key).or_default();
        RegionState::Active
    }

    /// Driver hook: one chunk finished generating.
    ///
    /// Returns the region's state after the call. The call that brings the
    /// distinct-chunk count to the threshold completes the region and purges
    /// its caches.
    pub fn mark_chunk_generated(&self, chunk: ChunkPos) -> RegionState {
        let key = self.region_of(chunk);
        if self.completed.contains(&key) {
            return RegionState::Completed;
        }

        let reached = {
            let mut visited = self.tracked.entry(key).or_default();
            visited.insert(chunk);
            visited.len() >= self.completion_threshold
        };
        self.active.insert(key);

        if reached {
            self.complete_region(key);
            RegionState::Completed
        } else {
            RegionState::Active
        }
    }

    /// Driver hook: the region was unloaded.
    ///
    /// Cached values and chunk tracking are kept; the area is likely to be
    /// revisited and the values are still valid.
    pub fn mark_region_inactive(&self, region_x: i32, region_z: i32) {
        let key = self.region_key(region_x, region_z);
        self.active.remove(&key);
        trace!(
            region_x,
            region_z,
            cached = self.cached_chunks(key),
            "region marked inactive; keeping partial cache"
        );
    }

    fn complete_region(&self, key: RegionKey) {
        if !self.completed.insert(key) {
            return;
        }
        self.tracked.remove(&key);
        self.active.remove(&key);

        let purged = self.purge_region(key);
        self.completed_count.fetch_add(1, Ordering::Relaxed);
        self.purged.fetch_add(purged as u64, Ordering::Relaxed);
        debug!(
            planet = self.planet.0,
            region_x = key.region_x,
            region_z = key.region_z,
            purged,
            "region completed; caches purged"
        );
    }

    fn purge_region(&self, key: RegionKey) -> usize {
        self.terrain.remove_region(key)
            + self.temperature.remove_region(key)
            + self.wind.remove_region(key)
            + self.moisture.remove_region(key)
            + self.habitability.remove_region(key)
    }

    /// Drop every cache, tracker, and completion marker.
    pub fn clear(&self) {
        self.tracked.clear();
        self.active.clear();
        self.completed.clear();
        self.terrain.clear();
        self.temperature.clear();
        self.wind.clear();
        self.moisture.clear();
        self.habitability.clear();
        for counter in [
            &self.hits,
            &self.misses,
            &self.bypassed,
            &self.completed_count,
            &self.purged,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Number of regions currently marked active by the driver.
    pub fn active_region_count(&self) -> usize {
        self.active.len()
    }

    /// Number of completed regions.
    pub fn completed_region_count(&self) -> usize {
        self.completed.len()
    }

    /// Distinct chunks reported generated in a region (0 once completed).
    pub fn generated_chunks(&self, key: RegionKey) -> usize {
        self.tracked.get(&key).map_or(0, |visited| visited.len())
    }

    /// Cached entries for one layer in one region.
    pub fn cached_entries(&self, layer: CacheLayer, key: RegionKey) -> usize {
        match layer {
            CacheLayer::Terrain => self.terrain.len_in(key),
            CacheLayer::Temperature => self.temperature.len_in(key),
            CacheLayer::Wind => self.wind.len_in(key),
            CacheLayer::Moisture => self.moisture.len_in(key),
            CacheLayer::Habitability => self.habitability.len_in(key),
        }
    }

    /// Cached entries across every layer in one region.
    pub fn cached_chunks(&self, key: RegionKey) -> usize {
        self.terrain.len_in(key)
            + self.temperature.len_in(key)
            + self.wind.len_in(key)
            + self.moisture.len_in(key)
            + self.habitability.len_in(key)
    }

    /// Counter snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            bypassed: self.bypassed.load(Ordering::Relaxed),
            completed_regions: self.completed_count.load(Ordering::Relaxed),
            purged_entries: self.purged.load(Ordering::Relaxed),
        }
    }

    /// Cached terrain height at the chunk center.
    pub fn terrain(&self, chunk: ChunkPos, compute: impl FnOnce() -> f64) -> f64 {
        self.get_or_compute(&self.terrain, chunk, compute)
    }

    /// Cached temperature.
    pub fn temperature(&self, chunk: ChunkPos, compute: impl FnOnce() -> f64) -> f64 {
        self.get_or_compute(&self.temperature, chunk, compute)
    }

    /// Cached wind.
    pub fn wind(&self, chunk: ChunkPos, compute: impl FnOnce() -> WindSample) -> WindSample {
        self.get_or_compute(&self.wind, chunk, compute)
    }

    /// Cached moisture.
    pub fn moisture(&self, chunk: ChunkPos, compute: impl FnOnce() -> f64) -> f64 {
        self.get_or_compute(&self.moisture, chunk, compute)
    }

    /// Cached habitability.
    pub fn habitability(&self, chunk: ChunkPos, compute: impl FnOnce() -> f64) -> f64 {
        self.get_or_compute(&self.habitability, chunk, compute)
    }

    fn get_or_compute<T: Copy>(
        &self,
        store: &LayerStore<T>,
        chunk: ChunkPos,
        compute: impl FnOnce() -> T,
    ) -> T {
        if !self.enabled {
            return compute();
        }

        let key = self.region_of(chunk);
        if self.completed.contains(&key) {
            self.bypassed.fetch_add(1, Ordering::Relaxed);
            return compute();
        }

        if let Some(hit) = store.get(key, chunk) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }

        // First touch makes the region active.
        if !self.tracked.contains_key(&key) {
            self.tracked.entry(key).or_default();
        }

        // No map guard may be held here: `compute` samples other layers,
        // which re-enter this cache.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        let stored = store.insert(key, chunk, value);

        // The region may have completed while we were computing.
        if self.completed.contains(&key) {
            store.remove_region(key);
            self.tracked.remove(&key);
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with(region_size: i32, threshold: usize) -> RegionCache {
        RegionCache::new(
            PlanetId(1),
            &CacheConfig {
                region_size_chunks: region_size,
                completion_threshold: threshold,
                ..Default::default()
            },
            true,
        )
    }

    #[test]
    fn test_unseen_then_active_on_first_touch() {
        let cache = cache_with(32, 1024);
        let key = cache.region_key(0, 0);
        assert_eq!(cache.state(key), RegionState::Unseen);

        cache.mark_chunk_generated(ChunkPos::new(3, 4));
        assert_eq!(cache.state(key), RegionState::Active);
        assert_eq!(cache.generated_chunks(key), 1);
    }

    #[test]
    fn test_first_cache_miss_activates_region() {
        let cache = cache_with(32, 1024);
        let chunk = ChunkPos::new(40, 40);
        cache.temperature(chunk, || 5.0);
        assert_eq!(cache.state(cache.region_of(chunk)), RegionState::Active);
        assert_eq!(cache.generated_chunks(cache.region_of(chunk)), 0);
    }

    #[test]
    fn test_mark_region_active() {
        let cache = cache_with(32, 1024);
        assert_eq!(cache.mark_region_active(2, -1), RegionState::Active);
        assert_eq!(cache.state(cache.region_key(2, -1)), RegionState::Active);
        assert_eq!(cache.active_region_count(), 1);
    }

    #[test]
    fn test_duplicate_chunks_counted_once() {
        let cache = cache_with(2, 4);
        for _ in 0..10 {
            assert_eq!(
                cache.mark_chunk_generated(ChunkPos::new(0, 0)),
                RegionState::Active
            );
        }
        assert_eq!(cache.generated_chunks(cache.region_key(0, 0)), 1);
    }

    #[test]
    fn test_completion_purges_caches() {
        let cache = cache_with(2, 4);
        let key = cache.region_key(0, 0);

        for x in 0..2 {
            for z in 0..2 {
                cache.temperature(ChunkPos::new(x, z), || 20.0);
                cache.terrain(ChunkPos::new(x, z), || 70.0);
            }
        }
        assert_eq!(cache.cached_entries(CacheLayer::Temperature, key), 4);
        assert_eq!(cache.cached_chunks(key), 8);

        assert_eq!(cache.mark_chunk_generated(ChunkPos::new(0, 0)), RegionState::Active);
        assert_eq!(cache.mark_chunk_generated(ChunkPos::new(0, 1)), RegionState::Active);
        assert_eq!(cache.mark_chunk_generated(ChunkPos::new(1, 0)), RegionState::Active);
        assert_eq!(
            cache.mark_chunk_generated(ChunkPos::new(1, 1)),
            RegionState::Completed
        );

        assert_eq!(cache.state(key), RegionState::Completed);
        assert_eq!(cache.cached_chunks(key), 0);
        assert_eq!(cache.generated_chunks(key), 0);

        let stats = cache.stats();
        assert_eq!(stats.completed_regions, 1);
        assert_eq!(stats.purged_entries, 8);
    }

    #[test]
    fn test_completed_region_bypasses_cache() {
        let cache = cache_with(1, 1);
        let chunk = ChunkPos::new(5, 5);
        cache.mark_chunk_generated(chunk);

        let mut calls = 0;
        for _ in 0..3 {
            let v = cache.moisture(chunk, || {
                calls += 1;
                0.5
            });
            assert_eq!(v, 0.5);
        }
        assert_eq!(calls, 3);
        assert_eq!(cache.cached_chunks(cache.region_of(chunk)), 0);
        assert_eq!(cache.stats().bypassed, 3);
    }

    #[test]
    fn test_hits_do_not_recompute() {
        let cache = cache_with(32, 1024);
        let chunk = ChunkPos::new(-4, 9);
        let mut calls = 0;
        for _ in 0..5 {
            cache.habitability(chunk, || {
                calls += 1;
                0.8
            });
        }
        assert_eq!(calls, 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 4);
    }

    #[test]
    fn test_first_value_is_never_overwritten() {
        let store = LayerStore::<f64>::new();
        let key = RegionKey {
            planet: PlanetId(0),
            region_x: 0,
            region_z: 0,
        };
        assert_eq!(store.insert(key, ChunkPos::new(0, 0), 1.0), 1.0);
        assert_eq!(store.insert(key, ChunkPos::new(0, 0), 2.0), 1.0);
        assert_eq!(store.get(key, ChunkPos::new(0, 0)), Some(1.0));
    }

    #[test]
    fn test_inactive_keeps_partial_cache() {
        let cache = cache_with(32, 1024);
        let chunk = ChunkPos::new(1, 1);
        cache.mark_region_active(0, 0);
        cache.mark_chunk_generated(chunk);
        cache.wind(chunk, || WindSample::calm(0.3));

        cache.mark_region_inactive(0, 0);
        let key = cache.region_key(0, 0);
        assert_eq!(cache.active_region_count(), 0);
        assert_eq!(cache.cached_entries(CacheLayer::Wind, key), 1);
        assert_eq!(cache.generated_chunks(key), 1);
        assert_eq!(cache.state(key), RegionState::Active);
    }

    #[test]
    fn test_completed_region_ignores_activation() {
        let cache = cache_with(1, 1);
        cache.mark_chunk_generated(ChunkPos::new(0, 0));
        assert_eq!(cache.mark_region_active(0, 0), RegionState::Completed);
        assert_eq!(
            cache.mark_chunk_generated(ChunkPos::new(0, 0)),
            RegionState::Completed
        );
        assert_eq!(cache.stats().completed_regions, 1);
    }

    #[test]
    fn test_disabled_cache_always_recomputes() {
        let cache = RegionCache::new(PlanetId(1), &CacheConfig::default(), false);
        let mut calls = 0;
        for _ in 0..4 {
            cache.temperature(ChunkPos::new(0, 0), || {
                calls += 1;
                1.0
            });
        }
        assert_eq!(calls, 4);
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_clear_resets_everything() {
        let cache = cache_with(1, 1);
        cache.terrain(ChunkPos::new(9, 9), || 1.0);
        cache.mark_chunk_generated(ChunkPos::new(0, 0));
        cache.clear();
        assert_eq!(cache.state(cache.region_key(0, 0)), RegionState::Unseen);
        assert_eq!(cache.state(cache.region_key(9, 9)), RegionState::Unseen);
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
