//! Tectonic fault system: discrete volatility levels from fault proximity.
//!
//! Two ridge-noise fields model major plate boundaries and minor fractures.
//! Their minimum is a fault-distance proxy; normalized by the fault thickness
//! it maps to a volatility level between 0 (stable interior) and 5 (on the
//! fault line).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::blend::smoothstep;
use crate::noise_source::{NoiseChannel, NoiseSource};
use crate::profile::PlanetProfile;

/// Normalized-distance upper bounds (inclusive) for levels 5 down to 1.
const VOLATILITY_THRESHOLDS: [(f64, u8); 5] = [(0.02, 5), (0.08, 4), (0.20, 3), (0.45, 2), (1.0, 1)];

/// Secondary fractures run at this multiple of the primary frequency.
const SECONDARY_FREQUENCY_RATIO: f64 = 3.5;
/// Weight applied to the secondary field before taking the minimum.
const SECONDARY_WEIGHT: f64 = 0.6;
/// Jitter runs at this multiple of the primary frequency.
const JITTER_FREQUENCY_RATIO: f64 = 12.0;
/// Relative jitter applied to the fault distance. Smaller than the ratio
/// between adjacent level bands, so jitter moves a sample by at most one level.
const JITTER_AMPLITUDE: f64 = 0.15;

const MIN_THICKNESS: f64 = 50.0;
const MAX_THICKNESS: f64 = 400.0;

/// Highest volatility level.
pub const MAX_VOLATILITY: u8 = 5;

/// Tectonic state of one coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilitySample {
    /// Discrete volatility level in `0..=5`.
    pub level: u8,
    /// Continuous tectonic-activity signal in `[0, 1]`; peaks on fault lines.
    pub activity: f64,
}

/// Map a normalized fault distance to a volatility level.
///
/// Non-finite distances map to 0.
pub fn level_for_normalized_distance(normalized: f64) -> u8 {
    VOLATILITY_THRESHOLDS
        .iter()
        .find(|(limit, _)| normalized <= *limit)
        .map_or(0, |&(_, level)| level)
}

/// Produces volatility levels and the tectonic-activity signal for a planet.
///
/// Results are cached per exact coordinate. The cache has a soft capacity:
/// once full, further coordinates are computed but not stored. Entries are
/// never invalidated.
pub struct TectonicVolatilityManager {
    profile: Arc<PlanetProfile>,
    noise: Arc<NoiseSource>,
    primary_frequency: f64,
    secondary_frequency: f64,
    jitter_frequency: f64,
    thickness: f64,
    cache: DashMap<(i32, i32), VolatilitySample>,
    cached: AtomicUsize,
    capacity: usize,
}

impl TectonicVolatilityManager {
    /// Build the fault system for a planet with a soft cache capacity.
    pub fn new(profile: Arc<PlanetProfile>, noise: Arc<NoiseSource>, capacity: usize) -> Self {
        let activity_scale = 0.5 + profile.tectonic_activity;
        let primary_frequency = activity_scale / (profile.circumference * 0.15);
        let thickness = (profile.circumference * 0.008 * activity_scale)
            .clamp(MIN_THICKNESS, MAX_THICKNESS);

        Self {
            profile,
            noise,
            primary_frequency,
            secondary_frequency: primary_frequency * SECONDARY_FREQUENCY_RATIO,
            jitter_frequency: primary_frequency * JITTER_FREQUENCY_RATIO,
            thickness,
            cache: DashMap::new(),
            cached: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Fault thickness in world units.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Volatility level for a distance (world units) from a fault line.
    pub fn level_for_distance(&self, distance: f64) -> u8 {
        level_for_normalized_distance(distance / self.thickness)
    }

    /// Volatility level at `(x, z)`.
    pub fn volatility_level(&self, x: i32, z: i32) -> u8 {
        self.sample(x, z).level
    }

    /// Tectonic-activity signal at `(x, z)`.
    pub fn tectonic_activity(&self, x: i32, z: i32) -> f64 {
        self.sample(x, z).activity
    }

    /// Cached volatility sample at `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> VolatilitySample {
        if let Some(hit) = self.cache.get(&(x, z)) {
            return *hit;
        }

        let sample = self.compute(x, z);

        if self.cached.load(Ordering::Relaxed) < self.capacity
            && let Entry::Vacant(slot) = self.cache.entry((x, z))
        {
            slot.insert(sample);
            self.cached.fetch_add(1, Ordering::Relaxed);
        }

        sample
    }

    /// Compute the sample without touching the cache.
    pub fn compute(&self, x: i32, z: i32) -> VolatilitySample {
        let normalized = self.normalized_fault_distance(x as f64, z as f64);
        VolatilitySample {
            level: level_for_normalized_distance(normalized),
            activity: self.profile.tectonic_activity * (1.0 - smoothstep(0.0, 1.0, normalized)),
        }
    }

    /// Fault-distance proxy divided by the fault thickness, with jitter.
    fn normalized_fault_distance(&self, x: f64, z: f64) -> f64 {
        self.smooth_fault_distance(x, z) * self.jitter_factor(x, z)
    }

    /// Fault-distance proxy divided by the fault thickness, without jitter.
    fn smooth_fault_distance(&self, x: f64, z: f64) -> f64 {
        let pf = self.primary_frequency;
        let sf = self.secondary_frequency;

        let primary = self.noise.ridge(NoiseChannel::PrimaryFault, x * pf, z * pf);
        let secondary = self.noise.ridge(NoiseChannel::SecondaryFault, x * sf, z * sf);

        let proxy = primary.min(secondary * SECONDARY_WEIGHT);
        let distance = proxy / pf;
        distance / self.thickness
    }

    /// Multiplier in `[1 - JITTER_AMPLITUDE, 1 + JITTER_AMPLITUDE]`.
    ///
    /// A zero distance stays zero and each level band keeps its
    /// proportional width.
    fn jitter_factor(&self, x: f64, z: f64) -> f64 {
        let jf = self.jitter_frequency;
        let jitter = self.noise.channel(NoiseChannel::FaultJitter, x * jf, z * jf);
        1.0 + jitter.clamp(-1.0, 1.0) * JITTER_AMPLITUDE
    }

    /// Number of cached coordinates.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached coordinate.
    pub fn clear(&self) {
        self.cache.clear();
        self.cached.store(0, Ordering::Relaxed);
    }
}
