//! Deterministic coherent noise, seeded once per planet.
//!
//! A single simplex generator backs every field on a planet. Independent
//! fields are taken as separate 3D slices of that generator (one slice per
//! [`NoiseChannel`]), so the planet seed alone determines every layer and two
//! channels never correlate.

use noise::{NoiseFn, Simplex};

/// Named noise field. Each channel samples its own slice of the planet noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    /// Major plate boundaries.
    PrimaryFault,
    /// Minor fractures.
    SecondaryFault,
    /// Jitter that keeps fault lines from running straight.
    FaultJitter,
    /// Continental mass and coastlines.
    Continental,
    /// Mountain crests.
    Mountain,
    /// Smooth large-scale field gating mountain intensity.
    MountainGate,
    /// Erosion metric.
    Erosion,
    /// Valley carving.
    Valley,
    /// Fine surface detail.
    Detail,
    /// Local temperature variation.
    Temperature,
    /// Local wind variation.
    Wind,
    /// Local moisture variation.
    Moisture,
    /// Local habitability variation.
    Habitability,
}

impl NoiseChannel {
    /// Every channel, in slice order.
    pub const ALL: [NoiseChannel; 13] = [
        NoiseChannel::PrimaryFault,
        NoiseChannel::SecondaryFault,
        NoiseChannel::FaultJitter,
        NoiseChannel::Continental,
        NoiseChannel::Mountain,
        NoiseChannel::MountainGate,
        NoiseChannel::Erosion,
        NoiseChannel::Valley,
        NoiseChannel::Detail,
        NoiseChannel::Temperature,
        NoiseChannel::Wind,
        NoiseChannel::Moisture,
        NoiseChannel::Habitability,
    ];

    /// Offset of this channel's slice along the noise's third axis.
    ///
    /// Slices are spaced far apart and off-lattice so neighbouring channels
    /// share no gradient cells.
    pub fn slice(self) -> f64 {
        let index = self as u32 as f64;
        index * 173.37 + 11.13
    }
}

/// Fold a 64-bit planet seed into the 32-bit seed the simplex generator takes.
pub fn fold_seed(seed: u64) -> u32 {
    ((seed >> 32) ^ (seed & 0xFFFF_FFFF)) as u32
}

/// Planet-wide deterministic noise primitive.
#[derive(Clone)]
pub struct NoiseSource {
    noise: Simplex,
    seed: u64,
}

impl NoiseSource {
    /// Create the noise source for a planet seed.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: Simplex::new(fold_seed(seed)),
            seed,
        }
    }

    /// The planet seed this source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw 2D simplex noise in `[-1, 1]`.
    #[inline]
    pub fn sample_2d(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x, z])
    }

    /// Raw 3D simplex noise in `[-1, 1]`.
    #[inline]
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get([x, y, z])
    }

    /// Sample a channel at already-scaled coordinates. Range `[-1, 1]`.
    #[inline]
    pub fn channel(&self, channel: NoiseChannel, x: f64, z: f64) -> f64 {
        self.sample_3d(x, channel.slice(), z)
    }

    /// Ridge noise: `|channel|`, zero along ridge lines and rising away from them.
    #[inline]
    pub fn ridge(&self, channel: NoiseChannel, x: f64, z: f64) -> f64 {
        self.channel(channel, x, z).abs()
    }

    /// Fractal sum of `octaves` octaves with the given lacunarity and persistence,
    /// normalized by the amplitude sum so the result stays in `[-1, 1]`.
    pub fn fractal(
        &self,
        channel: NoiseChannel,
        x: f64,
        z: f64,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut norm = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..octaves {
            total += self.channel(channel, x * frequency, z * frequency) * amplitude;
            norm += amplitude;
            frequency *= lacunarity;
            amplitude *= persistence;
        }

        if norm == 0.0 { 0.0 } else { total / norm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_values() {
        let a = NoiseSource::new(42);
        let b = NoiseSource::new(42);
        for i in 0..100 {
            let x = i as f64 * 0.37;
            let z = i as f64 * -0.91;
            assert_eq!(
                a.channel(NoiseChannel::Continental, x, z),
                b.channel(NoiseChannel::Continental, x, z)
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseSource::new(1);
        let b = NoiseSource::new(999);
        let differs = (0..50).any(|i| {
            let x = i as f64 * 0.53 + 0.1;
            a.sample_2d(x, x * 0.7) != b.sample_2d(x, x * 0.7)
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn test_fold_seed_uses_high_bits() {
        assert_ne!(fold_seed(1), fold_seed(1 | (1 << 40)));
        assert_eq!(fold_seed(7), 7);
    }

    #[test]
    fn test_channels_are_decorrelated() {
        let source = NoiseSource::new(7);
        let mut identical = 0;
        for i in 0..200 {
            let x = i as f64 * 0.173 + 0.5;
            let z = i as f64 * 0.311 - 0.25;
            let a = source.channel(NoiseChannel::Temperature, x, z);
            let b = source.channel(NoiseChannel::Moisture, x, z);
            if (a - b).abs() < 1e-9 {
                identical += 1;
            }
        }
        assert!(identical < 5, "Channels should not mirror each other");
    }

    #[test]
    fn test_channel_slices_distinct() {
        let mut slices: Vec<f64> = NoiseChannel::ALL.iter().map(|c| c.slice()).collect();
        slices.sort_by(f64::total_cmp);
        slices.dedup();
        assert_eq!(slices.len(), NoiseChannel::ALL.len());
    }

    #[test]
    fn test_ridge_is_non_negative() {
        let source = NoiseSource::new(3);
        for i in 0..500 {
            let v = source.ridge(NoiseChannel::Valley, i as f64 * 0.07, i as f64 * 0.05);
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn test_fractal_stays_in_range() {
        let source = NoiseSource::new(11);
        for i in 0..500 {
            let v = source.fractal(
                NoiseChannel::Continental,
                i as f64 * 0.031,
                i as f64 * 0.017,
                4,
                3.0,
                0.5,
            );
            assert!(v.abs() <= 1.05, "fractal out of range: {v}");
        }
    }

    #[test]
    fn test_fractal_zero_octaves_is_zero() {
        let source = NoiseSource::new(11);
        assert_eq!(
            source.fractal(NoiseChannel::Detail, 1.0, 2.0, 0, 2.0, 0.5),
            0.0
        );
    }
}
