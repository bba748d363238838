//! Continuous blending operators and deterministic math.
//!
//! Every threshold in the terrain and climate layers goes through
//! [`smoothstep`] so that no layer introduces a first-derivative
//! discontinuity (visible as terracing). Vector lengths go through `libm` so
//! results do not depend on the platform libc.

/// Weight applied to positive overlay contributions.
pub const OVERLAY_POSITIVE_WEIGHT: f64 = 0.7;

/// Weight applied to negative overlay contributions (a 10% discount).
pub const OVERLAY_NEGATIVE_WEIGHT: f64 = 0.9;

/// Cubic S-curve `3t² − 2t³` with `t = (x − edge0) / (edge1 − edge0)` clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Overlay a layer onto a base value.
///
/// Positive layer values are added at 70% weight, negative values at 90%.
/// Both branches meet at `layer == 0`, so the result is continuous.
#[inline]
pub fn overlay(base: f64, layer: f64) -> f64 {
    if layer >= 0.0 {
        base + layer * OVERLAY_POSITIVE_WEIGHT
    } else {
        base + layer * OVERLAY_NEGATIVE_WEIGHT
    }
}

/// Map a noise value from `[-1, 1]` to `[0, 1]`.
#[inline]
pub fn to_unit(noise: f64) -> f64 {
    ((noise + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Deterministic 2D vector length using libm.
#[inline]
pub fn det_length(x: f64, z: f64) -> f64 {
    libm::sqrt(x * x + z * z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < EPSILON);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let mut prev = smoothstep(0.2, 0.8, 0.0);
        for i in 1..=1000 {
            let v = smoothstep(0.2, 0.8, i as f64 / 1000.0);
            assert!(v >= prev, "smoothstep decreased at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_smoothstep_has_flat_shoulders() {
        // Slope near each edge must vanish so thresholds never kink.
        let h = 1e-6;
        let slope_lo = (smoothstep(0.0, 1.0, h) - smoothstep(0.0, 1.0, 0.0)) / h;
        let slope_hi = (smoothstep(0.0, 1.0, 1.0) - smoothstep(0.0, 1.0, 1.0 - h)) / h;
        assert!(slope_lo < 1e-4, "slope at lower edge {slope_lo}");
        assert!(slope_hi < 1e-4, "slope at upper edge {slope_hi}");
    }

    #[test]
    fn test_overlay_is_continuous_at_zero() {
        let base = 12.5;
        let left = overlay(base, -1e-9);
        let right = overlay(base, 1e-9);
        assert!((left - right).abs() < 1e-8);
        assert_eq!(overlay(base, 0.0), base);
    }

    #[test]
    fn test_overlay_weights() {
        assert!((overlay(10.0, 10.0) - 17.0).abs() < EPSILON);
        assert!((overlay(10.0, -10.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_and_to_unit() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(to_unit(-1.0), 0.0);
        assert_eq!(to_unit(1.0), 1.0);
        assert_eq!(to_unit(0.0), 0.5);
    }

    #[test]
    fn test_det_length() {
        assert!((det_length(3.0, 4.0) - 5.0).abs() < EPSILON);
        assert_eq!(det_length(0.0, -2.0), 2.0);
    }
}
