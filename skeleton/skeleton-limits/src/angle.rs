//! Angle wrapping and bound comparison.
//!
//! Both evaluator paths go through [`bound_excess`], so the batched group
//! matrices and the per-frame breakdown cannot drift apart numerically.

use std::f64::consts::{PI, TAU};

/// Wrap an angle into the canonical range `(-π, π]`.
///
/// Uses a Euclidean remainder so negative inputs land in the same range as
/// positive ones. Angles already in range are returned unchanged.
///
/// # Example
///
/// ```
/// use skeleton_limits::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(4.0) - (4.0 - 2.0 * PI)).abs() < 1e-12);
/// assert!((normalize_angle(-4.0) - (2.0 * PI - 4.0)).abs() < 1e-12);
/// assert_eq!(normalize_angle(-PI), PI);
/// ```
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // -π and π are the same rotation; keep the closed end of the range.
    if wrapped <= -PI { PI } else { wrapped }
}

/// Distance by which a normalized angle falls outside `[lower - tol, upper + tol]`.
///
/// Returns 0 inside the expanded range. The lower and upper excesses are
/// mutually exclusive for `lower <= upper` and `tol >= 0`, so the sum of their
/// magnitudes is whichever one is nonzero.
#[must_use]
pub fn bound_excess(normalized: f64, lower: f64, upper: f64, tolerance_rad: f64) -> f64 {
    let lower = lower - tolerance_rad;
    let upper = upper + tolerance_rad;

    let exceed_lower = if normalized < lower {
        normalized - lower
    } else {
        0.0
    };
    let exceed_upper = if normalized > upper {
        normalized - upper
    } else {
        0.0
    };

    exceed_lower.abs() + exceed_upper.abs()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_in_range_unchanged() {
        for angle in [0.0, 0.5, -0.5, 3.0, -3.0, PI] {
            assert_eq!(normalize_angle(angle), angle);
        }
    }

    #[test]
    fn test_positive_wrap() {
        assert_relative_eq!(normalize_angle(4.0), 4.0 - TAU, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(TAU), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_wrap() {
        // Truncating remainder would leave these below -π.
        assert_relative_eq!(normalize_angle(-4.0), TAU - 4.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-TAU), 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-10.0), -10.0 + 2.0 * TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_range_endpoints() {
        assert_eq!(normalize_angle(-PI), PI);
        assert_eq!(normalize_angle(PI), PI);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-12);
        assert!(normalize_angle(-3.0 * PI) > -PI);
    }

    #[test]
    fn test_idempotent() {
        for angle in [-100.0, -7.5, -4.0, -1.0, 0.0, 2.0, 4.0, 9.9, 1234.5] {
            let once = normalize_angle(angle);
            assert_eq!(normalize_angle(once), once);
            assert!(once > -PI && once <= PI);
        }
    }

    #[test]
    fn test_excess_inside() {
        assert_eq!(bound_excess(0.5, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(bound_excess(0.0, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(bound_excess(1.0, 0.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_excess_below_and_above() {
        assert_relative_eq!(bound_excess(-0.25, 0.0, 1.0, 0.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(bound_excess(1.5, 0.0, 1.0, 0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_excess_tolerance_band() {
        let tol = 5.0_f64.to_radians();
        assert_eq!(bound_excess(1.0 + tol * 0.5, 0.0, 1.0, tol), 0.0);
        assert_relative_eq!(bound_excess(1.2, 0.0, 1.0, tol), 0.2 - tol, epsilon = 1e-12);
        assert_relative_eq!(bound_excess(-0.2, 0.0, 1.0, tol), 0.2 - tol, epsilon = 1e-12);
    }

    #[test]
    fn test_excess_degenerate_bounds() {
        assert_eq!(bound_excess(0.3, 0.3, 0.3, 0.0), 0.0);
        assert_relative_eq!(bound_excess(0.4, 0.3, 0.3, 0.0), 0.1, epsilon = 1e-12);
    }
}
