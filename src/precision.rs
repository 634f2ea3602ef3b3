//! Precision constants for geometric comparisons.
//!
//! These are the defaults behind [`crate::SolverConfig`]. The tangency
//! matrices themselves are compared exactly; tolerances only apply to
//! quantities derived from the floating-point centroids.

/// Confusion tolerance, relative to the triangle scale.
/// A triangle whose doubled area is below `CONFUSION * longest_side²`
/// is treated as collinear.
/// Value: 1.0e-7
pub const CONFUSION: f64 = 1.0e-7;

/// How far a law-of-cosines argument may overshoot [-1, 1] from rounding
/// before it is reported instead of clamped.
/// Value: 1.0e-9
pub const COSINE_SLACK: f64 = 1.0e-9;

/// Computational tolerance at machine epsilon level.
/// For low-level numerical comparisons, NOT geometric comparisons.
pub const COMPUTATIONAL: f64 = f64::EPSILON;

/// Tolerance for substitution checks (`M · r ≈ d`, circle tangency).
/// Value: CONFUSION * 10 = 1.0e-6
pub const APPROXIMATION: f64 = CONFUSION * 10.0;

/// Clamp a cosine that overshoots [-1, 1] by at most `slack`.
/// Returns `None` for NaN or anything further out.
#[inline]
pub fn clamp_cosine(value: f64, slack: f64) -> Option<f64> {
    if !value.is_finite() || value.abs() > 1.0 + slack {
        return None;
    }
    Some(value.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_ordering() {
        assert!(COMPUTATIONAL < COSINE_SLACK);
        assert!(COSINE_SLACK < CONFUSION);
        assert!(CONFUSION < APPROXIMATION);
    }

    #[test]
    fn test_clamp_cosine_inside() {
        assert_eq!(clamp_cosine(0.5, COSINE_SLACK), Some(0.5));
        assert_eq!(clamp_cosine(-1.0, COSINE_SLACK), Some(-1.0));
    }

    #[test]
    fn test_clamp_cosine_rounding_overshoot() {
        assert_eq!(clamp_cosine(1.0 + 1e-12, COSINE_SLACK), Some(1.0));
        assert_eq!(clamp_cosine(-1.0 - 1e-12, COSINE_SLACK), Some(-1.0));
    }

    #[test]
    fn test_clamp_cosine_rejects() {
        assert_eq!(clamp_cosine(1.1, COSINE_SLACK), None);
        assert_eq!(clamp_cosine(f64::NAN, COSINE_SLACK), None);
        assert_eq!(clamp_cosine(f64::INFINITY, COSINE_SLACK), None);
    }
}
