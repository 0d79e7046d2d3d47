use crate::TlError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TlError::NonFinite { what, value: v })
    }
}

/// Raise `v` to at least `floor`.
///
/// Used ahead of divisions and logarithms so that zero or negative inputs
/// degrade to a tiny positive value instead of producing inf/NaN.
#[inline]
pub fn floor_positive(v: Real, floor: Real) -> Real {
    if v > floor { v } else { floor }
}

/// Clamp a value between min and max.
#[inline]
pub fn clamp(value: Real, min: Real, max: Real) -> Real {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation of `y` at `x` between `(x1, y1)` and `(x2, y2)`.
///
/// A degenerate bracket (`x1 == x2`) returns `y1` without dividing.
#[inline]
pub fn lerp(x: Real, x1: Real, x2: Real, y1: Real, y2: Real) -> Real {
    if x1 == x2 {
        return y1;
    }
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn floor_positive_raises_small_values() {
        assert_eq!(floor_positive(0.0, 1e-4), 1e-4);
        assert_eq!(floor_positive(-5.0, 1e-4), 1e-4);
        assert_eq!(floor_positive(2.0, 1e-4), 2.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn lerp_midpoint_and_degenerate_bracket() {
        assert!((lerp(1.5, 1.0, 2.0, 10.0, 20.0) - 15.0).abs() < 1e-12);
        assert_eq!(lerp(7.0, 3.0, 3.0, 42.0, 99.0), 42.0);
    }

    proptest! {
        #[test]
        fn lerp_hits_endpoints(x1 in -1e3f64..1e3, dx in 1e-3f64..1e3, y1 in -1e3f64..1e3, y2 in -1e3f64..1e3) {
            let x2 = x1 + dx;
            prop_assert!((lerp(x1, x1, x2, y1, y2) - y1).abs() < 1e-9);
            prop_assert!((lerp(x2, x1, x2, y1, y2) - y2).abs() < 1e-6 * (1.0 + y2.abs()));
        }
    }
}
