//! Argument checks shared by the process balances.

use crate::error::{ProcessError, ProcessResult};
use tl_core::numeric::ensure_finite;

/// Ensure a value is finite.
pub fn check_finite(value: f64, what: &'static str) -> ProcessResult<f64> {
    ensure_finite(value, what).map_err(|_| ProcessError::InvalidArg { what })
}

/// Efficiencies live in (0, 1].
pub fn check_efficiency(eta: f64, what: &'static str) -> ProcessResult<f64> {
    if eta > 0.0 && eta <= 1.0 {
        Ok(eta)
    } else {
        Err(ProcessError::InvalidArg { what })
    }
}

/// Strictly positive and finite.
pub fn check_positive(value: f64, what: &'static str) -> ProcessResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ProcessError::InvalidArg { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_bounds() {
        assert!(check_efficiency(1.0, "eta").is_ok());
        assert!(check_efficiency(0.85, "eta").is_ok());
        assert!(check_efficiency(0.0, "eta").is_err());
        assert!(check_efficiency(1.01, "eta").is_err());
        assert!(check_efficiency(f64::NAN, "eta").is_err());
    }

    #[test]
    fn positivity() {
        assert!(check_positive(1e-9, "p").is_ok());
        assert!(check_positive(0.0, "p").is_err());
        assert!(check_positive(f64::INFINITY, "p").is_err());
        assert!(check_finite(f64::NAN, "q").is_err());
        assert_eq!(check_finite(-3.0, "q"), Ok(-3.0));
    }
}
