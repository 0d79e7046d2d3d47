//! Fluid property errors.
//!
//! The state calculators themselves never fail; they clamp and degrade. Errors
//! only come from looking things up by name, parsing user text, and malformed
//! sweep definitions.

use crate::units::UnitError;
use tl_core::TlError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur around fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Name did not match any entry of the component database.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Unit text could not be parsed.
    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    /// Sweep definition is unusable.
    #[error("Invalid sweep: {what}")]
    Sweep { what: &'static str },
}

impl From<FluidError> for TlError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::UnknownComponent { name } => TlError::InvalidArg {
                what: format!("unknown component '{name}'"),
            },
            FluidError::InvalidArg { what } => TlError::InvalidArg {
                what: format!("invalid fluid argument: {what}"),
            },
            FluidError::Unit(e) => TlError::InvalidArg {
                what: e.to_string(),
            },
            FluidError::Sweep { what } => TlError::InvalidArg {
                what: format!("invalid sweep: {what}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::UnknownComponent {
            name: "Unobtainium".into(),
        };
        assert!(err.to_string().contains("Unobtainium"));

        let err = FluidError::Sweep {
            what: "need at least 2 points",
        };
        assert!(err.to_string().contains("2 points"));
    }

    #[test]
    fn error_to_tl_error() {
        let fluid_err = FluidError::InvalidArg { what: "step" };
        let tl_err: TlError = fluid_err.into();
        assert!(matches!(tl_err, TlError::InvalidArg { .. }));
    }
}
