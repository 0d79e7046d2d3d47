//! Error types for process calculations.

use thiserror::Error;
use tl_core::TlError;
use tl_fluids::FluidError;

/// Errors that can occur during process calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The balance has no unique solution for the requested unknown.
    #[error("Indeterminate: {what}")]
    Indeterminate { what: &'static str },
}

pub type ProcessResult<T> = Result<T, ProcessError>;

impl From<ProcessError> for TlError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::Fluid(inner) => inner.into(),
            ProcessError::InvalidArg { what } => TlError::InvalidArg {
                what: what.to_string(),
            },
            ProcessError::Indeterminate { what } => TlError::Invariant {
                what: what.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProcessError::Indeterminate { what: "zero temperature change" };
        assert!(err.to_string().contains("zero temperature change"));
    }

    #[test]
    fn error_conversion() {
        let err = ProcessError::InvalidArg { what: "efficiency" };
        let tl: TlError = err.into();
        assert!(matches!(tl, TlError::InvalidArg { .. }));

        let fluid: ProcessError = FluidError::InvalidArg { what: "model" }.into();
        assert!(matches!(fluid, ProcessError::Fluid(_)));
    }
}
