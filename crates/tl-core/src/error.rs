use thiserror::Error;

pub type TlResult<T> = Result<T, TlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
