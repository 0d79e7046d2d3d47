//! tl-core: numeric foundation for thermolab.
//!
//! Contains:
//! - units (uom SI types, constructors, engine-basis conversions)
//! - numeric (Real + tolerances + float guards + interpolation)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TlError, TlResult};
pub use numeric::*;
pub use units::*;
