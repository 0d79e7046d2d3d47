//! tl-fluids: the thermodynamic property engine of thermolab.
//!
//! Provides:
//! - Steam saturation table and interpolation
//! - Antoine vapor pressures and a small component database
//! - Ideal-gas and Peng-Robinson state calculators
//! - The water/steam region resolver
//! - Binary mixture VLE with a Margules activity model
//! - Unit-tagged input parsing and property sweeps
//!
//! # Conventions
//!
//! Everything works on plain `f64` in one basis: kPa, K, m³/kg, kJ/kg and
//! kJ/(kg·K). State calculators never fail. Out-of-range inputs are clamped
//! or floored and the result degrades gracefully; a `warn!` is emitted when a
//! clamp changes the answer.
//!
//! # Example
//!
//! ```
//! use tl_fluids::{Phase, Substance, StateModel, water_state};
//!
//! let steam = water_state(Some(101.325), Some(423.15), None);
//! assert_eq!(steam.phase, Phase::Superheated);
//!
//! let air = Substance::AIR.state(101.325, 298.15);
//! assert!(air.h.abs() < 1e-12);
//! ```

pub mod antoine;
pub mod component;
pub mod cubic;
pub mod eos;
pub mod error;
pub mod ideal_gas;
pub mod mixture;
pub mod model;
pub mod saturation;
pub mod state;
pub mod sweeps;
pub mod units;
pub mod water;

// Re-exports for ergonomics
pub use antoine::{AntoineParams, antoine_psat, mmhg_to_kpa};
pub use component::{Component, ComponentData, default_margules};
pub use cubic::{CubicRoot, CubicRootSolver, FixedNewton};
pub use eos::{CriticalProps, EosModel, PengRobinson, eos_state};
pub use error::{FluidError, FluidResult};
pub use ideal_gas::{GasProperties, ideal_gas_state};
pub use mixture::{
    ActivityModel, MixtureCurve, MixturePoint, UNSTABLE_MARGULES, mixture_curve, raoult_curve,
};
pub use model::{StateModel, Substance};
pub use saturation::{SatKey, SaturationRow, saturation_lookup};
pub use state::{Phase, SpecEnthalpy, SpecEntropy, SpecHeatCapacity, ThermoState};
pub use sweeps::{SweepDefinition, SweepType, isotherm, saturation_dome, water_isobar};
pub use units::{Quantity, UnitError, UnitValue, parse_quantity};
pub use water::{SaturationBasis, WaterInput, resolve_water, water_state};
