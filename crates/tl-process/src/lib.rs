//! tl-process: process balances built on the tl-fluids property engine.
//!
//! Provides:
//! - Power-cycle chaining (pump/boiler/turbine/condenser style loops)
//! - Steady-flow device balances (turbine, compressor, nozzle, valve, ...)
//! - Closed-system first law for isothermal/isobaric/isochoric processes
//! - A one-unknown closed-system energy-balance solver
//! - Second-law audit of a heat engine
//!
//! All inputs are in K, kPa, kg and kJ. Every calculation is a pure function
//! of its arguments; argument errors are reported as [`ProcessError`].
//!
//! # Example
//!
//! ```
//! use tl_process::{CycleDefinition, run_cycle};
//!
//! let result = run_cycle(&CycleDefinition::rankine()).unwrap();
//! println!("η = {:.3}", result.thermal_efficiency);
//! ```

pub mod common;
pub mod cycle;
pub mod error;
pub mod first_law;
pub mod second_law;
pub mod solver;
pub mod steady_flow;

// Re-exports
pub use cycle::{
    CycleDefinition, CyclePoint, CycleResult, CycleStage, Device, StageKind, run_cycle, run_stages,
};
pub use error::{ProcessError, ProcessResult};
pub use first_law::{ClosedProcess, ClosedResult, ClosedSystem, WorkConvention, closed_process};
pub use second_law::{EngineAudit, HeatEngine, audit_engine};
pub use solver::{BalanceInputs, BalanceSolution, Scenario, Unknown, solve_balance};
pub use steady_flow::{FlowDevice, FlowResult, FlowSpec, solve_device};
