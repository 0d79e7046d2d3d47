//! Closed-system first law: one constrained process on a fixed mass.
//!
//! The final state follows from the process constraint:
//!
//! ```text
//! isothermal:  (P2, T1)
//! isobaric:    (P1, T1·P2/P1)
//! isochoric:   (P2, T1·P2/P1)
//! ```
//!
//! `P2` is the pressure the user sets; for the isobaric case it only drives
//! the temperature ratio.

use crate::common::check_positive;
use crate::error::ProcessResult;
use serde::{Deserialize, Serialize};
use tl_fluids::{StateModel, Substance, ThermoState};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedProcess {
    Isothermal,
    Isobaric,
    Isochoric,
}

impl std::str::FromStr for ClosedProcess {
    type Err = crate::ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isothermal" | "t" => Ok(ClosedProcess::Isothermal),
            "isobaric" | "p" => Ok(ClosedProcess::Isobaric),
            "isochoric" | "v" => Ok(ClosedProcess::Isochoric),
            _ => Err(crate::ProcessError::InvalidArg {
                what: "process must be isothermal, isobaric or isochoric",
            }),
        }
    }
}

/// Sign convention for reported work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkConvention {
    /// `Q − W = ΔU`, work done by the system is positive.
    #[default]
    BySystem,
    /// `Q + W = ΔU`, work done on the system is positive.
    OnSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedSystem {
    pub substance: Substance,
    pub process: ClosedProcess,
    pub mass_kg: f64,
    pub p1_kpa: f64,
    pub t1_k: f64,
    pub p2_kpa: f64,
    #[serde(default)]
    pub convention: WorkConvention,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedResult {
    pub initial: ThermoState,
    pub final_state: ThermoState,
    /// [kJ]
    pub delta_u: f64,
    /// Heat added [kJ]
    pub q: f64,
    /// Work in the requested convention [kJ]
    pub w: f64,
}

/// Apply the first law to a constrained closed-system process.
pub fn closed_process(sys: &ClosedSystem) -> ProcessResult<ClosedResult> {
    let m = check_positive(sys.mass_kg, "mass must be positive")?;
    let p1 = check_positive(sys.p1_kpa, "initial pressure must be positive")?;
    let t1 = check_positive(sys.t1_k, "initial temperature must be positive")?;
    let p2 = check_positive(sys.p2_kpa, "final pressure must be positive")?;

    let (p_final, t_final) = match sys.process {
        ClosedProcess::Isothermal => (p2, t1),
        ClosedProcess::Isobaric => (p1, t1 * p2 / p1),
        ClosedProcess::Isochoric => (p2, t1 * p2 / p1),
    };

    let substance = sys.substance;
    let initial = substance.state(p1, t1);
    let final_state = substance.state(p_final, t_final);

    let delta_u = m * (final_state.u - initial.u);
    let w_out = match sys.process {
        ClosedProcess::Isothermal => {
            m * substance.gas_constant() * t1 * (final_state.v / initial.v).ln()
        }
        ClosedProcess::Isobaric => p1 * m * (final_state.v - initial.v),
        ClosedProcess::Isochoric => 0.0,
    };
    let q = delta_u + w_out;
    let w = match sys.convention {
        WorkConvention::BySystem => w_out,
        WorkConvention::OnSystem => -w_out,
    };

    debug!(process = ?sys.process, substance = substance.name(), delta_u, q, w_out, "closed process");

    Ok(ClosedResult {
        initial,
        final_state,
        delta_u,
        q,
        w,
    })
}
