//! Closed-system energy-balance solver: `Q − W = m·cv·(T2 − T1)` for one
//! unknown.

use crate::error::{ProcessError, ProcessResult};
use serde::{Deserialize, Serialize};
use tl_fluids::Substance;
use tracing::debug;

/// Kind of system being analysed. Carried as a label only; the balance is
/// the same for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    PistonCylinder,
    NozzleDiffuser,
    TurbineCompressor,
    HeatExchanger,
}

impl Scenario {
    pub fn label(self) -> &'static str {
        match self {
            Scenario::PistonCylinder => "Piston-Cylinder (Closed)",
            Scenario::NozzleDiffuser => "Nozzle/Diffuser (Open)",
            Scenario::TurbineCompressor => "Turbine/Compressor (Open)",
            Scenario::HeatExchanger => "Heat Exchanger (Open)",
        }
    }
}

/// Variable to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unknown {
    T1,
    T2,
    Mass,
    Heat,
    Work,
}

impl std::str::FromStr for Unknown {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t1" => Ok(Unknown::T1),
            "t2" => Ok(Unknown::T2),
            "m" | "mass" => Ok(Unknown::Mass),
            "q" | "heat" => Ok(Unknown::Heat),
            "w" | "work" => Ok(Unknown::Work),
            _ => Err(ProcessError::InvalidArg {
                what: "unknown must be one of t1, t2, mass, heat, work",
            }),
        }
    }
}

/// Known quantities. The one named by `unknown` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceInputs {
    #[serde(default)]
    pub scenario: Scenario,
    pub substance: Substance,
    pub unknown: Unknown,
    /// [K]
    pub t1_k: f64,
    /// [K]
    pub t2_k: f64,
    pub mass_kg: f64,
    /// Heat added [kJ]
    pub q_kj: f64,
    /// Work done by the system [kJ]
    pub w_kj: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSolution {
    pub unknown: Unknown,
    pub value: f64,
    /// Unit of `value` in the engine basis.
    pub unit: &'static str,
    pub equation: &'static str,
}

/// Solve the closed-system balance for the requested unknown.
pub fn solve_balance(inputs: &BalanceInputs) -> ProcessResult<BalanceSolution> {
    let cv = inputs.substance.cv();
    let net = inputs.q_kj - inputs.w_kj;
    let m_cv = inputs.mass_kg * cv;
    let dt = inputs.t2_k - inputs.t1_k;

    let (value, unit, equation) = match inputs.unknown {
        Unknown::T2 => {
            if m_cv == 0.0 {
                return Err(ProcessError::Indeterminate {
                    what: "zero heat capacity (m·cv = 0)",
                });
            }
            (inputs.t1_k + net / m_cv, "K", "T₂ = T₁ + (Q - W) / (m · Cᵥ)")
        }
        Unknown::T1 => {
            if m_cv == 0.0 {
                return Err(ProcessError::Indeterminate {
                    what: "zero heat capacity (m·cv = 0)",
                });
            }
            (inputs.t2_k - net / m_cv, "K", "T₁ = T₂ - (Q - W) / (m · Cᵥ)")
        }
        Unknown::Mass => {
            if dt == 0.0 {
                return Err(ProcessError::Indeterminate {
                    what: "mass is undefined when T2 = T1",
                });
            }
            (net / (cv * dt), "kg", "m = (Q - W) / (Cᵥ · ΔT)")
        }
        Unknown::Heat => (inputs.w_kj + m_cv * dt, "kJ", "Q = W + m · Cᵥ · (T₂ - T₁)"),
        Unknown::Work => (inputs.q_kj - m_cv * dt, "kJ", "W = Q - m · Cᵥ · (T₂ - T₁)"),
    };

    if !value.is_finite() {
        return Err(ProcessError::InvalidArg {
            what: "balance inputs must be finite",
        });
    }

    debug!(scenario = inputs.scenario.label(), unknown = ?inputs.unknown, value, "energy balance");

    Ok(BalanceSolution {
        unknown: inputs.unknown,
        value,
        unit,
        equation,
    })
}
