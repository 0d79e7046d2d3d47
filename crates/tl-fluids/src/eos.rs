//! Equation-of-state calculator: ideal gas or Peng-Robinson.
//!
//! Only `v`, `z`, the phase label and (for Peng-Robinson) the fugacity are
//! meaningful outputs. Departure functions are not integrated, so `u`, `h` and
//! `s` are reported as zero.

use crate::cubic::{CubicRootSolver, FixedNewton};
use crate::state::{Phase, ThermoState};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use tl_core::numeric::floor_positive;
use tracing::debug;

/// Default gas constant for the EOS path (water basis) [kJ/(kg·K)].
pub const R_WATER: f64 = 0.4615;

/// Z below which a Peng-Robinson state is labelled liquid.
pub const Z_LIQUID_MAX: f64 = 0.3;

/// Z above which a Peng-Robinson state is labelled vapor.
pub const Z_VAPOR_MIN: f64 = 0.7;

const P_FLOOR_KPA: f64 = 1e-4;
const T_FLOOR_K: f64 = 1e-3;

/// Critical constants of a component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalProps {
    /// Critical pressure [kPa]
    pub pc_kpa: f64,
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Acentric factor
    pub omega: f64,
}

/// Which equation of state to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EosModel {
    #[default]
    IdealGas,
    PengRobinson,
}

impl std::str::FromStr for EosModel {
    type Err = crate::FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "ideal" | "idealgas" => Ok(EosModel::IdealGas),
            "pr" | "pengrobinson" => Ok(EosModel::PengRobinson),
            _ => Err(crate::FluidError::InvalidArg {
                what: "EOS model must be 'ideal' or 'peng-robinson'",
            }),
        }
    }
}

/// Peng-Robinson parameters evaluated at one (P, T).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrCoefficients {
    pub kappa: f64,
    pub alpha: f64,
    /// Attraction parameter
    pub a: f64,
    /// Co-volume
    pub b: f64,
    /// Dimensionless attraction `aP/(RT)²`
    pub big_a: f64,
    /// Dimensionless co-volume `bP/(RT)`
    pub big_b: f64,
}

impl PrCoefficients {
    pub fn new(p_kpa: f64, t_k: f64, critical: &CriticalProps, r: f64) -> Self {
        let p = floor_positive(p_kpa, P_FLOOR_KPA);
        let t = floor_positive(t_k, T_FLOOR_K);
        let tc = floor_positive(critical.tc_k, T_FLOOR_K);
        let pc = floor_positive(critical.pc_kpa, P_FLOOR_KPA);
        let omega = critical.omega;

        let tr = t / tc;
        let kappa = 0.37464 + 1.54226 * omega - 0.26992 * omega * omega;
        let alpha = (1.0 + kappa * (1.0 - tr.sqrt())).powi(2);
        let a = 0.45724 * r * r * tc * tc / pc * alpha;
        let b = 0.07780 * r * tc / pc;
        let rt = r * t;

        Self {
            kappa,
            alpha,
            a,
            b,
            big_a: a * p / (rt * rt),
            big_b: b * p / rt,
        }
    }

    /// Coefficients `(c2, c1, c0)` of `Z³ + c2·Z² + c1·Z + c0 = 0`.
    pub fn cubic(&self) -> (f64, f64, f64) {
        let (a, b) = (self.big_a, self.big_b);
        (b - 1.0, a - 3.0 * b * b - 2.0 * b, b * b * b + b * b - a * b)
    }

    /// Closed-form Peng-Robinson fugacity coefficient at compressibility `z`.
    pub fn fugacity_coefficient(&self, z: f64, t_k: f64, r: f64) -> f64 {
        let b = self.big_b;
        // A/B written as a/(bRT) so that P → 0 stays finite.
        let a_over_b = self.a / (self.b * r * floor_positive(t_k, T_FLOOR_K));
        let num = floor_positive(z + (1.0 + SQRT_2) * b, 1e-12);
        let den = floor_positive(z + (1.0 - SQRT_2) * b, 1e-12);
        let ln_phi = z - 1.0
            - floor_positive(z - b, 1e-4).ln()
            - a_over_b / (2.0 * SQRT_2) * (num / den).ln();
        ln_phi.exp()
    }
}

/// Peng-Robinson calculator for one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PengRobinson<S = FixedNewton> {
    pub critical: CriticalProps,
    /// Gas constant of the basis [kJ/(kg·K)]
    pub r: f64,
    pub solver: S,
}

impl PengRobinson<FixedNewton> {
    pub fn new(critical: CriticalProps) -> Self {
        Self {
            critical,
            r: R_WATER,
            solver: FixedNewton::default(),
        }
    }
}

impl<S: CubicRootSolver> PengRobinson<S> {
    pub fn with_gas_constant(mut self, r: f64) -> Self {
        self.r = r;
        self
    }

    /// Swap the root solver, keeping the component and basis.
    pub fn with_solver<T: CubicRootSolver>(self, solver: T) -> PengRobinson<T> {
        PengRobinson {
            critical: self.critical,
            r: self.r,
            solver,
        }
    }

    pub fn state(&self, p_kpa: f64, t_k: f64) -> ThermoState {
        let coeffs = PrCoefficients::new(p_kpa, t_k, &self.critical, self.r);
        let (c2, c1, c0) = coeffs.cubic();
        let root = self.solver.solve(c2, c1, c0);
        let z = root.z;
        let v = z * self.r * t_k / floor_positive(p_kpa, P_FLOOR_KPA);
        let phi = coeffs.fugacity_coefficient(z, t_k, self.r);
        let phase = classify_z(z);
        debug!(p_kpa, t_k, z, iterations = root.iterations, %phase, "peng-robinson state");

        ThermoState {
            p: p_kpa,
            t: t_k,
            v,
            u: 0.0,
            h: 0.0,
            s: 0.0,
            z: Some(z),
            phi: Some(phi),
            f: Some(p_kpa * phi),
            x: None,
            phase,
        }
    }
}

/// Phase label from the compressibility factor.
pub fn classify_z(z: f64) -> Phase {
    if z < Z_LIQUID_MAX {
        Phase::LiquidRegion
    } else if z > Z_VAPOR_MIN {
        Phase::VaporRegion
    } else {
        Phase::Supercritical
    }
}

/// Resolve a state with the selected equation of state.
///
/// `r` defaults to [`R_WATER`].
pub fn eos_state(
    p_kpa: f64,
    t_k: f64,
    model: EosModel,
    critical: &CriticalProps,
    r: Option<f64>,
) -> ThermoState {
    let r = r.unwrap_or(R_WATER);
    match model {
        EosModel::IdealGas => ThermoState {
            p: p_kpa,
            t: t_k,
            v: r * t_k / floor_positive(p_kpa, P_FLOOR_KPA),
            u: 0.0,
            h: 0.0,
            s: 0.0,
            z: Some(1.0),
            phi: None,
            f: None,
            x: None,
            phase: Phase::IdealGas,
        },
        EosModel::PengRobinson => PengRobinson::new(*critical)
            .with_gas_constant(r)
            .state(p_kpa, t_k),
    }
}
