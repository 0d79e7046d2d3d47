//! Ideal-gas state calculator.
//!
//! Energies and entropy are referenced to 298.15 K and 101.325 kPa, where
//! u = h = s = 0.

use crate::state::{Phase, SpecHeatCapacity, ThermoState};
use serde::{Deserialize, Serialize};
use tl_core::numeric::floor_positive;
use tl_core::units::constants::P_ATM_KPA;

/// Reference temperature of the ideal-gas datum [K].
pub const T_REF_K: f64 = 298.15;

/// Reference pressure of the ideal-gas datum [kPa].
pub const P_REF_KPA: f64 = P_ATM_KPA;

/// Pressure floor applied before dividing [kPa].
pub const P_FLOOR_KPA: f64 = 1e-4;

/// Floor applied to T and P before taking logarithms.
pub const LOG_FLOOR: f64 = 1e-3;

/// Gas constant and constant-pressure specific heat of an ideal gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasProperties {
    /// Specific gas constant [kJ/(kg·K)]
    pub r: f64,
    /// Specific heat at constant pressure [kJ/(kg·K)]
    pub cp: SpecHeatCapacity,
}

impl GasProperties {
    /// Dry air.
    pub const AIR: GasProperties = GasProperties {
        r: 0.287,
        cp: 1.005,
    };

    /// Specific heat at constant volume [kJ/(kg·K)].
    pub fn cv(&self) -> SpecHeatCapacity {
        self.cp - self.r
    }

    /// Heat capacity ratio cp/cv.
    pub fn gamma(&self) -> f64 {
        self.cp / self.cv()
    }

    pub fn state(&self, p_kpa: f64, t_k: f64) -> ThermoState {
        ideal_gas_state(p_kpa, t_k, *self)
    }
}

impl Default for GasProperties {
    fn default() -> Self {
        Self::AIR
    }
}

/// Resolve an ideal-gas state from pressure [kPa] and temperature [K].
///
/// ```text
/// v = R·T / P
/// u = cv·(T − 298.15),  h = cp·(T − 298.15)
/// s = cp·ln(T/298.15) − R·ln(P/101.325)
/// ```
pub fn ideal_gas_state(p_kpa: f64, t_k: f64, gas: GasProperties) -> ThermoState {
    let GasProperties { r, cp } = gas;
    let cv = gas.cv();
    let v = r * t_k / floor_positive(p_kpa, P_FLOOR_KPA);
    let u = cv * (t_k - T_REF_K);
    let h = cp * (t_k - T_REF_K);
    let s = cp * (floor_positive(t_k, LOG_FLOOR) / T_REF_K).ln()
        - r * (floor_positive(p_kpa, LOG_FLOOR) / P_REF_KPA).ln();

    ThermoState {
        p: p_kpa,
        t: t_k,
        v,
        u,
        h,
        s,
        z: Some(1.0),
        phi: None,
        f: None,
        x: None,
        phase: Phase::IdealGas,
    }
}
