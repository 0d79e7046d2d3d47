//! Antoine vapor-pressure correlation.

use serde::{Deserialize, Serialize};

/// mmHg per standard atmosphere.
pub const MMHG_PER_ATM: f64 = 760.0;

/// Saturation pressure [mmHg] from the Antoine equation
/// `log10(P) = A - B / (T + C)` with `T` in °C.
///
/// The correlation is only meaningful inside each compound's fitted range;
/// that range is not enforced here.
#[inline]
pub fn antoine_psat(a: f64, b: f64, c: f64, t_c: f64) -> f64 {
    10f64.powf(a - b / (t_c + c))
}

/// Convert mmHg to kPa.
#[inline]
pub fn mmhg_to_kpa(mmhg: f64) -> f64 {
    mmhg * (tl_core::units::constants::P_ATM_KPA / MMHG_PER_ATM)
}

/// Antoine coefficients and their fitted temperature range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntoineParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Lower bound of the fitted range [°C]
    pub t_min: f64,
    /// Upper bound of the fitted range [°C]
    pub t_max: f64,
}

impl AntoineParams {
    /// Saturation pressure [mmHg] at `t_c` [°C].
    pub fn psat_mmhg(&self, t_c: f64) -> f64 {
        antoine_psat(self.a, self.b, self.c, t_c)
    }

    /// Saturation pressure [kPa] at `t_c` [°C].
    pub fn psat_kpa(&self, t_c: f64) -> f64 {
        mmhg_to_kpa(self.psat_mmhg(t_c))
    }

    /// Whether `t_c` lies inside the fitted range.
    pub fn in_range(&self, t_c: f64) -> bool {
        t_c >= self.t_min && t_c <= self.t_max
    }
}
