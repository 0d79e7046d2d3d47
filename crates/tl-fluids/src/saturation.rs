//! Steam saturation table and its interpolator.
//!
//! Ten rows from the triple point to the critical point. Every
//! saturation-dependent calculation in the engine goes through
//! [`saturation_lookup`].

use serde::{Deserialize, Serialize};
use tl_core::numeric::{clamp, lerp};
use tracing::{trace, warn};

/// One row of the saturation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationRow {
    /// Saturation temperature [°C]
    pub t_c: f64,
    /// Saturation pressure [kPa]
    pub p_kpa: f64,
    /// Saturated liquid specific volume [m³/kg]
    pub vf: f64,
    /// Saturated vapor specific volume [m³/kg]
    pub vg: f64,
    /// Saturated liquid enthalpy [kJ/kg]
    pub hf: f64,
    /// Saturated vapor enthalpy [kJ/kg]
    pub hg: f64,
    /// Saturated liquid entropy [kJ/(kg·K)]
    pub sf: f64,
    /// Saturated vapor entropy [kJ/(kg·K)]
    pub sg: f64,
}

impl SaturationRow {
    /// Saturated vapor internal energy, `hg - P·vg` [kJ/kg].
    pub fn ug(&self) -> f64 {
        self.hg - self.p_kpa * self.vg
    }

    /// Saturated liquid internal energy, `hf - P·vf` [kJ/kg].
    pub fn uf(&self) -> f64 {
        self.hf - self.p_kpa * self.vf
    }

    /// Saturation temperature [K].
    pub fn t_k(&self) -> f64 {
        tl_core::units::celsius_to_k(self.t_c)
    }

    fn column(&self, key: SatKey) -> f64 {
        match key {
            SatKey::Temperature => self.t_c,
            SatKey::Pressure => self.p_kpa,
        }
    }
}

/// Independent column used to look up a saturation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatKey {
    /// Temperature [°C]
    Temperature,
    /// Pressure [kPa]
    Pressure,
}

impl SatKey {
    /// Valid table domain for this key.
    pub fn domain(self) -> (f64, f64) {
        let first = &STEAM_SAT_TABLE[0];
        let last = &STEAM_SAT_TABLE[STEAM_SAT_TABLE.len() - 1];
        (first.column(self), last.column(self))
    }
}

#[allow(clippy::too_many_arguments)]
const fn row(
    t_c: f64,
    p_kpa: f64,
    vf: f64,
    vg: f64,
    hf: f64,
    hg: f64,
    sf: f64,
    sg: f64,
) -> SaturationRow {
    SaturationRow {
        t_c,
        p_kpa,
        vf,
        vg,
        hf,
        hg,
        sf,
        sg,
    }
}

/// Saturated water/steam, ordered by increasing temperature and pressure.
pub const STEAM_SAT_TABLE: [SaturationRow; 10] = [
    row(0.01, 0.6117, 0.001, 206.1, 0.0, 2501.0, 0.0, 9.155),
    row(20.0, 2.339, 0.001002, 57.76, 83.9, 2537.4, 0.2965, 8.666),
    row(50.0, 12.35, 0.001012, 12.03, 209.3, 2591.3, 0.7038, 8.075),
    row(100.0, 101.4, 0.001043, 1.673, 419.1, 2675.6, 1.307, 7.354),
    row(150.0, 476.2, 0.001091, 0.3925, 632.2, 2745.9, 1.842, 6.837),
    row(200.0, 1555.0, 0.001157, 0.1272, 852.3, 2792.0, 2.331, 6.430),
    row(250.0, 3976.0, 0.001252, 0.0500, 1085.8, 2800.4, 2.794, 6.072),
    row(300.0, 8588.0, 0.001404, 0.0216, 1345.0, 2750.1, 3.255, 5.706),
    row(350.0, 16530.0, 0.001741, 0.0088, 1671.2, 2563.6, 3.778, 5.211),
    row(374.0, 22060.0, 0.003106, 0.0031, 2099.0, 2099.0, 4.43, 4.43),
];

/// Interpolate the saturation table at `value` of the `key` column.
///
/// Out-of-domain values are clamped to the nearest table bound; no error is
/// raised. Every column is interpolated linearly between the bracketing rows.
pub fn saturation_lookup(key: SatKey, value: f64) -> SaturationRow {
    let (lo, hi) = key.domain();
    let lookup = if value.is_nan() { lo } else { clamp(value, lo, hi) };
    if lookup != value {
        warn!(?key, value, clamped = lookup, "saturation lookup outside table domain");
    }

    let table = &STEAM_SAT_TABLE;
    let mut i = 0;
    while i < table.len() - 1 && table[i + 1].column(key) < lookup {
        i += 1;
    }
    let r1 = &table[i];
    let r2 = table.get(i + 1).unwrap_or(r1);
    let x1 = r1.column(key);
    let x2 = r2.column(key);
    trace!(?key, lookup, bracket = i, "saturation bracket");

    let at = |y1: f64, y2: f64| lerp(lookup, x1, x2, y1, y2);
    SaturationRow {
        t_c: at(r1.t_c, r2.t_c),
        p_kpa: at(r1.p_kpa, r2.p_kpa),
        vf: at(r1.vf, r2.vf),
        vg: at(r1.vg, r2.vg),
        hf: at(r1.hf, r2.hf),
        hg: at(r1.hg, r2.hg),
        sf: at(r1.sf, r2.sf),
        sg: at(r1.sg, r2.sg),
    }
}

/// Saturation pressure [kPa] at a temperature [°C].
pub fn saturation_pressure(t_c: f64) -> f64 {
    saturation_lookup(SatKey::Temperature, t_c).p_kpa
}

/// Saturation temperature [°C] at a pressure [kPa].
pub fn saturation_temperature(p_kpa: f64) -> f64 {
    saturation_lookup(SatKey::Pressure, p_kpa).t_c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn reproduces_table_row_at_100c() {
        let sat = saturation_lookup(SatKey::Temperature, 100.0);
        assert!(close(sat.t_c, 100.0));
        assert!(close(sat.p_kpa, 101.4));
        assert!(close(sat.vf, 0.001043));
        assert!(close(sat.vg, 1.673));
        assert!(close(sat.hf, 419.1));
        assert!(close(sat.hg, 2675.6));
        assert!(close(sat.sf, 1.307));
        assert!(close(sat.sg, 7.354));
    }

    #[test]
    fn interpolates_between_rows() {
        let sat = saturation_lookup(SatKey::Temperature, 75.0);
        assert!(close(sat.p_kpa, (12.35 + 101.4) / 2.0));
        assert!(close(sat.hf, (209.3 + 419.1) / 2.0));
    }

    #[test]
    fn pressure_key_inverts_temperature_key() {
        let sat = saturation_lookup(SatKey::Pressure, 476.2);
        assert!(close(sat.t_c, 150.0));
        assert!(close(sat.hg, 2745.9));
    }

    #[test]
    fn first_row_is_reachable() {
        let sat = saturation_lookup(SatKey::Temperature, 0.01);
        assert!(close(sat.p_kpa, 0.6117));
        assert!(close(sat.sg, 9.155));
    }

    #[test]
    fn clamps_above_critical_point() {
        let sat = saturation_lookup(SatKey::Temperature, 500.0);
        assert!(close(sat.t_c, 374.0));
        assert!(close(sat.p_kpa, 22060.0));

        let sat = saturation_lookup(SatKey::Pressure, 1.0e6);
        assert!(close(sat.t_c, 374.0));
    }

    #[test]
    fn clamps_below_triple_point() {
        let sat = saturation_lookup(SatKey::Temperature, -40.0);
        assert!(close(sat.t_c, 0.01));
        let sat = saturation_lookup(SatKey::Pressure, 0.0);
        assert!(close(sat.p_kpa, 0.6117));
    }

    #[test]
    fn nan_input_degrades_to_lower_bound() {
        let sat = saturation_lookup(SatKey::Pressure, f64::NAN);
        assert!(sat.p_kpa.is_finite());
        assert!(close(sat.p_kpa, 0.6117));
    }

    #[test]
    fn helpers_and_internal_energy() {
        assert!(close(saturation_pressure(100.0), 101.4));
        assert!(close(saturation_temperature(101.4), 100.0));
        let sat = saturation_lookup(SatKey::Temperature, 100.0);
        assert!(close(sat.ug(), 2675.6 - 101.4 * 1.673));
        assert!(close(sat.t_k(), 373.15));
    }
}
