//! Water/steam state resolver built on the saturation table.
//!
//! Four regions are distinguished:
//! - quality given: a saturated mixture blended from the table
//! - P,T above saturation by more than [`SATURATION_MARGIN_C`]: superheated
//! - P,T below saturation by more than the margin: compressed liquid
//! - P,T within the margin: saturated liquid
//!
//! The superheated and compressed-liquid branches are teaching approximations
//! (linear extrapolation from the saturation line, constant liquid heat
//! capacity), not steam-table accurate.

use crate::eos::R_WATER;
use crate::saturation::{SatKey, SaturationRow, saturation_lookup};
use crate::state::{Phase, ThermoState};
use serde::{Deserialize, Serialize};
use tl_core::numeric::{clamp, floor_positive};
use tl_core::units::{KELVIN_OFFSET, celsius_to_k, constants::P_ATM_KPA};
use tracing::debug;

/// Pressure used when none is given [kPa].
pub const DEFAULT_P_KPA: f64 = P_ATM_KPA;

/// Temperature used when none is given [K].
pub const DEFAULT_T_K: f64 = 373.15;

/// Half-width of the band around the saturation temperature treated as
/// saturated [°C].
pub const SATURATION_MARGIN_C: f64 = 0.1;

/// Liquid specific heat for the compressed-liquid branch [kJ/(kg·K)].
pub const CP_LIQUID: f64 = 4.18;

/// Liquid specific volume for the compressed-liquid branch [m³/kg].
pub const V_LIQUID: f64 = 0.001;

/// Superheat slopes per °C above saturation: u, h [kJ/kg], s [kJ/(kg·K)].
pub const SUPERHEAT_U_SLOPE: f64 = 1.5;
pub const SUPERHEAT_H_SLOPE: f64 = 2.0;
pub const SUPERHEAT_S_SLOPE: f64 = 0.005;

const P_FLOOR_KPA: f64 = 1e-4;

/// The saturation property fixing a two-phase state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SaturationBasis {
    /// Pressure [kPa]
    Pressure(f64),
    /// Temperature [K]
    Temperature(f64),
}

/// Independent properties for the water resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WaterInput {
    /// Two-phase state from a saturation property and vapor quality.
    Quality { basis: SaturationBasis, x: f64 },
    /// Single-phase (or saturated-liquid) state from pressure [kPa] and
    /// temperature [K].
    PressureTemperature { p_kpa: f64, t_k: f64 },
}

impl WaterInput {
    /// Build an input from optionally-present P [kPa], T [K] and quality.
    ///
    /// Quality mode needs `x` and at least one of P/T (pressure wins when both
    /// are present). Otherwise P and T fall back to 101.325 kPa and 373.15 K.
    pub fn from_partial(p_kpa: Option<f64>, t_k: Option<f64>, x: Option<f64>) -> Self {
        match (x, p_kpa, t_k) {
            (Some(x), Some(p), _) => Self::Quality {
                basis: SaturationBasis::Pressure(p),
                x,
            },
            (Some(x), None, Some(t)) => Self::Quality {
                basis: SaturationBasis::Temperature(t),
                x,
            },
            _ => Self::PressureTemperature {
                p_kpa: p_kpa.unwrap_or(DEFAULT_P_KPA),
                t_k: t_k.unwrap_or(DEFAULT_T_K),
            },
        }
    }

    pub fn resolve(self) -> ThermoState {
        resolve_water(self)
    }
}

/// Resolve water from optionally-present P [kPa], T [K] and quality.
pub fn water_state(p_kpa: Option<f64>, t_k: Option<f64>, x: Option<f64>) -> ThermoState {
    resolve_water(WaterInput::from_partial(p_kpa, t_k, x))
}

/// Resolve a water state from a discriminated input.
pub fn resolve_water(input: WaterInput) -> ThermoState {
    match input {
        WaterInput::Quality { basis, x } => {
            let sat = match basis {
                SaturationBasis::Pressure(p) => saturation_lookup(SatKey::Pressure, p),
                SaturationBasis::Temperature(t) => {
                    saturation_lookup(SatKey::Temperature, t - KELVIN_OFFSET)
                }
            };
            saturated_mixture(&sat, x)
        }
        WaterInput::PressureTemperature { p_kpa, t_k } => {
            let sat = saturation_lookup(SatKey::Pressure, p_kpa);
            let t_c = t_k - KELVIN_OFFSET;
            if t_c > sat.t_c + SATURATION_MARGIN_C {
                superheated(&sat, p_kpa, t_k)
            } else if t_c < sat.t_c - SATURATION_MARGIN_C {
                compressed_liquid(p_kpa, t_k)
            } else {
                saturated_liquid(&sat)
            }
        }
    }
}

fn saturated_mixture(sat: &SaturationRow, x: f64) -> ThermoState {
    let x = clamp(x, 0.0, 1.0);
    let v = sat.vf + x * (sat.vg - sat.vf);
    let h = sat.hf + x * (sat.hg - sat.hf);
    let s = sat.sf + x * (sat.sg - sat.sf);
    debug!(p_kpa = sat.p_kpa, t_c = sat.t_c, x, "water: saturated mixture");
    ThermoState {
        p: sat.p_kpa,
        t: sat.t_k(),
        v,
        u: h - sat.p_kpa * v,
        h,
        s,
        z: None,
        phi: None,
        f: None,
        x: Some(x),
        phase: Phase::SaturatedMixture,
    }
}

fn superheated(sat: &SaturationRow, p_kpa: f64, t_k: f64) -> ThermoState {
    let superheat = t_k - KELVIN_OFFSET - sat.t_c;
    debug!(p_kpa, t_k, superheat, "water: superheated");
    ThermoState {
        p: p_kpa,
        t: t_k,
        v: R_WATER * t_k / floor_positive(p_kpa, P_FLOOR_KPA),
        u: sat.ug() + SUPERHEAT_U_SLOPE * superheat,
        h: sat.hg + SUPERHEAT_H_SLOPE * superheat,
        s: sat.sg + SUPERHEAT_S_SLOPE * superheat,
        z: None,
        phi: None,
        f: None,
        x: None,
        phase: Phase::Superheated,
    }
}

fn compressed_liquid(p_kpa: f64, t_k: f64) -> ThermoState {
    let u = CP_LIQUID * (t_k - KELVIN_OFFSET);
    debug!(p_kpa, t_k, "water: compressed liquid");
    ThermoState {
        p: p_kpa,
        t: t_k,
        v: V_LIQUID,
        u,
        h: u + p_kpa * V_LIQUID,
        s: CP_LIQUID * (floor_positive(t_k, 1e-3) / celsius_to_k(0.0)).ln(),
        z: None,
        phi: None,
        f: None,
        x: None,
        phase: Phase::CompressedLiquid,
    }
}

fn saturated_liquid(sat: &SaturationRow) -> ThermoState {
    debug!(p_kpa = sat.p_kpa, t_c = sat.t_c, "water: saturated liquid");
    ThermoState {
        p: sat.p_kpa,
        t: sat.t_k(),
        v: sat.vf,
        u: sat.uf(),
        h: sat.hf,
        s: sat.sf,
        z: None,
        phi: None,
        f: None,
        x: Some(0.0),
        phase: Phase::SaturatedLiquid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn region_boundaries_at_one_atmosphere() {
        assert_eq!(
            water_state(Some(101.325), Some(373.25), None).phase,
            Phase::Superheated
        );
        assert_eq!(
            water_state(Some(101.325), Some(372.95), None).phase,
            Phase::CompressedLiquid
        );
        assert_eq!(
            water_state(Some(101.325), Some(373.15), None).phase,
            Phase::SaturatedLiquid
        );
    }

    #[test]
    fn zero_quality_matches_saturated_liquid_branch() {
        let mixed = water_state(Some(101.325), Some(373.15), Some(0.0));
        let liquid = water_state(Some(101.325), Some(373.15), None);
        assert!(close(mixed.p, liquid.p));
        assert!(close(mixed.t, liquid.t));
        assert!(close(mixed.v, liquid.v));
        assert!(close(mixed.u, liquid.u));
        assert!(close(mixed.h, liquid.h));
        assert!(close(mixed.s, liquid.s));
        assert_eq!(liquid.x, Some(0.0));
    }

    #[test]
    fn quality_blends_saturation_properties() {
        let st = water_state(None, Some(373.15), Some(0.5));
        assert_eq!(st.phase, Phase::SaturatedMixture);
        assert!(close(st.p, 101.4));
        assert!(close(st.h, 419.1 + 0.5 * (2675.6 - 419.1)));
        assert!(close(st.v, 0.001043 + 0.5 * (1.673 - 0.001043)));
        assert!(close(st.u, st.h - st.p * st.v));
        assert_eq!(st.x, Some(0.5));
    }

    #[test]
    fn quality_is_clamped() {
        let st = water_state(Some(476.2), None, Some(1.7));
        assert_eq!(st.x, Some(1.0));
        assert!(close(st.h, 2745.9));
    }

    #[test]
    fn superheated_extrapolates_from_vapor_line() {
        let st = water_state(Some(101.4), Some(373.15 + 50.0), None);
        assert_eq!(st.phase, Phase::Superheated);
        assert!(close(st.h, 2675.6 + 2.0 * 50.0));
        assert!(close(st.s, 7.354 + 0.005 * 50.0));
        assert!(close(st.u, 2675.6 - 101.4 * 1.673 + 1.5 * 50.0));
        assert!(close(st.v, 0.4615 * 423.15 / 101.4));
    }

    #[test]
    fn compressed_liquid_uses_constant_heat_capacity() {
        let st = water_state(Some(8000.0), Some(318.15), None);
        assert_eq!(st.phase, Phase::CompressedLiquid);
        assert!(close(st.u, 4.18 * 45.0));
        assert!(close(st.h, 4.18 * 45.0 + 8000.0 * 0.001));
        assert!(close(st.s, 4.18 * (318.15f64 / 273.15).ln()));
        assert_eq!(st.v, 0.001);
    }

    #[test]
    fn defaults_apply_when_inputs_missing() {
        assert_eq!(
            WaterInput::from_partial(None, None, None),
            WaterInput::PressureTemperature {
                p_kpa: DEFAULT_P_KPA,
                t_k: DEFAULT_T_K
            }
        );
        // Quality without P or T cannot fix a two-phase state.
        assert!(matches!(
            WaterInput::from_partial(None, None, Some(0.3)),
            WaterInput::PressureTemperature { .. }
        ));
        assert!(matches!(
            WaterInput::from_partial(Some(200.0), Some(400.0), Some(0.3)),
            WaterInput::Quality {
                basis: SaturationBasis::Pressure(_),
                ..
            }
        ));
    }

    #[test]
    fn zero_pressure_does_not_blow_up() {
        let st = water_state(Some(0.0), Some(500.0), None);
        assert!(st.v.is_finite());
    }
}
