//! Thermodynamic state definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Specific enthalpy [kJ/kg].
pub type SpecEnthalpy = f64;

/// Specific entropy [kJ/(kg·K)].
pub type SpecEntropy = f64;

/// Specific heat capacity [kJ/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Region label attached to every resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Ideal Gas")]
    IdealGas,
    #[serde(rename = "Superheated")]
    Superheated,
    #[serde(rename = "Compressed Liquid")]
    CompressedLiquid,
    #[serde(rename = "Saturated Liquid")]
    SaturatedLiquid,
    #[serde(rename = "Saturated Mixture")]
    SaturatedMixture,
    #[serde(rename = "Liquid Region")]
    LiquidRegion,
    #[serde(rename = "Vapor Region")]
    VaporRegion,
    #[serde(rename = "Supercritical")]
    Supercritical,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::IdealGas => "Ideal Gas",
            Self::Superheated => "Superheated",
            Self::CompressedLiquid => "Compressed Liquid",
            Self::SaturatedLiquid => "Saturated Liquid",
            Self::SaturatedMixture => "Saturated Mixture",
            Self::LiquidRegion => "Liquid Region",
            Self::VaporRegion => "Vapor Region",
            Self::Supercritical => "Supercritical",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of a pure (or pseudo-pure) fluid at one point.
///
/// Values are in the engine basis: kPa, K, m³/kg, kJ/kg, kJ/(kg·K). Energies
/// and entropy are relative to the datum of whichever calculator produced the
/// state, so only differences between states from the same calculator are
/// meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoState {
    /// Pressure [kPa]
    pub p: f64,
    /// Temperature [K]
    pub t: f64,
    /// Specific volume [m³/kg]
    pub v: f64,
    /// Specific internal energy [kJ/kg]
    pub u: f64,
    /// Specific enthalpy [kJ/kg]
    pub h: SpecEnthalpy,
    /// Specific entropy [kJ/(kg·K)]
    pub s: SpecEntropy,
    /// Compressibility factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Fugacity coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
    /// Fugacity [kPa]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<f64>,
    /// Vapor quality, only for two-phase states
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    pub phase: Phase,
}

impl ThermoState {
    /// Temperature in °C.
    pub fn t_celsius(&self) -> f64 {
        tl_core::units::k_to_celsius(self.t)
    }

    /// Return a summary string of the state (for logging).
    pub fn summary(&self) -> String {
        format!(
            "State(P={:.3}kPa,T={:.2}K,v={:.6}m³/kg,u={:.1},h={:.1}kJ/kg,s={:.4}kJ/kg·K,{})",
            self.p, self.t, self.v, self.u, self.h, self.s, self.phase
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels_match_vocabulary() {
        assert_eq!(Phase::IdealGas.to_string(), "Ideal Gas");
        assert_eq!(Phase::SaturatedMixture.label(), "Saturated Mixture");
        assert_eq!(Phase::Supercritical.label(), "Supercritical");
    }

    #[test]
    fn celsius_accessor() {
        let state = ThermoState {
            p: 101.325,
            t: 373.15,
            v: 1.0,
            u: 0.0,
            h: 0.0,
            s: 0.0,
            z: None,
            phi: None,
            f: None,
            x: None,
            phase: Phase::Superheated,
        };
        assert!((state.t_celsius() - 100.0).abs() < 1e-9);
        assert!(state.summary().contains("Superheated"));
    }
}
