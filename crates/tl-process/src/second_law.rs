//! Second-law audit of a heat engine between two reservoirs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tolerance below zero for entropy generation before the engine is flagged.
pub const S_GEN_TOLERANCE: f64 = 1e-7;

/// Tolerance above the Carnot limit before the engine is flagged.
pub const CARNOT_TOLERANCE: f64 = 1e-6;

/// Reservoirs and energy flows of a heat engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatEngine {
    /// Hot reservoir [K]
    pub th_k: f64,
    /// Cold reservoir [K]
    pub tl_k: f64,
    /// Dead state [K]
    pub t0_k: f64,
    /// Heat drawn from the hot reservoir [kJ]
    pub qh_kj: f64,
    /// Work produced [kJ]
    pub w_kj: f64,
}

impl Default for HeatEngine {
    fn default() -> Self {
        Self {
            th_k: 800.0,
            tl_k: 300.0,
            t0_k: 298.15,
            qh_kj: 100.0,
            w_kj: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineAudit {
    /// Heat rejected [kJ]
    pub ql_kj: f64,
    pub thermal_efficiency: f64,
    pub carnot_efficiency: f64,
    /// Entropy generated [kJ/K]
    pub s_gen: f64,
    /// Exergy destroyed [kJ]
    pub exergy_destroyed: f64,
    /// Violates the Clausius inequality or beats Carnot.
    pub impossible: bool,
}

/// Audit a heat engine against the second law.
pub fn audit_engine(engine: &HeatEngine) -> EngineAudit {
    let HeatEngine {
        th_k,
        tl_k,
        t0_k,
        qh_kj,
        w_kj,
    } = *engine;

    if tl_k <= 0.0 || th_k <= 0.0 {
        warn!(th_k, tl_k, "non-positive reservoir temperature");
    }

    let ql_kj = qh_kj - w_kj;
    let thermal_efficiency = if qh_kj > 0.0 { w_kj / qh_kj } else { 0.0 };
    let carnot_efficiency = if th_k > 0.0 { 1.0 - tl_k / th_k } else { 0.0 };
    let s_gen = if qh_kj > 0.0 { ql_kj / tl_k - qh_kj / th_k } else { 0.0 };
    let exergy_destroyed = t0_k * s_gen;
    let impossible =
        s_gen < -S_GEN_TOLERANCE || thermal_efficiency > carnot_efficiency + CARNOT_TOLERANCE;

    debug!(thermal_efficiency, carnot_efficiency, s_gen, impossible, "heat engine audit");

    EngineAudit {
        ql_kj,
        thermal_efficiency,
        carnot_efficiency,
        s_gen,
        exergy_destroyed,
        impossible,
    }
}
