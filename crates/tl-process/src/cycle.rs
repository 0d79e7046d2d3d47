//! Power-cycle chaining.
//!
//! A cycle is an ordered list of stages applied to a working fluid, each
//! stage taking the previous state to the next one:
//!
//! - Work stages (expansion/compression) estimate the isentropic work as
//!   `w_s = v·(P_exit − P)`, correct it by the stage efficiency and lift the
//!   temperature by `w_act / cp`.
//! - Heat stages (heating/cooling) jump to the stage target (P, T) and book
//!   `q = h_next − h`; positive `q` counts as heat input.
//!
//! ## Sign Conventions
//!
//! Stage work is positive when produced (turbines), negative when consumed
//! (pumps). Net work is the sum over all stages.

use crate::common::{check_efficiency, check_finite, check_positive};
use crate::error::{ProcessError, ProcessResult};
use serde::{Deserialize, Serialize};
use tl_core::units::celsius_to_k;
use tl_fluids::{StateModel, Substance, ThermoState};
use tracing::{debug, trace};

/// What a stage does to the working fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Expansion,
    Compression,
    Heating,
    Cooling,
}

impl StageKind {
    pub fn is_work(self) -> bool {
        matches!(self, StageKind::Expansion | StageKind::Compression)
    }
}

/// Hardware label of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Turbine,
    Nozzle,
    Pump,
    Compressor,
    Boiler,
    Condenser,
    Mixer,
}

impl Device {
    /// Stage kind this device normally performs.
    pub fn default_kind(self) -> StageKind {
        match self {
            Device::Turbine | Device::Nozzle => StageKind::Expansion,
            Device::Pump | Device::Compressor => StageKind::Compression,
            Device::Boiler | Device::Mixer => StageKind::Heating,
            Device::Condenser => StageKind::Cooling,
        }
    }
}

/// One stage of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStage {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub kind: StageKind,
    pub device: Device,
    /// Isentropic efficiency (work stages only)
    #[serde(default = "unit_efficiency")]
    pub efficiency: f64,
    /// Exit pressure [kPa]
    pub target_p_kpa: f64,
    /// Exit temperature [K] (heat stages only)
    pub target_t_k: f64,
}

fn unit_efficiency() -> f64 {
    1.0
}

impl CycleStage {
    pub fn new(id: &str, name: &str, device: Device, target_p_kpa: f64, target_t_k: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: device.default_kind(),
            device,
            efficiency: 1.0,
            target_p_kpa,
            target_t_k,
        }
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }
}

/// Working fluid, starting state and stages of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDefinition {
    pub substance: Substance,
    pub initial_p_kpa: f64,
    pub initial_t_k: f64,
    pub stages: Vec<CycleStage>,
}

impl CycleDefinition {
    /// Basic Rankine loop on water: pump, boiler, turbine, condenser.
    ///
    /// Condensate leaves at 40 °C, below the ≈43 °C saturation temperature
    /// the table gives at 10 kPa, so the pump sees liquid.
    pub fn rankine() -> Self {
        Self {
            substance: Substance::Water,
            initial_p_kpa: 10.0,
            initial_t_k: celsius_to_k(40.0),
            stages: vec![
                CycleStage::new("1", "Feed Pump", Device::Pump, 8000.0, celsius_to_k(40.0))
                    .with_efficiency(0.85),
                CycleStage::new("2", "Boiler", Device::Boiler, 8000.0, celsius_to_k(550.0)),
                CycleStage::new("3", "Turbine", Device::Turbine, 10.0, celsius_to_k(50.0))
                    .with_efficiency(0.88),
                CycleStage::new("4", "Condenser", Device::Condenser, 10.0, celsius_to_k(40.0)),
            ],
        }
    }

    pub fn validate(&self) -> ProcessResult<()> {
        check_positive(self.initial_p_kpa, "initial pressure must be positive")?;
        check_positive(self.initial_t_k, "initial temperature must be positive")?;
        for stage in &self.stages {
            check_finite(stage.target_p_kpa, "stage target pressure must be finite")?;
            if stage.kind.is_work() {
                check_efficiency(stage.efficiency, "stage efficiency must be in (0,1]")?;
            } else {
                check_positive(stage.target_t_k, "stage target temperature must be positive")?;
            }
        }
        Ok(())
    }
}

impl Default for CycleDefinition {
    fn default() -> Self {
        Self::rankine()
    }
}

/// State after a stage, with what the stage exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePoint {
    pub id: String,
    pub name: String,
    pub state: ThermoState,
    /// Stage work [kJ/kg]
    pub work: f64,
    /// Stage heat [kJ/kg]
    pub heat: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    /// Starting state followed by one point per stage.
    pub points: Vec<CyclePoint>,
    /// [kJ/kg]
    pub net_work: f64,
    /// Sum of positive stage heats [kJ/kg]
    pub heat_in: f64,
    pub thermal_efficiency: f64,
}

/// Chain the stages of `def` from its initial state.
pub fn run_cycle(def: &CycleDefinition) -> ProcessResult<CycleResult> {
    def.validate()?;

    let substance = def.substance;
    let cp = substance.cycle_cp();
    let mut current = substance.state(def.initial_p_kpa, def.initial_t_k);

    let mut points = Vec::with_capacity(def.stages.len() + 1);
    points.push(CyclePoint {
        id: "start".to_string(),
        name: "Start".to_string(),
        state: current.clone(),
        work: 0.0,
        heat: 0.0,
        efficiency: 1.0,
    });

    let mut net_work = 0.0;
    let mut heat_in = 0.0;

    for stage in &def.stages {
        let (next, work, heat) = match stage.kind {
            StageKind::Expansion | StageKind::Compression => {
                let w_s = current.v * (stage.target_p_kpa - current.p);
                let w_act = if stage.kind == StageKind::Expansion {
                    w_s * stage.efficiency
                } else {
                    w_s / stage.efficiency
                };
                let t_exit = current.t + w_act / cp;
                trace!(stage = %stage.name, w_s, w_act, t_exit, "work stage");
                (substance.state(stage.target_p_kpa, t_exit), -w_act, 0.0)
            }
            StageKind::Heating | StageKind::Cooling => {
                let next = substance.state(stage.target_p_kpa, stage.target_t_k);
                let q = next.h - current.h;
                if q > 0.0 {
                    heat_in += q;
                }
                trace!(stage = %stage.name, q, "heat stage");
                (next, 0.0, q)
            }
        };

        net_work += work;
        points.push(CyclePoint {
            id: stage.id.clone(),
            name: stage.name.clone(),
            state: next.clone(),
            work,
            heat,
            efficiency: stage.efficiency,
        });
        current = next;
    }

    let thermal_efficiency = if heat_in > 0.0 { net_work / heat_in } else { 0.0 };
    debug!(substance = substance.name(), net_work, heat_in, thermal_efficiency, "cycle");

    Ok(CycleResult {
        points,
        net_work,
        heat_in,
        thermal_efficiency,
    })
}

impl CycleResult {
    /// Stage with the given id.
    pub fn point(&self, id: &str) -> Option<&CyclePoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// `(s, T)` pairs for a T-s chart, T in °C.
    pub fn ts_path(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.state.s, p.state.t_celsius()))
            .collect()
    }
}

/// Convenience for callers that hold stages but no definition.
pub fn run_stages(
    substance: Substance,
    initial_p_kpa: f64,
    initial_t_k: f64,
    stages: &[CycleStage],
) -> ProcessResult<CycleResult> {
    if stages.is_empty() {
        return Err(ProcessError::InvalidArg {
            what: "cycle needs at least one stage",
        });
    }
    run_cycle(&CycleDefinition {
        substance,
        initial_p_kpa,
        initial_t_k,
        stages: stages.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_fluids::Phase;

    #[test]
    fn rankine_defaults() {
        let def = CycleDefinition::rankine();
        assert_eq!(def.stages.len(), 4);
        assert_eq!(def.stages[0].kind, StageKind::Compression);
        assert_eq!(def.stages[2].efficiency, 0.88);
        assert!((def.initial_t_k - 313.15).abs() < 1e-9);
    }

    #[test]
    fn rankine_pump_inlet_is_liquid() {
        // 45 °C at 10 kPa sits above the table's saturation temperature.
        let warm = Substance::Water.state(10.0, celsius_to_k(45.0));
        assert_eq!(warm.phase, Phase::Superheated);

        let def = CycleDefinition::rankine();
        let inlet = def.substance.state(def.initial_p_kpa, def.initial_t_k);
        assert_eq!(inlet.phase, Phase::CompressedLiquid);
        assert!((inlet.v - 0.001).abs() < 1e-12);
    }

    #[test]
    fn rankine_produces_net_work() {
        let result = run_cycle(&CycleDefinition::rankine()).unwrap();
        assert_eq!(result.points.len(), 5);

        assert_eq!(result.points[0].state.phase, Phase::CompressedLiquid);

        let pump = result.point("1").unwrap();
        // v = 0.001, ΔP = 7990 kPa, η = 0.85
        let expected = -(0.001 * 7990.0 / 0.85);
        assert!((pump.work - expected).abs() < 1e-9, "pump work {}", pump.work);
        assert_eq!(pump.heat, 0.0);
        assert_eq!(pump.state.phase, Phase::CompressedLiquid);

        let boiler = result.point("2").unwrap();
        assert_eq!(boiler.state.phase, Phase::Superheated);
        assert!(boiler.heat > 3000.0);

        let turbine = result.point("3").unwrap();
        assert!(turbine.work > 0.0);

        assert!((result.heat_in - boiler.heat).abs() < 1e-9);
        assert!(result.net_work > 0.0);
        assert!(result.thermal_efficiency > 0.05 && result.thermal_efficiency < 0.2);
        assert!(
            (result.thermal_efficiency - result.net_work / result.heat_in).abs() < 1e-12
        );
    }

    #[test]
    fn condenser_heat_is_not_heat_input() {
        let result = run_cycle(&CycleDefinition::rankine()).unwrap();
        let condenser = result.point("4").unwrap().heat;
        assert!(condenser < 0.0);
        let positives: f64 = result.points.iter().map(|p| p.heat.max(0.0)).sum();
        assert!((result.heat_in - positives).abs() < 1e-9);
    }

    #[test]
    fn no_heat_input_means_zero_efficiency() {
        let stages = [CycleStage::new("c", "Compressor", Device::Compressor, 500.0, 0.0)
            .with_efficiency(0.8)];
        let result = run_stages(Substance::AIR, 100.0, 300.0, &stages).unwrap();
        assert_eq!(result.heat_in, 0.0);
        assert_eq!(result.thermal_efficiency, 0.0);
        assert!(result.net_work < 0.0);
    }

    #[test]
    fn rejects_bad_efficiency() {
        let mut def = CycleDefinition::rankine();
        def.stages[0].efficiency = 0.0;
        assert!(matches!(run_cycle(&def), Err(ProcessError::InvalidArg { .. })));
    }

    #[test]
    fn rejects_empty_stage_list() {
        assert!(run_stages(Substance::Water, 10.0, 313.15, &[]).is_err());
    }

    #[test]
    fn ts_path_is_in_celsius() {
        let result = run_cycle(&CycleDefinition::rankine()).unwrap();
        let path = result.ts_path();
        assert_eq!(path.len(), 5);
        assert!((path[0].1 - 40.0).abs() < 1e-9);
    }
}
