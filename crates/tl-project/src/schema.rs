//! Worksheet schema definitions.
//!
//! A worksheet bundles named calculations that can be stored as YAML or JSON
//! and re-run from the command line.

use serde::{Deserialize, Serialize};
use tl_fluids::{ActivityModel, Component};
use tl_process::{BalanceInputs, ClosedSystem, CycleDefinition, FlowSpec, HeatEngine};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worksheet {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub cycles: Vec<CycleDef>,
    #[serde(default)]
    pub devices: Vec<DeviceDef>,
    #[serde(default)]
    pub closed_systems: Vec<ClosedSystemDef>,
    #[serde(default)]
    pub balances: Vec<BalanceDef>,
    #[serde(default)]
    pub engines: Vec<EngineDef>,
    #[serde(default)]
    pub mixtures: Vec<MixtureDef>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            description: None,
            cycles: Vec::new(),
            devices: Vec::new(),
            closed_systems: Vec::new(),
            balances: Vec::new(),
            engines: Vec::new(),
            mixtures: Vec::new(),
        }
    }

    /// Every entry id in the worksheet, with the section it lives in.
    pub fn entry_ids(&self) -> impl Iterator<Item = (&str, &'static str)> {
        let cycles = self.cycles.iter().map(|c| (c.id.as_str(), "cycles"));
        let devices = self.devices.iter().map(|d| (d.id.as_str(), "devices"));
        let closed = self
            .closed_systems
            .iter()
            .map(|c| (c.id.as_str(), "closed_systems"));
        let balances = self.balances.iter().map(|b| (b.id.as_str(), "balances"));
        let engines = self.engines.iter().map(|e| (e.id.as_str(), "engines"));
        let mixtures = self.mixtures.iter().map(|m| (m.id.as_str(), "mixtures"));
        cycles
            .chain(devices)
            .chain(closed)
            .chain(balances)
            .chain(engines)
            .chain(mixtures)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleDef {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub cycle: CycleDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceDef {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub spec: FlowSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosedSystemDef {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub system: ClosedSystem,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceDef {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub inputs: BalanceInputs,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub engine: HeatEngine,
}

/// Binary mixture sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixtureDef {
    pub id: String,
    pub name: String,
    pub component_a: Component,
    pub component_b: Component,
    /// [°C]
    pub temperature_c: f64,
    /// Margules A; the interaction database seed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margules: Option<f64>,
    #[serde(default)]
    pub model: ActivityModel,
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    tl_fluids::mixture::DEFAULT_STEP
}

impl MixtureDef {
    pub fn margules(&self) -> f64 {
        self.margules
            .unwrap_or_else(|| tl_fluids::default_margules(self.component_a, self.component_b))
    }
}
