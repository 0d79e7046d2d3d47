//! Substance selection for process calculations.
//!
//! Process code picks a [`Substance`] once and asks it for states through the
//! [`StateModel`] trait instead of branching on fluid names.

use crate::eos::R_WATER;
use crate::ideal_gas::GasProperties;
use crate::state::{SpecHeatCapacity, ThermoState};
use crate::water::{CP_LIQUID, WaterInput};
use serde::{Deserialize, Serialize};

/// Something that can resolve a state from pressure [kPa] and temperature [K].
pub trait StateModel {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    fn state(&self, p_kpa: f64, t_k: f64) -> ThermoState;
}

/// Working fluid of a process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Substance {
    /// Water/steam via the saturation-table resolver.
    Water,
    /// Ideal gas with constant specific heats.
    IdealGas(GasProperties),
}

/// Constant-pressure specific heat the power-cycle stages assume for water.
const CP_WATER_CYCLE: SpecHeatCapacity = CP_LIQUID;

/// Effective specific heat the steady-flow devices assume for steam.
const CP_WATER_FLOW: SpecHeatCapacity = 1.95;

/// Constant-volume specific heat the closed-system solver assumes for water.
const CV_WATER: SpecHeatCapacity = CP_LIQUID;

impl Substance {
    pub const AIR: Substance = Substance::IdealGas(GasProperties::AIR);

    /// Specific heat used to turn stage work into a temperature change in
    /// power cycles [kJ/(kg·K)].
    pub fn cycle_cp(&self) -> SpecHeatCapacity {
        match self {
            Substance::Water => CP_WATER_CYCLE,
            Substance::IdealGas(gas) => gas.cp,
        }
    }

    /// Specific heat used by the steady-flow device balances [kJ/(kg·K)].
    pub fn flow_cp(&self) -> SpecHeatCapacity {
        match self {
            Substance::Water => CP_WATER_FLOW,
            Substance::IdealGas(gas) => gas.cp,
        }
    }

    /// Constant-volume specific heat for closed-system balances [kJ/(kg·K)].
    pub fn cv(&self) -> SpecHeatCapacity {
        match self {
            Substance::Water => CV_WATER,
            Substance::IdealGas(gas) => gas.cv(),
        }
    }

    /// Specific gas constant [kJ/(kg·K)].
    pub fn gas_constant(&self) -> f64 {
        match self {
            Substance::Water => R_WATER,
            Substance::IdealGas(gas) => gas.r,
        }
    }
}

impl Default for Substance {
    fn default() -> Self {
        Self::AIR
    }
}

impl StateModel for Substance {
    fn name(&self) -> &str {
        match self {
            Substance::Water => "Water",
            Substance::IdealGas(gas) if *gas == GasProperties::AIR => "Air",
            Substance::IdealGas(_) => "Custom Ideal Gas",
        }
    }

    fn state(&self, p_kpa: f64, t_k: f64) -> ThermoState {
        match self {
            Substance::Water => WaterInput::PressureTemperature { p_kpa, t_k }.resolve(),
            Substance::IdealGas(gas) => gas.state(p_kpa, t_k),
        }
    }
}

impl std::str::FromStr for Substance {
    type Err = crate::FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" | "steam" | "h2o" => Ok(Substance::Water),
            "air" => Ok(Substance::AIR),
            _ => Err(crate::FluidError::InvalidArg {
                what: "substance must be 'water' or 'air'",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    #[test]
    fn water_dispatches_to_resolver() {
        let st = Substance::Water.state(101.325, 400.0);
        assert_eq!(st.phase, Phase::Superheated);
        assert_eq!(Substance::Water.name(), "Water");
    }

    #[test]
    fn air_dispatches_to_ideal_gas() {
        let st = Substance::AIR.state(101.325, 298.15);
        assert_eq!(st.phase, Phase::IdealGas);
        assert!(st.h.abs() < 1e-12);
        assert_eq!(Substance::AIR.name(), "Air");
    }

    #[test]
    fn process_heat_capacities() {
        assert_eq!(Substance::Water.cycle_cp(), 4.18);
        assert_eq!(Substance::Water.flow_cp(), 1.95);
        assert_eq!(Substance::AIR.flow_cp(), 1.005);
        assert!((Substance::AIR.cv() - 0.718).abs() < 1e-12);
        assert_eq!(Substance::Water.gas_constant(), 0.4615);
    }

    #[test]
    fn custom_gas_name() {
        let gas = Substance::IdealGas(GasProperties { r: 2.077, cp: 5.193 });
        assert_eq!(gas.name(), "Custom Ideal Gas");
    }

    #[test]
    fn parse_substance() {
        assert_eq!("Steam".parse::<Substance>().unwrap(), Substance::Water);
        assert_eq!("air".parse::<Substance>().unwrap(), Substance::AIR);
        assert!("mercury".parse::<Substance>().is_err());
    }
}
