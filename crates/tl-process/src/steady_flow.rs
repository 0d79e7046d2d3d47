//! Steady-flow device balances.
//!
//! Each device takes an inlet (P1, T1), an exit pressure and an isentropic
//! efficiency and produces the exit state with the specific work and heat
//! exchanged. Kinetic and potential energy changes are optional.
//!
//! ## Model
//!
//! Turbines and compressors use a fixed pressure-ratio exponent in place of
//! `(γ-1)/γ`:
//!
//! ```text
//! turbine:     w = η · cp · T1 · (1 − (P2/P1)^0.285)
//! compressor:  w = −cp · T1 · ((P2/P1)^0.285 − 1) / η
//! T2 = T1 − w / cp
//! ```
//!
//! ## Sign Conventions
//!
//! `w > 0` is work produced by the fluid, `q > 0` is heat added to it.
//! All energies are per unit mass [kJ/kg].

use crate::common::{check_efficiency, check_finite, check_positive};
use crate::error::ProcessResult;
use serde::{Deserialize, Serialize};
use tl_core::units::constants::G0_MPS2;
use tl_fluids::{StateModel, Substance, ThermoState};
use tracing::debug;

/// Fixed exponent for the isentropic temperature ratio.
pub const PRESSURE_RATIO_EXPONENT: f64 = 0.285;

/// Temperature rise across a heat exchanger [K].
pub const HEAT_EXCHANGER_RISE_K: f64 = 25.0;

/// Steady-flow device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDevice {
    Turbine,
    Compressor,
    Pump,
    Nozzle,
    /// Throttling valve
    Valve,
    HeatExchanger,
}

impl FlowDevice {
    /// Governing-equation label.
    pub fn equation(self) -> &'static str {
        match self {
            FlowDevice::Turbine => "w = η·(h₁ - h₂s)",
            FlowDevice::Compressor | FlowDevice::Pump => "w = (h₁ - h₂s)/η",
            FlowDevice::Nozzle => "V₂ = √[2·(h₁-h₂)]",
            FlowDevice::Valve => "h₁ = h₂ (Isenthalpic)",
            FlowDevice::HeatExchanger => "q = Δh + Δke + Δpe",
        }
    }
}

impl std::str::FromStr for FlowDevice {
    type Err = crate::ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "turbine" => Ok(FlowDevice::Turbine),
            "compressor" => Ok(FlowDevice::Compressor),
            "pump" => Ok(FlowDevice::Pump),
            "nozzle" => Ok(FlowDevice::Nozzle),
            "valve" | "throttle" => Ok(FlowDevice::Valve),
            "heat_exchanger" | "hx" => Ok(FlowDevice::HeatExchanger),
            _ => Err(crate::ProcessError::InvalidArg {
                what: "unknown steady-flow device",
            }),
        }
    }
}

/// Optional inlet/exit velocities [m/s].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocities {
    pub v1: f64,
    pub v2: f64,
}

/// Optional inlet/exit elevations [m].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Elevations {
    pub z1: f64,
    pub z2: f64,
}

/// Inputs for one device balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSpec {
    pub device: FlowDevice,
    pub substance: Substance,
    pub p1_kpa: f64,
    pub t1_k: f64,
    pub p2_kpa: f64,
    #[serde(default = "unit_efficiency")]
    pub efficiency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocities: Option<Velocities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevations: Option<Elevations>,
}

fn unit_efficiency() -> f64 {
    1.0
}

impl FlowSpec {
    pub fn new(device: FlowDevice, substance: Substance, p1_kpa: f64, t1_k: f64, p2_kpa: f64) -> Self {
        Self {
            device,
            substance,
            p1_kpa,
            t1_k,
            p2_kpa,
            efficiency: 1.0,
            velocities: None,
            elevations: None,
        }
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_velocities(mut self, v1: f64, v2: f64) -> Self {
        self.velocities = Some(Velocities { v1, v2 });
        self
    }

    pub fn with_elevations(mut self, z1: f64, z2: f64) -> Self {
        self.elevations = Some(Elevations { z1, z2 });
        self
    }

    /// Kinetic energy change [kJ/kg], zero when velocities are not given.
    pub fn delta_ke(&self) -> f64 {
        self.velocities
            .map_or(0.0, |v| (v.v2 * v.v2 - v.v1 * v.v1) / 2000.0)
    }

    /// Potential energy change [kJ/kg], zero when elevations are not given.
    pub fn delta_pe(&self) -> f64 {
        self.elevations
            .map_or(0.0, |z| G0_MPS2 * (z.z2 - z.z1) / 1000.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub device: FlowDevice,
    pub inlet: ThermoState,
    pub outlet: ThermoState,
    /// Specific work produced [kJ/kg]
    pub w: f64,
    /// Specific heat added [kJ/kg]
    pub q: f64,
    pub delta_ke: f64,
    pub delta_pe: f64,
    /// Nozzle exit velocity [m/s]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_velocity: Option<f64>,
    pub equation: String,
}

/// Solve the energy balance of one steady-flow device.
pub fn solve_device(spec: &FlowSpec) -> ProcessResult<FlowResult> {
    let eta = check_efficiency(spec.efficiency, "efficiency must be in (0,1]")?;
    let p1 = check_positive(spec.p1_kpa, "inlet pressure must be positive")?;
    let t1 = check_positive(spec.t1_k, "inlet temperature must be positive")?;
    let p2 = check_finite(spec.p2_kpa, "exit pressure must be finite")?;

    let substance = spec.substance;
    let cp = substance.flow_cp();
    let inlet = substance.state(p1, t1);
    let delta_ke = spec.delta_ke();
    let delta_pe = spec.delta_pe();

    let mut w = 0.0;
    let mut q = 0.0;
    let mut exit_velocity = None;
    let t2 = match spec.device {
        FlowDevice::Turbine => {
            let w_s = cp * t1 * (1.0 - (p2 / p1).powf(PRESSURE_RATIO_EXPONENT));
            w = eta * w_s;
            t1 - w / cp
        }
        FlowDevice::Compressor | FlowDevice::Pump => {
            let w_s = cp * t1 * ((p2 / p1).powf(PRESSURE_RATIO_EXPONENT) - 1.0);
            w = -(w_s / eta);
            t1 - w / cp
        }
        FlowDevice::Nozzle => {
            let h2 = inlet.h - delta_ke - delta_pe;
            let v1 = spec.velocities.map_or(0.0, |v| v.v1);
            exit_velocity = Some((v1 * v1 + 2000.0 * (inlet.h - h2)).max(0.0).sqrt());
            t1 + (h2 - inlet.h) / cp
        }
        FlowDevice::Valve => t1,
        FlowDevice::HeatExchanger => {
            let t2 = t1 + HEAT_EXCHANGER_RISE_K;
            q = cp * (t2 - t1) + delta_ke + delta_pe;
            t2
        }
    };

    let outlet = substance.state(p2, t2);
    debug!(device = ?spec.device, substance = substance.name(), w, q, t2, "steady-flow device");

    Ok(FlowResult {
        device: spec.device,
        inlet,
        outlet,
        w,
        q,
        delta_ke,
        delta_pe,
        exit_velocity,
        equation: spec.device.equation().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn air_turbine_produces_work() {
        let spec = FlowSpec::new(FlowDevice::Turbine, Substance::AIR, 1000.0, 1200.0, 100.0)
            .with_efficiency(0.85);
        let r = solve_device(&spec).unwrap();
        let expected = 0.85 * 1.005 * 1200.0 * (1.0 - 0.1f64.powf(0.285));
        assert!(close(r.w, expected));
        assert!(close(r.outlet.t, 1200.0 - expected / 1.005));
        assert_eq!(r.q, 0.0);
        assert_eq!(r.equation, "w = η·(h₁ - h₂s)");
    }

    #[test]
    fn compressor_consumes_work_and_heats_gas() {
        let spec = FlowSpec::new(FlowDevice::Compressor, Substance::AIR, 100.0, 300.0, 800.0)
            .with_efficiency(0.8);
        let r = solve_device(&spec).unwrap();
        assert!(r.w < 0.0);
        assert!(r.outlet.t > 300.0);
        assert!(close(r.outlet.t, 300.0 - r.w / 1.005));
    }

    #[test]
    fn steam_turbine_uses_flow_cp() {
        let spec = FlowSpec::new(FlowDevice::Turbine, Substance::Water, 2000.0, 673.15, 100.0)
            .with_efficiency(0.85);
        let r = solve_device(&spec).unwrap();
        let expected = 0.85 * 1.95 * 673.15 * (1.0 - 0.05f64.powf(0.285));
        assert!(close(r.w, expected));
    }

    #[test]
    fn valve_is_isothermal() {
        let spec = FlowSpec::new(FlowDevice::Valve, Substance::AIR, 500.0, 350.0, 100.0);
        let r = solve_device(&spec).unwrap();
        assert_eq!(r.outlet.t, 350.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.outlet.p, 100.0);
    }

    #[test]
    fn nozzle_converts_enthalpy_to_velocity() {
        let spec = FlowSpec::new(FlowDevice::Nozzle, Substance::AIR, 300.0, 500.0, 100.0)
            .with_velocities(0.0, 100.0);
        let r = solve_device(&spec).unwrap();
        assert!(close(r.delta_ke, 5.0));
        assert!(close(r.outlet.t, 500.0 - 5.0 / 1.005));
        let v2 = r.exit_velocity.unwrap();
        assert!((v2 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn heat_exchanger_adds_fixed_rise() {
        let spec = FlowSpec::new(FlowDevice::HeatExchanger, Substance::AIR, 200.0, 300.0, 200.0)
            .with_elevations(0.0, 10.0);
        let r = solve_device(&spec).unwrap();
        assert!(close(r.outlet.t, 325.0));
        assert!(close(r.delta_pe, 0.0981));
        assert!(close(r.q, 1.005 * 25.0 + 0.0981));
    }

    #[test]
    fn energy_terms_default_to_zero() {
        let spec = FlowSpec::new(FlowDevice::HeatExchanger, Substance::AIR, 200.0, 300.0, 200.0);
        assert_eq!(spec.delta_ke(), 0.0);
        assert_eq!(spec.delta_pe(), 0.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        let base = FlowSpec::new(FlowDevice::Turbine, Substance::AIR, 1000.0, 1200.0, 100.0);
        let bad_eta = base.clone().with_efficiency(0.0);
        assert!(matches!(solve_device(&bad_eta), Err(ProcessError::InvalidArg { .. })));
        let bad_eta = base.clone().with_efficiency(1.2);
        assert!(solve_device(&bad_eta).is_err());
        let mut bad_p = base;
        bad_p.p1_kpa = 0.0;
        assert!(solve_device(&bad_p).is_err());
    }

    #[test]
    fn parse_device_names() {
        assert_eq!("heat-exchanger".parse::<FlowDevice>().unwrap(), FlowDevice::HeatExchanger);
        assert_eq!("Throttle".parse::<FlowDevice>().unwrap(), FlowDevice::Valve);
        assert!("boiler".parse::<FlowDevice>().is_err());
    }
}
