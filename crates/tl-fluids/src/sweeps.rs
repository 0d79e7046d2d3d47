//! Property sweeps for plots and tables.
//!
//! A [`SweepDefinition`] generates the independent values; the helpers below
//! turn them into state lines for the T-v dome, EOS isotherms and water
//! isobars.

use crate::eos::{CriticalProps, EosModel, eos_state};
use crate::error::{FluidError, FluidResult};
use crate::saturation::{STEAM_SAT_TABLE, SaturationRow};
use crate::state::ThermoState;
use crate::units::{Quantity, parse_quantity};
use crate::water::water_state;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepType {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single parameter sweep, in the engine basis.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: Quantity,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        quantity: Quantity,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> FluidResult<Self> {
        if num_points < 2 {
            return Err(FluidError::Sweep {
                what: "sweep must have at least 2 points",
            });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(FluidError::Sweep {
                what: "sweep bounds must be finite",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(FluidError::Sweep {
                what: "start and end values must be different",
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(FluidError::Sweep {
                what: "logarithmic sweep bounds must be positive",
            });
        }
        Ok(Self {
            quantity,
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Create a sweep from unit-tagged text such as `"1 bar"` .. `"10 MPa"`.
    pub fn from_text(
        start_raw: &str,
        end_raw: &str,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> FluidResult<Self> {
        let start = parse_quantity(start_raw, quantity)?;
        let end = parse_quantity(end_raw, quantity)?;
        Self::new(quantity, start, end, num_points, sweep_type)
    }

    /// Generate all points in the sweep. Endpoints are exact.
    ///
    /// A definition built by hand with fewer than two points yields at most
    /// the start value.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        if n < 2 {
            return vec![self.start; n];
        }
        let last = (n - 1) as f64;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Linear => {
                let delta = (self.end - self.start) / last;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepType::Logarithmic => {
                let log_start = self.start.ln();
                let log_delta = (self.end.ln() - log_start) / last;
                (0..n).map(|i| (log_start + i as f64 * log_delta).exp()).collect()
            }
        };
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.quantity, self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

/// A point on the saturation dome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomePoint {
    /// Specific volume [m³/kg]
    pub v: f64,
    /// Temperature [°C]
    pub t_c: f64,
    /// Pressure [kPa]
    pub p_kpa: f64,
}

/// Saturated liquid and vapor lines of the T-v diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationDome {
    pub liquid: Vec<DomePoint>,
    pub vapor: Vec<DomePoint>,
}

/// Saturation dome straight from the table rows, ordered by temperature.
pub fn saturation_dome() -> SaturationDome {
    let point = |row: &SaturationRow, v: f64| DomePoint {
        v,
        t_c: row.t_c,
        p_kpa: row.p_kpa,
    };
    SaturationDome {
        liquid: STEAM_SAT_TABLE.iter().map(|r| point(r, r.vf)).collect(),
        vapor: STEAM_SAT_TABLE.iter().map(|r| point(r, r.vg)).collect(),
    }
}

/// EOS states along a pressure sweep at fixed temperature.
pub fn isotherm(
    t_k: f64,
    pressures: &[f64],
    model: EosModel,
    critical: &CriticalProps,
    r: Option<f64>,
) -> Vec<ThermoState> {
    pressures
        .iter()
        .map(|&p| eos_state(p, t_k, model, critical, r))
        .collect()
}

/// Water states along a temperature sweep at fixed pressure.
pub fn water_isobar(p_kpa: f64, temperatures_k: &[f64]) -> Vec<ThermoState> {
    temperatures_k
        .iter()
        .map(|&t| water_state(Some(p_kpa), Some(t), None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::state::Phase;

    #[test]
    fn linear_sweep_generation() {
        let sweep =
            SweepDefinition::new(Quantity::Temperature, 300.0, 400.0, 5, SweepType::Linear)
                .unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert!((points[4] - 400.0).abs() < 1e-9);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepDefinition::from_text(
            "1 bar",
            "10 bar",
            Quantity::Pressure,
            3,
            SweepType::Logarithmic,
        )
        .unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 3);
        assert!((points[2] - 1000.0).abs() < 1e-9);
        assert!((points[0] - 100.0).abs() < 1e-9);
        let expected_mid = (100.0_f64 * 1000.0).sqrt();
        assert!((points[1] - expected_mid).abs() / expected_mid < 1e-6);
    }

    #[test]
    fn hand_built_short_sweeps_do_not_panic() {
        let mut sweep = SweepDefinition {
            quantity: Quantity::Temperature,
            start: 300.0,
            end: 400.0,
            num_points: 0,
            sweep_type: SweepType::Linear,
        };
        assert!(sweep.generate_points().is_empty());
        sweep.num_points = 1;
        assert_eq!(sweep.generate_points(), vec![300.0]);
        sweep.sweep_type = SweepType::Logarithmic;
        assert_eq!(sweep.generate_points(), vec![300.0]);
    }

    #[test]
    fn rejects_degenerate_sweeps() {
        assert!(matches!(
            SweepDefinition::new(Quantity::Temperature, 300.0, 400.0, 1, SweepType::Linear),
            Err(FluidError::Sweep { .. })
        ));
        assert!(matches!(
            SweepDefinition::new(Quantity::Temperature, 300.0, 300.0, 5, SweepType::Linear),
            Err(FluidError::Sweep { .. })
        ));
        assert!(matches!(
            SweepDefinition::new(Quantity::Pressure, 0.0, 100.0, 5, SweepType::Logarithmic),
            Err(FluidError::Sweep { .. })
        ));
        assert!(matches!(
            SweepDefinition::from_text("1 psi", "2 psia", Quantity::Pressure, 5, SweepType::Linear),
            Err(FluidError::Unit(_))
        ));
    }

    #[test]
    fn dome_lines_follow_the_table() {
        let dome = saturation_dome();
        assert_eq!(dome.liquid.len(), STEAM_SAT_TABLE.len());
        assert!(dome.liquid.iter().zip(&dome.vapor).all(|(l, v)| l.v <= v.v));
        assert!(dome.vapor.windows(2).all(|w| w[0].t_c < w[1].t_c));
    }

    #[test]
    fn methane_isotherm() {
        let critical = Component::Methane.data().critical();
        let states = isotherm(
            300.0,
            &[100.0, 1000.0, 5000.0],
            EosModel::PengRobinson,
            &critical,
            Some(0.5183),
        );
        assert_eq!(states.len(), 3);
        assert!(states.iter().all(|s| s.t == 300.0 && s.z.is_some()));
        assert!(states.windows(2).all(|w| w[0].v > w[1].v));
    }

    #[test]
    fn water_isobar_crosses_saturation() {
        let states = water_isobar(101.325, &[300.0, 500.0]);
        assert_eq!(states[0].phase, Phase::CompressedLiquid);
        assert_eq!(states[1].phase, Phase::Superheated);
    }
}
