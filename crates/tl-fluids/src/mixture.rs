//! Binary liquid mixtures: one-parameter Margules activity model,
//! modified Raoult's law and mixing energies.

use crate::antoine::AntoineParams;
use serde::{Deserialize, Serialize};
use tl_core::units::{celsius_to_k, constants::R_UNIVERSAL};
use tracing::{debug, warn};

/// Margules A above which a regular solution is reported as unstable.
pub const UNSTABLE_MARGULES: f64 = 2.0;

/// Liquid composition is kept this far from pure components so that
/// `x ln x` stays finite.
pub const X_MIN: f64 = 1e-4;
pub const X_MAX: f64 = 1.0 - X_MIN;

/// Composition step used when the requested one is not finite.
pub const DEFAULT_STEP: f64 = 0.05;
const MIN_STEP: f64 = 0.001;

/// Liquid activity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityModel {
    /// Ideal solution: all activity coefficients are 1.
    Ideal,
    /// Regular solution with a one-parameter Margules excess term.
    #[default]
    Regular,
}

impl std::str::FromStr for ActivityModel {
    type Err = crate::FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ideal" => Ok(ActivityModel::Ideal),
            "regular" | "margules" => Ok(ActivityModel::Regular),
            _ => Err(crate::FluidError::InvalidArg {
                what: "activity model must be 'ideal' or 'regular'",
            }),
        }
    }
}

/// One liquid composition of a binary mixture at fixed temperature.
///
/// Pressures are in kPa; mixing energies in J/mol, entropy in J/(mol·K).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixturePoint {
    pub x_a: f64,
    pub x_b: f64,
    /// Vapor mole fraction of A.
    pub y_a: f64,
    pub gamma_a: f64,
    pub gamma_b: f64,
    pub p_a_kpa: f64,
    pub p_b_kpa: f64,
    pub p_total_kpa: f64,
    pub dh_mix: f64,
    pub ds_mix: f64,
    pub dg_mix: f64,
    /// `T·ΔS_mix` [J/mol]
    pub t_ds: f64,
}

/// Composition sweep of a binary mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureCurve {
    pub psat_a_kpa: f64,
    pub psat_b_kpa: f64,
    pub temperature_k: f64,
    pub points: Vec<MixturePoint>,
    /// Regular model with Margules A above [`UNSTABLE_MARGULES`].
    pub unstable: bool,
}

impl MixtureCurve {
    /// Grid point covering liquid composition `x_a` in `[0, 1]`.
    pub fn point_near(&self, x_a: f64) -> Option<&MixturePoint> {
        let intervals = self.points.len().checked_sub(1).filter(|n| *n > 0)?;
        let x = if x_a.is_nan() { 0.0 } else { x_a.clamp(0.0, 1.0) };
        let idx = ((x * intervals as f64).floor() as usize).min(intervals - 1);
        self.points.get(idx)
    }

    /// Bubble-point line: `(x_A, P_total)`.
    pub fn bubble_line(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x_a, p.p_total_kpa)).collect()
    }

    /// Dew-point line: `(y_A, P_total)`.
    pub fn dew_line(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.y_a, p.p_total_kpa)).collect()
    }
}

/// Whether a solution with this model and coefficient is flagged unstable.
pub fn is_unstable(model: ActivityModel, margules: f64) -> bool {
    model == ActivityModel::Regular && margules > UNSTABLE_MARGULES
}

/// Activity coefficients `(γ_A, γ_B)` at liquid composition `x_a`.
pub fn activity_coefficients(model: ActivityModel, margules: f64, x_a: f64) -> (f64, f64) {
    match model {
        ActivityModel::Ideal => (1.0, 1.0),
        ActivityModel::Regular => {
            let x_b = 1.0 - x_a;
            ((margules * x_b * x_b).exp(), (margules * x_a * x_a).exp())
        }
    }
}

/// VLE and mixing energies of `a` + `b` at `t_c` [°C] over a liquid
/// composition grid with spacing `step`.
pub fn mixture_curve(
    a: &AntoineParams,
    b: &AntoineParams,
    t_c: f64,
    margules: f64,
    model: ActivityModel,
    step: f64,
) -> MixtureCurve {
    let t_k = celsius_to_k(t_c);
    let psat_a = a.psat_kpa(t_c);
    let psat_b = b.psat_kpa(t_c);
    let unstable = is_unstable(model, margules);

    debug!(t_c, margules, ?model, psat_a, psat_b, unstable, "mixture curve");

    let points = composition_grid(step)
        .map(|x| mixture_point(x, t_k, psat_a, psat_b, margules, model))
        .collect();

    MixtureCurve {
        psat_a_kpa: psat_a,
        psat_b_kpa: psat_b,
        temperature_k: t_k,
        points,
        unstable,
    }
}

fn mixture_point(
    x: f64,
    t_k: f64,
    psat_a: f64,
    psat_b: f64,
    margules: f64,
    model: ActivityModel,
) -> MixturePoint {
    let x_a = x.clamp(X_MIN, X_MAX);
    let x_b = 1.0 - x_a;
    let (gamma_a, gamma_b) = activity_coefficients(model, margules, x_a);

    let p_a = x_a * gamma_a * psat_a;
    let p_b = x_b * gamma_b * psat_b;
    let p_total = p_a + p_b;
    let y_a = if p_total > 0.0 { p_a / p_total } else { 0.0 };

    let ds_mix = -R_UNIVERSAL * (x_a * x_a.ln() + x_b * x_b.ln());
    let dh_mix = match model {
        ActivityModel::Ideal => 0.0,
        ActivityModel::Regular => margules * R_UNIVERSAL * t_k * x_a * x_b,
    };
    let t_ds = t_k * ds_mix;

    MixturePoint {
        x_a,
        x_b,
        y_a,
        gamma_a,
        gamma_b,
        p_a_kpa: p_a,
        p_b_kpa: p_b,
        p_total_kpa: p_total,
        dh_mix,
        ds_mix,
        dg_mix: dh_mix - t_ds,
        t_ds,
    }
}

/// Ideal Raoult's-law diagram: `x` runs over `[0, 1]` inclusive with no
/// clamping and no activity correction.
pub fn raoult_curve(a: &AntoineParams, b: &AntoineParams, t_c: f64, step: f64) -> MixtureCurve {
    let psat_a = a.psat_kpa(t_c);
    let psat_b = b.psat_kpa(t_c);

    let points = composition_grid(step)
        .map(|x_a| {
            let x_b = 1.0 - x_a;
            let p_a = x_a * psat_a;
            let p_b = x_b * psat_b;
            let p_total = p_a + p_b;
            MixturePoint {
                x_a,
                x_b,
                y_a: if p_total > 0.0 { p_a / p_total } else { 0.0 },
                gamma_a: 1.0,
                gamma_b: 1.0,
                p_a_kpa: p_a,
                p_b_kpa: p_b,
                p_total_kpa: p_total,
                dh_mix: 0.0,
                ds_mix: 0.0,
                dg_mix: 0.0,
                t_ds: 0.0,
            }
        })
        .collect();

    MixtureCurve {
        psat_a_kpa: psat_a,
        psat_b_kpa: psat_b,
        temperature_k: celsius_to_k(t_c),
        points,
        unstable: false,
    }
}

/// `0, step, 2·step, ..., 1` with the last point pinned to 1.
fn composition_grid(step: f64) -> impl Iterator<Item = f64> {
    let step = if step.is_finite() {
        step.clamp(MIN_STEP, 1.0)
    } else {
        warn!(step, "non-finite composition step, using default");
        DEFAULT_STEP
    };
    let intervals = (1.0 / step - 1e-9).ceil() as usize;
    (0..=intervals).map(move |i| (i as f64 * step).min(1.0))
}
