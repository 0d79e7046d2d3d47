//! Property-level checks of the engine across its input space.

use proptest::prelude::*;
use tl_fluids::eos::{PrCoefficients, R_WATER};
use tl_fluids::{
    ActivityModel, Component, CubicRootSolver, EosModel, FixedNewton, GasProperties, Phase, SatKey, antoine_psat, eos_state,
    ideal_gas_state, mixture_curve, mmhg_to_kpa, saturation_lookup, water_state,
};

#[test]
fn ideal_gas_reference_datum() {
    let st = ideal_gas_state(101.325, 298.15, GasProperties::AIR);
    assert_eq!(st.u, 0.0);
    assert_eq!(st.h, 0.0);
}

#[test]
fn saturation_row_at_100c_is_exact() {
    let row = saturation_lookup(SatKey::Temperature, 100.0);
    assert_eq!(row.p_kpa, 101.4);
    assert_eq!(row.vf, 0.001043);
    assert_eq!(row.vg, 1.673);
    assert_eq!(row.hf, 419.1);
    assert_eq!(row.hg, 2675.6);
}

#[test]
fn water_phase_boundaries_at_one_atmosphere() {
    let p = 101.325;
    assert_eq!(water_state(Some(p), Some(373.25), None).phase, Phase::Superheated);
    assert_eq!(water_state(Some(p), Some(372.95), None).phase, Phase::CompressedLiquid);
    assert_eq!(water_state(Some(p), Some(373.15), None).phase, Phase::SaturatedLiquid);
}

#[test]
fn zero_quality_matches_saturated_liquid_branch() {
    let p = 101.325;
    let with_x = water_state(Some(p), Some(373.15), Some(0.0));
    let without = water_state(Some(p), Some(373.15), None);
    for (a, b) in [
        (with_x.p, without.p),
        (with_x.t, without.t),
        (with_x.v, without.v),
        (with_x.h, without.h),
        (with_x.s, without.s),
    ] {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn antoine_water_boiling_point() {
    let p = mmhg_to_kpa(antoine_psat(8.07131, 1730.63, 233.426, 100.0));
    assert!((p - 101.3).abs() / 101.3 < 0.02, "p = {p}");
}

#[test]
fn mixture_stability_flag() {
    let a = &Component::Ethanol.data().antoine;
    let b = &Component::Water.data().antoine;
    let flag = |m| mixture_curve(a, b, 78.0, m, ActivityModel::Regular, 0.05).unstable;
    assert!(flag(2.5));
    assert!(!flag(1.0));
    assert!(!flag(2.0));
}

proptest! {
    #[test]
    fn ideal_gas_datum_relative_identity(p in 1.0..20_000.0f64, t in 150.0..2_000.0f64) {
        let gas = GasProperties::AIR;
        let st = ideal_gas_state(p, t, gas);
        let expected = gas.r * (t - 298.15);
        prop_assert!((st.h - st.u - expected).abs() < 1e-9);
    }

    #[test]
    fn saturation_pressure_is_monotonic(t1 in 0.01..374.0f64, t2 in 0.01..374.0f64) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let p_lo = saturation_lookup(SatKey::Temperature, lo).p_kpa;
        let p_hi = saturation_lookup(SatKey::Temperature, hi).p_kpa;
        prop_assert!(p_lo <= p_hi);
    }

    #[test]
    fn peng_robinson_always_returns_finite(
        p in 1e-2..1e5f64,
        t in 10.0..5_000.0f64,
        idx in 0usize..4,
    ) {
        let critical = Component::ALL[idx].data().critical();
        let st = eos_state(p, t, EosModel::PengRobinson, &critical, None);
        let z = st.z.unwrap_or(f64::NAN);
        prop_assert!(z.is_finite());
        prop_assert!(st.v.is_finite());

        let phi = st.phi.unwrap_or(f64::NAN);
        prop_assert!(phi.is_finite() && phi >= 0.0);
        prop_assert!(st.f.unwrap_or(f64::NAN).is_finite());

        let (c2, c1, c0) = PrCoefficients::new(p, t, &critical, R_WATER).cubic();
        let root = FixedNewton::default().solve(c2, c1, c0);
        prop_assert!(root.iterations <= 10);
        prop_assert!((root.z - z).abs() < 1e-12 || (root.z.is_nan() && z.is_nan()));
    }

    #[test]
    fn ideal_mixing_has_no_enthalpy(
        t_c in 20.0..90.0f64,
        margules in -1.0..4.0f64,
        ia in 0usize..4,
        ib in 0usize..4,
    ) {
        let a = &Component::ALL[ia].data().antoine;
        let b = &Component::ALL[ib].data().antoine;
        let curve = mixture_curve(a, b, t_c, margules, ActivityModel::Ideal, 0.05);
        prop_assert!(curve.points.iter().all(|p| p.dh_mix == 0.0));
    }

    #[test]
    fn mixture_curve_is_repeatable(t_c in 20.0..90.0f64, margules in -1.0..4.0f64) {
        let a = &Component::Benzene.data().antoine;
        let b = &Component::Ethanol.data().antoine;
        let first = mixture_curve(a, b, t_c, margules, ActivityModel::Regular, 0.05);
        let second = mixture_curve(a, b, t_c, margules, ActivityModel::Regular, 0.05);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn water_state_never_panics(
        p in proptest::option::of(0.0..30_000.0f64),
        t in proptest::option::of(200.0..1_200.0f64),
        x in proptest::option::of(-0.5..1.5f64),
    ) {
        let st = water_state(p, t, x);
        prop_assert!(st.p.is_finite() && st.t.is_finite());
    }
}
