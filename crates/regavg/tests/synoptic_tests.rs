//! Regression pins for the synoptic uncertainty model.

use regavg::SynopticUncertaintyProvider;
use sst_common::{SpatialResolution, TemporalResolution};
use test_utils::assert_approx_eq;

use SpatialResolution::*;

fn provider(spatial: SpatialResolution, temporal: TemporalResolution) -> SynopticUncertaintyProvider {
    SynopticUncertaintyProvider::new(spatial, temporal)
}

// ============================================================================
// dt breakpoints
// ============================================================================

const WEEKLY_DT: [f64; 24] = [
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, // 0.05 .. 1.25
    1.0, 1.0, 1.0, 1.0, // 2.0 .. 2.5
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 3.0 .. 10.0
];

const MONTHLY_DT: [f64; 24] = [
    10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, // 0.05 .. 0.5
    9.0, 9.0, 8.5, 6.0, 3.5, 3.0, 0.5, 0.25, 0.2, 0.2, 0.1, // 0.6 .. 3.0
    0.0, 0.0, 0.0, 0.0, 0.0, // 3.75 .. 10.0
];

#[test]
fn test_dt_weekly5d_table() {
    for (resolution, expected) in SpatialResolution::ALL.iter().zip(WEEKLY_DT) {
        let dt = provider(*resolution, TemporalResolution::Weekly5d).dt();
        assert_eq!(dt, expected, "weekly5d at {}°", resolution);
    }
}

#[test]
fn test_dt_weekly7d_table() {
    for (resolution, expected) in SpatialResolution::ALL.iter().zip(WEEKLY_DT) {
        let dt = provider(*resolution, TemporalResolution::Weekly7d).dt();
        assert_eq!(dt, expected, "weekly7d at {}°", resolution);
    }
}

#[test]
fn test_dt_monthly_table() {
    for (resolution, expected) in SpatialResolution::ALL.iter().zip(MONTHLY_DT) {
        let dt = provider(*resolution, TemporalResolution::Monthly).dt();
        assert_eq!(dt, expected, "monthly at {}°", resolution);
    }
}

#[test]
fn test_dt_is_zero_for_other_periods() {
    for resolution in SpatialResolution::ALL {
        for temporal in [
            TemporalResolution::Daily,
            TemporalResolution::Seasonal,
            TemporalResolution::Annual,
        ] {
            assert_eq!(provider(resolution, temporal).dt(), 0.0);
        }
    }
}

#[test]
fn test_dt_weekly5d_extremes() {
    assert_eq!(provider(Degree0_05, TemporalResolution::Weekly5d).dt(), 2.0);
    assert_eq!(provider(Degree5_00, TemporalResolution::Weekly5d).dt(), 0.0);
}

// ============================================================================
// dxy
// ============================================================================

#[test]
fn test_dxy_blends_pole_and_equator() {
    let p = provider(Degree5_00, TemporalResolution::Weekly5d);
    assert_approx_eq!(p.dxy(0), 188.815598861, 1e-6);
    assert_approx_eq!(p.dxy(9), 240.705816361, 1e-6);
    assert_approx_eq!(p.dxy(18), 286.830454139, 1e-6);
    assert_approx_eq!(p.dxy(27), 234.940236639, 1e-6);
    assert_approx_eq!(p.dxy(35), 188.815598861, 1e-6);
}

#[test]
fn test_dxy_is_zero_at_finest_resolution() {
    let p = provider(Degree0_05, TemporalResolution::Weekly5d);
    assert_eq!(p.dxy(0), 0.0);
    assert_eq!(p.dxy(1800), 0.0);
}

// ============================================================================
// r, eta, calculate
// ============================================================================

#[test]
fn test_r() {
    let p = provider(Degree0_15, TemporalResolution::Weekly5d);
    assert_approx_eq!(p.r(12), 0.3578079577435727, 1e-12);
}

#[test]
fn test_eta() {
    let p = provider(Degree0_15, TemporalResolution::Weekly5d);
    assert_approx_eq!(p.eta(16, 209), 2.771316127976776, 1e-12);
    assert_approx_eq!(p.eta(16, 1), 1.0, 1e-12);
}

#[test]
fn test_calculate() {
    let p = provider(Degree0_60, TemporalResolution::Weekly7d);
    assert_approx_eq!(p.calculate(19, 211, 2.6), 0.8571179770138263, 1e-12);

    let p = provider(Degree0_75, TemporalResolution::Weekly5d);
    assert_approx_eq!(p.calculate(19, 211, 3.2), 1.0216628434543982, 1e-12);
}

#[test]
fn test_calculate_propagates_nan() {
    let p = provider(Degree5_00, TemporalResolution::Monthly);
    assert!(p.calculate(3, 10, f64::NAN).is_nan());
}
