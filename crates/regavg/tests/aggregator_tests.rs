//! End-to-end averaging over text-file products on the 5° grid.

mod common;

use common::{climatology, coverage_tables, date, TextProduct};
use regavg::{
    Aggregation, AggregationError, AveragingAggregator, AveragingConfig, AveragingTimeStep, Climatology, FileStore,
};
use sst_common::{ArrayGrid, GridDef, RegionMaskList, TemporalResolution};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::{assert_approx_eq, fixtures::regions, temp_test_dir_with_prefix, write_test_file};

const GLOBAL: usize = 0;
const BOX: usize = 1;

fn input_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = temp_test_dir_with_prefix("regavg_input");
    for (name, contents) in files {
        write_test_file(dir.path(), name, contents);
    }
    dir
}

fn aggregator(input: &Path) -> AveragingAggregator {
    let store = FileStore::scan(&TextProduct, ".nc", &[input]).unwrap();
    let regions = RegionMaskList::parse(&format!("{};{}", regions::GLOBAL, regions::BOX_0_0)).unwrap();
    AveragingAggregator::new(
        Arc::new(TextProduct),
        store,
        climatology(),
        Arc::new(coverage_tables()),
        regions,
        0.0,
    )
    .unwrap()
}

fn sst(step: &AveragingTimeStep, region: usize) -> f64 {
    step.regional_aggregation(region).unwrap().sst()
}

fn sample_count(step: &AveragingTimeStep, region: usize) -> usize {
    step.regional_aggregation(region).unwrap().sample_count()
}

fn january_february() -> TempDir {
    input_dir(&[
        ("2010/01/sst-20100101.nc", "291.0"),
        ("2010/01/sst-20100115.nc", "293.0"),
        ("2010/02/sst-20100210.nc", "295.0"),
    ])
}

// ============================================================================
// Elementary periods
// ============================================================================

#[test]
fn test_monthly_averages() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 1), date(2010, 3, 1), TemporalResolution::Monthly)
        .unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!((steps[0].start, steps[0].end), (date(2010, 1, 1), date(2010, 2, 1)));
    assert_eq!((steps[1].start, steps[1].end), (date(2010, 2, 1), date(2010, 3, 1)));

    let january = &steps[0];
    assert_approx_eq!(sst(january, GLOBAL), 292.0, 1e-9);
    assert_approx_eq!(january.regional_aggregation(GLOBAL).unwrap().sst_anomaly(), 2.0, 1e-9);
    // The globe is averaged from its eight 90° cells.
    assert_eq!(sample_count(january, GLOBAL), 8);
    assert_approx_eq!(sst(january, BOX), 292.0, 1e-9);
    assert_eq!(sample_count(january, BOX), 1);

    assert_approx_eq!(sst(&steps[1], GLOBAL), 295.0, 1e-9);
    assert_approx_eq!(sst(&steps[1], BOX), 295.0, 1e-9);
}

#[test]
fn test_global_coverage_uncertainty_is_reported() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 1), date(2010, 2, 1), TemporalResolution::Monthly)
        .unwrap();

    let global = steps[0].regional_aggregation(GLOBAL).unwrap();
    assert!(global.coverage_uncertainty().is_finite());
    assert!(global.coverage_uncertainty() > 0.0);
    // Not produced by the text product.
    assert!(global.random_uncertainty().is_nan());
}

#[test]
fn test_daily_steps_without_files_are_empty() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 1), date(2010, 1, 3), TemporalResolution::Daily)
        .unwrap();

    assert_eq!(steps.len(), 2);
    assert_approx_eq!(sst(&steps[0], GLOBAL), 291.0, 1e-9);
    assert_eq!(sample_count(&steps[1], GLOBAL), 0);
    assert!(sst(&steps[1], GLOBAL).is_nan());
}

#[test]
fn test_empty_range_yields_no_steps() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 3, 1), date(2010, 3, 1), TemporalResolution::Monthly)
        .unwrap();
    assert!(steps.is_empty());
}

#[test]
fn test_unreadable_files_are_skipped() {
    let input = january_february();
    write_test_file(input.path(), "2010/01/sst-20100120.nc", "corrupt");

    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 1), date(2010, 2, 1), TemporalResolution::Monthly)
        .unwrap();
    assert_approx_eq!(sst(&steps[0], GLOBAL), 292.0, 1e-9);
    assert_eq!(sample_count(&steps[0], BOX), 1);
}

// ============================================================================
// Folded periods
// ============================================================================

#[test]
fn test_seasonal_average_folds_months() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 1), date(2010, 4, 1), TemporalResolution::Seasonal)
        .unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].end, date(2010, 4, 1));
    // January and February with equal weight; March has no data and
    // does not count.
    assert_approx_eq!(sst(&steps[0], GLOBAL), 293.5, 1e-9);
    assert_approx_eq!(sst(&steps[0], BOX), 293.5, 1e-9);
    assert_eq!(sample_count(&steps[0], GLOBAL), 2);
    assert_eq!(sample_count(&steps[0], BOX), 2);
}

#[test]
fn test_weekly_resolution_is_unsupported() {
    let input = january_february();
    let result = aggregator(input.path()).aggregate(date(2010, 1, 1), date(2010, 2, 1), TemporalResolution::Weekly7d);
    assert!(matches!(result, Err(AggregationError::UnsupportedResolution(_))));
}

#[test]
fn test_report_serializes_missing_values_as_null() {
    let input = january_february();
    let steps = aggregator(input.path())
        .aggregate(date(2010, 1, 2), date(2010, 1, 3), TemporalResolution::Daily)
        .unwrap();

    let json = serde_json::to_value(steps[0].report()).unwrap();
    assert_eq!(json["start"], "2010-01-02");
    assert_eq!(json["regions"].as_array().unwrap().len(), 2);
    assert!(json["regions"][0]["sst"].is_null());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_rejects_climatology_for_another_grid() {
    let def = GridDef::global(1.0);
    let clim = Climatology::new(vec![ArrayGrid::filled(def, 290.0)], ArrayGrid::filled(def, 1.0), def).unwrap();
    let regions = RegionMaskList::parse(regions::GLOBAL).unwrap();

    let result = AveragingAggregator::new(
        Arc::new(TextProduct),
        FileStore::default(),
        clim,
        Arc::new(coverage_tables()),
        regions,
        0.5,
    );
    assert!(result.is_err());
}

#[test]
fn test_rejects_out_of_range_min_coverage() {
    let regions = RegionMaskList::parse(regions::GLOBAL).unwrap();
    let result = AveragingAggregator::new(
        Arc::new(TextProduct),
        FileStore::default(),
        climatology(),
        Arc::new(coverage_tables()),
        regions,
        1.5,
    );
    assert!(matches!(result, Err(AggregationError::InvalidArgument(_))));
}

#[test]
fn test_from_config() {
    let config = AveragingConfig {
        regions: format!("{};{}", regions::GLOBAL, regions::BOX_0_0),
        ..AveragingConfig::default()
    };
    let aggregator = AveragingAggregator::from_config(
        &config,
        Arc::new(TextProduct),
        FileStore::default(),
        climatology(),
        Arc::new(coverage_tables()),
    )
    .unwrap();
    assert_eq!(aggregator.regions().len(), 2);
}
