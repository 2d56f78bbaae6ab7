//! Regional aggregations and the cell-grid folds that produce them.

use crate::accumulator::NumberAccumulator;
use crate::cell::{
    Aggregation, AggregationCell, CellAggregationCell, CellFactory, CoarseCellFactory, QuantityAccumulators,
};
use crate::cell_grid::CellGrid;
use crate::error::{AggregationError, Result};
use serde::{Deserialize, Serialize};
use sst_common::{Grid, GridDef, RegionMask};

/// Statistics of one region over one output period.
#[derive(Debug, Clone, Default)]
pub struct RegionalAggregation {
    acc: QuantityAccumulators,
}

impl RegionalAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one cell of the same period, weighted by its sea coverage.
    pub fn accumulate_cell<C: AggregationCell + ?Sized>(&mut self, cell: &C, sea_coverage: f64) -> Result<()> {
        self.acc.fold(cell, sea_coverage)
    }

    /// Fold the result of a shorter period with weight 1.
    pub fn accumulate_aggregation<A: Aggregation + ?Sized>(&mut self, other: &A) -> Result<()> {
        self.acc.fold(other, 1.0)
    }

    /// Plain values of all quantities, NaN encoded as `null` in JSON.
    pub fn summary(&self) -> AggregationSummary {
        AggregationSummary::from_aggregation(self)
    }
}

impl Aggregation for RegionalAggregation {
    fn sample_count(&self) -> usize {
        self.acc.sample_count()
    }

    fn sst(&self) -> f64 {
        self.acc.sst.combine()
    }

    fn sst_anomaly(&self) -> f64 {
        self.acc.anomaly.combine()
    }

    fn random_uncertainty(&self) -> f64 {
        self.acc.random.combine()
    }

    fn coverage_uncertainty(&self) -> f64 {
        self.acc.coverage.combine()
    }

    fn large_scale_uncertainty(&self) -> f64 {
        self.acc.large_scale.combine()
    }

    fn adjustment_uncertainty(&self) -> f64 {
        self.acc.adjustment.combine()
    }

    fn synoptic_uncertainty(&self) -> f64 {
        self.acc.synoptic.combine()
    }

    fn sea_ice_fraction(&self) -> f64 {
        self.acc.sea_ice.combine()
    }
}

/// Snapshot of an [`Aggregation`] for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub sample_count: usize,
    pub sst: f64,
    pub sst_anomaly: f64,
    pub random_uncertainty: f64,
    pub coverage_uncertainty: f64,
    pub large_scale_uncertainty: f64,
    pub adjustment_uncertainty: f64,
    pub synoptic_uncertainty: f64,
    pub sea_ice_fraction: f64,
}

impl AggregationSummary {
    pub fn from_aggregation<A: Aggregation + ?Sized>(aggregation: &A) -> Self {
        Self {
            sample_count: aggregation.sample_count(),
            sst: aggregation.sst(),
            sst_anomaly: aggregation.sst_anomaly(),
            random_uncertainty: aggregation.random_uncertainty(),
            coverage_uncertainty: aggregation.coverage_uncertainty(),
            large_scale_uncertainty: aggregation.large_scale_uncertainty(),
            adjustment_uncertainty: aggregation.adjustment_uncertainty(),
            synoptic_uncertainty: aggregation.synoptic_uncertainty(),
            sea_ice_fraction: aggregation.sea_ice_fraction(),
        }
    }
}

fn check_layout(grid: &GridDef, sea_coverage: &dyn Grid) -> Result<()> {
    let cov = sea_coverage.grid_def();
    if cov.width() != grid.width() || cov.height() != grid.height() {
        return Err(AggregationError::invalid_argument(format!(
            "sea coverage grid is {}x{}, cell grid is {}x{}",
            cov.width(),
            cov.height(),
            grid.width(),
            grid.height()
        )));
    }
    Ok(())
}

/// Fold every non-empty cell of `cells` into `aggregation`, weighted by the
/// sea coverage at the cell position.
pub fn aggregate_cell_grid<C: AggregationCell>(
    cells: &CellGrid<C>,
    sea_coverage: &dyn Grid,
    aggregation: &mut RegionalAggregation,
) -> Result<()> {
    check_layout(cells.grid_def(), sea_coverage)?;
    for (x, y, cell) in cells.iter() {
        if !cell.is_empty() {
            aggregation.accumulate_cell(cell, sea_coverage.sample_double(x, y))?;
        }
    }
    Ok(())
}

/// Fold the non-empty cells of `source` into cells of the coarser grid
/// `target`, weighted by the sea coverage of each source cell.
pub fn aggregate_to_coarser<C, F>(
    source: &CellGrid<C>,
    target: &mut CellGrid<CellAggregationCell>,
    factory: &F,
    sea_coverage: &dyn Grid,
) -> Result<()>
where
    C: AggregationCell,
    F: CellFactory<CellAggregationCell> + ?Sized,
{
    check_layout(source.grid_def(), sea_coverage)?;
    let (source_w, source_h) = (source.width(), source.height());
    let (target_w, target_h) = (target.width(), target.height());
    if target_w > source_w || target_h > source_h {
        return Err(AggregationError::invalid_argument(format!(
            "target cell grid {}x{} is not coarser than {}x{}",
            target_w, target_h, source_w, source_h
        )));
    }

    for (x, y, cell) in source.iter() {
        if cell.is_empty() {
            continue;
        }
        let target_x = x * target_w / source_w;
        let target_y = y * target_h / source_h;
        target
            .cell_or_create(target_x, target_y, factory)
            .accumulate(cell, sea_coverage.sample_double(x, y))?;
    }
    Ok(())
}

/// Whether a region is averaged via 90° cells rather than directly from 5°
/// cells.
pub fn must_aggregate_to_90(mask: &RegionMask) -> bool {
    mask.is_hemisphere_or_globe()
}

/// Sea-coverage grids used when folding cells of a region.
#[derive(Clone, Copy)]
pub struct SeaCoverage<'a> {
    pub cell5: &'a dyn Grid,
    pub cell90: &'a dyn Grid,
}

/// Aggregate the 5° cells selected by `mask` into one regional result.
pub fn aggregate_region<C: AggregationCell>(
    cells5: &CellGrid<C>,
    mask: &RegionMask,
    sea_coverage: SeaCoverage<'_>,
    factory90: &CoarseCellFactory,
) -> Result<RegionalAggregation> {
    let region_cells = cells5.select(mask);
    let mut aggregation = RegionalAggregation::new();

    if must_aggregate_to_90(mask) {
        let mut cells90 = CellGrid::new(*sea_coverage.cell90.grid_def());
        aggregate_to_coarser(&region_cells, &mut cells90, factory90, sea_coverage.cell5)?;
        aggregate_cell_grid(&cells90, sea_coverage.cell90, &mut aggregation)?;
    } else {
        aggregate_cell_grid(&region_cells, sea_coverage.cell5, &mut aggregation)?;
    }
    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Components, SpatialAggregationCell};
    use crate::context::AggregationContext;
    use sst_common::{ArrayGrid, GridRect};

    #[test]
    fn test_multi_month_fold_uses_unit_weights() {
        let mut a = RegionalAggregation::new();
        let mut b = RegionalAggregation::new();
        let mut cells: CellGrid<CellAggregationCell> = CellGrid::new(GridDef::global(90.0));
        let factory = CoarseCellFactory::default();
        let coverage = ArrayGrid::filled(GridDef::global(90.0), 0.2);

        // Two coarse cells that are empty: nothing is folded.
        cells.cell_or_create(0, 0, &factory);
        cells.cell_or_create(1, 0, &factory);
        aggregate_cell_grid(&cells, &coverage, &mut a).unwrap();
        assert_eq!(a.sample_count(), 0);
        assert!(a.sst().is_nan());

        // Months without a defined SST do not count as samples.
        b.accumulate_aggregation(&a).unwrap();
        b.accumulate_aggregation(&a).unwrap();
        assert_eq!(b.sample_count(), 0);
        assert!(b.sst().is_nan());
    }

    #[test]
    fn test_regional_getters_combine_folded_cells() {
        let def = GridDef::global_with_size(2, 1);
        let sst = ArrayGrid::filled(def, 290.0);
        let clim = ArrayGrid::filled(def, 289.0);
        let sea = ArrayGrid::filled(def, 1.0);
        let ice = ArrayGrid::filled(def, 0.25);
        let ctx = AggregationContext::new(&sst, &clim, &sea).with_sea_ice_fraction(&ice);

        let mut cells = CellGrid::new(def);
        let mut cell = SpatialAggregationCell::new(0, 0, Components::default());
        cell.accumulate(&ctx, &GridRect::new(0, 0, 1, 1)).unwrap();
        cells.set_cell(0, 0, cell);
        cells.set_cell(1, 0, SpatialAggregationCell::new(1, 0, Components::default()));

        let coverage = ArrayGrid::filled(def, 0.5);
        let mut aggregation = RegionalAggregation::new();
        aggregate_cell_grid(&cells, &coverage, &mut aggregation).unwrap();

        assert_eq!(aggregation.sample_count(), 1);
        assert_eq!(aggregation.sst(), 290.0);
        assert_eq!(aggregation.sst_anomaly(), 1.0);
        assert_eq!(aggregation.sea_ice_fraction(), 0.25);
        assert!(aggregation.random_uncertainty().is_nan());
        assert!(aggregation.coverage_uncertainty().is_nan());
    }

    #[test]
    fn test_layout_mismatch_is_rejected() {
        let cells: CellGrid<CellAggregationCell> = CellGrid::new(GridDef::global(90.0));
        let coverage = ArrayGrid::filled(GridDef::global(5.0), 1.0);
        let mut aggregation = RegionalAggregation::new();
        let err = aggregate_cell_grid(&cells, &coverage, &mut aggregation).unwrap_err();
        assert!(matches!(err, AggregationError::InvalidArgument(_)));
    }

    #[test]
    fn test_summary_serializes_nan_as_null() {
        let summary = RegionalAggregation::new().summary();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["sample_count"], 0);
        assert!(json["sst"].is_null());
        assert!(summary.sea_ice_fraction.is_nan());
    }
}
