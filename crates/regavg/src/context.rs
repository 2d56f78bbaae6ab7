//! Per-file inputs of the pixel-to-cell aggregation.

use crate::product::SourceGrids;
use sst_common::{Grid, GridDef};

/// Grids and thresholds used while folding one input file into 5° cells.
///
/// All grids share the layout of the SST grid. The context borrows them for
/// the duration of one file; it is rebuilt for every file.
#[derive(Clone, Copy)]
pub struct AggregationContext<'a> {
    pub sst: &'a dyn Grid,
    pub climatology_sst: &'a dyn Grid,
    pub sea_coverage: &'a dyn Grid,
    pub random_uncertainty: Option<&'a dyn Grid>,
    pub standard_deviation: Option<&'a dyn Grid>,
    pub large_scale_uncertainty: Option<&'a dyn Grid>,
    pub adjustment_uncertainty: Option<&'a dyn Grid>,
    pub synoptic_uncertainty: Option<&'a dyn Grid>,
    pub quality_level: Option<&'a dyn Grid>,
    pub sea_ice_fraction: Option<&'a dyn Grid>,
    /// Fraction of a cell's pixels that must be valid for its statistics
    /// to be reported.
    pub min_coverage: f64,
}

impl<'a> AggregationContext<'a> {
    /// Context with the mandatory grids only.
    pub fn new(sst: &'a dyn Grid, climatology_sst: &'a dyn Grid, sea_coverage: &'a dyn Grid) -> Self {
        Self {
            sst,
            climatology_sst,
            sea_coverage,
            random_uncertainty: None,
            standard_deviation: None,
            large_scale_uncertainty: None,
            adjustment_uncertainty: None,
            synoptic_uncertainty: None,
            quality_level: None,
            sea_ice_fraction: None,
            min_coverage: 0.0,
        }
    }

    /// Context for the grids read from one product file.
    pub fn for_source(
        source: &'a SourceGrids,
        climatology_sst: &'a dyn Grid,
        sea_coverage: &'a dyn Grid,
        min_coverage: f64,
    ) -> Self {
        Self {
            sst: source.sst.as_ref(),
            climatology_sst,
            sea_coverage,
            random_uncertainty: source.random_uncertainty.as_deref(),
            standard_deviation: source.standard_deviation.as_deref(),
            large_scale_uncertainty: source.large_scale_uncertainty.as_deref(),
            adjustment_uncertainty: source.adjustment_uncertainty.as_deref(),
            synoptic_uncertainty: source.synoptic_uncertainty.as_deref(),
            quality_level: source.quality_level.as_deref(),
            sea_ice_fraction: source.sea_ice_fraction.as_deref(),
            min_coverage,
        }
    }

    pub fn with_random_uncertainty(mut self, grid: &'a dyn Grid) -> Self {
        self.random_uncertainty = Some(grid);
        self
    }

    pub fn with_standard_deviation(mut self, grid: &'a dyn Grid) -> Self {
        self.standard_deviation = Some(grid);
        self
    }

    pub fn with_large_scale_uncertainty(mut self, grid: &'a dyn Grid) -> Self {
        self.large_scale_uncertainty = Some(grid);
        self
    }

    pub fn with_adjustment_uncertainty(mut self, grid: &'a dyn Grid) -> Self {
        self.adjustment_uncertainty = Some(grid);
        self
    }

    pub fn with_synoptic_uncertainty(mut self, grid: &'a dyn Grid) -> Self {
        self.synoptic_uncertainty = Some(grid);
        self
    }

    pub fn with_quality_level(mut self, grid: &'a dyn Grid) -> Self {
        self.quality_level = Some(grid);
        self
    }

    pub fn with_sea_ice_fraction(mut self, grid: &'a dyn Grid) -> Self {
        self.sea_ice_fraction = Some(grid);
        self
    }

    pub fn with_min_coverage(mut self, min_coverage: f64) -> Self {
        self.min_coverage = min_coverage;
        self
    }

    /// Layout of the source pixels.
    pub fn source_grid_def(&self) -> &GridDef {
        self.sst.grid_def()
    }
}
