//! Interface to sensor-specific product readers.

use crate::cell::Components;
use chrono::NaiveDate;
use sst_common::{Grid, GridDef};
use std::path::Path;

/// Grids read from one product file.
///
/// Optional grids are `None` when the product does not provide them.
pub struct SourceGrids {
    pub date: NaiveDate,
    pub sst: Box<dyn Grid>,
    pub random_uncertainty: Option<Box<dyn Grid>>,
    pub standard_deviation: Option<Box<dyn Grid>>,
    pub large_scale_uncertainty: Option<Box<dyn Grid>>,
    pub adjustment_uncertainty: Option<Box<dyn Grid>>,
    pub synoptic_uncertainty: Option<Box<dyn Grid>>,
    pub quality_level: Option<Box<dyn Grid>>,
    pub sea_ice_fraction: Option<Box<dyn Grid>>,
}

impl SourceGrids {
    pub fn new(date: NaiveDate, sst: Box<dyn Grid>) -> Self {
        Self {
            date,
            sst,
            random_uncertainty: None,
            standard_deviation: None,
            large_scale_uncertainty: None,
            adjustment_uncertainty: None,
            synoptic_uncertainty: None,
            quality_level: None,
            sea_ice_fraction: None,
        }
    }
}

impl std::fmt::Debug for SourceGrids {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceGrids")
            .field("date", &self.date)
            .field("grid_def", self.sst.grid_def())
            .finish_non_exhaustive()
    }
}

/// A satellite SST product: its file naming, layout and reader.
pub trait ProductType: Send + Sync {
    /// Short product name used in log messages.
    fn name(&self) -> &str;

    /// Layout of the product's SST grids.
    fn grid_def(&self) -> GridDef;

    /// Optional quantities the product provides.
    fn components(&self) -> Components;

    /// Date encoded in a product file name, `None` if the name does not
    /// belong to this product.
    fn parse_date(&self, file_name: &str) -> Option<NaiveDate>;

    /// Read the grids of one file.
    fn read_source_grids(&self, path: &Path) -> anyhow::Result<SourceGrids>;
}
