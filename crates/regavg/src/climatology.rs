//! Daily SST climatology and sea coverage.

use crate::error::{AggregationError, Result};
use sst_common::{ArrayGrid, Downscaling, Grid, GridDef, Interpolation, Mask};
use tracing::{debug, info};

/// Bit of the land/sea mask flagging water.
const SEA_FLAG: i32 = 0x01;

const DAYS_PER_YEAR: usize = 365;

/// Climatological SST per day of year plus sea-coverage fractions, all on
/// the product grid.
#[derive(Debug, Clone)]
pub struct Climatology {
    daily_sst: Vec<ArrayGrid>,
    product_def: GridDef,
    sea_coverage: ArrayGrid,
    sea_coverage_5: ArrayGrid,
    sea_coverage_90: ArrayGrid,
}

impl Climatology {
    /// Build a climatology for products on `product_def`.
    ///
    /// `daily_sst` holds either one grid used for every day or one grid per
    /// day of a non-leap year. `sea_mask` is a flag grid on the climatology
    /// layout whose bit 0 marks water.
    pub fn new(daily_sst: Vec<ArrayGrid>, sea_mask: ArrayGrid, product_def: GridDef) -> Result<Self> {
        if daily_sst.len() != 1 && daily_sst.len() != DAYS_PER_YEAR {
            return Err(AggregationError::invalid_argument(format!(
                "climatology must contain 1 or {} daily grids, found {}",
                DAYS_PER_YEAR,
                daily_sst.len()
            )));
        }
        let climatology_def = *sea_mask.grid_def();
        if daily_sst.iter().any(|g| *g.grid_def() != climatology_def) {
            return Err(AggregationError::invalid_argument(
                "climatology SST grids and sea mask must share one layout",
            ));
        }

        let source_coverage = ArrayGrid::from_grid(&Mask::new(&sea_mask, SEA_FLAG));
        let sea_coverage = regrid(&source_coverage, &product_def)?.into_owned();
        let sea_coverage_5 = Downscaling::apply(&sea_coverage, &GridDef::global(5.0))?;
        let sea_coverage_90 = Downscaling::apply(&sea_coverage_5, &GridDef::global(90.0))?;
        info!(
            coverage_90 = ?sea_coverage_90.data(),
            "Sea-water coverage in 90° cells"
        );

        Ok(Self {
            daily_sst,
            product_def,
            sea_coverage,
            sea_coverage_5,
            sea_coverage_90,
        })
    }

    pub fn product_grid_def(&self) -> &GridDef {
        &self.product_def
    }

    /// Climatological SST for a 1-based day of year on the product grid.
    ///
    /// Day 366 of leap years reads day 365.
    pub fn sst_grid(&self, day_of_year: u32) -> Result<RegriddedGrid<'_>> {
        let day = match day_of_year {
            0 => return Err(AggregationError::invalid_argument("day of year must be at least 1")),
            366 => 365,
            d if d > 366 => {
                return Err(AggregationError::invalid_argument(format!(
                    "day of year must not exceed 366, got {}",
                    d
                )))
            }
            d => d as usize,
        };
        let grid = if self.daily_sst.len() == 1 {
            &self.daily_sst[0]
        } else {
            &self.daily_sst[day - 1]
        };
        debug!(day_of_year, "Selected climatology SST grid");
        regrid(grid, &self.product_def)
    }

    /// Sea-coverage fraction of each product pixel.
    pub fn sea_coverage(&self) -> &ArrayGrid {
        &self.sea_coverage
    }

    /// Sea-coverage fraction of each 5° cell.
    pub fn sea_coverage_5(&self) -> &ArrayGrid {
        &self.sea_coverage_5
    }

    /// Sea-coverage fraction of each 90° cell.
    pub fn sea_coverage_90(&self) -> &ArrayGrid {
        &self.sea_coverage_90
    }
}

/// A climatology grid brought onto the product layout.
#[derive(Debug, Clone)]
pub enum RegriddedGrid<'a> {
    /// Same layout, used as is.
    Same(&'a ArrayGrid),
    /// Finer product grid, bilinear view.
    Interpolated(Interpolation<&'a ArrayGrid>),
    /// Coarser product grid, block means.
    Downscaled(ArrayGrid),
}

impl RegriddedGrid<'_> {
    fn into_owned(self) -> ArrayGrid {
        match self {
            RegriddedGrid::Same(grid) => grid.clone(),
            RegriddedGrid::Interpolated(view) => ArrayGrid::from_grid(&view),
            RegriddedGrid::Downscaled(grid) => grid,
        }
    }
}

impl Grid for RegriddedGrid<'_> {
    fn grid_def(&self) -> &GridDef {
        match self {
            RegriddedGrid::Same(grid) => grid.grid_def(),
            RegriddedGrid::Interpolated(view) => view.grid_def(),
            RegriddedGrid::Downscaled(grid) => grid.grid_def(),
        }
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        match self {
            RegriddedGrid::Same(grid) => grid.sample_double(x, y),
            RegriddedGrid::Interpolated(view) => view.sample_double(x, y),
            RegriddedGrid::Downscaled(grid) => grid.sample_double(x, y),
        }
    }
}

fn regrid<'a>(grid: &'a ArrayGrid, target: &GridDef) -> Result<RegriddedGrid<'a>> {
    let source = grid.grid_def();
    if source == target {
        Ok(RegriddedGrid::Same(grid))
    } else if target.resolution_x() < source.resolution_x() {
        Ok(RegriddedGrid::Interpolated(Interpolation::new(grid, *target)))
    } else {
        Ok(RegriddedGrid::Downscaled(Downscaling::apply(grid, target)?))
    }
}
