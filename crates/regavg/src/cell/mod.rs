//! Aggregation cells.
//!
//! A cell holds the running statistics of one grid box. Two kinds exist:
//!
//! - [`SpatialAggregationCell`] folds source pixels into a 5° box.
//! - [`CellAggregationCell`] folds finer cells into a coarser box (90°).
//!
//! Both expose the same read-only view, [`Aggregation`], which is also
//! implemented by regional results.

mod coarse;
mod spatial;

pub use coarse::{CellAggregationCell, CoarseCellFactory, CoverageRule};
pub(crate) use coarse::QuantityAccumulators;
pub use spatial::{SpatialAggregationCell, SpatialCellFactory, QUALITY_LEVEL_BEST};

use serde::{Deserialize, Serialize};

/// Combined statistics of an aggregate.
///
/// Quantities without data read as NaN.
pub trait Aggregation {
    /// Number of contributions (pixels for 5° cells, finer cells or months
    /// for coarser aggregates).
    fn sample_count(&self) -> usize;

    fn sst(&self) -> f64;

    fn sst_anomaly(&self) -> f64;

    fn random_uncertainty(&self) -> f64;

    fn coverage_uncertainty(&self) -> f64;

    fn large_scale_uncertainty(&self) -> f64;

    fn adjustment_uncertainty(&self) -> f64;

    fn synoptic_uncertainty(&self) -> f64;

    fn sea_ice_fraction(&self) -> f64;
}

/// An [`Aggregation`] located at `(x, y)` of a cell grid.
pub trait AggregationCell: Aggregation {
    fn x(&self) -> usize;

    fn y(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

impl<A: Aggregation + ?Sized> Aggregation for &A {
    fn sample_count(&self) -> usize {
        (**self).sample_count()
    }

    fn sst(&self) -> f64 {
        (**self).sst()
    }

    fn sst_anomaly(&self) -> f64 {
        (**self).sst_anomaly()
    }

    fn random_uncertainty(&self) -> f64 {
        (**self).random_uncertainty()
    }

    fn coverage_uncertainty(&self) -> f64 {
        (**self).coverage_uncertainty()
    }

    fn large_scale_uncertainty(&self) -> f64 {
        (**self).large_scale_uncertainty()
    }

    fn adjustment_uncertainty(&self) -> f64 {
        (**self).adjustment_uncertainty()
    }

    fn synoptic_uncertainty(&self) -> f64 {
        (**self).synoptic_uncertainty()
    }

    fn sea_ice_fraction(&self) -> f64 {
        (**self).sea_ice_fraction()
    }
}

impl<C: AggregationCell + ?Sized> AggregationCell for &C {
    fn x(&self) -> usize {
        (**self).x()
    }

    fn y(&self) -> usize {
        (**self).y()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Creates empty cells for a [`CellGrid`](crate::CellGrid).
pub trait CellFactory<C> {
    fn create_cell(&self, x: usize, y: usize) -> C;
}

/// Optional quantities a product declares in addition to SST and its
/// random uncertainty.
///
/// Cells are created with accumulators for the declared components. A
/// component without a grid in any accumulated source reads NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Components {
    pub sst_variance: bool,
    pub large_scale_uncertainty: bool,
    pub adjustment_uncertainty: bool,
    pub synoptic_uncertainty: bool,
    pub sea_ice_fraction: bool,
}

impl Components {
    /// Every optional component enabled.
    pub fn all() -> Self {
        Self {
            sst_variance: true,
            large_scale_uncertainty: true,
            adjustment_uncertainty: true,
            synoptic_uncertainty: true,
            sea_ice_fraction: true,
        }
    }
}
