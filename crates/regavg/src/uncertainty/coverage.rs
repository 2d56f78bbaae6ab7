use crate::error::{AggregationError, Result};
use chrono::{Datelike, NaiveDate};
use sst_common::{ArrayGrid, Grid, GridDef};
use std::sync::Arc;

/// Sample count at which a 5° cell is considered fully sampled.
const FULL_SAMPLE_COUNT_5: f64 = 77500.0;

/// Per-cell parameters of the coverage uncertainty model.
pub trait CoverageLookup: Send + Sync {
    /// Magnitude `s0` of the 5° model at cell `(x, y)`.
    fn magnitude5(&self, x: usize, y: usize) -> f64;

    /// Exponent `p` of the 5° model at cell `(x, y)`.
    fn exponent5(&self, x: usize, y: usize) -> f64;

    /// Magnitude `s` of the 90° model for a 0-based month.
    fn magnitude90(&self, month: u32, x: usize, y: usize) -> f64;
}

/// Lookup tables held in memory: two global 5° grids and one global 90°
/// grid per month.
#[derive(Debug, Clone)]
pub struct CoverageTables {
    magnitude5: ArrayGrid,
    exponent5: ArrayGrid,
    magnitude90: Vec<ArrayGrid>,
}

impl CoverageTables {
    pub fn new(magnitude5: ArrayGrid, exponent5: ArrayGrid, magnitude90: Vec<ArrayGrid>) -> Result<Self> {
        let grid5 = GridDef::global(5.0);
        let grid90 = GridDef::global(90.0);
        if *magnitude5.grid_def() != grid5 || *exponent5.grid_def() != grid5 {
            return Err(AggregationError::invalid_argument(
                "5° coverage tables must be global 72x36 grids",
            ));
        }
        if magnitude90.len() != 12 {
            return Err(AggregationError::invalid_argument(format!(
                "expected 12 monthly 90° coverage tables, got {}",
                magnitude90.len()
            )));
        }
        if magnitude90.iter().any(|g| *g.grid_def() != grid90) {
            return Err(AggregationError::invalid_argument(
                "90° coverage tables must be global 4x2 grids",
            ));
        }
        Ok(Self {
            magnitude5,
            exponent5,
            magnitude90,
        })
    }
}

impl CoverageLookup for CoverageTables {
    fn magnitude5(&self, x: usize, y: usize) -> f64 {
        self.magnitude5.sample_double(x, y)
    }

    fn exponent5(&self, x: usize, y: usize) -> f64 {
        self.exponent5.sample_double(x, y)
    }

    fn magnitude90(&self, month: u32, x: usize, y: usize) -> f64 {
        self.magnitude90[month as usize].sample_double(x, y)
    }
}

/// Coverage uncertainty for one month.
#[derive(Clone)]
pub struct CoverageUncertaintyProvider {
    month: u32,
    lookup: Arc<dyn CoverageLookup>,
}

impl std::fmt::Debug for CoverageUncertaintyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageUncertaintyProvider")
            .field("month", &self.month)
            .finish_non_exhaustive()
    }
}

impl CoverageUncertaintyProvider {
    /// Provider for a 0-based month.
    pub fn new(month: u32, lookup: Arc<dyn CoverageLookup>) -> Result<Self> {
        if month > 11 {
            return Err(AggregationError::invalid_argument(format!(
                "month must be in 0..=11, got {}",
                month
            )));
        }
        Ok(Self { month, lookup })
    }

    /// Provider for the month containing `date`.
    pub fn for_date(date: NaiveDate, lookup: Arc<dyn CoverageLookup>) -> Self {
        Self {
            month: date.month0(),
            lookup,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Coverage uncertainty of cell `(x, y)` at the given resolution.
    ///
    /// Only 5° and 90° cells are modelled; any other resolution yields NaN.
    pub fn calculate(&self, x: usize, y: usize, sample_count: usize, resolution: f64) -> f64 {
        if resolution == 5.0 {
            self.calculate5(x, y, sample_count)
        } else if resolution == 90.0 {
            self.calculate90(x, y, sample_count)
        } else {
            f64::NAN
        }
    }

    /// `s0 * (1 - (n / 77500)^p)`.
    pub fn calculate5(&self, x: usize, y: usize, sample_count: usize) -> f64 {
        if sample_count == 0 {
            return f64::NAN;
        }
        let s0 = self.lookup.magnitude5(x, y);
        let p = self.lookup.exponent5(x, y);
        s0 * (1.0 - (sample_count as f64 / FULL_SAMPLE_COUNT_5).powf(p))
    }

    /// `s / sqrt(n)`.
    pub fn calculate90(&self, x: usize, y: usize, sample_count: usize) -> f64 {
        if sample_count == 0 {
            return f64::NAN;
        }
        self.lookup.magnitude90(self.month, x, y) / (sample_count as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    struct FixedLookup;

    impl CoverageLookup for FixedLookup {
        fn magnitude5(&self, _x: usize, _y: usize) -> f64 {
            1.2
        }

        fn exponent5(&self, _x: usize, _y: usize) -> f64 {
            0.5
        }

        fn magnitude90(&self, month: u32, _x: usize, _y: usize) -> f64 {
            1.0 + month as f64 * 0.1
        }
    }

    fn provider(month: u32) -> CoverageUncertaintyProvider {
        CoverageUncertaintyProvider::new(month, Arc::new(FixedLookup)).unwrap()
    }

    #[test]
    fn test_calculate5() {
        let p = provider(0);
        let expected = 1.2 * (1.0 - (10000.0f64 / 77500.0).powf(0.5));
        assert_approx_eq!(p.calculate(3, 4, 10000, 5.0), expected, 1e-12);
        assert!(p.calculate(3, 4, 0, 5.0).is_nan());
    }

    #[test]
    fn test_calculate90() {
        let p = provider(1);
        assert!(p.calculate90(0, 0, 0).is_nan());
        assert_approx_eq!(p.calculate90(0, 0, 5), 1.1 / 5f64.sqrt(), 1e-12);
        assert_approx_eq!(p.calculate(0, 0, 5, 90.0), 1.1 / 5f64.sqrt(), 1e-12);
    }

    #[test]
    fn test_unsupported_resolution_is_nan() {
        assert!(provider(0).calculate(0, 0, 10, 1.0).is_nan());
        assert!(provider(0).calculate(0, 0, 10, 10.0).is_nan());
    }

    #[test]
    fn test_month_from_date() {
        let date = NaiveDate::from_ymd_opt(2010, 12, 1).unwrap();
        let p = CoverageUncertaintyProvider::for_date(date, Arc::new(FixedLookup));
        assert_eq!(p.month(), 11);
        assert!(CoverageUncertaintyProvider::new(12, Arc::new(FixedLookup)).is_err());
    }

    #[test]
    fn test_tables_validate_shapes() {
        let m5 = ArrayGrid::filled(GridDef::global(5.0), 1.2);
        let e5 = ArrayGrid::filled(GridDef::global(5.0), 0.5);
        let m90: Vec<ArrayGrid> = (0..12)
            .map(|m| ArrayGrid::filled(GridDef::global(90.0), m as f64))
            .collect();

        let tables = CoverageTables::new(m5.clone(), e5.clone(), m90.clone()).unwrap();
        assert_eq!(tables.magnitude90(7, 3, 1), 7.0);
        assert_eq!(tables.exponent5(71, 35), 0.5);

        assert!(CoverageTables::new(m5.clone(), e5.clone(), m90[..11].to_vec()).is_err());
        let wrong = ArrayGrid::filled(GridDef::global(1.0), 1.0);
        assert!(CoverageTables::new(wrong, e5, m90).is_err());
    }
}
