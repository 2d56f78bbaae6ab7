use super::{Aggregation, AggregationCell, CellFactory};
use crate::accumulator::{ArithmeticMean, NumberAccumulator, WeightedUncertainty};
use crate::error::Result;
use crate::uncertainty::CoverageUncertaintyProvider;
use std::sync::Arc;

/// Resolution of the cells that use [`CoverageRule::Combined90`].
const CELL90_RESOLUTION: f64 = 90.0;

/// Accumulators for the eight quantities of an aggregate built from other
/// aggregates.
#[derive(Debug, Clone, Default)]
pub(crate) struct QuantityAccumulators {
    pub sst: ArithmeticMean,
    pub anomaly: ArithmeticMean,
    pub random: WeightedUncertainty,
    pub coverage: WeightedUncertainty,
    pub large_scale: ArithmeticMean,
    pub adjustment: WeightedUncertainty,
    pub synoptic: WeightedUncertainty,
    pub sea_ice: ArithmeticMean,
}

impl QuantityAccumulators {
    /// Fold the quantities of `source` with the given weight. Sea ice is
    /// always taken with weight 1.
    pub fn fold<A: Aggregation + ?Sized>(&mut self, source: &A, weight: f64) -> Result<()> {
        self.sst.accumulate(source.sst(), weight)?;
        self.anomaly.accumulate(source.sst_anomaly(), weight)?;
        self.random.accumulate(source.random_uncertainty(), weight)?;
        self.coverage.accumulate(source.coverage_uncertainty(), weight)?;
        self.large_scale.accumulate(source.large_scale_uncertainty(), weight)?;
        self.adjustment.accumulate(source.adjustment_uncertainty(), weight)?;
        self.synoptic.accumulate(source.synoptic_uncertainty(), weight)?;
        self.sea_ice.accumulate(source.sea_ice_fraction(), 1.0)?;
        Ok(())
    }

    /// Number of folded aggregates with a defined SST.
    pub fn sample_count(&self) -> usize {
        self.sst.sample_count()
    }
}

/// How a coarse cell derives its coverage uncertainty.
#[derive(Debug, Clone, Default)]
pub enum CoverageRule {
    /// Propagate the coverage uncertainties of the finer cells.
    #[default]
    Inherited,
    /// Combine the propagated 5° uncertainty with the 90° sampling model
    /// in quadrature.
    Combined90(Arc<CoverageUncertaintyProvider>),
}

/// A cell aggregated from finer cells, e.g. a 90° cell built from 5° cells.
#[derive(Debug, Clone)]
pub struct CellAggregationCell {
    x: usize,
    y: usize,
    acc: QuantityAccumulators,
    rule: CoverageRule,
}

impl CellAggregationCell {
    pub fn new(x: usize, y: usize, rule: CoverageRule) -> Self {
        Self {
            x,
            y,
            acc: QuantityAccumulators::default(),
            rule,
        }
    }

    /// Fold one finer cell, weighted by its sea coverage.
    pub fn accumulate<C: AggregationCell + ?Sized>(&mut self, cell: &C, weight: f64) -> Result<()> {
        self.acc.fold(cell, weight)
    }
}

impl Aggregation for CellAggregationCell {
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
        let u5 = self.acc.coverage.combine();
        match &self.rule {
            CoverageRule::Inherited => u5,
            CoverageRule::Combined90(provider) => {
                let u90 = provider.calculate(self.x, self.y, self.acc.sample_count(), CELL90_RESOLUTION);
                (u5 * u5 + u90 * u90).sqrt()
            }
        }
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

impl AggregationCell for CellAggregationCell {
    fn x(&self) -> usize {
        self.x
    }

    fn y(&self) -> usize {
        self.y
    }
}

/// Creates [`CellAggregationCell`]s with a common coverage rule.
#[derive(Debug, Clone, Default)]
pub struct CoarseCellFactory {
    rule: CoverageRule,
}

impl CoarseCellFactory {
    pub fn new(rule: CoverageRule) -> Self {
        Self { rule }
    }

    /// Factory for 90° cells.
    pub fn cell90(provider: Arc<CoverageUncertaintyProvider>) -> Self {
        Self::new(CoverageRule::Combined90(provider))
    }
}

impl CellFactory<CellAggregationCell> for CoarseCellFactory {
    fn create_cell(&self, x: usize, y: usize) -> CellAggregationCell {
        CellAggregationCell::new(x, y, self.rule.clone())
    }
}
