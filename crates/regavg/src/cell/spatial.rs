use super::{Aggregation, AggregationCell, CellFactory, Components};
use crate::accumulator::{combine_or_nan, ArithmeticMean, NumberAccumulator, QuadratureSum, WeightedUncertainty};
use crate::context::AggregationContext;
use crate::error::Result;
use crate::uncertainty::{CoverageUncertaintyProvider, SynopticUncertaintyProvider};
use sst_common::{Grid, GridRect};
use std::sync::Arc;

/// Quality level of pixels accepted when a product carries a quality grid.
pub const QUALITY_LEVEL_BEST: i32 = 5;

/// Resolution of spatial cells, in degrees.
const CELL_RESOLUTION: f64 = 5.0;

/// A 5° cell fed directly from source pixels.
#[derive(Debug, Clone)]
pub struct SpatialAggregationCell {
    x: usize,
    y: usize,
    climatology: ArithmeticMean,
    anomaly: ArithmeticMean,
    random: WeightedUncertainty,
    variance: Option<ArithmeticMean>,
    large_scale: Option<ArithmeticMean>,
    adjustment: Option<QuadratureSum>,
    synoptic: Option<QuadratureSum>,
    sea_ice: Option<ArithmeticMean>,
    enough_samples: bool,
    coverage_provider: Option<Arc<CoverageUncertaintyProvider>>,
    synoptic_provider: Option<SynopticUncertaintyProvider>,
}

impl SpatialAggregationCell {
    /// Empty cell carrying accumulators for the declared components.
    ///
    /// The random uncertainty accumulator is always present. Accumulators of
    /// other components are added on the first accumulation whose context
    /// supplies their grid.
    pub fn new(x: usize, y: usize, components: Components) -> Self {
        Self {
            x,
            y,
            climatology: ArithmeticMean::new(),
            anomaly: ArithmeticMean::new(),
            random: WeightedUncertainty::new(),
            variance: components.sst_variance.then(ArithmeticMean::new),
            large_scale: components.large_scale_uncertainty.then(ArithmeticMean::new),
            adjustment: components.adjustment_uncertainty.then(QuadratureSum::new),
            synoptic: components.synoptic_uncertainty.then(QuadratureSum::new),
            sea_ice: components.sea_ice_fraction.then(ArithmeticMean::new),
            enough_samples: false,
            coverage_provider: None,
            synoptic_provider: None,
        }
    }

    pub fn with_coverage_provider(mut self, provider: Arc<CoverageUncertaintyProvider>) -> Self {
        self.coverage_provider = Some(provider);
        self
    }

    pub fn with_synoptic_provider(mut self, provider: SynopticUncertaintyProvider) -> Self {
        self.synoptic_provider = Some(provider);
        self
    }

    /// Fold the source pixels inside `rect` into this cell.
    ///
    /// A pixel is valid when its sea coverage and SST are positive and, if
    /// the product has a quality grid, its quality level is the best one.
    /// Sea ice is taken from every pixel, valid or not.
    pub fn accumulate(&mut self, ctx: &AggregationContext<'_>, rect: &GridRect) -> Result<()> {
        let def = ctx.source_grid_def();
        let min_x = rect.x.max(0);
        let min_y = rect.y.max(0);
        let max_x = (rect.x + rect.width).min(def.width() as i64);
        let max_y = (rect.y + rect.height).min(def.height() as i64);
        self.add_supplied_accumulators(ctx);

        for y in min_y..max_y {
            let y = y as usize;
            for x in min_x..max_x {
                let x = x as usize;
                let sea_coverage = ctx.sea_coverage.sample_double(x, y);
                let sst = ctx.sst.sample_double(x, y);

                if is_valid(ctx, x, y, sea_coverage, sst) {
                    let climatology_sst = ctx.climatology_sst.sample_double(x, y);
                    self.climatology.accumulate(climatology_sst, sea_coverage)?;
                    self.anomaly.accumulate(sst - climatology_sst, sea_coverage)?;

                    if let Some(grid) = ctx.random_uncertainty {
                        self.random.accumulate(grid.sample_double(x, y), sea_coverage)?;
                    }
                    if let (Some(acc), Some(grid)) = (self.variance.as_mut(), ctx.standard_deviation) {
                        let sigma = grid.sample_double(x, y);
                        acc.accumulate(sigma * sigma, sea_coverage)?;
                    }
                    feed(&mut self.large_scale, ctx.large_scale_uncertainty, x, y, sea_coverage)?;
                    feed(&mut self.adjustment, ctx.adjustment_uncertainty, x, y, 1.0)?;
                    feed(&mut self.synoptic, ctx.synoptic_uncertainty, x, y, 1.0)?;
                }
                feed(&mut self.sea_ice, ctx.sea_ice_fraction, x, y, 1.0)?;
            }
        }

        let max_sample_count = (rect.width.max(0) * rect.height.max(0)) as f64;
        self.enough_samples = self.anomaly.sample_count() as f64 > ctx.min_coverage * max_sample_count;
        Ok(())
    }

    fn add_supplied_accumulators(&mut self, ctx: &AggregationContext<'_>) {
        if ctx.standard_deviation.is_some() {
            self.variance.get_or_insert_with(ArithmeticMean::new);
        }
        if ctx.large_scale_uncertainty.is_some() {
            self.large_scale.get_or_insert_with(ArithmeticMean::new);
        }
        if ctx.adjustment_uncertainty.is_some() {
            self.adjustment.get_or_insert_with(QuadratureSum::new);
        }
        if ctx.synoptic_uncertainty.is_some() {
            self.synoptic.get_or_insert_with(QuadratureSum::new);
        }
        if ctx.sea_ice_fraction.is_some() {
            self.sea_ice.get_or_insert_with(ArithmeticMean::new);
        }
    }

    /// Whether the cell passed the minimum coverage test of its last
    /// accumulation.
    pub fn has_enough_samples(&self) -> bool {
        self.enough_samples
    }

    /// Sea-coverage weighted mean of the pixel variances.
    pub fn sst_variance(&self) -> f64 {
        self.gated(combine_or_nan(&self.variance))
    }

    fn gated(&self, value: f64) -> f64 {
        if self.enough_samples {
            value
        } else {
            f64::NAN
        }
    }

    fn synoptic_formula(&self, value: f64) -> f64 {
        match &self.synoptic_provider {
            Some(provider) => provider.calculate(self.y, self.sample_count(), value),
            None => f64::NAN,
        }
    }
}

fn is_valid(ctx: &AggregationContext<'_>, x: usize, y: usize, sea_coverage: f64, sst: f64) -> bool {
    sea_coverage > 0.0
        && sst > 0.0
        && ctx
            .quality_level
            .map_or(true, |q| q.sample_int(x, y) == QUALITY_LEVEL_BEST)
}

#[inline]
fn feed<A: NumberAccumulator>(
    accumulator: &mut Option<A>,
    grid: Option<&dyn Grid>,
    x: usize,
    y: usize,
    weight: f64,
) -> Result<()> {
    if let (Some(acc), Some(grid)) = (accumulator.as_mut(), grid) {
        acc.accumulate(grid.sample_double(x, y), weight)?;
    }
    Ok(())
}

impl Aggregation for SpatialAggregationCell {
    fn sample_count(&self) -> usize {
        self.anomaly.sample_count()
    }

    fn sst(&self) -> f64 {
        self.gated(self.climatology.combine() + self.anomaly.combine())
    }

    fn sst_anomaly(&self) -> f64 {
        self.gated(self.anomaly.combine())
    }

    fn random_uncertainty(&self) -> f64 {
        self.gated(self.random.combine())
    }

    fn coverage_uncertainty(&self) -> f64 {
        let value = match &self.coverage_provider {
            Some(provider) => provider.calculate(self.x, self.y, self.sample_count(), CELL_RESOLUTION),
            None => f64::NAN,
        };
        self.gated(value)
    }

    fn large_scale_uncertainty(&self) -> f64 {
        self.gated(combine_or_nan(&self.large_scale))
    }

    // Uses the synoptic correlation model on the adjustment values.
    fn adjustment_uncertainty(&self) -> f64 {
        self.gated(self.synoptic_formula(combine_or_nan(&self.adjustment)))
    }

    fn synoptic_uncertainty(&self) -> f64 {
        self.gated(self.synoptic_formula(combine_or_nan(&self.synoptic)))
    }

    fn sea_ice_fraction(&self) -> f64 {
        combine_or_nan(&self.sea_ice)
    }
}

impl AggregationCell for SpatialAggregationCell {
    fn x(&self) -> usize {
        self.x
    }

    fn y(&self) -> usize {
        self.y
    }
}

/// Creates [`SpatialAggregationCell`]s sharing one set of providers.
#[derive(Debug, Clone)]
pub struct SpatialCellFactory {
    components: Components,
    coverage_provider: Option<Arc<CoverageUncertaintyProvider>>,
    synoptic_provider: Option<SynopticUncertaintyProvider>,
}

impl SpatialCellFactory {
    pub fn new(components: Components) -> Self {
        Self {
            components,
            coverage_provider: None,
            synoptic_provider: None,
        }
    }

    pub fn with_coverage_provider(mut self, provider: Arc<CoverageUncertaintyProvider>) -> Self {
        self.coverage_provider = Some(provider);
        self
    }

    pub fn with_synoptic_provider(mut self, provider: SynopticUncertaintyProvider) -> Self {
        self.synoptic_provider = Some(provider);
        self
    }

    pub fn components(&self) -> Components {
        self.components
    }
}

impl CellFactory<SpatialAggregationCell> for SpatialCellFactory {
    fn create_cell(&self, x: usize, y: usize) -> SpatialAggregationCell {
        let mut cell = SpatialAggregationCell::new(x, y, self.components);
        cell.coverage_provider = self.coverage_provider.clone();
        cell.synoptic_provider = self.synoptic_provider;
        cell
    }
}
