//! Regional averaging over a date range.

use crate::cell::{CellFactory, CoarseCellFactory, SpatialAggregationCell, SpatialCellFactory};
use crate::cell_grid::CellGrid;
use crate::climatology::Climatology;
use crate::config::AveragingConfig;
use crate::context::AggregationContext;
use crate::error::{AggregationError, Result};
use crate::file_store::FileStore;
use crate::product::{ProductType, SourceGrids};
use crate::regional::{aggregate_region, AggregationSummary, RegionalAggregation, SeaCoverage};
use crate::uncertainty::{CoverageLookup, CoverageUncertaintyProvider, SynopticUncertaintyProvider};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sst_common::{Grid, GridDef, RegionMask, RegionMaskList, SpatialResolution, TemporalResolution};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Resolution of the cells source pixels are first aggregated into.
const CELL5_RESOLUTION: SpatialResolution = SpatialResolution::Degree5_00;

/// Regional results of one output period `[start, end)`.
#[derive(Debug, Clone)]
pub struct AveragingTimeStep {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// One aggregation per configured region, in region order.
    pub regional_aggregations: Vec<RegionalAggregation>,
}

impl AveragingTimeStep {
    pub fn regional_aggregation(&self, region_index: usize) -> Option<&RegionalAggregation> {
        self.regional_aggregations.get(region_index)
    }

    /// Reportable values of the time step.
    pub fn report(&self) -> TimeStepReport {
        TimeStepReport {
            start: self.start,
            end: self.end,
            regions: self.regional_aggregations.iter().map(|a| a.summary()).collect(),
        }
    }
}

/// Serializable form of an [`AveragingTimeStep`].
#[derive(Debug, Clone, Serialize)]
pub struct TimeStepReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub regions: Vec<AggregationSummary>,
}

/// Averages SST products over regions and time periods.
///
/// Source pixels are first folded into global 5° cells per elementary
/// period (day or month). Every region then averages its 5° cells, via 90°
/// cells for globe and hemisphere regions. Seasons and years are folded
/// from their monthly results.
pub struct AveragingAggregator {
    product: Arc<dyn ProductType>,
    file_store: FileStore,
    climatology: Climatology,
    coverage_lookup: Arc<dyn CoverageLookup>,
    regions: RegionMaskList,
    combined_mask: RegionMask,
    min_coverage: f64,
}

impl AveragingAggregator {
    pub fn new(
        product: Arc<dyn ProductType>,
        file_store: FileStore,
        climatology: Climatology,
        coverage_lookup: Arc<dyn CoverageLookup>,
        regions: RegionMaskList,
        min_coverage: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_coverage) {
            return Err(AggregationError::invalid_argument(format!(
                "min coverage must be in [0, 1], got {}",
                min_coverage
            )));
        }
        let combined_mask = regions
            .combined()
            .ok_or_else(|| AggregationError::invalid_argument("at least one region is required"))?;
        let cell5_def = GridDef::global(CELL5_RESOLUTION.degrees());
        if *combined_mask.grid_def() != cell5_def {
            return Err(AggregationError::invalid_argument(
                "region masks must be defined on the global 5° grid",
            ));
        }
        if *climatology.product_grid_def() != product.grid_def() {
            return Err(AggregationError::invalid_argument(format!(
                "climatology is not prepared for the {} grid",
                product.name()
            )));
        }

        Ok(Self {
            product,
            file_store,
            climatology,
            coverage_lookup,
            regions,
            combined_mask,
            min_coverage,
        })
    }

    /// Aggregator for a validated configuration.
    pub fn from_config(
        config: &AveragingConfig,
        product: Arc<dyn ProductType>,
        file_store: FileStore,
        climatology: Climatology,
        coverage_lookup: Arc<dyn CoverageLookup>,
    ) -> Result<Self> {
        config.validate().map_err(AggregationError::Config)?;
        let regions = config.region_masks()?;
        Self::new(
            product,
            file_store,
            climatology,
            coverage_lookup,
            regions,
            config.min_coverage,
        )
    }

    pub fn regions(&self) -> &RegionMaskList {
        &self.regions
    }

    /// Average every period starting in `[start, end)`.
    ///
    /// Daily and monthly periods are aggregated from source files; seasons
    /// and years from their monthly results. Weekly periods are not
    /// supported.
    pub fn aggregate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        resolution: TemporalResolution,
    ) -> Result<Vec<AveragingTimeStep>> {
        if matches!(resolution, TemporalResolution::Weekly5d | TemporalResolution::Weekly7d) {
            return Err(AggregationError::unsupported_resolution(format!(
                "temporal resolution '{}' is not supported",
                resolution
            )));
        }
        let synoptic = SynopticUncertaintyProvider::new(CELL5_RESOLUTION, resolution);

        let mut time_steps = Vec::new();
        let mut date = start;
        while date < end {
            let next = resolution.period_end(date).ok_or_else(|| {
                AggregationError::invalid_argument(format!("period starting {} ends out of range", date))
            })?;
            let regional_aggregations = match resolution {
                TemporalResolution::Daily | TemporalResolution::Monthly => {
                    self.aggregate_regions(date, next, &synoptic)?
                }
                _ => {
                    let monthly = self.aggregate(date, next, TemporalResolution::Monthly)?;
                    self.aggregate_monthly_time_steps(&monthly)?
                }
            };
            time_steps.push(AveragingTimeStep {
                start: date,
                end: next,
                regional_aggregations,
            });
            date = next;
        }
        Ok(time_steps)
    }

    fn aggregate_regions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        synoptic: &SynopticUncertaintyProvider,
    ) -> Result<Vec<RegionalAggregation>> {
        let coverage = Arc::new(CoverageUncertaintyProvider::for_date(
            start,
            Arc::clone(&self.coverage_lookup),
        ));
        let cells5 = self.aggregate_time_steps(start, end, &coverage, synoptic)?;

        let sea_coverage = SeaCoverage {
            cell5: self.climatology.sea_coverage_5(),
            cell90: self.climatology.sea_coverage_90(),
        };
        let factory90 = CoarseCellFactory::cell90(coverage);
        self.regions
            .iter()
            .map(|mask| aggregate_region(&cells5, mask, sea_coverage, &factory90))
            .collect()
    }

    /// Fold all source files of `[start, end)` into global 5° cells.
    fn aggregate_time_steps(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        coverage: &Arc<CoverageUncertaintyProvider>,
        synoptic: &SynopticUncertaintyProvider,
    ) -> Result<CellGrid<SpatialAggregationCell>> {
        let all_files = self.file_store.files(start, end);
        info!(
            start = %start,
            end = %end,
            days = all_files.len(),
            "Computing output time step"
        );

        let factory = SpatialCellFactory::new(self.product.components())
            .with_coverage_provider(Arc::clone(coverage))
            .with_synoptic_provider(*synoptic);
        let mut cells5 = CellGrid::new(GridDef::global(CELL5_RESOLUTION.degrees()));

        for file_list in &all_files {
            for path in &file_list.files {
                info!(product = self.product.name(), path = %path.display(), "Processing input file");
                let file_start = Instant::now();

                let source = match self.read_source_grids(path) {
                    Ok(source) => source,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable input file");
                        continue;
                    }
                };
                self.aggregate_source_grids(&source, &mut cells5, &factory)?;

                debug!(
                    path = %path.display(),
                    elapsed_ms = file_start.elapsed().as_millis() as u64,
                    "Processed input file"
                );
            }
        }
        Ok(cells5)
    }

    fn read_source_grids(&self, path: &Path) -> Result<SourceGrids> {
        let source = self
            .product
            .read_source_grids(path)
            .map_err(|e| AggregationError::read_failed(path, format!("{:#}", e)))?;
        if *source.sst.grid_def() != self.product.grid_def() {
            return Err(AggregationError::read_failed(
                path,
                format!("SST grid does not match the {} grid", self.product.name()),
            ));
        }
        Ok(source)
    }

    fn aggregate_source_grids(
        &self,
        source: &SourceGrids,
        cells5: &mut CellGrid<SpatialAggregationCell>,
        factory: &SpatialCellFactory,
    ) -> Result<()> {
        let day_of_year = source.date.ordinal();
        debug!(day_of_year, "Selecting climatology");
        let climatology_sst = self.climatology.sst_grid(day_of_year)?;
        let ctx = AggregationContext::for_source(
            source,
            &climatology_sst,
            self.climatology.sea_coverage(),
            self.min_coverage,
        );

        let grids_start = Instant::now();
        aggregate_source_pixels(&ctx, &self.combined_mask, cells5, factory)?;
        debug!(
            elapsed_ms = grids_start.elapsed().as_millis() as u64,
            "Aggregated source grids"
        );
        Ok(())
    }

    /// Fold monthly results into one aggregation per region.
    fn aggregate_monthly_time_steps(&self, monthly: &[AveragingTimeStep]) -> Result<Vec<RegionalAggregation>> {
        (0..self.regions.len())
            .map(|region_index| {
                let mut aggregation = RegionalAggregation::new();
                for time_step in monthly {
                    if let Some(month) = time_step.regional_aggregation(region_index) {
                        aggregation.accumulate_aggregation(month)?;
                    }
                }
                Ok(aggregation)
            })
            .collect()
    }
}

/// Accumulate the source pixels under every selected cell of `mask` into the
/// matching cell of `cells`.
pub fn aggregate_source_pixels<F>(
    ctx: &AggregationContext<'_>,
    mask: &RegionMask,
    cells: &mut CellGrid<SpatialAggregationCell>,
    factory: &F,
) -> Result<()>
where
    F: CellFactory<SpatialAggregationCell> + ?Sized,
{
    let mask_def = *mask.grid_def();
    let source_def = *ctx.source_grid_def();
    for y in 0..mask_def.height() {
        for x in 0..mask_def.width() {
            if !mask.sample_boolean(x, y) {
                continue;
            }
            let lon_lat = mask_def.lon_lat_rect(x, y)?;
            let rect = source_def.grid_rect_for(&lon_lat)?;
            cells.cell_or_create(x, y, factory).accumulate(ctx, &rect)?;
        }
    }
    Ok(())
}
