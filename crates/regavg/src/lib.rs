//! Regional and Temporal Averaging of Sea-Surface Temperature
//!
//! This crate turns per-pixel satellite SST grids into regional averages
//! per day, month, season or year, propagating the uncertainty components
//! of each pixel:
//!
//! - **Random**: independent per-pixel errors, reduced by averaging
//! - **Coverage**: error from incomplete sampling of a cell
//! - **Large scale**: fully correlated errors, averaged as is
//! - **Synoptic / adjustment**: partially correlated errors, reduced by the
//!   effective number of independent samples
//!
//! # Architecture
//!
//! ```text
//! aggregate(start, end, resolution)
//!      │
//!      ├─► seasonal / annual: aggregate each month, then fold per region
//!      │
//!      └─► daily / monthly period
//!               │
//!               ├─► FileStore::files(start, end)
//!               │
//!               ├─► per file: ProductType::read_source_grids
//!               │         │    + Climatology (SST for the day, sea coverage)
//!               │         ▼
//!               │    SpatialAggregationCell::accumulate   (pixels → 5° cells)
//!               │
//!               └─► per region
//!                         │
//!                         ├─► globe / hemisphere: 5° → 90° cells → region
//!                         │
//!                         └─► other: 5° cells → region
//! ```
//!
//! # Example
//!
//! ```ignore
//! use regavg::{AveragingAggregator, AveragingConfig, Climatology, FileStore};
//!
//! let config = AveragingConfig::from_env();
//! let store = FileStore::scan(product.as_ref(), &config.filename_suffix, &["/data/sst"])?;
//! let aggregator = AveragingAggregator::from_config(&config, product, store, climatology, tables)?;
//!
//! for step in aggregator.aggregate(start, end, config.temporal_resolution)? {
//!     println!("{}", serde_json::to_string(&step.report())?);
//! }
//! ```

pub mod accumulator;
pub mod aggregator;
pub mod cell;
pub mod cell_grid;
pub mod climatology;
pub mod config;
pub mod context;
pub mod error;
pub mod file_store;
pub mod product;
pub mod regional;
pub mod uncertainty;

// Re-export commonly used types at crate root
pub use accumulator::{ArithmeticMean, NumberAccumulator, QuadratureSum, WeightedUncertainty};
pub use aggregator::{aggregate_source_pixels, AveragingAggregator, AveragingTimeStep, TimeStepReport};
pub use cell::{
    Aggregation, AggregationCell, CellAggregationCell, CellFactory, CoarseCellFactory, Components, CoverageRule,
    SpatialAggregationCell, SpatialCellFactory, QUALITY_LEVEL_BEST,
};
pub use cell_grid::CellGrid;
pub use climatology::{Climatology, RegriddedGrid};
pub use config::AveragingConfig;
pub use context::AggregationContext;
pub use error::{AggregationError, Result};
pub use file_store::{FileList, FileStore};
pub use product::{ProductType, SourceGrids};
pub use regional::{
    aggregate_cell_grid, aggregate_region, aggregate_to_coarser, must_aggregate_to_90, AggregationSummary,
    RegionalAggregation, SeaCoverage,
};
pub use uncertainty::{CoverageLookup, CoverageTables, CoverageUncertaintyProvider, SynopticUncertaintyProvider};
