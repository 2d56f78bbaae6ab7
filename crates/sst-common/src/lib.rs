//! Common grid types shared by the SST averaging crates.

pub mod error;
pub mod grid;
pub mod grid_def;
pub mod region;
pub mod resolution;

pub use error::{GridError, GridResult};
pub use grid::{ArrayGrid, Downscaling, Grid, Interpolation, Mask, XSwap, YFlip};
pub use grid_def::{GridDef, GridRect, LonLatRect};
pub use region::{Coverage, RegionMask, RegionMaskList, REGION_MASK_RESOLUTION};
pub use resolution::{SpatialResolution, TemporalResolution};
