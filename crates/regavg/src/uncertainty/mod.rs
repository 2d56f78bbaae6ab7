//! Closed-form uncertainty models.
//!
//! - [`CoverageUncertaintyProvider`]: error from incomplete sampling of a
//!   cell, driven by monthly lookup tables.
//! - [`SynopticUncertaintyProvider`]: reduces a quadrature-summed value by
//!   the effective number of independent samples given their spatial and
//!   temporal correlation.

mod coverage;
mod synoptic;

pub use coverage::{CoverageLookup, CoverageTables, CoverageUncertaintyProvider};
pub use synoptic::SynopticUncertaintyProvider;
