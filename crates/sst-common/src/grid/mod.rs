//! Read-only grid access and lazy grid views.
//!
//! Every grid exposes its [`GridDef`] plus sample access by `(x, y)` index.
//! Views such as [`YFlip`] or [`Interpolation`] wrap a source grid and
//! transform indices or values on the fly; they never copy sample data.
//!
//! Sample access outside the grid extent panics, the same way slice
//! indexing does.

mod array;
mod downscale;
mod flip;
mod interpolation;
mod mask;

pub use array::ArrayGrid;
pub use downscale::Downscaling;
pub use flip::{XSwap, YFlip};
pub use interpolation::Interpolation;
pub use mask::Mask;

use crate::grid_def::GridDef;
use std::sync::Arc;

/// Capability shared by all gridded data sources.
pub trait Grid {
    /// Layout of this grid.
    fn grid_def(&self) -> &GridDef;

    /// Sample at `(x, y)` as a double. Missing data reads as NaN.
    fn sample_double(&self, x: usize, y: usize) -> f64;

    /// Sample at `(x, y)` truncated to an integer.
    fn sample_int(&self, x: usize, y: usize) -> i32 {
        self.sample_double(x, y) as i32
    }

    /// Sample at `(x, y)` as a flag.
    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        self.sample_int(x, y) != 0
    }

    fn width(&self) -> usize {
        self.grid_def().width()
    }

    fn height(&self) -> usize {
        self.grid_def().height()
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    fn grid_def(&self) -> &GridDef {
        (**self).grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        (**self).sample_double(x, y)
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        (**self).sample_int(x, y)
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        (**self).sample_boolean(x, y)
    }
}

impl<G: Grid + ?Sized> Grid for Box<G> {
    fn grid_def(&self) -> &GridDef {
        (**self).grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        (**self).sample_double(x, y)
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        (**self).sample_int(x, y)
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        (**self).sample_boolean(x, y)
    }
}

impl<G: Grid + ?Sized> Grid for Arc<G> {
    fn grid_def(&self) -> &GridDef {
        (**self).grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        (**self).sample_double(x, y)
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        (**self).sample_int(x, y)
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        (**self).sample_boolean(x, y)
    }
}

/// Panic with a uniform message when `(x, y)` lies outside `def`.
#[inline]
pub(crate) fn check_bounds(def: &GridDef, x: usize, y: usize) {
    if x >= def.width() || y >= def.height() {
        panic!(
            "index ({}, {}) is outside grid of size {}x{}",
            x,
            y,
            def.width(),
            def.height()
        );
    }
}
