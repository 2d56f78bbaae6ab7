//! Block-mean downscaling onto coarser grids.

use super::{ArrayGrid, Grid};
use crate::error::GridResult;
use crate::grid_def::GridDef;

/// Reduces a grid to a coarser [`GridDef`] by averaging whole blocks of
/// source cells.
pub struct Downscaling;

impl Downscaling {
    /// Average each `ratio x ratio` block of `source` into one target cell.
    ///
    /// NaN samples are skipped; a block without any finite sample yields NaN.
    /// Fails when `target` is finer than the source grid.
    pub fn apply<G: Grid + ?Sized>(source: &G, target: &GridDef) -> GridResult<ArrayGrid> {
        let source_def = *source.grid_def();
        let mut data = Vec::with_capacity(target.len());

        for ty in 0..target.height() {
            for tx in 0..target.width() {
                let rect = source_def.grid_rect_of_coarser(tx, ty, target)?;
                let x_end = ((rect.x + rect.width) as usize).min(source_def.width());
                let y_end = ((rect.y + rect.height) as usize).min(source_def.height());
                data.push(mean_of_block(source, rect.x as usize..x_end, rect.y as usize..y_end));
            }
        }

        ArrayGrid::new(*target, data)
    }
}

/// Mean of the finite samples in a block, NaN if there are none.
#[inline]
fn mean_of_block<G: Grid + ?Sized>(
    grid: &G,
    xs: std::ops::Range<usize>,
    ys: std::ops::Range<usize>,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for y in ys {
        for x in xs.clone() {
            let v = grid.sample_double(x, y);
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
    }

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
