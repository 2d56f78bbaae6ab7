//! Index-reordering views.

use super::{check_bounds, Grid};
use crate::grid_def::GridDef;

/// Flips a grid upside down: row `y` reads source row `height - 1 - y`.
#[derive(Debug, Clone)]
pub struct YFlip<G> {
    source: G,
}

impl<G: Grid> YFlip<G> {
    pub fn new(source: G) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> G {
        self.source
    }

    fn source_y(&self, y: usize) -> usize {
        check_bounds(self.source.grid_def(), 0, y);
        self.source.height() - 1 - y
    }
}

impl<G: Grid> Grid for YFlip<G> {
    fn grid_def(&self) -> &GridDef {
        self.source.grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        self.source.sample_double(x, self.source_y(y))
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        self.source.sample_int(x, self.source_y(y))
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        self.source.sample_boolean(x, self.source_y(y))
    }
}

/// Swaps the western and eastern halves of a grid, e.g. to move a
/// 0..360 longitude layout to -180..180.
#[derive(Debug, Clone)]
pub struct XSwap<G> {
    source: G,
}

impl<G: Grid> XSwap<G> {
    pub fn new(source: G) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> G {
        self.source
    }

    fn source_x(&self, x: usize) -> usize {
        check_bounds(self.source.grid_def(), x, 0);
        let width = self.source.width();
        (x + width / 2) % width
    }
}

impl<G: Grid> Grid for XSwap<G> {
    fn grid_def(&self) -> &GridDef {
        self.source.grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        self.source.sample_double(self.source_x(x), y)
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        self.source.sample_int(self.source_x(x), y)
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        self.source.sample_boolean(self.source_x(x), y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ArrayGrid;

    fn grid_4x2() -> ArrayGrid {
        ArrayGrid::new(
            GridDef::raster(4, 2),
            vec![0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0],
        )
        .unwrap()
    }

    #[test]
    fn test_yflip() {
        let grid = grid_4x2();
        let flipped = YFlip::new(&grid);
        assert_eq!(flipped.sample_double(0, 0), 10.0);
        assert_eq!(flipped.sample_double(3, 1), 3.0);
    }

    #[test]
    fn test_xswap() {
        let grid = grid_4x2();
        let swapped = XSwap::new(&grid);
        let row: Vec<f64> = (0..4).map(|x| swapped.sample_double(x, 0)).collect();
        assert_eq!(row, vec![2.0, 3.0, 0.0, 1.0]);
    }
}
