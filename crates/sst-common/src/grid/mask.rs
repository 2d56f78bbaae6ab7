use super::Grid;
use crate::grid_def::GridDef;

/// Decodes bit flags: a sample is 1 when all bits of `mask` are set in the
/// source value, 0 otherwise.
#[derive(Debug, Clone)]
pub struct Mask<G> {
    source: G,
    mask: i32,
}

impl<G: Grid> Mask<G> {
    pub fn new(source: G, mask: i32) -> Self {
        Self { source, mask }
    }

    pub fn mask(&self) -> i32 {
        self.mask
    }
}

impl<G: Grid> Grid for Mask<G> {
    fn grid_def(&self) -> &GridDef {
        self.source.grid_def()
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        self.sample_int(x, y) as f64
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        if self.source.sample_int(x, y) & self.mask == self.mask {
            1
        } else {
            0
        }
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        self.sample_int(x, y) != 0
    }
}
