//! Sparse grid of aggregation cells.

use crate::cell::{AggregationCell, CellFactory};
use sst_common::{Grid, GridDef, RegionMask};

/// Cells of one aggregation pass, indexed by `(x, y)`.
///
/// Storage is a flat arena of `width * height` slots in row-major order;
/// an empty slot means "no data" for that cell.
#[derive(Debug, Clone)]
pub struct CellGrid<C> {
    grid_def: GridDef,
    cells: Vec<Option<C>>,
}

impl<C> CellGrid<C> {
    pub fn new(grid_def: GridDef) -> Self {
        let mut cells = Vec::with_capacity(grid_def.len());
        cells.resize_with(grid_def.len(), || None);
        Self { grid_def, cells }
    }

    pub fn grid_def(&self) -> &GridDef {
        &self.grid_def
    }

    pub fn width(&self) -> usize {
        self.grid_def.width()
    }

    pub fn height(&self) -> usize {
        self.grid_def.height()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width() && y < self.height(),
            "cell ({}, {}) is outside cell grid of size {}x{}",
            x,
            y,
            self.width(),
            self.height()
        );
        y * self.width() + x
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&C> {
        self.cells[self.index(x, y)].as_ref()
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut C> {
        let i = self.index(x, y);
        self.cells[i].as_mut()
    }

    /// Cell at `(x, y)`, created by `factory` when absent.
    pub fn cell_or_create<F: CellFactory<C> + ?Sized>(&mut self, x: usize, y: usize, factory: &F) -> &mut C {
        let i = self.index(x, y);
        self.cells[i].get_or_insert_with(|| factory.create_cell(x, y))
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: C) {
        let i = self.index(x, y);
        self.cells[i] = Some(cell);
    }

    /// Number of present cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Present cells with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &C)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|c| (i % width, i / width, c)))
    }
}

impl<C: AggregationCell> CellGrid<C> {
    /// View on the non-empty cells selected by `mask`.
    ///
    /// The mask must share this grid's layout.
    pub fn select(&self, mask: &RegionMask) -> CellGrid<&C> {
        let mut selected = CellGrid::new(self.grid_def);
        for (x, y, cell) in self.iter() {
            if !cell.is_empty() && mask.sample_boolean(x, y) {
                selected.set_cell(x, y, cell);
            }
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellAggregationCell, CoarseCellFactory, Components, SpatialAggregationCell};

    #[test]
    fn test_cells_are_created_on_demand() {
        let mut grid: CellGrid<CellAggregationCell> = CellGrid::new(GridDef::global(90.0));
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.cell(1, 1).is_none());

        let factory = CoarseCellFactory::default();
        let cell = grid.cell_or_create(3, 1, &factory);
        assert_eq!((cell.x(), cell.y()), (3, 1));
        grid.cell_or_create(3, 1, &factory);
        assert_eq!(grid.cell_count(), 1);

        let positions: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(positions, vec![(3, 1)]);
    }

    #[test]
    #[should_panic(expected = "outside cell grid")]
    fn test_out_of_range_cell_panics() {
        let grid: CellGrid<CellAggregationCell> = CellGrid::new(GridDef::global(90.0));
        grid.cell(4, 0);
    }

    #[test]
    fn test_select_skips_empty_and_unmasked_cells() {
        let def = GridDef::global(90.0);
        let mut grid = CellGrid::new(def);
        grid.set_cell(0, 0, SpatialAggregationCell::new(0, 0, Components::default()));
        let mask = RegionMask::from_wnes("West", -180.0, 90.0, 0.0, -90.0, def).unwrap();

        let selected = grid.select(&mask);
        assert_eq!(selected.cell_count(), 0);
    }
}
