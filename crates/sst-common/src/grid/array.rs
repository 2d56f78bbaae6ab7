//! Array-backed grids.

use super::{check_bounds, Grid};
use crate::error::{GridError, GridResult};
use crate::grid_def::GridDef;

/// Grid backed by a row-major array of raw values.
///
/// Raw values are decoded as `scaling * raw + offset`; a raw value equal to
/// the fill value reads as NaN.
#[derive(Debug, Clone)]
pub struct ArrayGrid {
    grid_def: GridDef,
    data: Vec<f64>,
    scaling: f64,
    offset: f64,
    fill_value: Option<f64>,
}

impl ArrayGrid {
    /// Wrap `data` laid out row by row according to `grid_def`.
    pub fn new(grid_def: GridDef, data: Vec<f64>) -> GridResult<Self> {
        if data.len() != grid_def.len() {
            return Err(GridError::invalid_argument(format!(
                "expected {} samples for a {}x{} grid, got {}",
                grid_def.len(),
                grid_def.width(),
                grid_def.height(),
                data.len()
            )));
        }
        Ok(Self {
            grid_def,
            data,
            scaling: 1.0,
            offset: 0.0,
            fill_value: None,
        })
    }

    /// Grid with every sample set to `value`.
    pub fn filled(grid_def: GridDef, value: f64) -> Self {
        Self {
            data: vec![value; grid_def.len()],
            grid_def,
            scaling: 1.0,
            offset: 0.0,
            fill_value: None,
        }
    }

    /// Copy the decoded samples of any grid into a new array.
    pub fn from_grid<G: Grid + ?Sized>(grid: &G) -> Self {
        let grid_def = *grid.grid_def();
        let mut data = Vec::with_capacity(grid_def.len());
        for y in 0..grid_def.height() {
            for x in 0..grid_def.width() {
                data.push(grid.sample_double(x, y));
            }
        }
        Self {
            grid_def,
            data,
            scaling: 1.0,
            offset: 0.0,
            fill_value: None,
        }
    }

    pub fn with_scaling(mut self, scaling: f64, offset: f64) -> Self {
        self.scaling = scaling;
        self.offset = offset;
        self
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    /// Overwrite the raw value at `(x, y)`.
    pub fn set_sample(&mut self, x: usize, y: usize, raw: f64) {
        check_bounds(&self.grid_def, x, y);
        let index = y * self.grid_def.width() + x;
        self.data[index] = raw;
    }

    /// Raw (undecoded) values in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

impl Grid for ArrayGrid {
    fn grid_def(&self) -> &GridDef {
        &self.grid_def
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        check_bounds(&self.grid_def, x, y);
        let raw = self.data[y * self.grid_def.width() + x];
        match self.fill_value {
            Some(fill) if raw == fill => f64::NAN,
            _ => self.scaling * raw + self.offset,
        }
    }
}
