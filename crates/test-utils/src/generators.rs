//! Test data generators for creating synthetic SST-like fields.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite. All grids are returned as
//! row-major `Vec<f64>` (row 0 first).

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that index transforms are correct by
/// checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0);
/// assert_eq!(grid[10], 1.0);
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Creates a sea surface temperature field in Kelvin.
///
/// Values are warmest along the middle row (about 302 K) and drop
/// towards the top and bottom rows (about 272 K), mimicking a
/// latitude profile on a north-up global grid.
pub fn create_sst_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    let mid = (height.max(1) - 1) as f64 / 2.0;
    for row in 0..height {
        let distance = if mid > 0.0 {
            ((row as f64 - mid) / mid).abs()
        } else {
            0.0
        };
        for _ in 0..width {
            data.push(302.0 - 30.0 * distance);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified positions.
///
/// Useful for testing missing data handling.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `value` - Value of all other cells
/// * `nan_positions` - List of (col, row) positions that should be NaN
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    value: f64,
    nan_positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data = vec![value; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}
