//! Geodetic layout of regular lat/lon grids.

use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Mean earth radius used for cell diagonals, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Immutable definition of a regular lon/lat grid.
///
/// Column `x` starts at longitude `easting + resolution_x * x` and row `y`
/// starts at latitude `northing - resolution_y * y`, so row 0 is the
/// northernmost row of a global grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDef {
    width: usize,
    height: usize,
    easting: f64,
    northing: f64,
    resolution_x: f64,
    resolution_y: f64,
    time: usize,
}

/// Rectangle in grid index space.
///
/// A negative width marks a longitude range that crosses the anti-meridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl GridRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of cells covered, zero for degenerate rectangles.
    pub fn area(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }
}

/// Rectangle in geographic space, anchored at its south-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLatRect {
    pub lon: f64,
    pub lat: f64,
    pub width: f64,
    pub height: f64,
}

impl LonLatRect {
    pub fn new(lon: f64, lat: f64, width: f64, height: f64) -> Self {
        Self {
            lon,
            lat,
            width,
            height,
        }
    }

    pub fn max_lon(&self) -> f64 {
        self.lon + self.width
    }

    pub fn max_lat(&self) -> f64 {
        self.lat + self.height
    }
}

impl GridDef {
    /// Create a grid definition from all of its parts.
    pub fn new(
        width: usize,
        height: usize,
        easting: f64,
        northing: f64,
        resolution_x: f64,
        resolution_y: f64,
    ) -> Self {
        Self {
            width,
            height,
            easting,
            northing,
            resolution_x,
            resolution_y,
            time: 1,
        }
    }

    /// Global grid with square cells of the given size in degrees.
    pub fn global(resolution: f64) -> Self {
        let width = (360.0 / resolution) as usize;
        let height = (180.0 / resolution) as usize;
        Self::new(width, height, -180.0, 90.0, resolution, resolution)
    }

    /// Global grid with the given number of columns and rows.
    pub fn global_with_size(width: usize, height: usize) -> Self {
        Self::new(
            width,
            height,
            -180.0,
            90.0,
            360.0 / width as f64,
            180.0 / height as f64,
        )
    }

    /// Plain raster without geographic meaning (unit cells at the origin).
    pub fn raster(width: usize, height: usize) -> Self {
        Self::new(width, height, 0.0, 0.0, 1.0, 1.0)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn resolution_x(&self) -> f64 {
        self.resolution_x
    }

    pub fn resolution_y(&self) -> f64 {
        self.resolution_y
    }

    pub fn time(&self) -> usize {
        self.time
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The common resolution of square cells.
    ///
    /// Fails when the x and y resolutions differ.
    pub fn resolution(&self) -> GridResult<f64> {
        if self.resolution_x != self.resolution_y {
            return Err(GridError::IllegalState(format!(
                "resolution_x ({}) != resolution_y ({})",
                self.resolution_x, self.resolution_y
            )));
        }
        Ok(self.resolution_x)
    }

    /// Wrap a column index into `[0, width)`.
    pub fn wrap_x(&self, x: i64) -> i64 {
        let width = self.width as i64;
        if x < 0 {
            width - 1 + ((1 + x) % width)
        } else if x >= width {
            x % width
        } else {
            x
        }
    }

    /// Western boundary of column `x`. `x == width` yields the eastern edge.
    pub fn lon(&self, x: f64) -> GridResult<f64> {
        if x < 0.0 || x > self.width as f64 {
            return Err(GridError::InvalidCoordinate(format!(
                "x = {} is outside [0, {}]",
                x, self.width
            )));
        }
        Ok(self.easting + self.resolution_x * x)
    }

    /// Northern boundary of row `y`. `y == height` yields the southern edge.
    pub fn lat(&self, y: f64) -> GridResult<f64> {
        if y < 0.0 || y > self.height as f64 {
            return Err(GridError::InvalidCoordinate(format!(
                "y = {} is outside [0, {}]",
                y, self.height
            )));
        }
        Ok(self.northing - self.resolution_y * y)
    }

    pub fn center_lon(&self, x: usize) -> GridResult<f64> {
        self.lon(x as f64 + 0.5)
    }

    pub fn center_lat(&self, y: usize) -> GridResult<f64> {
        self.lat(y as f64 + 0.5)
    }

    /// Column containing `lon`. With `crop` the index is clamped into the grid.
    pub fn grid_x(&self, lon: f64, crop: bool) -> GridResult<i64> {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GridError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                lon
            )));
        }
        let x = ((lon - self.easting) / self.resolution_x).floor() as i64;
        Ok(if crop {
            x.clamp(0, self.width as i64 - 1)
        } else {
            x
        })
    }

    /// Row containing `lat`. With `crop` the index is clamped into the grid.
    pub fn grid_y(&self, lat: f64, crop: bool) -> GridResult<i64> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GridError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                lat
            )));
        }
        let y = ((self.northing - lat) / self.resolution_y).floor() as i64;
        Ok(if crop {
            y.clamp(0, self.height as i64 - 1)
        } else {
            y
        })
    }

    /// Geographic extent of cell `(x, y)`.
    pub fn lon_lat_rect(&self, x: usize, y: usize) -> GridResult<LonLatRect> {
        Ok(LonLatRect::new(
            self.lon(x as f64)?,
            self.lat(y as f64 + 1.0)?,
            self.resolution_x,
            self.resolution_y,
        ))
    }

    /// Cells covering the given geographic bounds.
    pub fn grid_rect(
        &self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> GridResult<GridRect> {
        let width = ((max_lon - min_lon) / self.resolution_x).round() as i64;
        let height = ((max_lat - min_lat) / self.resolution_y).round() as i64;
        let x = self.grid_x(min_lon, true)?;
        let y = self.grid_y(max_lat, true)?;
        Ok(GridRect::new(x, y, width, height))
    }

    /// Cells covering a geographic rectangle.
    pub fn grid_rect_for(&self, rect: &LonLatRect) -> GridResult<GridRect> {
        self.grid_rect(rect.lon, rect.lat, rect.max_lon(), rect.max_lat())
    }

    /// Cells of this grid covered by cell `(x, y)` of a coarser grid.
    pub fn grid_rect_of_coarser(&self, x: usize, y: usize, coarser: &GridDef) -> GridResult<GridRect> {
        let fine = self.resolution()?;
        let coarse = coarser.resolution()?;
        if coarse < fine {
            return Err(GridError::invalid_argument(format!(
                "grid with resolution {} is finer than {}",
                coarse, fine
            )));
        }
        let ratio = (coarse / fine).round() as i64;
        Ok(GridRect::new(x as i64 * ratio, y as i64 * ratio, ratio, ratio))
    }

    /// Great-circle length of the diagonal of cell `(x, y)`, in km.
    pub fn diagonal(&self, x: usize, y: usize) -> GridResult<f64> {
        let lon1 = self.lon(x as f64)?;
        let lat1 = self.lat(y as f64)?;
        let lon2 = lon1 + self.resolution_x;
        let lat2 = lat1 - self.resolution_y;
        Ok(sphere_distance_deg(EARTH_RADIUS_KM, lon1, lat1, lon2, lat2))
    }
}

impl Eq for GridDef {}

impl std::hash::Hash for GridDef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.easting.to_bits().hash(state);
        self.northing.to_bits().hash(state);
        self.resolution_x.to_bits().hash(state);
        self.resolution_y.to_bits().hash(state);
        self.time.hash(state);
    }
}

/// Spherical law of cosines on degree inputs.
fn sphere_distance_deg(radius: f64, lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta_lambda = (lon2 - lon1).to_radians();
    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    radius * cos_angle.clamp(-1.0, 1.0).acos()
}
