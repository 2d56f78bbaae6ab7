//! Bilinear resampling between grid definitions.

use super::{check_bounds, Grid};
use crate::grid_def::GridDef;

/// Bilinear view of a source grid on a different target [`GridDef`].
///
/// Each target cell centre is interpolated from the four surrounding source
/// cell centres. Columns wrap around the anti-meridian. NaN corners are left
/// out and the remaining weights renormalised, so the result is NaN only
/// when no finite corner carries weight.
#[derive(Debug, Clone)]
pub struct Interpolation<G> {
    source: G,
    target: GridDef,
}

impl<G: Grid> Interpolation<G> {
    pub fn new(source: G, target: GridDef) -> Self {
        Self { source, target }
    }
}

impl<G: Grid> Grid for Interpolation<G> {
    fn grid_def(&self) -> &GridDef {
        &self.target
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        check_bounds(&self.target, x, y);

        let source_def = self.source.grid_def();
        let source_w = source_def.width() as i64;
        let source_h = source_def.height() as i64;
        let res_x = source_def.resolution_x();
        let res_y = source_def.resolution_y();

        let target_lon = self.target.easting() + self.target.resolution_x() * (x as f64 + 0.5);
        let target_lat = self.target.northing() - self.target.resolution_y() * (y as f64 + 0.5);

        let mut source_x =
            (((target_lon - source_def.easting()) / res_x).floor() as i64).clamp(0, source_w - 1);
        if source_x == source_w - 1 {
            source_x -= 1;
        }
        let mut source_y =
            (((source_def.northing() - target_lat) / res_y).floor() as i64).clamp(0, source_h - 1);
        if source_y == source_h - 1 && source_y > 0 {
            source_y -= 1;
        }

        let source_lon = source_def.easting() + res_x * (source_x as f64 + 0.5);
        let source_lat = source_def.northing() - res_y * (source_y as f64 + 0.5);

        let mut wx = (target_lon - source_lon) / res_x;
        if wx < 0.0 {
            wx += 1.0;
            source_x -= 1;
        } else if wx > 1.0 {
            wx -= 1.0;
            source_x += 1;
        }
        let wy = ((source_lat - target_lat) / res_y).clamp(0.0, 1.0);

        let x0 = source_def.wrap_x(source_x) as usize;
        let x1 = source_def.wrap_x(source_x + 1) as usize;
        let y0 = source_y as usize;
        let y1 = (source_y + 1).min(source_h - 1) as usize;

        let w11 = wx * wy;
        let w00 = w11 - wx - wy + 1.0;
        let w10 = wx - w11;
        let w01 = wy - w11;

        let corners = [
            (self.source.sample_double(x0, y0), w00),
            (self.source.sample_double(x1, y0), w10),
            (self.source.sample_double(x0, y1), w01),
            (self.source.sample_double(x1, y1), w11),
        ];

        let mut vs = 0.0;
        let mut ws = 0.0;
        for (v, w) in corners {
            if !v.is_nan() {
                vs += w * v;
                ws += w;
            }
        }
        if ws > 0.0 {
            vs / ws
        } else {
            f64::NAN
        }
    }

    fn sample_boolean(&self, _x: usize, _y: usize) -> bool {
        panic!("boolean samples cannot be interpolated");
    }
}
