use sst_common::{SpatialResolution, TemporalResolution};

/// Spatial correlation length, in km.
const LXY_KM: f64 = 100.0;

/// Synoptic uncertainty for one spatial/temporal resolution pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynopticUncertaintyProvider {
    spatial: SpatialResolution,
    temporal: TemporalResolution,
}

impl SynopticUncertaintyProvider {
    pub fn new(spatial: SpatialResolution, temporal: TemporalResolution) -> Self {
        Self { spatial, temporal }
    }

    pub fn spatial_resolution(&self) -> SpatialResolution {
        self.spatial
    }

    pub fn temporal_resolution(&self) -> TemporalResolution {
        self.temporal
    }

    /// Uncertainty of `value` accumulated from `sample_count` samples in
    /// row `y`: `value / eta(y, n)`.
    pub fn calculate(&self, y: usize, sample_count: usize, value: f64) -> f64 {
        value / self.eta(y, sample_count)
    }

    /// Average separation of samples in row `y`, in km.
    ///
    /// Blends a polar and an equatorial linear fit in the resolution by
    /// the absolute latitude of the row.
    pub fn dxy(&self, y: usize) -> f64 {
        let r = self.spatial.degrees();
        if r <= 0.05 {
            return 0.0;
        }
        let lat = 90.0 - r * (y as f64 + 0.5);
        let f = lat.abs() / 90.0;
        let d_pole = 37.2069 * r - 0.101691;
        let d_equator = 57.8881 * r + 0.272744;
        d_pole * f + d_equator * (1.0 - f)
    }

    /// Average temporal separation of samples, in days.
    pub fn dt(&self) -> f64 {
        let r = self.spatial.degrees();
        match self.temporal {
            TemporalResolution::Weekly5d => {
                if r <= 1.5 {
                    2.0
                } else if r <= 2.5 {
                    1.0
                } else {
                    0.0
                }
            }
            TemporalResolution::Weekly7d => {
                if r <= 1.75 {
                    2.0
                } else if r <= 2.5 {
                    1.0
                } else {
                    0.0
                }
            }
            TemporalResolution::Monthly => monthly_dt(r),
            TemporalResolution::Daily
            | TemporalResolution::Seasonal
            | TemporalResolution::Annual => 0.0,
        }
    }

    /// Correlation between neighbouring samples in row `y`.
    pub fn r(&self, y: usize) -> f64 {
        (-0.5 * (self.dxy(y) / LXY_KM + self.dt())).exp()
    }

    /// Effective number of independent samples among `n` in row `y`.
    pub fn eta(&self, y: usize, n: usize) -> f64 {
        let n = n as f64;
        n / (1.0 + self.r(y) * (n - 1.0))
    }
}

fn monthly_dt(r: f64) -> f64 {
    const STEPS: [(f64, f64); 10] = [
        (0.5, 10.0),
        (0.75, 9.0),
        (0.8, 8.5),
        (1.0, 6.0),
        (1.2, 3.5),
        (1.25, 3.0),
        (2.0, 0.5),
        (2.25, 0.25),
        (2.5, 0.2),
        (3.0, 0.1),
    ];
    STEPS
        .iter()
        .find(|(limit, _)| r <= *limit)
        .map_or(0.0, |&(_, dt)| dt)
}
