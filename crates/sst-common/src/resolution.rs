//! Supported spatial and temporal resolutions.

use crate::error::GridError;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spatial resolutions of regridded SST products, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialResolution {
    Degree0_05,
    Degree0_10,
    Degree0_15,
    Degree0_20,
    Degree0_25,
    Degree0_30,
    Degree0_40,
    Degree0_50,
    Degree0_60,
    Degree0_75,
    Degree0_80,
    Degree1_00,
    Degree1_20,
    Degree1_25,
    Degree2_00,
    Degree2_25,
    Degree2_40,
    Degree2_50,
    Degree3_00,
    Degree3_75,
    Degree4_00,
    Degree4_50,
    Degree5_00,
    Degree10_00,
}

impl SpatialResolution {
    /// All resolutions in ascending order.
    pub const ALL: [SpatialResolution; 24] = [
        Self::Degree0_05,
        Self::Degree0_10,
        Self::Degree0_15,
        Self::Degree0_20,
        Self::Degree0_25,
        Self::Degree0_30,
        Self::Degree0_40,
        Self::Degree0_50,
        Self::Degree0_60,
        Self::Degree0_75,
        Self::Degree0_80,
        Self::Degree1_00,
        Self::Degree1_20,
        Self::Degree1_25,
        Self::Degree2_00,
        Self::Degree2_25,
        Self::Degree2_40,
        Self::Degree2_50,
        Self::Degree3_00,
        Self::Degree3_75,
        Self::Degree4_00,
        Self::Degree4_50,
        Self::Degree5_00,
        Self::Degree10_00,
    ];

    /// Cell size in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            Self::Degree0_05 => 0.05,
            Self::Degree0_10 => 0.1,
            Self::Degree0_15 => 0.15,
            Self::Degree0_20 => 0.2,
            Self::Degree0_25 => 0.25,
            Self::Degree0_30 => 0.3,
            Self::Degree0_40 => 0.4,
            Self::Degree0_50 => 0.5,
            Self::Degree0_60 => 0.6,
            Self::Degree0_75 => 0.75,
            Self::Degree0_80 => 0.8,
            Self::Degree1_00 => 1.0,
            Self::Degree1_20 => 1.2,
            Self::Degree1_25 => 1.25,
            Self::Degree2_00 => 2.0,
            Self::Degree2_25 => 2.25,
            Self::Degree2_40 => 2.4,
            Self::Degree2_50 => 2.5,
            Self::Degree3_00 => 3.0,
            Self::Degree3_75 => 3.75,
            Self::Degree4_00 => 4.0,
            Self::Degree4_50 => 4.5,
            Self::Degree5_00 => 5.0,
            Self::Degree10_00 => 10.0,
        }
    }

    /// Look up the resolution with exactly this cell size.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.degrees() == degrees)
    }
}

impl fmt::Display for SpatialResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for SpatialResolution {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::from_degrees)
            .ok_or_else(|| GridError::parse(format!("unsupported spatial resolution '{}'", s)))
    }
}

/// Temporal aggregation periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalResolution {
    Daily,
    Weekly5d,
    Weekly7d,
    Monthly,
    Seasonal,
    Annual,
}

impl TemporalResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly5d => "weekly5d",
            Self::Weekly7d => "weekly7d",
            Self::Monthly => "monthly",
            Self::Seasonal => "seasonal",
            Self::Annual => "annual",
        }
    }

    /// First day after the period starting at `start`.
    ///
    /// Returns `None` if the end date is not representable.
    pub fn period_end(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => start.checked_add_days(Days::new(1)),
            Self::Weekly5d => start.checked_add_days(Days::new(5)),
            Self::Weekly7d => start.checked_add_days(Days::new(7)),
            Self::Monthly => start.checked_add_months(Months::new(1)),
            Self::Seasonal => start.checked_add_months(Months::new(3)),
            Self::Annual => start.checked_add_months(Months::new(12)),
        }
    }
}

impl fmt::Display for TemporalResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalResolution {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly5d" => Ok(Self::Weekly5d),
            "weekly7d" => Ok(Self::Weekly7d),
            "monthly" => Ok(Self::Monthly),
            "seasonal" => Ok(Self::Seasonal),
            "annual" => Ok(Self::Annual),
            _ => Err(GridError::parse(format!(
                "unknown temporal resolution '{}'",
                s
            ))),
        }
    }
}
