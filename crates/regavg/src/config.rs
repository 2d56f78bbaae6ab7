//! Configuration for regional averaging runs.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sst_common::{RegionMaskList, TemporalResolution};

/// Settings of an averaging run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AveragingConfig {
    /// Fraction (0..=1) of a 5° cell's pixels that must be valid for the
    /// cell to report statistics.
    pub min_coverage: f64,

    /// Length of the output periods.
    pub temporal_resolution: TemporalResolution,

    /// Region list, `name=W,N,E,S` or `name=mask-file` entries separated
    /// by `;`.
    pub regions: String,

    /// Only input files whose name ends with this suffix are considered.
    pub filename_suffix: String,
}

impl Default for AveragingConfig {
    fn default() -> Self {
        Self {
            min_coverage: 0.0,
            temporal_resolution: TemporalResolution::Monthly,
            regions: "Global=-180,90,180,-90".to_string(),
            filename_suffix: ".nc".to_string(),
        }
    }
}

impl AveragingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("REGAVG_MIN_COVERAGE") {
            if let Ok(min_coverage) = val.parse() {
                config.min_coverage = min_coverage;
            }
        }

        if let Ok(val) = std::env::var("REGAVG_TEMPORAL_RESOLUTION") {
            if let Ok(resolution) = val.parse() {
                config.temporal_resolution = resolution;
            }
        }

        if let Ok(val) = std::env::var("REGAVG_REGIONS") {
            config.regions = val;
        }

        if let Ok(val) = std::env::var("REGAVG_FILENAME_SUFFIX") {
            config.filename_suffix = val;
        }

        config
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(format!("min_coverage must be in [0, 1], got {}", self.min_coverage));
        }

        if self.regions.trim().is_empty() {
            return Err("regions must not be empty".to_string());
        }

        if matches!(
            self.temporal_resolution,
            TemporalResolution::Weekly5d | TemporalResolution::Weekly7d
        ) {
            return Err(format!(
                "temporal_resolution {} is not supported for averaging",
                self.temporal_resolution
            ));
        }

        Ok(())
    }

    /// Parse the configured regions on the 5° mask grid.
    pub fn region_masks(&self) -> Result<RegionMaskList> {
        Ok(RegionMaskList::parse(&self.regions)?)
    }
}
