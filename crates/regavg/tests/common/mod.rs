//! Text-file product used by the integration tests.
//!
//! Each file `sst-YYYYMMDD.nc` holds a single SST value that fills the
//! whole 5° product grid. A file whose content is not a number fails to
//! read.

#![allow(dead_code)]

use anyhow::Context;
use chrono::NaiveDate;
use regavg::{Climatology, Components, CoverageTables, ProductType, SourceGrids};
use sst_common::{ArrayGrid, GridDef};
use std::path::Path;

pub struct TextProduct;

impl ProductType for TextProduct {
    fn name(&self) -> &str {
        "TEXT"
    }

    fn grid_def(&self) -> GridDef {
        GridDef::global(5.0)
    }

    fn components(&self) -> Components {
        Components::default()
    }

    fn parse_date(&self, file_name: &str) -> Option<NaiveDate> {
        let stamp = file_name.strip_prefix("sst-")?.strip_suffix(".nc")?;
        NaiveDate::parse_from_str(stamp, "%Y%m%d").ok()
    }

    fn read_source_grids(&self, path: &Path) -> anyhow::Result<SourceGrids> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("file name is not valid UTF-8")?;
        let date = self.parse_date(file_name).context("file name carries no date")?;
        let text = std::fs::read_to_string(path)?;
        let sst: f64 = text
            .trim()
            .parse()
            .with_context(|| format!("invalid SST value '{}'", text.trim()))?;
        Ok(SourceGrids::new(date, Box::new(ArrayGrid::filled(self.grid_def(), sst))))
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Climatology of 290 K everywhere, all sea, on the 5° grid.
pub fn climatology() -> Climatology {
    let def = GridDef::global(5.0);
    Climatology::new(vec![ArrayGrid::filled(def, 290.0)], ArrayGrid::filled(def, 1.0), def).unwrap()
}

pub fn coverage_tables() -> CoverageTables {
    let def5 = GridDef::global(5.0);
    let months = (0..12).map(|_| ArrayGrid::filled(GridDef::global(90.0), 1.1)).collect();
    CoverageTables::new(ArrayGrid::filled(def5, 1.2), ArrayGrid::filled(def5, 0.5), months).unwrap()
}
