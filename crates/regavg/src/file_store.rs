//! Input file discovery.

use crate::error::{AggregationError, Result};
use crate::product::ProductType;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Product files of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    pub date: NaiveDate,
    pub files: Vec<PathBuf>,
}

/// Product files found below a set of input directories, grouped by day.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    product_name: String,
    input_paths: Vec<PathBuf>,
    by_date: BTreeMap<NaiveDate, Vec<PathBuf>>,
}

impl FileStore {
    /// Recursively scan `input_paths` for files of `product` ending with
    /// `suffix`.
    ///
    /// Files whose name carries no date of the product are skipped with a
    /// warning.
    pub fn scan<P: AsRef<Path>>(product: &dyn ProductType, suffix: &str, input_paths: &[P]) -> Result<Self> {
        let mut by_date: BTreeMap<NaiveDate, Vec<PathBuf>> = BTreeMap::new();
        let mut skipped = 0usize;

        for root in input_paths {
            let root = root.as_ref();
            if !root.exists() {
                return Err(AggregationError::invalid_argument(format!(
                    "input path does not exist: {}",
                    root.display()
                )));
            }
            for entry in walkdir::WalkDir::new(root) {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !file_name.ends_with(suffix) {
                    continue;
                }
                match product.parse_date(&file_name) {
                    Some(date) => by_date.entry(date).or_default().push(entry.into_path()),
                    None => {
                        skipped += 1;
                        warn!(
                            path = %entry.path().display(),
                            product = product.name(),
                            "Skipping file without a product date"
                        );
                    }
                }
            }
        }

        for files in by_date.values_mut() {
            files.sort();
        }
        debug!(
            product = product.name(),
            days = by_date.len(),
            skipped,
            "Scanned input paths"
        );

        Ok(Self {
            product_name: product.name().to_string(),
            input_paths: input_paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            by_date,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn input_paths(&self) -> &[PathBuf] {
        &self.input_paths
    }

    /// Number of days with files.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Files of every day in `[start, end)`, in date order.
    pub fn files(&self, start: NaiveDate, end: NaiveDate) -> Vec<FileList> {
        if start >= end {
            return Vec::new();
        }
        self.by_date
            .range(start..end)
            .map(|(date, files)| FileList {
                date: *date,
                files: files.clone(),
            })
            .collect()
    }
}
