//! Named region masks on the 5° cell grid.

use crate::error::{GridError, GridResult};
use crate::grid::Grid;
use crate::grid_def::GridDef;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resolution of region masks, in degrees.
pub const REGION_MASK_RESOLUTION: f64 = 5.0;

/// Spatial extent class of a region mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coverage {
    Empty,
    Globe,
    NHemisphere,
    SHemisphere,
    Other,
}

/// Boolean grid selecting the cells of one named region.
#[derive(Debug, Clone)]
pub struct RegionMask {
    name: String,
    grid_def: GridDef,
    samples: Vec<bool>,
    coverage: Coverage,
}

impl RegionMask {
    fn from_samples(name: impl Into<String>, grid_def: GridDef, samples: Vec<bool>) -> Self {
        let coverage = classify(&grid_def, &samples);
        Self {
            name: name.into(),
            grid_def,
            samples,
            coverage,
        }
    }

    /// Parse a mask from text: one line of `0`/`1` characters per row.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_text(name: &str, text: &str, grid_def: GridDef) -> GridResult<Self> {
        let width = grid_def.width();
        let height = grid_def.height();
        let mut samples = vec![false; grid_def.len()];
        let mut y = 0usize;
        let mut line_no = 0usize;

        for line in text.lines() {
            line_no += 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.chars().count() != width {
                return Err(GridError::parse(format!(
                    "region {}: line {} must contain exactly {} characters, found {}",
                    name,
                    line_no,
                    width,
                    line.chars().count()
                )));
            }
            if y >= height {
                return Err(GridError::parse(format!(
                    "region {}: line {} exceeds the required {} rows",
                    name, line_no, height
                )));
            }
            for (x, c) in line.chars().enumerate() {
                match c {
                    '0' => {}
                    '1' => samples[y * width + x] = true,
                    _ => {
                        return Err(GridError::parse(format!(
                            "region {}: line {} may only contain '0' and '1'",
                            name, line_no
                        )))
                    }
                }
            }
            y += 1;
        }

        if y != height {
            return Err(GridError::parse(format!(
                "region {}: exactly {} rows are required, found {}",
                name, height, y
            )));
        }

        Ok(Self::from_samples(name, grid_def, samples))
    }

    /// Rectangular region from its west, north, east and south bounds.
    ///
    /// A west bound greater than the east bound wraps across the
    /// anti-meridian.
    pub fn from_wnes(
        name: &str,
        west: f64,
        north: f64,
        east: f64,
        south: f64,
        grid_def: GridDef,
    ) -> GridResult<Self> {
        if north < south {
            return Err(GridError::invalid_argument(format!(
                "region {}: north ({}) < south ({})",
                name, north, south
            )));
        }
        let width = grid_def.width() as i64;
        let rect = grid_def.grid_rect(west, south, east, north)?;
        let min_x = rect.x;
        let max_x = rect.x + rect.width - 1;
        let min_y = rect.y;
        let max_y = (rect.y + rect.height - 1).min(grid_def.height() as i64 - 1);

        let mut samples = vec![false; grid_def.len()];
        let mut set = |x: i64, y: i64| {
            if (0..width).contains(&x) {
                samples[(y * width + x) as usize] = true;
            }
        };

        for y in min_y..=max_y {
            if min_x <= max_x {
                for x in min_x..=max_x {
                    set(x, y);
                }
            } else {
                for x in min_x..width {
                    set(x, y);
                }
                for x in 0..=max_x {
                    set(x, y);
                }
            }
        }

        Ok(Self::from_samples(name, grid_def, samples))
    }

    /// Union of several masks, named "Combined".
    ///
    /// A single mask is returned as is; an empty list yields `None`.
    pub fn combine(masks: &[RegionMask]) -> Option<RegionMask> {
        match masks {
            [] => None,
            [single] => Some(single.clone()),
            [first, ..] => {
                let mut samples = vec![false; first.samples.len()];
                for mask in masks {
                    for (s, &m) in samples.iter_mut().zip(&mask.samples) {
                        *s |= m;
                    }
                }
                Some(Self::from_samples("Combined", first.grid_def, samples))
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Number of selected cells.
    pub fn cell_count(&self) -> usize {
        self.samples.iter().filter(|&&s| s).count()
    }

    /// Whether the region spans a whole hemisphere or the globe.
    pub fn is_hemisphere_or_globe(&self) -> bool {
        matches!(
            self.coverage,
            Coverage::Globe | Coverage::NHemisphere | Coverage::SHemisphere
        )
    }
}

impl Grid for RegionMask {
    fn grid_def(&self) -> &GridDef {
        &self.grid_def
    }

    fn sample_double(&self, x: usize, y: usize) -> f64 {
        if self.sample_boolean(x, y) {
            1.0
        } else {
            0.0
        }
    }

    fn sample_int(&self, x: usize, y: usize) -> i32 {
        self.sample_boolean(x, y) as i32
    }

    fn sample_boolean(&self, x: usize, y: usize) -> bool {
        crate::grid::check_bounds(&self.grid_def, x, y);
        self.samples[y * self.grid_def.width() + x]
    }
}

fn classify(grid_def: &GridDef, samples: &[bool]) -> Coverage {
    let width = grid_def.width();
    let half = grid_def.height() / 2;
    let mut n_global = 0usize;
    let mut n_north = 0usize;
    let mut n_south = 0usize;

    for (i, &selected) in samples.iter().enumerate() {
        if !selected {
            continue;
        }
        n_global += 1;
        if i / width < half {
            n_north += 1;
        } else {
            n_south += 1;
        }
    }

    let total = samples.len();
    if n_global == 0 {
        Coverage::Empty
    } else if n_global == total {
        Coverage::Globe
    } else if n_north == n_global && n_north == total / 2 {
        Coverage::NHemisphere
    } else if n_south == n_global && n_south == total / 2 {
        Coverage::SHemisphere
    } else {
        Coverage::Other
    }
}

/// Ordered list of region masks.
#[derive(Debug, Clone, Default)]
pub struct RegionMaskList {
    masks: Vec<RegionMask>,
}

impl RegionMaskList {
    pub fn new(masks: Vec<RegionMask>) -> Self {
        Self { masks }
    }

    /// Parse a region expression on the default 5° grid.
    ///
    /// Entries are separated by `;` and take the form `name=W,N,E,S` or
    /// `name=path/to/mask.txt`.
    pub fn parse(expression: &str) -> GridResult<Self> {
        Self::parse_with_grid(expression, GridDef::global(REGION_MASK_RESOLUTION))
    }

    pub fn parse_with_grid(expression: &str, grid_def: GridDef) -> GridResult<Self> {
        let mut masks = Vec::new();

        for entry in expression.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let entry_no = masks.len() + 1;
            let (name, mask) = entry.split_once('=').ok_or_else(|| {
                GridError::parse(format!(
                    "illegal region entry {}: missing the '=' character",
                    entry_no
                ))
            })?;
            let name = name.trim();
            let mask = mask.trim();
            if name.is_empty() {
                return Err(GridError::parse(format!(
                    "illegal region entry {}: name is empty",
                    entry_no
                )));
            }
            if mask.is_empty() {
                return Err(GridError::parse(format!(
                    "illegal region entry {}: mask is empty",
                    entry_no
                )));
            }

            let parts: Vec<&str> = mask.split(',').collect();
            let region = match parts.as_slice() {
                [w, n, e, s] => {
                    let coords = [w, n, e, s]
                        .iter()
                        .map(|v| v.trim().parse::<f64>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| {
                            GridError::parse(format!(
                                "illegal region entry {}: failed to parse W,N,E,S coordinates",
                                entry_no
                            ))
                        })?;
                    if coords[1] < coords[3] {
                        return Err(GridError::parse(format!(
                            "illegal region entry {}: N must not be less than S",
                            entry_no
                        )));
                    }
                    RegionMask::from_wnes(name, coords[0], coords[1], coords[2], coords[3], grid_def)?
                }
                [path] => Self::read_mask_file(name, Path::new(path), entry_no, grid_def)?,
                _ => {
                    return Err(GridError::parse(format!(
                        "illegal region entry {}: expected W,N,E,S or a mask file",
                        entry_no
                    )))
                }
            };
            masks.push(region);
        }

        Ok(Self { masks })
    }

    fn read_mask_file(
        name: &str,
        path: &Path,
        entry_no: usize,
        grid_def: GridDef,
    ) -> GridResult<RegionMask> {
        if !path.exists() {
            return Err(GridError::Io(format!(
                "illegal region entry {}: mask file not found: {}",
                entry_no,
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        RegionMask::from_text(name, &text, grid_def)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegionMask> {
        self.masks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionMask> {
        self.masks.iter()
    }

    /// Union of all masks.
    pub fn combined(&self) -> Option<RegionMask> {
        RegionMask::combine(&self.masks)
    }
}

impl<'a> IntoIterator for &'a RegionMaskList {
    type Item = &'a RegionMask;
    type IntoIter = std::slice::Iter<'a, RegionMask>;

    fn into_iter(self) -> Self::IntoIter {
        self.masks.iter()
    }
}
