//! Common test fixtures for SST averaging tests.
//!
//! This module provides pre-defined region expressions and mask texts that
//! represent common aggregation scenarios.

/// Region expressions in `name=W,N,E,S` form.
pub mod regions {
    /// Whole globe.
    pub const GLOBAL: &str = "Global=-180,90,180,-90";

    /// Northern hemisphere.
    pub const NORTH: &str = "North=-180,90,180,0";

    /// Southern hemisphere.
    pub const SOUTH: &str = "South=-180,0,180,-90";

    /// A single 5° box east of Greenwich, north of the equator.
    pub const BOX_0_0: &str = "Box=0,5,5,0";

    /// Crosses the anti-meridian.
    pub const DATELINE: &str = "Dateline=170,10,-170,0";

    /// Global plus two hemispheres, in that order.
    pub const GLOBE_AND_HEMISPHERES: &str =
        "Global=-180,90,180,-90;North=-180,90,180,0;South=-180,0,180,-90";
}

/// Region mask text for a grid of the given size.
///
/// Produces one line of `0`/`1` characters per row, with a comment header,
/// selecting the cells for which `selected(x, y)` is true.
pub fn mask_text<F>(width: usize, height: usize, selected: F) -> String
where
    F: Fn(usize, usize) -> bool,
{
    let mut text = String::from("# generated region mask\n");
    for y in 0..height {
        for x in 0..width {
            text.push(if selected(x, y) { '1' } else { '0' });
        }
        text.push('\n');
    }
    text
}
