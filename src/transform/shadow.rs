//! Drop-shadow variants.
//!
//! The shadow is a black silhouette of the glyphs shifted right and/or down
//! by one pixel. Shifting bleeds into the first column/row of the neighbouring
//! cell, so those grid lines are cleared before the foreground goes back on top.

use crate::types::{Colour, GlyphSize, Raster};

use super::silhouette;

/// Which way the shadow falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowDirection {
    /// One pixel to the right.
    Horizontal,
    /// One pixel down.
    Vertical,
    /// Right, down and diagonally.
    Both,
}

impl ShadowDirection {
    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            ShadowDirection::Horizontal => &[(1, 0)],
            ShadowDirection::Vertical => &[(0, 1)],
            ShadowDirection::Both => &[(1, 0), (0, 1), (1, 1)],
        }
    }

    fn erases_columns(self) -> bool {
        matches!(self, ShadowDirection::Horizontal | ShadowDirection::Both)
    }

    fn erases_rows(self) -> bool {
        matches!(self, ShadowDirection::Vertical | ShadowDirection::Both)
    }
}

/// Add a one-pixel black drop shadow behind every glyph.
pub fn drop_shadow(source: &Raster, cell: GlyphSize, direction: ShadowDirection) -> Raster {
    let (w, h) = source.size();
    let shadow = silhouette(source, Colour::BLACK, false);

    let mut result = Raster::new(w, h);
    for &(dx, dy) in direction.offsets() {
        result.paste_masked(&shadow, dx, dy);
    }
    let mut result = erase_grid_bleed(
        &result,
        cell,
        direction.erases_columns(),
        direction.erases_rows(),
    );
    result.paste_masked(source, 0, 0);
    result
}

/// Clear every pixel on a glyph-cell boundary column and/or row.
pub fn erase_grid_bleed(source: &Raster, cell: GlyphSize, columns: bool, rows: bool) -> Raster {
    let mut result = source.clone();
    let (w, h) = source.size();
    for y in 0..h {
        for x in 0..w {
            if (columns && x % cell.width == 0) || (rows && y % cell.height == 0) {
                result.set(x, y, Colour::TRANSPARENT);
            }
        }
    }
    result
}
