//! Per-glyph two-tone reduction.
//!
//! Each glyph cell is thresholded independently against a cutoff derived
//! from the brightness range of its own non-shadow pixels.

use crate::types::{Colour, GlyphSize, Raster};

/// What happens to shadow ink and sub-cutoff pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    /// Shadow ink stays black; dark pixels become black.
    Keep,
    /// Shadow ink and dark pixels become transparent.
    Remove,
}

/// Weight of the brightest pixel when placing the cutoff.
const MAX_WEIGHT_QUARTERS: u32 = 1;

/// Brightness threshold for a cell whose eligible pixels span `min..=max`.
///
/// `floor(min * 0.75 + max * 0.25)`, except that a cell spanning full white
/// down to below mid-grey always cuts at 100.
// TODO: the 100 override is empirical and undocumented; confirm its intent
// with the sheet artists before generalizing it.
pub fn monochrome_cutoff(min: u8, max: u8) -> u8 {
    if max == 255 && min < 128 {
        return 100;
    }
    let (min, max) = (min as u32, max as u32);
    ((min * (4 - MAX_WEIGHT_QUARTERS) + max * MAX_WEIGHT_QUARTERS) / 4) as u8
}

/// Reduce every glyph cell to white plus black (or transparent) pixels.
///
/// Returns `None` when the raster is not a whole number of cells.
pub fn monochrome(source: &Raster, cell: GlyphSize, mode: ShadowMode) -> Option<Raster> {
    let (w, h) = source.size();
    if cell.width == 0 || cell.height == 0 || w % cell.width != 0 || h % cell.height != 0 {
        return None;
    }

    let mut result = source.clone();
    for cy in (0..h).step_by(cell.height as usize) {
        for cx in (0..w).step_by(cell.width as usize) {
            let cell_pixels = || {
                (0..cell.width).flat_map(move |i| (0..cell.height).map(move |j| (cx + i, cy + j)))
            };

            let range = cell_pixels()
                .filter_map(|(x, y)| source.get(x, y))
                .filter(|c| !c.is_transparent() && *c != Colour::BLACK)
                .map(Colour::brightness)
                .fold(None, |acc: Option<(u8, u8)>, b| match acc {
                    None => Some((b, b)),
                    Some((lo, hi)) => Some((lo.min(b), hi.max(b))),
                });

            let Some((min, max)) = range else {
                continue;
            };
            let cutoff = monochrome_cutoff(min, max);

            for (x, y) in cell_pixels() {
                let Some(c) = source.get(x, y) else { continue };
                let out = if c.is_transparent() {
                    continue;
                } else if c == Colour::BLACK {
                    match mode {
                        ShadowMode::Keep => Colour::BLACK,
                        ShadowMode::Remove => Colour::TRANSPARENT,
                    }
                } else if c.brightness() >= cutoff {
                    Colour::WHITE
                } else if mode == ShadowMode::Remove {
                    Colour::TRANSPARENT
                } else {
                    Colour::BLACK
                };
                result.set(x, y, out);
            }
        }
    }
    Some(result)
}
