//! Palette-indexed rasters and the deterministic colour indexer.
//!
//! Palettes are built reserved-first: the transparency sentinel, black and
//! white take the leading slots (in that order) when they occur, and every
//! other colour follows in first-seen column-major order (x outer, y inner).

use std::collections::{HashMap, HashSet};

use super::{Colour, Raster, Region};

/// The reserved palette colours, in priority order.
pub const RESERVED_COLOURS: [Colour; 3] = [Colour::MAGENTA, Colour::BLACK, Colour::WHITE];

/// A raster of palette indices plus its ordered RGB palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRaster {
    width: u32,
    height: u32,
    indices: Vec<u32>,
    palette: Vec<Colour>,
}

impl IndexedRaster {
    /// Quantize an RGBA raster.
    ///
    /// Transparent pixels become the magenta sentinel; all other colours
    /// lose their alpha. The palette holds only colours that are used.
    pub fn from_raster(raster: &Raster) -> Self {
        let (width, height) = raster.size();
        let key = |c: Colour| {
            if c.is_transparent() {
                Colour::MAGENTA
            } else {
                c.opaque()
            }
        };

        // Pass 1: which reserved colours occur, and in what order do the rest appear.
        let mut present = [false; RESERVED_COLOURS.len()];
        let mut extras: Vec<Colour> = Vec::new();
        let mut seen: HashSet<Colour> = HashSet::new();
        for x in 0..width {
            for y in 0..height {
                let c = key(raster.get(x, y).unwrap_or(Colour::TRANSPARENT));
                if let Some(slot) = RESERVED_COLOURS.iter().position(|&r| r == c) {
                    present[slot] = true;
                } else if seen.insert(c) {
                    extras.push(c);
                }
            }
        }

        let palette: Vec<Colour> = RESERVED_COLOURS
            .iter()
            .zip(present)
            .filter_map(|(&c, used)| used.then_some(c))
            .chain(extras)
            .collect();
        let lookup: HashMap<Colour, u32> = palette
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u32))
            .collect();

        // Pass 2: assign indices.
        let indices = raster.pixels().iter().map(|&c| lookup[&key(c)]).collect();

        Self {
            width,
            height,
            indices,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The ordered palette.
    pub fn palette(&self) -> &[Colour] {
        &self.palette
    }

    /// Number of distinct colours in use.
    pub fn colour_count(&self) -> usize {
        self.palette.len()
    }

    /// Row-major palette indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index at a position, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.indices[y as usize * self.width as usize + x as usize])
    }

    /// Palette colour at a position.
    pub fn colour_at(&self, x: u32, y: u32) -> Option<Colour> {
        self.get(x, y).map(|i| self.palette[i as usize])
    }

    /// Palette slot holding the transparency sentinel, if any pixel is transparent.
    pub fn transparent_index(&self) -> Option<u32> {
        self.palette
            .iter()
            .position(|&c| c == Colour::MAGENTA)
            .map(|i| i as u32)
    }

    /// Indices narrowed to bytes, for formats with at most 256 colours.
    pub fn indices_u8(&self) -> Option<Vec<u8>> {
        if self.palette.len() > 256 {
            return None;
        }
        Some(self.indices.iter().map(|&i| i as u8).collect())
    }

    /// Palette as packed RGB triples.
    pub fn palette_rgb(&self) -> Vec<u8> {
        self.palette.iter().flat_map(|c| c.to_rgb()).collect()
    }

    /// Copy a region, keeping the full palette.
    pub fn crop(&self, region: Region) -> Option<IndexedRaster> {
        if !region.fits_within(self.width, self.height) {
            return None;
        }
        let mut indices = Vec::with_capacity(region.width as usize * region.height as usize);
        for y in region.y..region.y + region.height {
            let start = y as usize * self.width as usize + region.x as usize;
            indices.extend_from_slice(&self.indices[start..start + region.width as usize]);
        }
        Some(IndexedRaster {
            width: region.width,
            height: region.height,
            indices,
            palette: self.palette.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Colour = Colour::rgb(255, 0, 0);
    const GREEN: Colour = Colour::rgb(0, 255, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 255);

    #[test]
    fn test_reserved_colours_lead_in_priority_order() {
        // White appears first in scan order, black second, transparent last.
        let raster = Raster::from_rows(&[
            vec![Colour::WHITE, RED],
            vec![Colour::BLACK, Colour::TRANSPARENT],
        ]);
        let indexed = IndexedRaster::from_raster(&raster);
        assert_eq!(
            indexed.palette(),
            &[Colour::MAGENTA, Colour::BLACK, Colour::WHITE, RED]
        );
        assert_eq!(indexed.get(0, 0), Some(2));
        assert_eq!(indexed.get(1, 1), Some(0));
        assert_eq!(indexed.transparent_index(), Some(0));
    }

    #[test]
    fn test_unused_reserved_colours_leave_no_gap() {
        let raster = Raster::from_rows(&[vec![RED, Colour::WHITE]]);
        let indexed = IndexedRaster::from_raster(&raster);
        assert_eq!(indexed.palette(), &[Colour::WHITE, RED]);
        assert_eq!(indexed.transparent_index(), None);
    }

    #[test]
    fn test_extras_follow_column_major_order() {
        // Row-major order would be RED, GREEN, BLUE; column-major is RED, BLUE, GREEN.
        let raster = Raster::from_rows(&[vec![RED, GREEN], vec![BLUE, RED]]);
        let indexed = IndexedRaster::from_raster(&raster);
        assert_eq!(indexed.palette(), &[RED, BLUE, GREEN]);
        assert_eq!(indexed.indices(), &[0, 2, 1, 0]);
    }

    #[test]
    fn test_indexing_is_deterministic() {
        let raster = Raster::from_rows(&[
            vec![GREEN, Colour::TRANSPARENT, RED],
            vec![Colour::WHITE, BLUE, Colour::BLACK],
        ]);
        let a = IndexedRaster::from_raster(&raster);
        let b = IndexedRaster::from_raster(&raster);
        assert_eq!(a, b);
    }

    #[test]
    fn test_alpha_is_dropped_from_palette() {
        let raster = Raster::from_rows(&[vec![Colour::new(255, 0, 0, 128), RED]]);
        let indexed = IndexedRaster::from_raster(&raster);
        assert_eq!(indexed.palette(), &[RED]);
    }

    #[test]
    fn test_crop_keeps_palette() {
        let raster = Raster::from_rows(&[vec![RED, GREEN], vec![BLUE, Colour::WHITE]]);
        let indexed = IndexedRaster::from_raster(&raster);
        let cell = indexed.crop(Region::new(1, 1, 1, 1)).unwrap();
        assert_eq!(cell.palette(), indexed.palette());
        assert_eq!(cell.colour_at(0, 0), Some(Colour::WHITE));
    }

    #[test]
    fn test_indices_u8_limit() {
        let row: Vec<Colour> = (0..=256u32)
            .map(|i| Colour::rgb((i % 256) as u8, (i / 256) as u8 + 1, 7))
            .collect();
        let indexed = IndexedRaster::from_raster(&Raster::from_rows(&[row]));
        assert_eq!(indexed.colour_count(), 257);
        assert!(indexed.indices_u8().is_none());
    }
}
