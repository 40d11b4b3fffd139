//! CHR tile data for retro consoles.
//!
//! The raster is cut into 8x8 tiles, left to right then top to bottom. Each
//! pixel maps to a small ink value by its palette role, and the ink bits are
//! packed MSB-first (leftmost pixel in bit 7) into one or two bit planes.

use std::io::Write;

use crate::error::Result;
use crate::types::{Colour, IndexedRaster};

const TILE: u32 = 8;

/// How palette colours map onto ink values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkMapping {
    /// Background (transparent, black) is 0; everything else is 1.
    OneBit,
    /// Transparent 0, black 1, other colours 2, white 3.
    ThreeColour,
}

impl InkMapping {
    pub fn ink(self, colour: Colour) -> u8 {
        match self {
            InkMapping::OneBit => match colour {
                Colour::MAGENTA | Colour::BLACK => 0,
                _ => 1,
            },
            InkMapping::ThreeColour => match colour {
                Colour::MAGENTA => 0,
                Colour::BLACK => 1,
                Colour::WHITE => 3,
                _ => 2,
            },
        }
    }
}

/// Byte order of the bit planes within a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayout {
    /// One plane, 8 bytes per tile.
    Single,
    /// Eight low-plane bytes, then eight high-plane bytes (NES).
    PlaneMajor,
    /// Low byte then high byte for each row (Game Boy).
    RowInterleaved,
}

/// Write the raster as CHR tiles.
pub fn write_chr(indexed: &IndexedRaster, mapping: InkMapping, layout: TileLayout, out: &mut dyn Write) -> Result<()> {
    out.write_all(&encode_tiles(indexed, mapping, layout))?;
    Ok(())
}

fn encode_tiles(indexed: &IndexedRaster, mapping: InkMapping, layout: TileLayout) -> Vec<u8> {
    let tiles_x = indexed.width().div_ceil(TILE);
    let tiles_y = indexed.height().div_ceil(TILE);
    let per_tile = if layout == TileLayout::Single { 8 } else { 16 };
    let mut buffer = Vec::with_capacity((tiles_x * tiles_y) as usize * per_tile);

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let plane = |row: u32, bit: u8| plane_byte(indexed, mapping, tx * TILE, ty * TILE + row, bit);
            match layout {
                TileLayout::Single => buffer.extend((0..TILE).map(|row| plane(row, 0))),
                TileLayout::PlaneMajor => {
                    buffer.extend((0..TILE).map(|row| plane(row, 0)));
                    buffer.extend((0..TILE).map(|row| plane(row, 1)));
                }
                TileLayout::RowInterleaved => {
                    for row in 0..TILE {
                        buffer.push(plane(row, 0));
                        buffer.push(plane(row, 1));
                    }
                }
            }
        }
    }
    buffer
}

/// One row of one bit plane. Pixels past the raster edge are background.
fn plane_byte(indexed: &IndexedRaster, mapping: InkMapping, x: u32, y: u32, bit: u8) -> u8 {
    (0..TILE).fold(0u8, |acc, i| {
        let colour = indexed.colour_at(x + i, y).unwrap_or(Colour::MAGENTA);
        (acc << 1) | ((mapping.ink(colour) >> bit) & 1)
    })
}
