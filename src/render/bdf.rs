//! BDF 2.1 bitmap font output.
//!
//! One glyph per cell, numbered by the glyph table's character codes. Bitmap
//! rows are MSB-first hex, padded on the right to whole bytes.

use std::io::Write;

use crate::error::Result;
use crate::types::Colour;

use super::{EncodeJob, InkMapping};

const RESOLUTION: u32 = 72;
const POINT_SIZE: u32 = 100;
const AVERAGE_WIDTH: u32 = 90;
const CHARSET_REGISTRY: &str = "ISO8859";
const CHARSET_ENCODING: &str = "1";

/// Write a subsheet variant as a BDF font.
pub fn write_bdf(job: &EncodeJob<'_>, out: &mut dyn Write) -> Result<()> {
    let subsheet = job.subsheet;
    let font = job.font;
    let (gw, gh) = (subsheet.glyph.width, subsheet.glyph.height);
    let columns = job.indexed.width() / gw;
    let rows = job.indexed.height() / gh;
    let descent = subsheet.descent;
    let y_offset = -i64::from(descent);

    writeln!(out, "STARTFONT 2.1")?;
    writeln!(out, "COMMENT {}", font.copyright)?;
    writeln!(out, "COMMENT {}", job.file_name)?;
    writeln!(
        out,
        "FONT -{}-{}_{}_{}-medium-r-normal--{}-{}-{}-{}-m-{}-{}-{}",
        font.author,
        font.family,
        subsheet.name,
        job.variant.name(),
        gw,
        POINT_SIZE,
        RESOLUTION,
        RESOLUTION,
        AVERAGE_WIDTH,
        CHARSET_REGISTRY,
        CHARSET_ENCODING
    )?;
    writeln!(out, "SIZE {} {} {}", gw, RESOLUTION, RESOLUTION)?;
    writeln!(out, "FONTBOUNDINGBOX {} {} 0 {}", gw, gh, y_offset)?;

    writeln!(out, "STARTPROPERTIES 13")?;
    writeln!(out, "FONT_ASCENT {}", subsheet.ascent)?;
    writeln!(out, "FONT_DESCENT {}", descent)?;
    writeln!(out, "PIXEL_SIZE {}", gh)?;
    writeln!(out, "POINT_SIZE {}", POINT_SIZE)?;
    writeln!(out, "RESOLUTION_X {}", RESOLUTION)?;
    writeln!(out, "RESOLUTION_Y {}", RESOLUTION)?;
    writeln!(out, "SPACING \"C\"")?;
    writeln!(out, "DEFAULT_CHAR 32")?;
    writeln!(out, "AVERAGE_WIDTH {}", AVERAGE_WIDTH)?;
    writeln!(out, "CHARSET_REGISTRY \"{}\"", CHARSET_REGISTRY)?;
    writeln!(out, "CHARSET_ENCODING \"{}\"", CHARSET_ENCODING)?;
    writeln!(out, "FOUNDRY \"{}\"", font.author)?;
    writeln!(out, "COPYRIGHT \"{}\"", font.copyright)?;
    writeln!(out, "ENDPROPERTIES")?;

    let count = columns * rows;
    writeln!(out, "CHARS {}", count)?;

    for index in 0..count {
        let code = job.glyphs.char_code(subsheet, index);
        writeln!(out, "STARTCHAR char{}", code)?;
        writeln!(out, "ENCODING {}", code)?;
        writeln!(out, "SWIDTH {} 0", gw * POINT_SIZE)?;
        writeln!(out, "DWIDTH {} 0", gw)?;
        writeln!(out, "BBX {} {} 0 {}", gw, gh, y_offset)?;
        writeln!(out, "BITMAP")?;

        let gx = index % columns * gw;
        let gy = index / columns * gh;
        for y in gy..gy + gh {
            writeln!(out, "{}", bitmap_row(job, gx, y, gw))?;
        }
        writeln!(out, "ENDCHAR")?;
    }

    writeln!(out, "ENDFONT")?;
    Ok(())
}

/// One glyph row as upper-case hex, left-aligned in whole bytes.
fn bitmap_row(job: &EncodeJob<'_>, gx: u32, y: u32, width: u32) -> String {
    let mut bytes = vec![0u8; width.div_ceil(8) as usize];
    for i in 0..width {
        let colour = job.indexed.colour_at(gx + i, y).unwrap_or(Colour::MAGENTA);
        if InkMapping::OneBit.ink(colour) & 1 == 1 {
            bytes[(i / 8) as usize] |= 0x80 >> (i % 8);
        }
    }
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
