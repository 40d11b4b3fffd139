//! BMP output. BMP has no alpha, so transparency is always keyed: through
//! the sentinel palette entry for indexed files, or by compositing over a
//! background colour for RGB files.

use std::io::Write;

use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;

use crate::error::{Result, SheetError};
use crate::types::{Colour, IndexedRaster, Raster};

/// Write an 8-bit paletted BMP.
pub fn write_bmp_indexed(indexed: &IndexedRaster, mut out: &mut dyn Write) -> Result<()> {
    let data = indexed
        .indices_u8()
        .ok_or_else(|| SheetError::encode("bmp_indexed", "palette exceeds 256 colours"))?;
    let palette: Vec<[u8; 3]> = indexed.palette().iter().map(|c| c.to_rgb()).collect();

    BmpEncoder::new(&mut out)
        .encode_with_palette(
            &data,
            indexed.width(),
            indexed.height(),
            ExtendedColorType::L8,
            Some(&palette),
        )
        .map_err(|e| SheetError::encode("bmp_indexed", e))
}

/// Write a 24-bit BMP with transparency composited over `background`.
pub fn write_bmp_rgb(raster: &Raster, background: Colour, mut out: &mut dyn Write) -> Result<()> {
    BmpEncoder::new(&mut out)
        .encode(
            &raster.to_rgb_buffer(background),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| SheetError::encode("bmp_rgb", e))
}
