//! GIF output through the `gif` crate.

use std::borrow::Cow;
use std::io::Write;

use crate::error::{Result, SheetError};
use crate::types::IndexedRaster;

/// Write a single-frame GIF, keying the sentinel entry transparent.
pub fn write_gif(indexed: &IndexedRaster, out: &mut dyn Write) -> Result<()> {
    let fail = |e: gif::EncodingError| SheetError::encode("gif", e);
    let data = indexed
        .indices_u8()
        .ok_or_else(|| SheetError::encode("gif", "palette exceeds 256 colours"))?;
    let (width, height) = dimensions(indexed)?;

    let mut encoder = gif::Encoder::new(out, width, height, &indexed.palette_rgb()).map_err(fail)?;
    let frame = gif::Frame {
        width,
        height,
        buffer: Cow::Owned(data),
        transparent: indexed.transparent_index().map(|i| i as u8),
        ..gif::Frame::default()
    };
    encoder.write_frame(&frame).map_err(fail)?;
    encoder.into_inner().map_err(|e| SheetError::encode("gif", e))?;
    Ok(())
}

fn dimensions(indexed: &IndexedRaster) -> Result<(u16, u16)> {
    match (u16::try_from(indexed.width()), u16::try_from(indexed.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SheetError::encode(
            "gif",
            format!("{}x{} exceeds the GIF size limit", indexed.width(), indexed.height()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Raster};

    #[test]
    fn test_gif_round_trip_keeps_transparency() {
        let raster = Raster::from_rows(&[
            vec![Colour::TRANSPARENT, Colour::WHITE, Colour::BLACK],
            vec![Colour::rgb(10, 200, 30), Colour::TRANSPARENT, Colour::WHITE],
        ]);
        let mut out = Vec::new();
        write_gif(&IndexedRaster::from_raster(&raster), &mut out).unwrap();
        assert_eq!(&out[..6], b"GIF89a");

        let img = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(Raster::from_keyed_image(&img), raster);
    }

    #[test]
    fn test_single_colour_gif() {
        let raster = Raster::filled(4, 4, Colour::WHITE);
        let mut out = Vec::new();
        write_gif(&IndexedRaster::from_raster(&raster), &mut out).unwrap();
        let img = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(Raster::from_image(&img), raster);
    }
}
