//! PNG output: indexed, RGB over a key colour, RGBA, and love2d atlases.

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Result, SheetError};
use crate::types::{Colour, GlyphSize, IndexedRaster, Raster};

/// Write a palette PNG. The sentinel entry, when present, is keyed
/// transparent through a tRNS chunk.
pub fn write_png_indexed(indexed: &IndexedRaster, out: &mut dyn Write) -> Result<()> {
    let fail = |e: png::EncodingError| SheetError::encode("png_indexed", e);
    let data = indexed
        .indices_u8()
        .ok_or_else(|| SheetError::encode("png_indexed", "palette exceeds 256 colours"))?;

    let mut encoder = png::Encoder::new(out, indexed.width(), indexed.height());
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(indexed.palette_rgb());
    if let Some(key) = indexed.transparent_index() {
        let mut trns = vec![255u8; key as usize + 1];
        trns[key as usize] = 0;
        encoder.set_trns(trns);
    }

    let mut writer = encoder.write_header().map_err(fail)?;
    writer.write_image_data(&data).map_err(fail)?;
    writer.finish().map_err(fail)?;
    Ok(())
}

/// Write an RGB PNG with transparency composited over `background`.
pub fn write_png_rgb(raster: &Raster, background: Colour, out: &mut dyn Write) -> Result<()> {
    PngEncoder::new(out)
        .write_image(
            &raster.to_rgb_buffer(background),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| SheetError::encode("png_rgb", e))
}

/// Write an RGBA PNG.
pub fn write_png_rgba(raster: &Raster, out: &mut dyn Write) -> Result<()> {
    PngEncoder::new(out)
        .write_image(
            &raster.to_rgba_buffer(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| SheetError::encode("png_rgba", e))
}

/// Lay every glyph cell out in a single row, fenced by opaque cyan columns,
/// as love2d's image fonts expect.
pub fn love2d_atlas(raster: &Raster, glyph: GlyphSize) -> Raster {
    let (gw, gh) = (glyph.width, glyph.height);
    let columns = raster.width() / gw;
    let count = columns * (raster.height() / gh);

    let mut atlas = Raster::new(count * gw + count + 1, gh);
    fence(&mut atlas, 0);

    for i in 0..count {
        let sx = i % columns * gw;
        let sy = i / columns * gh;
        let dx = i * gw + i + 1;
        for y in 0..gh {
            for x in 0..gw {
                if let Some(c) = raster.get(sx + x, sy + y) {
                    let under = atlas.get(dx + x, y).unwrap_or(Colour::TRANSPARENT);
                    atlas.set(dx + x, y, c.masked_over(under));
                }
            }
        }
        fence(&mut atlas, dx + gw);
    }
    atlas
}

fn fence(atlas: &mut Raster, x: u32) {
    for y in 0..atlas.height() {
        atlas.set(x, y, Colour::CYAN);
    }
}
