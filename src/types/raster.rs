//! Owned RGBA pixel buffer.
//!
//! Every sheet, subsheet and variant is a [`Raster`]. Transparency is
//! carried only in the alpha channel; the magenta sentinel is converted at
//! the load boundary ([`Raster::from_keyed_image`]) and never appears inside
//! the pipeline.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::Colour;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region lies entirely inside a `width` x `height` area.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// A 2-D RGBA pixel buffer (row-major, contiguous).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl Raster {
    /// Create a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Colour::TRANSPARENT)
    }

    /// Create a raster filled with a single colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width as usize * height as usize],
        }
    }

    /// Build a raster from row-major rows (`rows[y][x]`).
    ///
    /// Short rows are padded with transparency.
    pub fn from_rows(rows: &[Vec<Colour>]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut raster = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &colour) in row.iter().enumerate() {
                raster.set(x as u32, y as u32, colour);
            }
        }
        raster
    }

    /// Copy an RGBA image verbatim.
    pub fn from_image(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|&px| Colour::from(px)).collect(),
        }
    }

    /// Copy an RGBA image, turning the magenta sentinel (and anything with
    /// zero alpha) into true transparency.
    pub fn from_keyed_image(img: &RgbaImage) -> Self {
        let mut raster = Self::from_image(img);
        for px in &mut raster.pixels {
            if px.is_transparent() || *px == Colour::MAGENTA {
                *px = Colour::TRANSPARENT;
            }
        }
        raster
    }

    /// Convert to an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.to_rgba_buffer())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Flat RGBA byte buffer.
    pub fn to_rgba_buffer(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    /// Flat RGB byte buffer with transparency composited over `background`.
    pub fn to_rgb_buffer(&self, background: Colour) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.masked_over(background).to_rgb())
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get a pixel, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel. Writes outside the raster are ignored.
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = colour;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Apply `f` to every pixel, producing a new raster.
    pub fn map(&self, f: impl Fn(Colour) -> Colour) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Copy a region into a freshly allocated raster.
    ///
    /// Returns `None` if the region does not lie inside this raster.
    pub fn crop(&self, region: Region) -> Option<Raster> {
        if !region.fits_within(self.width, self.height) {
            return None;
        }
        let mut out = Raster::new(region.width, region.height);
        for y in 0..region.height {
            let start = self.offset(region.x, region.y + y)?;
            let end = start + region.width as usize;
            let dst = y as usize * region.width as usize;
            out.pixels[dst..dst + region.width as usize].copy_from_slice(&self.pixels[start..end]);
        }
        Some(out)
    }

    /// Overwrite pixels with `src` placed at (`dx`, `dy`), clipping at the edges.
    pub fn paste(&mut self, src: &Raster, dx: i64, dy: i64) {
        self.blit(src, dx, dy, |s, _| s);
    }

    /// Composite `src` at (`dx`, `dy`) using its own alpha as the mask.
    pub fn paste_masked(&mut self, src: &Raster, dx: i64, dy: i64) {
        self.blit(src, dx, dy, Colour::masked_over);
    }

    fn blit(&mut self, src: &Raster, dx: i64, dy: i64, op: impl Fn(Colour, Colour) -> Colour) {
        for sy in 0..src.height {
            let ty = dy + sy as i64;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let tx = dx + sx as i64;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let s = src.pixels[sy as usize * src.width as usize + sx as usize];
                let i = ty as usize * self.width as usize + tx as usize;
                self.pixels[i] = op(s, self.pixels[i]);
            }
        }
    }
}
