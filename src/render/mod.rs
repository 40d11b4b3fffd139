//! Format encoders.
//!
//! Each encoder turns one generated subsheet variant (or a single glyph cell
//! of it, for folder formats) into the exact byte or text layout of its
//! format. [`write_output`] places the result on disk.

mod bdf;
mod bmp;
mod chr;
mod combined;
mod folder;
mod gif;
mod png;
mod svg;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SheetError};
use crate::output::Printer;
use crate::types::{Colour, FontInfo, Format, GlyphTable, IndexedRaster, Raster, SubsheetDefinition, Variant};

pub use bdf::write_bdf;
pub use bmp::{write_bmp_indexed, write_bmp_rgb};
pub use chr::{write_chr, InkMapping, TileLayout};
pub use combined::{assemble_combined, CombinedPlan, CombinedReport, COMBINED_SHEET};
pub use folder::{glyph_file_name, write_folder};
pub use gif::write_gif;
pub use png::{love2d_atlas, write_png_indexed, write_png_rgb, write_png_rgba};
pub use svg::{svg_document, SVG_SCALE};

/// Everything an encoder may read about the variant being written.
#[derive(Debug, Clone, Copy)]
pub struct EncodeJob<'a> {
    pub subsheet: &'a SubsheetDefinition,
    pub variant: Variant,
    pub rgba: &'a Raster,
    pub indexed: &'a IndexedRaster,
    pub font: &'a FontInfo,
    pub glyphs: &'a GlyphTable,
    /// Base name of the destination file, stamped into text formats.
    pub file_name: &'a str,
}

impl<'a> EncodeJob<'a> {
    /// The same job over a different pixel area, such as one glyph cell.
    pub fn with_pixels(&self, rgba: &'a Raster, indexed: &'a IndexedRaster, file_name: &'a str) -> Self {
        Self {
            rgba,
            indexed,
            file_name,
            ..*self
        }
    }
}

/// Encode a job in the given format.
pub fn encode(format: Format, job: &EncodeJob<'_>, out: &mut dyn Write) -> Result<()> {
    match format {
        Format::Bdf => write_bdf(job, out),
        Format::Chr1bpp => write_chr(job.indexed, InkMapping::OneBit, TileLayout::Single, out),
        Format::ChrNes => write_chr(job.indexed, InkMapping::ThreeColour, TileLayout::PlaneMajor, out),
        Format::ChrGb => write_chr(job.indexed, InkMapping::ThreeColour, TileLayout::RowInterleaved, out),
        Format::SvgPacked | Format::SvgIndividual => {
            out.write_all(svg_document(job.rgba).as_bytes())?;
            Ok(())
        }
        Format::PngIndexed => write_png_indexed(job.indexed, out),
        Format::PngRgbMagenta => write_png_rgb(job.rgba, Colour::MAGENTA, out),
        Format::PngRgba | Format::PngRgbaIndividual => write_png_rgba(job.rgba, out),
        Format::PngRgbaLove2d => write_png_rgba(&love2d_atlas(job.rgba, job.subsheet.glyph), out),
        Format::Gif | Format::GifIndividual => write_gif(job.indexed, out),
        Format::BmpIndexed => write_bmp_indexed(job.indexed, out),
        Format::BmpRgbMagenta => write_bmp_rgb(job.rgba, Colour::MAGENTA, out),
    }
}

/// Write a job to `path` in the given format.
///
/// Folder formats treat `path` minus its extension as a directory and write
/// one file per glyph cell into it. Returns the number of files written.
pub fn write_output(format: Format, job: &EncodeJob<'_>, path: &Path, printer: &Printer) -> Result<usize> {
    if format.definition().kind.is_folder() {
        return write_folder(format, job, path, printer);
    }
    write_file(path, |out| encode(format, job, out))?;
    Ok(1)
}

/// Create (or truncate) a file and hand a buffered writer to `body`.
pub(crate) fn write_file(path: &Path, body: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    let file = File::create(path).map_err(|e| SheetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create file: {}", e),
    })?;
    let mut out = BufWriter::new(file);
    body(&mut out)?;
    out.flush().map_err(|e| SheetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_write_output_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut rgba = Raster::new(8, 8);
        rgba.set(0, 0, Colour::WHITE);
        let fixture = Fixture::new("thin", rgba);
        let path = dir.path().join("om_thin_plain_1bpp.chr");

        let written = write_output(Format::Chr1bpp, &fixture.job(Variant::Plain, "om_thin_plain_1bpp.chr"), &path, &Printer::quiet()).unwrap();
        assert_eq!(written, 1);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_svg_is_text() {
        let fixture = Fixture::new("thin", Raster::filled(1, 1, Colour::WHITE));
        let mut out = Vec::new();
        encode(Format::SvgPacked, &fixture.job(Variant::Plain, "x.svg"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("fill=\"rgb(255,255,255)\""));
    }

    #[test]
    fn test_write_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        let err = write_file(&path, |out| Ok(out.write_all(b"x")?)).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }
}
