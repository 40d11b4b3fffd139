//! Combined sheet assembly.
//!
//! After every subsheet has been written, each (variant, format) pair in the
//! plan is rebuilt as one master-sized sheet by reading the subsheet files
//! back and pasting them at their regions. Subsheets that lack the variant
//! contribute their plain file instead.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::types::{
    FontInfo, Format, GlyphSize, GlyphTable, IndexedRaster, Raster, Region, SubsheetDefinition,
    SubsheetKind, SubsheetRegistry, Variant,
};

use super::{write_output, EncodeJob};

/// Subsheet name used for combined files.
pub const COMBINED_SHEET: &str = "complete";

/// The (variant, format) pairs that get a combined sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedPlan {
    pub variants: Vec<Variant>,
    pub formats: Vec<Format>,
}

impl Default for CombinedPlan {
    fn default() -> Self {
        Self {
            variants: vec![
                Variant::Plain,
                Variant::Hshadow,
                Variant::Vshadow,
                Variant::Hvshadow,
                Variant::HshadowOutline,
                Variant::VshadowOutline,
                Variant::HvshadowOutline,
            ],
            formats: vec![Format::PngIndexed, Format::PngRgbMagenta, Format::PngRgba, Format::Gif],
        }
    }
}

impl CombinedPlan {
    /// Only formats whose files can be decoded again may be combined.
    pub fn check(&self) -> Result<()> {
        if let Some(format) = self.formats.iter().find(|f| !f.is_reloadable_image()) {
            return Err(SheetError::Config {
                message: format!("format '{}' cannot be used for combined sheets", format),
                help: Some("Combined sheets support png_indexed, png_rgb_magenta, png_rgba, gif, bmp_indexed and bmp_rgb_magenta".to_string()),
            });
        }
        Ok(())
    }
}

/// Outcome of an assembly pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedReport {
    /// Combined files written.
    pub written: usize,
    /// Pairs skipped because no subsheet file was found or the format rejected the result.
    pub skipped: usize,
}

/// Assemble every combined sheet in the plan under `root`.
pub fn assemble_combined(
    plan: &CombinedPlan,
    registry: &SubsheetRegistry,
    font: &FontInfo,
    glyphs: &GlyphTable,
    sheet_size: (u32, u32),
    root: &Path,
    printer: &Printer,
) -> Result<CombinedReport> {
    plan.check()?;
    let mut report = CombinedReport::default();

    for &format in &plan.formats {
        let dir = root.join(format.name());
        for &variant in &plan.variants {
            let (canvas, found) = compose(registry, font, &dir, variant, format, sheet_size, printer)?;
            let label = format!("{} {}", format, variant);
            if found == 0 {
                printer.warning("Skipping", &format!("{}: no subsheet files found", label));
                report.skipped += 1;
                continue;
            }

            let indexed = IndexedRaster::from_raster(&canvas);
            if !format.accepts(variant, &canvas, &indexed) {
                printer.warning(
                    "Skipping",
                    &format!("{}: {} do not fit the format", label, plural(indexed.colour_count(), "colour", "colours")),
                );
                report.skipped += 1;
                continue;
            }

            let sheet = whole_sheet(variant, sheet_size);
            let file_name = font.file_name(COMBINED_SHEET, variant, format);
            let path = dir.join(&file_name);
            let job = EncodeJob {
                subsheet: &sheet,
                variant,
                rgba: &canvas,
                indexed: &indexed,
                font,
                glyphs,
                file_name: &file_name,
            };
            write_output(format, &job, &path, printer)?;
            printer.status(
                "Assembled",
                &format!("{} from {}", display_path(&path), plural(found, "subsheet", "subsheets")),
            );
            report.written += 1;
        }
    }

    Ok(report)
}

/// Paste every available subsheet file onto a transparent master-sized canvas.
fn compose(
    registry: &SubsheetRegistry,
    font: &FontInfo,
    dir: &Path,
    variant: Variant,
    format: Format,
    (width, height): (u32, u32),
    printer: &Printer,
) -> Result<(Raster, usize)> {
    let mut canvas = Raster::new(width, height);
    let mut found = 0;

    for subsheet in registry.iter() {
        let Some(path) = source_file(dir, font, &subsheet.name, variant, format) else {
            printer.warning(
                "Missing",
                &format!("{} {} for subsheet '{}'", format, variant, subsheet.name),
            );
            continue;
        };
        let pixels = load_keyed(&path)?;
        canvas.paste(&pixels, i64::from(subsheet.region.x), i64::from(subsheet.region.y));
        found += 1;
    }

    Ok((canvas, found))
}

/// The variant's file for a subsheet, falling back to its plain file.
fn source_file(dir: &Path, font: &FontInfo, subsheet: &str, variant: Variant, format: Format) -> Option<PathBuf> {
    [variant, Variant::Plain]
        .into_iter()
        .map(|v| dir.join(font.file_name(subsheet, v, format)))
        .find(|p| p.is_file())
}

/// Decode an image file, turning the magenta key into transparency.
fn load_keyed(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| SheetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to load image: {}", e),
    })?;
    Ok(Raster::from_keyed_image(&img.to_rgba8()))
}

/// A subsheet covering the whole master sheet as a single cell.
fn whole_sheet(variant: Variant, (width, height): (u32, u32)) -> SubsheetDefinition {
    SubsheetDefinition {
        name: COMBINED_SHEET.to_string(),
        kind: SubsheetKind::Font,
        category: None,
        region: Region::new(0, 0, width, height),
        glyph: GlyphSize { width, height },
        ascent: height,
        descent: 0,
        variants: vec![variant],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::write_png_rgba;
    use crate::types::{BuiltinSubsheets, Colour};

    fn registry() -> SubsheetRegistry {
        let all = BuiltinSubsheets::all();
        let pick = |name: &str| all.iter().find(|s| s.name == name).unwrap().clone();
        SubsheetRegistry::new(vec![pick("tiny"), pick("window")]).unwrap()
    }

    fn write_rgba(dir: &Path, name: &str, raster: &Raster) {
        let mut out = Vec::new();
        write_png_rgba(raster, &mut out).unwrap();
        std::fs::write(dir.join(name), out).unwrap();
    }

    fn plan(variant: Variant) -> CombinedPlan {
        CombinedPlan {
            variants: vec![variant],
            formats: vec![Format::PngRgba],
        }
    }

    #[test]
    fn test_default_plan_is_valid() {
        assert!(CombinedPlan::default().check().is_ok());
    }

    #[test]
    fn test_plan_rejects_non_image_formats() {
        let plan = CombinedPlan {
            variants: vec![Variant::Plain],
            formats: vec![Format::Bdf],
        };
        assert!(matches!(plan.check(), Err(SheetError::Config { .. })));
    }

    #[test]
    fn test_falls_back_to_plain_when_variant_missing() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("png_rgba");
        std::fs::create_dir_all(&dir).unwrap();

        // tiny has a silhouette file, window only a plain one.
        write_rgba(&dir, "om_tiny_silhouette_rgba.png", &Raster::filled(64, 24, Colour::WHITE));
        write_rgba(&dir, "om_window_plain_rgba.png", &Raster::filled(64, 24, Colour::rgb(9, 8, 7)));

        let font = FontInfo::default();
        let report = assemble_combined(
            &plan(Variant::Silhouette),
            &registry(),
            &font,
            &GlyphTable::default(),
            (256, 256),
            root.path(),
            &Printer::quiet(),
        )
        .unwrap();
        assert_eq!(report, CombinedReport { written: 1, skipped: 0 });

        let img = image::open(dir.join("om_complete_silhouette_rgba.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (256, 256));
        assert_eq!(img.get_pixel(192, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(192, 24).0, [9, 8, 7, 255]);
        assert_eq!(img.get_pixel(255, 47).0, [9, 8, 7, 255]);
        assert_eq!(img.get_pixel(191, 24).0[3], 0);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_nothing_written_without_sources() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("png_rgba")).unwrap();

        let report = assemble_combined(
            &plan(Variant::Hshadow),
            &registry(),
            &FontInfo::default(),
            &GlyphTable::default(),
            (256, 256),
            root.path(),
            &Printer::quiet(),
        )
        .unwrap();
        assert_eq!(report, CombinedReport { written: 0, skipped: 1 });
        assert!(!root.path().join("png_rgba/om_complete_hshadow_rgba.png").exists());
    }

    #[test]
    fn test_magenta_key_becomes_transparent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("png_rgb_magenta");
        std::fs::create_dir_all(&dir).unwrap();
        let mut tiny = Raster::new(64, 24);
        tiny.set(0, 0, Colour::WHITE);
        let mut out = Vec::new();
        crate::render::write_png_rgb(&tiny, Colour::MAGENTA, &mut out).unwrap();
        std::fs::write(dir.join("om_tiny_plain_rgb_magenta.png"), out).unwrap();

        let plan = CombinedPlan {
            variants: vec![Variant::Plain],
            formats: vec![Format::PngRgba, Format::PngRgbMagenta],
        };
        std::fs::create_dir_all(root.path().join("png_rgba")).unwrap();
        let report = assemble_combined(
            &plan,
            &registry(),
            &FontInfo::default(),
            &GlyphTable::default(),
            (256, 256),
            root.path(),
            &Printer::quiet(),
        )
        .unwrap();
        assert_eq!(report, CombinedReport { written: 1, skipped: 1 });

        let img = image::open(dir.join("om_complete_plain_rgb_magenta.png")).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(192, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(193, 0).0, [255, 0, 255, 255]);
    }
}
