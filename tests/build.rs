//! End-to-end pipeline runs against small generated master sheets.

use std::fs;
use std::path::Path;

use glyphsheet::output::Printer;
use glyphsheet::{build, BuildOptions, Manifest, Project, RunMode, SheetError};
use image::{Rgba, RgbaImage};
use tempfile::tempdir;

const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([200, 0, 0, 255]);

const MANIFEST: &str = r#"
prefix: t
source: sheet.png
output: assets
subsheets:
  - name: digits
    kind: font
    region: { x: 0, y: 0, width: 32, height: 8 }
    glyph: { width: 8, height: 8 }
    ascent: 7
    descent: 1
    variants: [plain, hshadow, silhouette]
  - name: marks
    kind: icon
    category: marks
    region: { x: 0, y: 8, width: 16, height: 8 }
    glyph: { width: 8, height: 8 }
    ascent: 7
    descent: 1
    variants: [plain, shadow_outline]
categories:
  marks: [dot, blank]
combined:
  variants: [plain, hshadow, silhouette]
  formats: [png_indexed, png_rgb_magenta, png_rgba, gif]
"#;

/// A 32x16 sheet on a magenta background: four bars in the digits row and a
/// red dot in the first marks cell.
fn write_sheet(dir: &Path) {
    let mut img = RgbaImage::from_pixel(32, 16, MAGENTA);
    for i in 0..4 {
        for y in 1..7 {
            img.put_pixel(i * 8 + 2, y, WHITE);
        }
    }
    img.put_pixel(1, 9, RED);
    img.put_pixel(2, 9, WHITE);
    img.save(dir.join("sheet.png")).unwrap();
}

fn project(dir: &Path, yaml: &str) -> Project {
    Project::from_manifest(Manifest::parse(yaml).unwrap(), dir.to_path_buf(), true).unwrap()
}

fn options(mode: RunMode) -> BuildOptions {
    BuildOptions {
        mode,
        jobs: Some(2),
    }
}

#[test]
fn test_full_build_writes_every_accepted_format() {
    let dir = tempdir().unwrap();
    write_sheet(dir.path());
    let project = project(dir.path(), MANIFEST);

    let report = build(&project, &options(RunMode::Fresh), &Printer::quiet()).unwrap();
    assert!(!report.up_to_date);
    assert_eq!(report.variants, 5);
    assert_eq!(report.absent, 0);
    assert!(report.rejected > 0);
    assert!(report.files > 0);

    let assets = dir.path().join("assets");

    // One folder per format.
    for name in ["bdf", "chr_1bpp", "chr_nes", "chr_gb", "svg_individual", "png_rgba_love2d", "bmp_indexed"] {
        assert!(assets.join(name).is_dir(), "{}", name);
    }

    // Two-colour plain digits fit the 1bpp formats; the shadowed ones do not.
    let bdf = fs::read_to_string(assets.join("bdf/t_digits_plain.bdf")).unwrap();
    assert!(bdf.starts_with("STARTFONT 2.1\n"));
    assert!(bdf.contains("CHARS 4\n"));
    assert!(bdf.contains("STARTCHAR char35\n"));
    assert!(!assets.join("bdf/t_digits_hshadow.bdf").exists());
    assert_eq!(fs::read(assets.join("chr_1bpp/t_digits_plain_1bpp.chr")).unwrap().len(), 4 * 8);

    // Three colours still fit the two-plane tile formats.
    assert_eq!(fs::read(assets.join("chr_nes/t_digits_hshadow_nes.chr")).unwrap().len(), 4 * 16);
    assert_eq!(fs::read(assets.join("chr_gb/t_digits_hshadow_gb.chr")).unwrap().len(), 4 * 16);

    // Folder formats split into named glyph files.
    let svg_dir = assets.join("svg_individual/t_digits_plain");
    assert!(svg_dir.join("t_digits_plain_032_space.svg").is_file());
    assert!(svg_dir.join("t_digits_plain_035_numbersign.svg").is_file());
    let gif_dir = assets.join("gif_individual/t_marks_plain");
    assert!(gif_dir.join("t_marks_plain_000_dot.gif").is_file());
    assert!(gif_dir.join("t_marks_plain_001_blank.gif").is_file());

    // Love2d atlas: four 8px glyphs plus five separator columns.
    let atlas = image::open(assets.join("png_rgba_love2d/t_digits_plain_rgba_love.png")).unwrap();
    assert_eq!((atlas.width(), atlas.height()), (4 * 8 + 5, 8));

    // Transparency survives the RGB-over-magenta save.
    let keyed = image::open(assets.join("png_rgb_magenta/t_digits_plain_rgb_magenta.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(*keyed.get_pixel(0, 0), MAGENTA);
    assert_eq!(*keyed.get_pixel(2, 1), WHITE);
}

#[test]
fn test_combined_sheet_falls_back_to_plain() {
    let dir = tempdir().unwrap();
    write_sheet(dir.path());
    let project = project(dir.path(), MANIFEST);

    let report = build(&project, &options(RunMode::Fresh), &Printer::quiet()).unwrap();
    assert_eq!(report.combined.written, 12);
    assert_eq!(report.combined.skipped, 0);

    // marks has no silhouette, so its plain file fills its region.
    let combined = image::open(dir.path().join("assets/png_rgba/t_complete_silhouette_rgba.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(combined.dimensions(), (32, 16));
    assert_eq!(*combined.get_pixel(2, 1), WHITE);
    assert_eq!(*combined.get_pixel(1, 9), RED);
    assert_eq!(combined.get_pixel(0, 0)[3], 0);

    // The indexed variant keys its transparency through the palette.
    let indexed = image::open(dir.path().join("assets/png_indexed/t_complete_plain_idx.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(indexed.get_pixel(0, 0)[3], 0);
    assert_eq!(*indexed.get_pixel(1, 9), RED);
}

#[test]
fn test_existing_output_is_left_alone_unless_reset() {
    let dir = tempdir().unwrap();
    write_sheet(dir.path());
    let project = project(dir.path(), MANIFEST);
    let printer = Printer::quiet();

    build(&project, &options(RunMode::Fresh), &printer).unwrap();
    let stale = dir.path().join("assets/stale.txt");
    fs::write(&stale, "old").unwrap();

    let again = build(&project, &options(RunMode::Fresh), &printer).unwrap();
    assert!(again.up_to_date);
    assert!(stale.exists());

    let reset = build(&project, &options(RunMode::Reset), &printer).unwrap();
    assert!(!reset.up_to_date);
    assert!(!stale.exists());
    assert!(dir.path().join("assets/bdf/t_digits_plain.bdf").exists());
}

#[test]
fn test_region_outside_master_sheet_is_fatal() {
    let dir = tempdir().unwrap();
    write_sheet(dir.path());
    let yaml = MANIFEST.replace("{ x: 0, y: 8, width: 16, height: 8 }", "{ x: 24, y: 8, width: 16, height: 8 }");
    let project = project(dir.path(), &yaml);

    let err = build(&project, &options(RunMode::Fresh), &Printer::quiet()).unwrap_err();
    assert!(matches!(err, SheetError::RegionOutOfBounds { ref subsheet, .. } if subsheet == "marks"));
}

#[test]
fn test_oversized_palette_skips_indexed_formats() {
    let dir = tempdir().unwrap();
    let mut img = RgbaImage::new(32, 16);
    for y in 0..16u32 {
        for x in 0..32u32 {
            img.put_pixel(x, y, Rgba([x as u8 * 8, y as u8 * 16, 77, 255]));
        }
    }
    // 512 distinct colours.
    img.save(dir.path().join("sheet.png")).unwrap();

    let yaml = r#"
source: sheet.png
subsheets:
  - name: noise
    kind: icon
    region: { x: 0, y: 0, width: 32, height: 16 }
    glyph: { width: 8, height: 8 }
    ascent: 7
    descent: 1
    variants: [plain]
combined:
  variants: [plain]
  formats: [png_rgba]
"#;
    let project = project(dir.path(), yaml);
    build(&project, &options(RunMode::Fresh), &Printer::quiet()).unwrap();

    let assets = dir.path().join("assets");
    assert!(assets.join("png_rgba/om_noise_plain_rgba.png").exists());
    assert!(assets.join("bmp_rgb_magenta/om_noise_plain_rgb_magenta.bmp").exists());
    assert!(!assets.join("png_indexed/om_noise_plain_idx.png").exists());
    assert!(!assets.join("gif/om_noise_plain.gif").exists());
    assert!(!assets.join("bmp_indexed/om_noise_plain_idx.bmp").exists());
    assert!(!assets.join("gif_individual/om_noise_plain").exists());
}
