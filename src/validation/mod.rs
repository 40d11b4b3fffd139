//! Validation for glyphsheet projects.
//!
//! Runs a suite of checks against a manifest and its master sheet and
//! reports errors and warnings without generating anything. Used by
//! `glyphsheet validate`.

mod checks;
mod warning;

use std::path::Path;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::project::Manifest;
use crate::types::BuiltinSubsheets;

/// Run every check against a manifest whose paths are relative to `root`.
pub fn validate_project(manifest: &Manifest, root: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();
    let subsheets = manifest.subsheets.clone().unwrap_or_else(BuiltinSubsheets::all);
    let glyphs = manifest.glyph_table();

    result.merge(checks::check_subsheet_table(&subsheets));
    result.merge(checks::check_overlapping_regions(&subsheets));
    result.merge(checks::check_icon_mappings(&subsheets, &glyphs));
    result.merge(checks::check_categories(&subsheets, &glyphs));
    result.merge(checks::check_glyph_names(&glyphs));
    result.merge(checks::check_combined_plan(&manifest.combined));

    let source = root.join(&manifest.source);
    match image::image_dimensions(&source) {
        Ok(size) => result.merge(checks::check_regions_in_bounds(&subsheets, size)),
        Err(e) => result.push(
            Diagnostic::error(
                "missing-master-sheet",
                format!("Cannot read master sheet {}: {}", source.display(), e),
            )
            .with_help("Set `source` in glyphsheet.yaml or pass --source"),
        ),
    }

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        let subject = d
            .subsheet
            .as_ref()
            .map(|s| format!(" {}", printer.dim(&format!("({})", s))))
            .unwrap_or_default();
        eprintln!("  {}[{}]: {}{}", label, d.code, d.message, subject);
        if let Some(help) = &d.help {
            eprintln!("    help: {}", help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!("{} error(s), {} warning(s)", errors, warnings),
        );
    } else if warnings > 0 {
        printer.warning("Validated", &format!("{} warning(s)", warnings));
    } else {
        printer.success("Validated", "no problems found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_sheet(dir: &Path, width: u32, height: u32) {
        image::RgbaImage::new(width, height)
            .save(dir.join("font.png"))
            .unwrap();
    }

    #[test]
    fn test_default_project_is_clean() {
        let dir = tempdir().unwrap();
        write_sheet(dir.path(), 256, 256);
        let result = validate_project(&Manifest::default(), dir.path());
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_missing_master_sheet() {
        let dir = tempdir().unwrap();
        let result = validate_project(&Manifest::default(), dir.path());
        assert!(result.has_code("missing-master-sheet"));
    }

    #[test]
    fn test_small_master_sheet() {
        let dir = tempdir().unwrap();
        write_sheet(dir.path(), 256, 200);
        let result = validate_project(&Manifest::default(), dir.path());
        assert!(result.has_code("region-out-of-bounds"));
        assert_eq!(result.error_count(), 2);
    }
}
