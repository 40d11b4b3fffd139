//! Validation checks for a project's tables.
//!
//! Each check takes the parts of the manifest it looks at and returns a
//! `ValidationResult`.

use std::collections::HashSet;

use crate::render::CombinedPlan;
use crate::types::{GlyphTable, Region, SubsheetDefinition};

use super::warning::{Diagnostic, ValidationResult};

/// Check each subsheet's structure and name uniqueness.
pub fn check_subsheet_table(subsheets: &[SubsheetDefinition]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut names = HashSet::new();

    for s in subsheets {
        if let Err(e) = s.check() {
            let message = match e {
                crate::error::SheetError::Config { message, .. } => message,
                other => other.to_string(),
            };
            result.push(
                Diagnostic::error("invalid-subsheet", message)
                    .for_subsheet(&s.name)
                    .with_help("Regions must hold a whole number of non-empty glyph cells"),
            );
        }
        if !names.insert(s.name.as_str()) {
            result.push(
                Diagnostic::error("duplicate-subsheet", format!("Subsheet '{}' is defined twice", s.name))
                    .for_subsheet(&s.name),
            );
        }
    }

    result
}

/// Check that every region lies inside the master sheet.
pub fn check_regions_in_bounds(subsheets: &[SubsheetDefinition], (width, height): (u32, u32)) -> ValidationResult {
    subsheets
        .iter()
        .filter(|s| !s.region.fits_within(width, height))
        .map(|s| {
            let r = s.region;
            Diagnostic::error(
                "region-out-of-bounds",
                format!(
                    "Subsheet '{}' region {},{} {}x{} lies outside the {}x{} master sheet",
                    s.name, r.x, r.y, r.width, r.height, width, height
                ),
            )
            .for_subsheet(&s.name)
        })
        .collect()
}

/// Warn about subsheets whose regions share pixels.
pub fn check_overlapping_regions(subsheets: &[SubsheetDefinition]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, a) in subsheets.iter().enumerate() {
        for b in &subsheets[i + 1..] {
            if overlaps(a.region, b.region) {
                result.push(
                    Diagnostic::warning(
                        "overlapping-regions",
                        format!("Subsheets '{}' and '{}' overlap", a.name, b.name),
                    )
                    .for_subsheet(&a.name)
                    .with_help("Combined sheets paste later subsheets over earlier ones"),
                );
            }
        }
    }

    result
}

fn overlaps(a: Region, b: Region) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

/// Check icon mappings against the subsheets they remap.
pub fn check_icon_mappings(subsheets: &[SubsheetDefinition], glyphs: &GlyphTable) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, codes) in &glyphs.icon_mappings {
        let Some(subsheet) = subsheets.iter().find(|s| &s.name == name) else {
            result.push(
                Diagnostic::warning("unknown-mapping-subsheet", format!("Icon mapping for unknown subsheet '{}'", name))
                    .for_subsheet(name),
            );
            continue;
        };

        let cells = subsheet.glyph_count() as usize;
        if codes.len() < cells {
            result.push(
                Diagnostic::warning(
                    "short-icon-mapping",
                    format!("Icon mapping for '{}' covers {} of {} glyphs", name, codes.len(), cells),
                )
                .for_subsheet(name)
                .with_help("Unmapped glyphs are numbered from character code 32"),
            );
        } else if codes.len() > cells {
            result.push(
                Diagnostic::warning(
                    "long-icon-mapping",
                    format!("Icon mapping for '{}' lists {} codes for {} glyphs", name, codes.len(), cells),
                )
                .for_subsheet(name),
            );
        }

        let mut seen = HashSet::new();
        if let Some(dup) = codes.iter().find(|c| !seen.insert(**c)) {
            result.push(
                Diagnostic::error("duplicate-char-code", format!("Icon mapping for '{}' uses code {} twice", name, dup))
                    .for_subsheet(name),
            );
        }
    }

    result
}

/// Check icon category name lists against the subsheets that use them.
pub fn check_categories(subsheets: &[SubsheetDefinition], glyphs: &GlyphTable) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (category, names) in &glyphs.categories {
        let users: Vec<&SubsheetDefinition> = subsheets
            .iter()
            .filter(|s| s.category.as_deref() == Some(category.as_str()))
            .collect();

        if users.is_empty() {
            result.push(Diagnostic::warning(
                "unused-category",
                format!("Category '{}' is not used by any subsheet", category),
            ));
        }
        for s in users {
            if names.len() != s.glyph_count() as usize {
                result.push(
                    Diagnostic::warning(
                        "category-length",
                        format!(
                            "Category '{}' names {} glyphs but subsheet '{}' has {}",
                            category,
                            names.len(),
                            s.name,
                            s.glyph_count()
                        ),
                    )
                    .for_subsheet(&s.name)
                    .with_help("Unnamed glyphs are written as 'icon'"),
                );
            }
        }
    }

    result
}

/// Glyph names end up in file names, so keep them to a portable alphabet.
pub fn check_glyph_names(glyphs: &GlyphTable) -> ValidationResult {
    let names = glyphs
        .characters
        .values()
        .chain(glyphs.categories.values().flatten());

    names
        .filter(|n| !is_portable_name(n))
        .map(|n| {
            Diagnostic::error("invalid-glyph-name", format!("Glyph name '{}' is not usable in a file name", n))
                .with_help("Use letters, digits, '_' and '-' only")
        })
        .collect()
}

fn is_portable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Check that combined sheets only use formats that can be read back.
pub fn check_combined_plan(plan: &CombinedPlan) -> ValidationResult {
    plan.formats
        .iter()
        .filter(|f| !f.is_reloadable_image())
        .map(|f| {
            Diagnostic::error(
                "combined-format",
                format!("Format '{}' cannot be used for combined sheets", f),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuiltinSubsheets, Format, Variant};

    #[test]
    fn test_builtin_table_is_clean() {
        let table = BuiltinSubsheets::all();
        assert!(check_subsheet_table(&table).is_ok());
        assert!(check_regions_in_bounds(&table, (256, 256)).is_ok());
        assert!(check_overlapping_regions(&table).is_ok());
    }

    #[test]
    fn test_partial_cells_reported() {
        let mut table = BuiltinSubsheets::all();
        table[0].region.height = 23;
        let result = check_subsheet_table(&table);
        assert!(result.has_code("invalid-subsheet"));
        assert_eq!(result.iter().next().unwrap().subsheet.as_deref(), Some("tiny"));
    }

    #[test]
    fn test_regions_out_of_bounds() {
        let table = BuiltinSubsheets::all();
        let result = check_regions_in_bounds(&table, (256, 128));
        let names: Vec<_> = result.iter().filter_map(|d| d.subsheet.clone()).collect();
        assert_eq!(names, vec!["tall", "large", "buttons", "icons"]);
    }

    #[test]
    fn test_overlap_detected() {
        let mut table = BuiltinSubsheets::all();
        table[1].region.x = 160;
        assert!(check_overlapping_regions(&table).has_code("overlapping-regions"));
    }

    #[test]
    fn test_icon_mapping_lengths() {
        let table = BuiltinSubsheets::all();
        let mut glyphs = GlyphTable::default();
        glyphs.icon_mappings.insert("icons".into(), vec![128, 129]);
        glyphs.icon_mappings.insert("nowhere".into(), vec![1]);
        glyphs.icon_mappings.insert("window".into(), (0..25).collect());

        let result = check_icon_mappings(&table, &glyphs);
        assert!(result.has_code("short-icon-mapping"));
        assert!(result.has_code("unknown-mapping-subsheet"));
        assert!(result.has_code("long-icon-mapping"));
        assert!(!result.has_errors());
    }

    #[test]
    fn test_duplicate_char_codes() {
        let table = BuiltinSubsheets::all();
        let mut glyphs = GlyphTable::default();
        glyphs.icon_mappings.insert("icons".into(), vec![128, 128]);
        assert!(check_icon_mappings(&table, &glyphs).has_errors());
    }

    #[test]
    fn test_categories() {
        let table = BuiltinSubsheets::all();
        let mut glyphs = GlyphTable::default();
        glyphs.categories.insert("window".into(), vec!["corner".into()]);
        glyphs.categories.insert("stray".into(), vec![]);

        let result = check_categories(&table, &glyphs);
        assert!(result.has_code("category-length"));
        assert!(result.has_code("unused-category"));
    }

    #[test]
    fn test_glyph_names_must_be_portable() {
        let mut glyphs = GlyphTable::default();
        glyphs.characters.insert(65, "upper_a".into());
        assert!(check_glyph_names(&glyphs).is_ok());

        glyphs.characters.insert(66, "b/c".into());
        glyphs.categories.insert("icons".into(), vec!["".into()]);
        assert_eq!(check_glyph_names(&glyphs).error_count(), 2);
    }

    #[test]
    fn test_combined_plan_formats() {
        assert!(check_combined_plan(&CombinedPlan::default()).is_ok());
        let plan = CombinedPlan {
            variants: vec![Variant::Plain],
            formats: vec![Format::SvgPacked],
        };
        assert!(check_combined_plan(&plan).has_errors());
    }
}
