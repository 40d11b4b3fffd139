//! Subsheet definitions and the subsheet registry.
//!
//! A subsheet is a named region of the master sheet holding one group of
//! equally sized glyph cells.
//!
//! # Example
//!
//! ```yaml
//! name: tiny
//! kind: font
//! region: { x: 192, y: 0, width: 64, height: 24 }
//! glyph: { width: 4, height: 4 }
//! ascent: 4
//! descent: 0
//! variants: [plain, plain_black, hshadow]
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

use super::{Region, Variant};

/// What a subsheet's glyphs represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsheetKind {
    /// Text glyphs addressed from ASCII 32 upwards.
    Font,
    /// Pictographs addressed by index.
    Icon,
}

impl fmt::Display for SubsheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubsheetKind::Font => write!(f, "font"),
            SubsheetKind::Icon => write!(f, "icon"),
        }
    }
}

/// Size of a single glyph cell in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphSize {
    pub width: u32,
    pub height: u32,
}

/// A named region of the master sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsheetDefinition {
    pub name: String,
    pub kind: SubsheetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub region: Region,
    pub glyph: GlyphSize,
    pub ascent: u32,
    pub descent: u32,
    /// Variants generated for this subsheet, in order.
    pub variants: Vec<Variant>,
}

impl SubsheetDefinition {
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        name: &str,
        kind: SubsheetKind,
        category: Option<&str>,
        region: (u32, u32, u32, u32),
        glyph: (u32, u32),
        ascent_descent: (u32, u32),
        variants: &[Variant],
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            category: category.map(str::to_string),
            region: Region::new(region.0, region.1, region.2, region.3),
            glyph: GlyphSize {
                width: glyph.0,
                height: glyph.1,
            },
            ascent: ascent_descent.0,
            descent: ascent_descent.1,
            variants: variants.to_vec(),
        }
    }

    /// Glyph columns in the region.
    pub fn columns(&self) -> u32 {
        self.region.width / self.glyph.width.max(1)
    }

    /// Glyph rows in the region.
    pub fn rows(&self) -> u32 {
        self.region.height / self.glyph.height.max(1)
    }

    /// Total number of glyph cells.
    pub fn glyph_count(&self) -> u32 {
        self.columns() * self.rows()
    }

    /// Whether this subsheet generates the given variant.
    pub fn has_variant(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }

    /// Check the structural invariants of the definition.
    pub fn check(&self) -> Result<()> {
        let fail = |message: String| {
            Err(SheetError::Config {
                message,
                help: Some("Fix the subsheet table in the manifest".to_string()),
            })
        };

        if self.name.is_empty() {
            return fail("subsheet with an empty name".to_string());
        }
        if self.glyph.width == 0 || self.glyph.height == 0 {
            return fail(format!("subsheet '{}' has a zero-sized glyph cell", self.name));
        }
        if self.region.width % self.glyph.width != 0 || self.region.height % self.glyph.height != 0 {
            return fail(format!(
                "subsheet '{}' region {}x{} is not a whole number of {}x{} glyph cells",
                self.name,
                self.region.width,
                self.region.height,
                self.glyph.width,
                self.glyph.height
            ));
        }
        if self.variants.is_empty() {
            return fail(format!("subsheet '{}' lists no variants", self.name));
        }
        let mut seen = HashSet::new();
        for v in &self.variants {
            if !seen.insert(*v) {
                return fail(format!("subsheet '{}' lists variant '{}' twice", self.name, v));
            }
        }
        Ok(())
    }
}

/// Immutable, ordered table of subsheets.
#[derive(Debug, Clone)]
pub struct SubsheetRegistry {
    subsheets: Vec<SubsheetDefinition>,
}

impl SubsheetRegistry {
    /// Build a registry, checking every definition and name uniqueness.
    pub fn new(subsheets: Vec<SubsheetDefinition>) -> Result<Self> {
        let mut names = HashSet::new();
        for s in &subsheets {
            s.check()?;
            if !names.insert(s.name.as_str()) {
                return Err(SheetError::Config {
                    message: format!("duplicate subsheet name '{}'", s.name),
                    help: None,
                });
            }
        }
        Ok(Self { subsheets })
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            subsheets: BuiltinSubsheets::all(),
        }
    }

    /// Look up a subsheet by name.
    pub fn get(&self, name: &str) -> Option<&SubsheetDefinition> {
        self.subsheets.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubsheetDefinition> {
        self.subsheets.iter()
    }

    pub fn len(&self) -> usize {
        self.subsheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsheets.is_empty()
    }
}

/// The subsheet layout of the standard master sheet (256x256).
pub struct BuiltinSubsheets;

impl BuiltinSubsheets {
    const FONT_VARIANTS: [Variant; 8] = [
        Variant::Plain,
        Variant::PlainBlack,
        Variant::Hshadow,
        Variant::Vshadow,
        Variant::Hvshadow,
        Variant::HshadowOutline,
        Variant::VshadowOutline,
        Variant::HvshadowOutline,
    ];

    const ICON_VARIANTS: [Variant; 3] = [Variant::Plain, Variant::Silhouette, Variant::ShadowOutline];

    /// Get all builtin subsheets in processing order.
    pub fn all() -> Vec<SubsheetDefinition> {
        use SubsheetKind::{Font, Icon};

        let fonts = Self::FONT_VARIANTS;
        let icons = Self::ICON_VARIANTS;
        let buttons = [
            Variant::Plain,
            Variant::Silhouette,
            Variant::ShadowOutline,
            Variant::MonochromeShadow,
        ];

        vec![
            SubsheetDefinition::builtin(
                "tiny",
                Font,
                None,
                (192, 0, 64, 24),
                (4, 4),
                (4, 0),
                &[Variant::Plain, Variant::PlainBlack, Variant::Hshadow],
            ),
            SubsheetDefinition::builtin("small", Font, None, (128, 0, 64, 48), (4, 8), (6, 2), &fonts),
            SubsheetDefinition::builtin("thin", Font, None, (128, 48, 128, 48), (8, 8), (6, 2), &fonts),
            SubsheetDefinition::builtin("thick", Font, None, (0, 0, 128, 48), (8, 8), (6, 2), &fonts),
            SubsheetDefinition::builtin("tall", Font, None, (0, 48, 128, 96), (8, 16), (14, 2), &fonts),
            SubsheetDefinition::builtin("large", Font, None, (0, 144, 256, 96), (16, 16), (14, 2), &fonts),
            SubsheetDefinition::builtin("window", Icon, Some("window"), (192, 24, 64, 24), (8, 8), (6, 2), &icons),
            SubsheetDefinition::builtin("buttons", Icon, Some("buttons"), (128, 96, 128, 48), (8, 8), (6, 2), &buttons),
            SubsheetDefinition::builtin("icons", Icon, Some("icons"), (0, 240, 256, 16), (8, 8), (6, 2), &icons),
        ]
    }
}
