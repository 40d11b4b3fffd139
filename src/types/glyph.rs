//! Glyph naming and character-code assignment.
//!
//! Names feed per-glyph filenames (and from there the outline-font
//! compiler); codes address glyphs in codepoint-based formats.

use std::collections::BTreeMap;

use super::{SubsheetDefinition, SubsheetKind};

/// First character code of a font subsheet.
pub const FIRST_CHAR_CODE: u32 = 32;

/// Display name and remapped code of one glyph cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphInfo {
    pub name: String,
    pub code: u32,
}

/// Names for printable ASCII, indexed from code 32.
const ASCII_NAMES: [&str; 95] = [
    "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand", "quotesingle",
    "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen", "period", "slash",
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "colon", "semicolon", "less", "equal", "greater", "question", "at",
    "upper_a", "upper_b", "upper_c", "upper_d", "upper_e", "upper_f", "upper_g", "upper_h",
    "upper_i", "upper_j", "upper_k", "upper_l", "upper_m", "upper_n", "upper_o", "upper_p",
    "upper_q", "upper_r", "upper_s", "upper_t", "upper_u", "upper_v", "upper_w", "upper_x",
    "upper_y", "upper_z",
    "bracketleft", "backslash", "bracketright", "asciicircum", "underscore", "grave",
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
    "braceleft", "bar", "braceright", "asciitilde",
];

/// Glyph naming tables.
///
/// Everything here is external data: the built-in table only covers ASCII
/// names, and manifests add icon names and code remappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTable {
    /// Character code -> name overrides for font subsheets.
    pub characters: BTreeMap<u32, String>,
    /// Icon category -> glyph names by cell index.
    pub categories: BTreeMap<String, Vec<String>>,
    /// Subsheet name -> character code by cell index.
    pub icon_mappings: BTreeMap<String, Vec<u32>>,
}

impl GlyphTable {
    /// Name of a character code in font subsheets.
    pub fn character_name(&self, code: u32) -> String {
        if let Some(name) = self.characters.get(&code) {
            return name.clone();
        }
        code.checked_sub(FIRST_CHAR_CODE)
            .and_then(|i| ASCII_NAMES.get(i as usize))
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("char{}", code))
    }

    /// Resolve the display name and folder code of a glyph cell.
    pub fn info(&self, subsheet: &SubsheetDefinition, index: u32) -> GlyphInfo {
        match subsheet.kind {
            SubsheetKind::Font => {
                let code = index + FIRST_CHAR_CODE;
                GlyphInfo {
                    name: self.character_name(code),
                    code,
                }
            }
            SubsheetKind::Icon => {
                let name = subsheet
                    .category
                    .as_ref()
                    .and_then(|c| self.categories.get(c))
                    .and_then(|names| names.get(index as usize))
                    .cloned()
                    .unwrap_or_else(|| "icon".to_string());
                GlyphInfo { name, code: index }
            }
        }
    }

    /// Character code a glyph is encoded under in bitmap fonts.
    ///
    /// Subsheets with an icon mapping use it; everything else (and any cell
    /// past the end of a short mapping) is numbered from code 32.
    pub fn char_code(&self, subsheet: &SubsheetDefinition, index: u32) -> u32 {
        self.icon_mappings
            .get(&subsheet.name)
            .and_then(|m| m.get(index as usize))
            .copied()
            .unwrap_or(index + FIRST_CHAR_CODE)
    }
}
