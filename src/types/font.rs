//! Font-wide naming metadata.

use super::{Format, Variant};

/// Identity of the font family being exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    /// Filename prefix of every output.
    pub prefix: String,
    pub family: String,
    pub author: String,
    pub copyright: String,
}

impl Default for FontInfo {
    fn default() -> Self {
        Self {
            prefix: "om".to_string(),
            family: "omelette".to_string(),
            author: "glyphsheet".to_string(),
            copyright: "Public domain".to_string(),
        }
    }
}

impl FontInfo {
    /// Output filename: `<prefix>[_<sheet>][_<variant>][_<suffix>].<extension>`.
    pub fn file_name(&self, sheet: &str, variant: Variant, format: Format) -> String {
        let def = format.definition();
        let mut name = self.prefix.clone();
        for part in [sheet, variant.suffix(), def.suffix] {
            if !part.is_empty() {
                name.push('_');
                name.push_str(part);
            }
        }
        name.push('.');
        name.push_str(def.extension);
        name
    }
}
