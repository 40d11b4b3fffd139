//! Project manifest (glyphsheet.yaml) parsing.
//!
//! Every field is optional. The manifest names the master sheet and output
//! root, carries the font identity stamped into exported files, and holds the
//! glyph naming tables that the built-in defaults leave empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::render::CombinedPlan;
use crate::types::{FontInfo, GlyphTable, SubsheetDefinition, SubsheetRegistry};

/// Project manifest loaded from glyphsheet.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Filename prefix of every output.
    pub prefix: String,

    pub family: String,
    pub author: String,
    pub copyright: String,

    /// Master sheet image, relative to the manifest.
    pub source: PathBuf,

    /// Output root, relative to the manifest.
    pub output: PathBuf,

    /// Worker threads; rayon's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Character code -> glyph name overrides.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub characters: BTreeMap<u32, String>,

    /// Icon category -> glyph names in cell order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, Vec<String>>,

    /// Subsheet -> character codes in cell order, for bitmap fonts.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub icon_mappings: BTreeMap<String, Vec<u32>>,

    /// Replaces the built-in subsheet table when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsheets: Option<Vec<SubsheetDefinition>>,

    pub combined: CombinedPlan,
}

impl Default for Manifest {
    fn default() -> Self {
        let font = FontInfo::default();
        Self {
            prefix: font.prefix,
            family: font.family,
            author: font.author,
            copyright: font.copyright,
            source: PathBuf::from("font.png"),
            output: PathBuf::from("assets"),
            jobs: None,
            characters: BTreeMap::new(),
            categories: BTreeMap::new(),
            icon_mappings: BTreeMap::new(),
            subsheets: None,
            combined: CombinedPlan::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a glyphsheet.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SheetError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check glyphsheet.yaml syntax".to_string()),
        })
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SheetError::Parse {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    pub fn font_info(&self) -> FontInfo {
        FontInfo {
            prefix: self.prefix.clone(),
            family: self.family.clone(),
            author: self.author.clone(),
            copyright: self.copyright.clone(),
        }
    }

    pub fn glyph_table(&self) -> GlyphTable {
        GlyphTable {
            characters: self.characters.clone(),
            categories: self.categories.clone(),
            icon_mappings: self.icon_mappings.clone(),
        }
    }

    /// The manifest's subsheet table, or the built-in one.
    pub fn registry(&self) -> Result<SubsheetRegistry> {
        match &self.subsheets {
            Some(table) => SubsheetRegistry::new(table.clone()),
            None => Ok(SubsheetRegistry::builtin()),
        }
    }
}
