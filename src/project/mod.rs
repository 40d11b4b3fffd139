//! Project resolution.
//!
//! A project is a manifest plus the directory it lives in. Paths in the
//! manifest are relative to that directory; without a manifest the current
//! directory and the built-in defaults are used.

mod manifest;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{FontInfo, GlyphTable, SubsheetRegistry};

pub use manifest::Manifest;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "glyphsheet.yaml";

/// A resolved project: manifest, derived tables, and its root directory.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
    /// Whether a manifest file was found.
    pub has_manifest: bool,
    pub font: FontInfo,
    pub glyphs: GlyphTable,
    pub registry: SubsheetRegistry,
}

impl Project {
    /// Load the project described by `manifest_path`, or by the
    /// glyphsheet.yaml in `dir` if there is one.
    pub fn discover(dir: &Path, manifest_path: Option<&Path>) -> Result<Self> {
        match manifest_path {
            Some(path) => {
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                Self::from_manifest(Manifest::load(path)?, root, true)
            }
            None => {
                let path = dir.join(MANIFEST_FILENAME);
                if path.is_file() {
                    Self::from_manifest(Manifest::load(&path)?, dir.to_path_buf(), true)
                } else {
                    Self::from_manifest(Manifest::default(), dir.to_path_buf(), false)
                }
            }
        }
    }

    /// Resolve a manifest's tables and check its combined plan.
    pub fn from_manifest(manifest: Manifest, root: PathBuf, has_manifest: bool) -> Result<Self> {
        let registry = manifest.registry()?;
        manifest.combined.check()?;
        Ok(Self {
            root,
            font: manifest.font_info(),
            glyphs: manifest.glyph_table(),
            registry,
            manifest,
            has_manifest,
        })
    }

    /// Master sheet path.
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.manifest.source)
    }

    /// Output root path.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.manifest.output)
    }
}
