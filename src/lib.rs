//! glyphsheet - Pixel-font sheet variant and format generator
//!
//! Cuts a master pixel-art glyph sheet into named subsheets, derives visual
//! variants from each (drop shadows, silhouettes, monochrome, outlines), and
//! exports every variant to bitmap font, console tile, vector and raster
//! image formats. Combined sheets are then reassembled from the written
//! subsheet files.

pub mod cli;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod render;
pub mod transform;
pub mod types;
pub mod validation;

pub use error::{Result, SheetError};
pub use pipeline::{build, extract_subsheet, load_master_sheet, BuildOptions, BuildReport, RunMode};
pub use project::{Manifest, Project, MANIFEST_FILENAME};
pub use render::{assemble_combined, encode, write_output, CombinedPlan, CombinedReport, EncodeJob};
pub use types::{
    Colour, EncodingKind, FontInfo, Format, GlyphInfo, GlyphSize, GlyphTable, IndexedRaster, Raster,
    Region, SubsheetDefinition, SubsheetKind, SubsheetRegistry, Validator, Variant,
};
pub use validation::{validate_project, Diagnostic, Severity, ValidationResult};
