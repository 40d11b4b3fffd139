//! Core domain types for glyphsheet.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values and the reserved sheet colours
//! - `Raster` - owned RGBA pixel buffers
//! - `IndexedRaster` - palette-indexed rasters and the colour indexer
//! - `SubsheetDefinition` - named glyph regions of the master sheet
//! - `Variant` / `Format` - the variant and output format catalogs
//! - `GlyphTable` - glyph names and character codes

mod colour;
mod font;
mod format;
mod glyph;
mod indexed;
mod raster;
mod subsheet;
mod variant;

pub use colour::Colour;
pub use font::FontInfo;
pub use format::{EncodingKind, Format, FormatDefinition, Validator};
pub use glyph::{GlyphInfo, GlyphTable, FIRST_CHAR_CODE};
pub use indexed::{IndexedRaster, RESERVED_COLOURS};
pub use raster::{Raster, Region};
pub use subsheet::{BuiltinSubsheets, GlyphSize, SubsheetDefinition, SubsheetKind, SubsheetRegistry};
pub use variant::Variant;
