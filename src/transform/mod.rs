//! Variant transforms.
//!
//! Every function here takes its input by reference and returns a newly
//! allocated raster; no transform mutates a buffer owned by another stage.
//! Pure black is the sheet's shadow ink throughout.

mod monochrome;
mod shadow;
mod silhouette;

pub use monochrome::{monochrome, monochrome_cutoff, ShadowMode};
pub use shadow::{drop_shadow, erase_grid_bleed, ShadowDirection};
pub use silhouette::{isolate_shadow, replace_colour, silhouette};
