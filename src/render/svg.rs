//! SVG output: one square per opaque pixel.

use std::fmt::Write;

use crate::types::Raster;

/// Edge length of one source pixel in the SVG, in px.
pub const SVG_SCALE: u32 = 4;

/// Render a raster as an SVG document.
///
/// Rects are emitted column by column (x outer, y inner) so glyph outlines
/// trace in a stable order for the outline-font compiler.
pub fn svg_document(raster: &Raster) -> String {
    let (width, height) = raster.size();
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
    let _ = writeln!(
        doc,
        "<svg baseProfile=\"full\" height=\"{}px\" version=\"1.1\" width=\"{}px\" \
         xmlns=\"http://www.w3.org/2000/svg\" xmlns:ev=\"http://www.w3.org/2001/xml-events\" \
         xmlns:xlink=\"http://www.w3.org/1999/xlink\"><defs />",
        height * SVG_SCALE,
        width * SVG_SCALE
    );

    for x in 0..width {
        for y in 0..height {
            let Some(colour) = raster.get(x, y).filter(|c| !c.is_transparent()) else {
                continue;
            };
            let _ = writeln!(
                doc,
                "<rect fill=\"rgb({},{},{})\" height=\"{s}px\" shape-rendering=\"crispEdges\" \
                 width=\"{s}px\" x=\"{}px\" y=\"{}px\" />",
                colour.r,
                colour.g,
                colour.b,
                x * SVG_SCALE,
                y * SVG_SCALE,
                s = SVG_SCALE
            );
        }
    }

    doc.push_str("</svg>\n");
    doc
}
