//! Whole-raster recolouring transforms.

use crate::types::{Colour, Raster};

/// Fill every visible pixel with `fill`.
///
/// With `remove_shadows` set, pure-black pixels are treated as shadow ink
/// and dropped instead of filled.
pub fn silhouette(source: &Raster, fill: Colour, remove_shadows: bool) -> Raster {
    source.map(|c| {
        if !c.is_transparent() && (!remove_shadows || c != Colour::BLACK) {
            fill
        } else {
            Colour::TRANSPARENT
        }
    })
}

/// Replace every pixel exactly equal to `search`.
pub fn replace_colour(source: &Raster, search: Colour, replacement: Colour) -> Raster {
    source.map(|c| if c == search { replacement } else { c })
}

/// Keep only the shadow ink, recoloured to `fill`.
pub fn isolate_shadow(source: &Raster, fill: Colour) -> Raster {
    source.map(|c| {
        if c == Colour::BLACK {
            fill
        } else {
            Colour::TRANSPARENT
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Colour = Colour::rgb(255, 0, 0);

    #[test]
    fn test_silhouette_red_cell_with_transparent_corner() {
        let mut src = Raster::filled(8, 8, RED);
        src.set(7, 7, Colour::TRANSPARENT);

        let out = silhouette(&src, Colour::WHITE, false);

        for y in 0..8 {
            for x in 0..8 {
                let expected = if (x, y) == (7, 7) {
                    Colour::TRANSPARENT
                } else {
                    Colour::WHITE
                };
                assert_eq!(out.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_silhouette_transparency_is_preserved_exactly() {
        let src = Raster::from_rows(&[vec![
            Colour::TRANSPARENT,
            Colour::new(255, 255, 255, 0),
            Colour::new(10, 20, 30, 1),
            Colour::BLACK,
        ]]);
        let out = silhouette(&src, Colour::WHITE, false);
        for (i, (&s, &o)) in src.pixels().iter().zip(out.pixels()).enumerate() {
            assert_eq!(s.is_transparent(), o.is_transparent(), "pixel {}", i);
        }
    }

    #[test]
    fn test_silhouette_remove_shadows_drops_black() {
        let src = Raster::from_rows(&[vec![Colour::BLACK, RED, Colour::TRANSPARENT]]);
        let out = silhouette(&src, Colour::WHITE, true);
        assert_eq!(out.get(0, 0), Some(Colour::TRANSPARENT));
        assert_eq!(out.get(1, 0), Some(Colour::WHITE));
        assert_eq!(out.get(2, 0), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_silhouette_does_not_touch_source() {
        let src = Raster::filled(2, 2, RED);
        let _ = silhouette(&src, Colour::WHITE, false);
        assert!(src.pixels().iter().all(|&c| c == RED));
    }

    #[test]
    fn test_isolate_shadow() {
        let src = Raster::from_rows(&[vec![Colour::BLACK, Colour::WHITE, Colour::TRANSPARENT]]);
        let out = isolate_shadow(&src, Colour::WHITE);
        assert_eq!(
            out.pixels(),
            &[Colour::WHITE, Colour::TRANSPARENT, Colour::TRANSPARENT]
        );
    }
}
