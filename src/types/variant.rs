//! Variant catalog.
//!
//! Each variant is a named visual effect applied to a subsheet. The
//! transforms themselves live in [`crate::transform`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::transform;

use super::{Colour, Raster, SubsheetDefinition};

/// A visual transform applied to subsheet pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Plain,
    PlainBlack,
    Hshadow,
    Vshadow,
    Hvshadow,
    MonochromeShadow,
    MonochromePlain,
    Silhouette,
    ShadowOutline,
    HshadowOutline,
    VshadowOutline,
    HvshadowOutline,
}

impl Variant {
    /// Every variant, in catalog order.
    pub const ALL: [Variant; 12] = [
        Variant::Plain,
        Variant::PlainBlack,
        Variant::Hshadow,
        Variant::Vshadow,
        Variant::Hvshadow,
        Variant::MonochromeShadow,
        Variant::MonochromePlain,
        Variant::Silhouette,
        Variant::ShadowOutline,
        Variant::HshadowOutline,
        Variant::VshadowOutline,
        Variant::HvshadowOutline,
    ];

    /// Catalog name.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::PlainBlack => "plain_black",
            Variant::Hshadow => "hshadow",
            Variant::Vshadow => "vshadow",
            Variant::Hvshadow => "hvshadow",
            Variant::MonochromeShadow => "monochrome_shadow",
            Variant::MonochromePlain => "monochrome_plain",
            Variant::Silhouette => "silhouette",
            Variant::ShadowOutline => "shadow_outline",
            Variant::HshadowOutline => "hshadow_outline",
            Variant::VshadowOutline => "vshadow_outline",
            Variant::HvshadowOutline => "hvshadow_outline",
        }
    }

    /// Filename suffix for outputs of this variant.
    pub fn suffix(self) -> &'static str {
        self.name()
    }

    /// Generate this variant from a subsheet's source pixels.
    ///
    /// Returns `None` when the variant cannot be produced for this
    /// configuration; callers skip it.
    pub fn apply(self, source: &Raster, subsheet: &SubsheetDefinition) -> Option<Raster> {
        let cell = subsheet.glyph;
        match self {
            Variant::Plain => Some(source.clone()),
            Variant::PlainBlack => Some(transform::replace_colour(source, Colour::WHITE, Colour::BLACK)),
            Variant::Hshadow => Some(transform::drop_shadow(source, cell, transform::ShadowDirection::Horizontal)),
            Variant::Vshadow => Some(transform::drop_shadow(source, cell, transform::ShadowDirection::Vertical)),
            Variant::Hvshadow => Some(transform::drop_shadow(source, cell, transform::ShadowDirection::Both)),
            Variant::MonochromeShadow => transform::monochrome(source, cell, transform::ShadowMode::Keep),
            Variant::MonochromePlain => transform::monochrome(source, cell, transform::ShadowMode::Remove),
            Variant::Silhouette => Some(transform::silhouette(source, Colour::WHITE, true)),
            Variant::ShadowOutline => Some(transform::isolate_shadow(source, Colour::WHITE)),
            Variant::HshadowOutline => Variant::Hshadow
                .apply(source, subsheet)
                .map(|r| transform::isolate_shadow(&r, Colour::WHITE)),
            Variant::VshadowOutline => Variant::Vshadow
                .apply(source, subsheet)
                .map(|r| transform::isolate_shadow(&r, Colour::WHITE)),
            Variant::HvshadowOutline => Variant::Hvshadow
                .apply(source, subsheet)
                .map(|r| transform::isolate_shadow(&r, Colour::WHITE)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| SheetError::Parse {
                message: format!("Unknown variant: {}", s),
                help: Some(format!(
                    "Known variants: {}",
                    Variant::ALL.map(Variant::name).join(", ")
                )),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuiltinSubsheets;

    fn subsheet() -> SubsheetDefinition {
        BuiltinSubsheets::all().remove(0)
    }

    #[test]
    fn test_names_round_trip() {
        for v in Variant::ALL {
            assert_eq!(v.name().parse::<Variant>().unwrap(), v);
            assert_eq!(v.suffix(), v.name());
        }
        assert!("sparkle".parse::<Variant>().is_err());
    }

    #[test]
    fn test_serde_matches_name() {
        let v: Variant = serde_yaml::from_str("hvshadow_outline").unwrap();
        assert_eq!(v, Variant::HvshadowOutline);
    }

    #[test]
    fn test_plain_is_identity_copy() {
        let src = Raster::from_rows(&[vec![Colour::WHITE, Colour::TRANSPARENT, Colour::rgb(9, 9, 9), Colour::BLACK]]);
        assert_eq!(Variant::Plain.apply(&src, &subsheet()), Some(src));
    }

    #[test]
    fn test_plain_black_recolours_white() {
        let src = Raster::from_rows(&[vec![Colour::WHITE, Colour::rgb(9, 9, 9)]]);
        let out = Variant::PlainBlack.apply(&src, &subsheet()).unwrap();
        assert_eq!(out.get(0, 0), Some(Colour::BLACK));
        assert_eq!(out.get(1, 0), Some(Colour::rgb(9, 9, 9)));
    }

    #[test]
    fn test_shadow_outline_keeps_only_shadow() {
        let mut src = Raster::new(4, 4);
        src.set(1, 1, Colour::WHITE);
        let out = Variant::HshadowOutline.apply(&src, &subsheet()).unwrap();
        assert_eq!(out.get(1, 1), Some(Colour::TRANSPARENT));
        assert_eq!(out.get(2, 1), Some(Colour::WHITE));
    }

    #[test]
    fn test_monochrome_absent_on_partial_cells() {
        let src = Raster::new(5, 4);
        assert!(Variant::MonochromeShadow.apply(&src, &subsheet()).is_none());
    }
}
