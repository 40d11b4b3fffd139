//! Output format catalog and palette validators.
//!
//! A format pairs a file layout with the validators that decide whether a
//! generated variant can be represented in it. Encoders live in
//! [`crate::render`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

use super::{IndexedRaster, Raster, Variant};

/// How an encoder's output lands on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKind {
    /// One binary file per subsheet.
    Binary,
    /// One text file per subsheet.
    Text,
    /// A folder with one binary file per glyph.
    BinaryFolder,
    /// A folder with one text file per glyph.
    TextFolder,
}

impl EncodingKind {
    pub fn is_folder(self) -> bool {
        matches!(self, EncodingKind::BinaryFolder | EncodingKind::TextFolder)
    }
}

/// Palette-size predicate gating a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Two colours, and never the black-on-black `plain_black` variant.
    OneBit,
    TwoBit,
    /// Three colours, for two-plane tiles that keep the fourth implicit.
    ThreeColour,
    FourBit,
    EightBit,
    /// Always rejects.
    Unsupported,
}

impl Validator {
    /// Whether a generated variant can be written by a format carrying this validator.
    pub fn accepts(self, variant: Variant, _rgba: &Raster, indexed: &IndexedRaster) -> bool {
        let colours = indexed.colour_count();
        match self {
            Validator::OneBit => variant != Variant::PlainBlack && colours <= 2,
            Validator::TwoBit => colours <= 4,
            Validator::ThreeColour => colours <= 3,
            Validator::FourBit => colours <= 16,
            Validator::EightBit => colours <= 256,
            Validator::Unsupported => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Validator::OneBit => "1bpp",
            Validator::TwoBit => "2bpp",
            Validator::ThreeColour => "3c",
            Validator::FourBit => "4bpp",
            Validator::EightBit => "8bpp",
            Validator::Unsupported => "unsupported",
        }
    }
}

/// Static description of an output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDefinition {
    pub name: &'static str,
    pub extension: &'static str,
    /// Filename suffix; empty for none.
    pub suffix: &'static str,
    pub kind: EncodingKind,
    pub validators: &'static [Validator],
}

/// An output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Bdf,
    #[serde(rename = "chr_1bpp")]
    Chr1bpp,
    ChrNes,
    ChrGb,
    SvgPacked,
    SvgIndividual,
    PngIndexed,
    PngRgbMagenta,
    PngRgba,
    #[serde(rename = "png_rgba_love2d")]
    PngRgbaLove2d,
    PngRgbaIndividual,
    Gif,
    GifIndividual,
    BmpIndexed,
    BmpRgbMagenta,
}

impl Format {
    /// Every format, in catalog order.
    pub const ALL: [Format; 15] = [
        Format::Bdf,
        Format::Chr1bpp,
        Format::ChrNes,
        Format::ChrGb,
        Format::SvgPacked,
        Format::SvgIndividual,
        Format::PngIndexed,
        Format::PngRgbMagenta,
        Format::PngRgba,
        Format::PngRgbaLove2d,
        Format::PngRgbaIndividual,
        Format::Gif,
        Format::GifIndividual,
        Format::BmpIndexed,
        Format::BmpRgbMagenta,
    ];

    pub fn definition(self) -> FormatDefinition {
        use EncodingKind::*;
        use Validator::*;

        let (name, extension, suffix, kind, validators): (_, _, _, _, &'static [Validator]) =
            match self {
                Format::Bdf => ("bdf", "bdf", "", Text, &[OneBit]),
                Format::Chr1bpp => ("chr_1bpp", "chr", "1bpp", Binary, &[OneBit]),
                Format::ChrNes => ("chr_nes", "chr", "nes", Binary, &[ThreeColour]),
                Format::ChrGb => ("chr_gb", "chr", "gb", Binary, &[ThreeColour]),
                Format::SvgPacked => ("svg_packed", "svg", "", Text, &[]),
                Format::SvgIndividual => ("svg_individual", "svg", "", TextFolder, &[]),
                Format::PngIndexed => ("png_indexed", "png", "idx", Binary, &[EightBit]),
                Format::PngRgbMagenta => ("png_rgb_magenta", "png", "rgb_magenta", Binary, &[]),
                Format::PngRgba => ("png_rgba", "png", "rgba", Binary, &[]),
                Format::PngRgbaLove2d => ("png_rgba_love2d", "png", "rgba_love", Binary, &[]),
                Format::PngRgbaIndividual => ("png_rgba_individual", "png", "", BinaryFolder, &[]),
                Format::Gif => ("gif", "gif", "", Binary, &[EightBit]),
                Format::GifIndividual => ("gif_individual", "gif", "", BinaryFolder, &[EightBit]),
                Format::BmpIndexed => ("bmp_indexed", "bmp", "idx", Binary, &[EightBit]),
                Format::BmpRgbMagenta => ("bmp_rgb_magenta", "bmp", "rgb_magenta", Binary, &[]),
            };

        FormatDefinition {
            name,
            extension,
            suffix,
            kind,
            validators,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Run every validator; a format without validators accepts everything.
    pub fn accepts(self, variant: Variant, rgba: &Raster, indexed: &IndexedRaster) -> bool {
        self.definition()
            .validators
            .iter()
            .all(|v| v.accepts(variant, rgba, indexed))
    }

    /// Whether the format is never written (and gets no output folder).
    pub fn is_unsupported(self) -> bool {
        self.definition().validators.contains(&Validator::Unsupported)
    }

    /// Whether the format is a single-file raster image that can be decoded
    /// again, as combined-sheet assembly requires.
    pub fn is_reloadable_image(self) -> bool {
        matches!(
            self,
            Format::PngIndexed
                | Format::PngRgbMagenta
                | Format::PngRgba
                | Format::Gif
                | Format::BmpIndexed
                | Format::BmpRgbMagenta
        )
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| SheetError::Parse {
                message: format!("Unknown format: {}", s),
                help: Some(format!(
                    "Known formats: {}",
                    Format::ALL.map(Format::name).join(", ")
                )),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    /// A single-row raster with `n` distinct colours (white first).
    fn with_colours(n: u8) -> (Raster, IndexedRaster) {
        let row: Vec<Colour> = (0..n)
            .map(|i| if i == 0 { Colour::WHITE } else { Colour::rgb(i, 100, 50) })
            .collect();
        let raster = Raster::from_rows(&[row]);
        let indexed = IndexedRaster::from_raster(&raster);
        (raster, indexed)
    }

    #[test]
    fn test_four_bit_boundary() {
        let (r, i) = with_colours(16);
        assert_eq!(i.colour_count(), 16);
        assert!(Validator::FourBit.accepts(Variant::Plain, &r, &i));

        let (r, i) = with_colours(17);
        assert!(!Validator::FourBit.accepts(Variant::Plain, &r, &i));
    }

    #[test]
    fn test_one_bit_rejects_plain_black() {
        let (r, i) = with_colours(2);
        assert!(Validator::OneBit.accepts(Variant::Plain, &r, &i));
        assert!(!Validator::OneBit.accepts(Variant::PlainBlack, &r, &i));

        let (r, i) = with_colours(3);
        assert!(!Validator::OneBit.accepts(Variant::Plain, &r, &i));
    }

    #[test]
    fn test_small_palette_boundaries() {
        let (r, i) = with_colours(3);
        assert!(Validator::ThreeColour.accepts(Variant::Hshadow, &r, &i));
        assert!(Validator::TwoBit.accepts(Variant::Hshadow, &r, &i));

        let (r, i) = with_colours(4);
        assert!(!Validator::ThreeColour.accepts(Variant::Hshadow, &r, &i));
        assert!(Validator::TwoBit.accepts(Variant::Hshadow, &r, &i));

        let (r, i) = with_colours(5);
        assert!(!Validator::TwoBit.accepts(Variant::Hshadow, &r, &i));
    }

    #[test]
    fn test_unsupported_always_rejects() {
        let (r, i) = with_colours(1);
        assert!(!Validator::Unsupported.accepts(Variant::Plain, &r, &i));
    }

    #[test]
    fn test_formats_without_validators_accept() {
        let (r, i) = with_colours(200);
        assert!(Format::PngRgba.accepts(Variant::PlainBlack, &r, &i));
        assert!(!Format::Bdf.accepts(Variant::Plain, &r, &i));
    }

    #[test]
    fn test_names_round_trip() {
        for f in Format::ALL {
            assert_eq!(f.name().parse::<Format>().unwrap(), f);
            let yaml = serde_yaml::to_string(&f).unwrap();
            assert_eq!(yaml.trim(), f.name());
        }
    }

    #[test]
    fn test_no_builtin_format_is_unsupported() {
        assert!(Format::ALL.iter().all(|f| !f.is_unsupported()));
    }

    #[test]
    fn test_folder_kinds() {
        assert!(Format::SvgIndividual.definition().kind.is_folder());
        assert!(Format::GifIndividual.definition().kind.is_folder());
        assert!(!Format::Gif.definition().kind.is_folder());
    }
}
