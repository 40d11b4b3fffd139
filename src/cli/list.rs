//! List command implementation.
//!
//! Prints the subsheet table, variant catalog and format catalog, either as
//! status lines or as JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, SheetError};
use crate::output::{plural, Printer};
use crate::project::Project;
use crate::types::{EncodingKind, Format, SubsheetDefinition, Variant};

/// List subsheets, variants and formats
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project manifest (default: ./glyphsheet.yaml when present)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Inventory<'a> {
    subsheets: Vec<&'a SubsheetDefinition>,
    variants: Vec<&'static str>,
    formats: Vec<FormatEntry>,
}

#[derive(Debug, Serialize)]
struct FormatEntry {
    name: &'static str,
    extension: &'static str,
    suffix: &'static str,
    kind: &'static str,
    validators: Vec<&'static str>,
}

impl From<Format> for FormatEntry {
    fn from(format: Format) -> Self {
        let def = format.definition();
        Self {
            name: def.name,
            extension: def.extension,
            suffix: def.suffix,
            kind: kind_name(def.kind),
            validators: def.validators.iter().map(|v| v.name()).collect(),
        }
    }
}

fn kind_name(kind: EncodingKind) -> &'static str {
    match kind {
        EncodingKind::Binary => "binary",
        EncodingKind::Text => "text",
        EncodingKind::BinaryFolder => "binary-folder",
        EncodingKind::TextFolder => "text-folder",
    }
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let project = Project::discover(std::path::Path::new("."), args.manifest.as_deref())?;
    let inventory = Inventory {
        subsheets: project.registry.iter().collect(),
        variants: Variant::ALL.map(Variant::name).to_vec(),
        formats: Format::ALL.into_iter().map(FormatEntry::from).collect(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&inventory).map_err(|e| SheetError::Parse {
            message: format!("Failed to serialize inventory: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print_inventory(&inventory, printer);
    }

    Ok(())
}

fn print_inventory(inventory: &Inventory<'_>, printer: &Printer) {
    for s in &inventory.subsheets {
        let variants: Vec<&str> = s.variants.iter().map(|v| v.name()).collect();
        printer.info(
            &s.name,
            &format!(
                "{} {} {}x{} {} {}",
                s.kind,
                plural(s.glyph_count() as usize, "glyph", "glyphs"),
                s.glyph.width,
                s.glyph.height,
                printer.dim("->"),
                variants.join(", ")
            ),
        );
    }
    printer.info("Variants", &inventory.variants.join(", "));
    for f in &inventory.formats {
        let limits = if f.validators.is_empty() {
            String::new()
        } else {
            format!(" [{}]", f.validators.join(", "))
        };
        printer.info("Format", &format!("{} .{} ({}){}", f.name, f.extension, f.kind, limits));
    }
}
