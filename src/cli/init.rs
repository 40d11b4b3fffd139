//! Init command implementation.
//!
//! Writes a `glyphsheet.yaml` holding the default settings, ready to edit.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::project::{Manifest, MANIFEST_FILENAME};
use crate::types::SubsheetRegistry;

/// Initialize a glyphsheet project by generating a glyphsheet.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing glyphsheet.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(SheetError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::default();
    let mut yaml = String::from("# glyphsheet project manifest\n# Add `subsheets:` to replace the built-in layout.\n");
    yaml.push_str(&manifest.to_yaml()?);

    fs::write(&manifest_path, &yaml).map_err(|e| SheetError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !args.path.join(&manifest.source).exists() {
        printer.warning(
            "Missing",
            &format!("master sheet {}", display_path(&args.path.join(&manifest.source))),
        );
    }

    let builtin = SubsheetRegistry::builtin();
    printer.success(
        "Created",
        &format!(
            "{} ({} built in)",
            display_path(&manifest_path),
            plural(builtin.len(), "subsheet", "subsheets")
        ),
    );

    Ok(())
}
