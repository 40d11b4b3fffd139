//! Validate command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SheetError};
use crate::output::{display_path, Printer};
use crate::project::{Manifest, MANIFEST_FILENAME};
use crate::validation::{print_diagnostics, validate_project};

/// Check the manifest and master sheet without generating anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project manifest (default: ./glyphsheet.yaml when present)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (manifest, root) = match &args.manifest {
        Some(path) => (
            Manifest::load(path)?,
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None if Path::new(MANIFEST_FILENAME).is_file() => {
            (Manifest::load(Path::new(MANIFEST_FILENAME))?, PathBuf::new())
        }
        None => (Manifest::default(), PathBuf::new()),
    };

    printer.status("Checking", &display_path(&root.join(&manifest.source)));
    let result = validate_project(&manifest, &root);
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(SheetError::Build {
            message: format!("validation found {} error(s)", result.error_count()),
            help: Some("Fix the reported problems and run validate again".to_string()),
        });
    }
    Ok(())
}
