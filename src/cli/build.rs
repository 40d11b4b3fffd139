//! Build command implementation.
//!
//! Resolves the project, applies command-line overrides, and runs the
//! generation pipeline.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{self, BuildOptions, RunMode};
use crate::project::{Project, MANIFEST_FILENAME};

/// Generate every variant and format from the master sheet
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project manifest (default: ./glyphsheet.yaml when present)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Master sheet image, overriding the manifest
    #[arg(long, short)]
    pub source: Option<PathBuf>,

    /// Output directory, overriding the manifest
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Delete an existing output directory and rebuild it
    #[arg(long)]
    pub force_replace: bool,

    /// Number of worker threads
    #[arg(long, short)]
    pub jobs: Option<usize>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| SheetError::Io {
        path: PathBuf::from("."),
        message: format!("Failed to read current directory: {}", e),
    })?;
    let mut project = Project::discover(&cwd, args.manifest.as_deref())?;

    if !project.has_manifest {
        printer.info("Using", &format!("built-in defaults (no {})", MANIFEST_FILENAME));
    }

    // Command-line paths are relative to the working directory, not the manifest.
    if let Some(source) = &args.source {
        project.manifest.source = absolute(&cwd, source);
    }
    if let Some(output) = &args.output {
        project.manifest.output = absolute(&cwd, output);
    }

    let options = BuildOptions {
        mode: if args.force_replace {
            RunMode::Reset
        } else {
            RunMode::Fresh
        },
        jobs: args.jobs.or(project.manifest.jobs),
    };
    if options.jobs == Some(0) {
        return Err(SheetError::Config {
            message: "jobs must be at least 1".to_string(),
            help: None,
        });
    }

    let report = pipeline::build(&project, &options, printer)?;
    if !report.up_to_date {
        printer.info(
            "Wrote",
            &format!(
                "{} to {} ({} rejected by format limits)",
                plural(report.files, "file", "files"),
                display_path(&project.output_path()),
                plural(report.rejected, "pair", "pairs")
            ),
        );
    }

    Ok(())
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
