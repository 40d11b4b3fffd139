//! Sheet generation pipeline.
//!
//! Load the master sheet, cut out every subsheet, then generate each
//! (subsheet, variant) pair on a worker pool: transform, index, and write
//! every format that accepts the result. Combined sheets are assembled once
//! all workers have joined.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::project::Project;
use crate::render::{assemble_combined, write_output, CombinedReport, EncodeJob};
use crate::types::{Format, IndexedRaster, Raster, SubsheetDefinition, Variant};

/// What to do when the output root already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Leave an existing output tree alone and do nothing.
    #[default]
    Fresh,
    /// Delete the output tree and rebuild it.
    Reset,
}

/// Options for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub mode: RunMode,
    /// Worker threads; rayon's global pool when `None`.
    pub jobs: Option<usize>,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// The output root existed and the run was a no-op.
    pub up_to_date: bool,
    /// Variants generated.
    pub variants: usize,
    /// Variants whose transform produced nothing.
    pub absent: usize,
    /// (variant, format) pairs written.
    pub encoded: usize,
    /// (variant, format) pairs a validator rejected.
    pub rejected: usize,
    pub combined: CombinedReport,
    /// Files in the output tree afterwards.
    pub files: usize,
}

#[derive(Debug, Default)]
struct TaskOutcome {
    generated: bool,
    encoded: usize,
    rejected: usize,
}

/// Load the master sheet, turning the magenta key into transparency.
pub fn load_master_sheet(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| SheetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to load master sheet: {}", e),
    })?;
    Ok(Raster::from_keyed_image(&img.to_rgba8()))
}

/// Copy a subsheet's region out of the master sheet.
pub fn extract_subsheet(master: &Raster, subsheet: &SubsheetDefinition) -> Result<Raster> {
    master
        .crop(subsheet.region)
        .ok_or_else(|| SheetError::RegionOutOfBounds {
            subsheet: subsheet.name.clone(),
            x: subsheet.region.x,
            y: subsheet.region.y,
            width: subsheet.region.width,
            height: subsheet.region.height,
            sheet_width: master.width(),
            sheet_height: master.height(),
        })
}

/// Run the whole pipeline for a project.
pub fn build(project: &Project, options: &BuildOptions, printer: &Printer) -> Result<BuildReport> {
    let start = Instant::now();
    let root = project.output_path();

    if root.exists() {
        match options.mode {
            RunMode::Fresh => {
                printer.info(
                    "Fresh",
                    &format!("{} already exists (use --force-replace to rebuild)", display_path(&root)),
                );
                return Ok(BuildReport {
                    up_to_date: true,
                    ..BuildReport::default()
                });
            }
            RunMode::Reset => {
                printer.status("Removing", &display_path(&root));
                fs::remove_dir_all(&root).map_err(|e| SheetError::Io {
                    path: root.clone(),
                    message: format!("Failed to remove output directory: {}", e),
                })?;
            }
        }
    }
    create_output_tree(&root)?;

    let source = project.source_path();
    printer.status("Loading", &display_path(&source));
    let master = load_master_sheet(&source)?;

    let subsheets = project
        .registry
        .iter()
        .map(|s| extract_subsheet(&master, s).map(|pixels| (s, pixels)))
        .collect::<Result<Vec<_>>>()?;
    let tasks: Vec<(&SubsheetDefinition, &Raster, Variant)> = subsheets
        .iter()
        .flat_map(|(s, pixels)| s.variants.iter().map(move |&v| (*s, pixels, v)))
        .collect();

    let run = || {
        tasks
            .par_iter()
            .map(|&(subsheet, pixels, variant)| generate(project, subsheet, pixels, variant, &root, printer))
            .collect::<Result<Vec<_>>>()
    };
    let outcomes = match options.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| SheetError::Build {
                message: format!("Failed to start worker pool: {}", e),
                help: None,
            })?
            .install(run)?,
        None => run()?,
    };

    let mut report = BuildReport::default();
    for outcome in &outcomes {
        if outcome.generated {
            report.variants += 1;
        } else {
            report.absent += 1;
        }
        report.encoded += outcome.encoded;
        report.rejected += outcome.rejected;
    }

    report.combined = assemble_combined(
        &project.manifest.combined,
        &project.registry,
        &project.font,
        &project.glyphs,
        master.size(),
        &root,
        printer,
    )?;
    report.files = count_files(&root);

    printer.success(
        "Finished",
        &format!(
            "{} and {} into {} in {:.2}s",
            plural(report.variants, "variant", "variants"),
            plural(report.combined.written, "combined sheet", "combined sheets"),
            display_path(&root),
            start.elapsed().as_secs_f64()
        ),
    );
    Ok(report)
}

/// Create the output root and one folder per writable format.
fn create_output_tree(root: &Path) -> Result<()> {
    for format in Format::ALL.into_iter().filter(|f| !f.is_unsupported()) {
        let dir = root.join(format.name());
        fs::create_dir_all(&dir).map_err(|e| SheetError::Io {
            path: dir,
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    Ok(())
}

/// Generate one variant of one subsheet and write every format that accepts it.
fn generate(
    project: &Project,
    subsheet: &SubsheetDefinition,
    pixels: &Raster,
    variant: Variant,
    root: &Path,
    printer: &Printer,
) -> Result<TaskOutcome> {
    let Some(rgba) = variant.apply(pixels, subsheet) else {
        printer.warning(
            "Skipping",
            &format!("{} {}: variant not available for this layout", subsheet.name, variant),
        );
        return Ok(TaskOutcome::default());
    };
    let indexed = IndexedRaster::from_raster(&rgba);

    let mut outcome = TaskOutcome {
        generated: true,
        ..TaskOutcome::default()
    };
    for format in Format::ALL {
        if !format.accepts(variant, &rgba, &indexed) {
            outcome.rejected += 1;
            continue;
        }
        let file_name = project.font.file_name(&subsheet.name, variant, format);
        let path = root.join(format.name()).join(&file_name);
        let job = EncodeJob {
            subsheet,
            variant,
            rgba: &rgba,
            indexed: &indexed,
            font: &project.font,
            glyphs: &project.glyphs,
            file_name: &file_name,
        };
        write_output(format, &job, &path, printer)?;
        outcome.encoded += 1;
    }

    printer.status(
        "Generated",
        &format!(
            "{} {} ({}, {})",
            subsheet.name,
            variant,
            plural(indexed.colour_count(), "colour", "colours"),
            plural(outcome.encoded, "format", "formats")
        ),
    );
    Ok(outcome)
}

fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}
