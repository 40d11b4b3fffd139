//! Per-glyph folder output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetError};
use crate::output::{display_path, plural, Printer};
use crate::types::{Format, Region};

use super::{encode, write_file, EncodeJob};

/// File name of one glyph inside a folder: `<stem>_<code:03>_<name>.<ext>`.
pub fn glyph_file_name(stem: &str, code: u32, name: &str, extension: &str) -> String {
    format!("{}_{:03}_{}.{}", stem, code, name, extension)
}

/// Split a job into glyph cells and write each one into the folder named
/// by `path` without its extension. Returns the number of files written.
pub fn write_folder(format: Format, job: &EncodeJob<'_>, path: &Path, printer: &Printer) -> Result<usize> {
    let folder = path.with_extension("");
    let stem = folder
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SheetError::Io {
            path: path.to_path_buf(),
            message: "Output path has no file name".to_string(),
        })?
        .to_string();
    fs::create_dir_all(&folder).map_err(|e| SheetError::Io {
        path: folder.clone(),
        message: format!("Failed to create directory: {}", e),
    })?;

    let glyph = job.subsheet.glyph;
    let columns = job.rgba.width() / glyph.width;
    let count = columns * (job.rgba.height() / glyph.height);
    let extension = format.definition().extension;

    for index in 0..count {
        let info = job.glyphs.info(job.subsheet, index);
        let cell = Region::new(
            index % columns * glyph.width,
            index / columns * glyph.height,
            glyph.width,
            glyph.height,
        );
        let (Some(rgba), Some(indexed)) = (job.rgba.crop(cell), job.indexed.crop(cell)) else {
            return Err(SheetError::encode(format.name(), format!("glyph cell {} lies outside the sheet", index)));
        };

        let file_name = glyph_file_name(&stem, info.code, &info.name, extension);
        let glyph_path: PathBuf = folder.join(&file_name);
        let cell_job = job.with_pixels(&rgba, &indexed, &file_name);
        write_file(&glyph_path, |out| encode(format, &cell_job, out))?;
    }

    printer.status(
        "Split",
        &format!("{} into {}", display_path(&folder), plural(count as usize, "glyph", "glyphs")),
    );
    Ok(count as usize)
}
