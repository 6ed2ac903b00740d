//! Gets the chosen image into a fresh temp file of its own.
//!
//! Temp files are created by `camino_tempfile`, which removes them again when they go out of
//! scope. We only keep one once everything it depends on has worked, so a failure at any step
//! leaves nothing behind in the temp directory.
//!
use crate::error::{ShotError, ShotResult};
use crate::file_ops::{absolute, copy_file, move_file};
use crate::trash::Trash;
use crate::types::{FileCandidate, Opts};
use crate::verbose;
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Builder;
use std::io::Write;

pub fn materialize_clipboard(data: &[u8], temp_dir: &Utf8Path) -> ShotResult<Utf8PathBuf> {
    let mut file = Builder::new()
        .prefix("clipboard-")
        .suffix(".png")
        .tempfile_in(temp_dir)
        .map_err(|e| ShotError::io(format!("failed to create temp file in {}", temp_dir), e))?;

    let written = file
        .write_all(data)
        .and_then(|_| file.as_file().sync_all());

    if let Err(e) = written {
        return Err(ShotError::io(format!("failed to write {}", file.path()), e));
    }

    let (_, path) = file
        .keep()
        .map_err(|e| ShotError::io("failed to keep temp file", e.error))?;

    absolute(&path)
}

/// Downloads files are moved to temp. Desktop files are copied, and the original trashed:
/// if that fails, the copy goes too.
pub fn materialize_file(
    candidate: &FileCandidate,
    opts: Opts,
    temp_dir: &Utf8Path,
    trash: &Trash,
) -> ShotResult<Utf8PathBuf> {
    let suffix = temp_extension(&candidate.path);
    let placeholder = Builder::new()
        .prefix("image-")
        .suffix(&suffix)
        .tempfile_in(temp_dir)
        .map_err(|e| ShotError::io(format!("failed to create temp file in {}", temp_dir), e))?
        .into_temp_path();

    if opts.use_downloads {
        verbose!(opts, "moving Downloads file to temp: {}", candidate.path);
        move_file(&candidate.path, &placeholder)?;
    } else {
        verbose!(
            opts,
            "copying Desktop file to temp and trashing: {}",
            candidate.path
        );
        copy_file(&candidate.path, &placeholder)?;
        let trashed = trash.discard(&candidate.path)?;
        verbose!(opts, "trashed {} to {}", candidate.path, trashed);
    }

    let path = placeholder
        .keep()
        .map_err(|e| ShotError::io("failed to keep temp file", e.error))?;

    absolute(&path)
}

// The source's own extension, lower-cased, so the temp file is recognisably the same type.
fn temp_extension(path: &Utf8Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => ".png".to_string(),
    }
}
