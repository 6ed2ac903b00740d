//! Puts files in the user's trash, where they can be recovered from, rather than deleting them.
//!
//! On macOS that means `~/.Trash`. On Linux it means the freedesktop.org home trash,
//! `~/.local/share/Trash`, where every file in `files/` has a matching `.trashinfo` file in
//! `info/` recording where it came from and when it was deleted.
//!
use crate::error::{ShotError, ShotResult};
use crate::file_ops::{absolute, move_file};
use crate::undo::UndoLog;
use camino::{Utf8Path, Utf8PathBuf};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::time::SystemTime;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// How many numbered names we will try before giving up on finding a free one.
pub const MAX_NAME_ATTEMPTS: u32 = 10_000;

// Everything but the unreserved characters, the sub-delimiters allowed in a URL path segment,
// and the path separator.
const TRASH_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@')
    .remove(b'/');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    MacOs,
    FreeDesktop,
}

impl Backend {
    pub fn native() -> Option<Backend> {
        if cfg!(target_os = "macos") {
            Some(Backend::MacOs)
        } else if cfg!(target_os = "linux") {
            Some(Backend::FreeDesktop)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct Trash {
    home: Utf8PathBuf,
    backend: Option<Backend>,
}

impl Trash {
    pub fn new(home: &Utf8Path, backend: Option<Backend>) -> Self {
        Self {
            home: home.to_path_buf(),
            backend,
        }
    }

    pub fn native(home: &Utf8Path) -> Self {
        Self::new(home, Backend::native())
    }

    /// Moves the file into the trash, returning where it ended up.
    pub fn discard(&self, path: &Utf8Path) -> ShotResult<Utf8PathBuf> {
        let backend = self
            .backend
            .ok_or(ShotError::UnsupportedPlatform(std::env::consts::OS))?;
        let abs_path = absolute(path)?;

        match backend {
            Backend::MacOs => self.discard_to_home_trash(&abs_path),
            Backend::FreeDesktop => self.discard_to_freedesktop_trash(&abs_path, SystemTime::now()),
        }
    }

    fn discard_to_home_trash(&self, abs_path: &Utf8Path) -> ShotResult<Utf8PathBuf> {
        let trash_dir = self.home.join(".Trash");
        create_private_dir(&trash_dir)?;

        let name = unique_trash_name(base_name(abs_path)?, &trash_dir, None)?;
        let dest = trash_dir.join(name);
        move_file(abs_path, &dest)?;
        Ok(dest)
    }

    fn discard_to_freedesktop_trash(
        &self,
        abs_path: &Utf8Path,
        deleted: SystemTime,
    ) -> ShotResult<Utf8PathBuf> {
        self.place_with_trash_info(abs_path, deleted, write_private_file)
    }

    fn place_with_trash_info<W>(
        &self,
        abs_path: &Utf8Path,
        deleted: SystemTime,
        write_info: W,
    ) -> ShotResult<Utf8PathBuf>
    where
        W: FnOnce(&Utf8Path, &str) -> ShotResult<()>,
    {
        let trash_root = self.home.join(".local").join("share").join("Trash");
        let files_dir = trash_root.join("files");
        let info_dir = trash_root.join("info");
        create_private_dir(&files_dir)?;
        create_private_dir(&info_dir)?;

        let name = unique_trash_name(base_name(abs_path)?, &files_dir, Some(&info_dir))?;
        let dest = files_dir.join(&name);
        let info = trash_info_content(abs_path, deleted)?;

        let mut undo = UndoLog::new();
        move_file(abs_path, &dest)?;
        undo.record(|| move_file(&dest, abs_path));

        write_info(&info_dir.join(format!("{}.trashinfo", name)), &info)?;
        undo.commit();

        Ok(dest)
    }
}

fn base_name(path: &Utf8Path) -> ShotResult<&str> {
    match path.file_name() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ShotError::EmptyTrashName),
    }
}

/// Returns the given name if it is free, otherwise the first free one of `stem.1.ext`,
/// `stem.2.ext` and so on. With an info directory, a name is only free if there is no
/// `.trashinfo` file for it either.
pub fn unique_trash_name(
    base: &str,
    files_dir: &Utf8Path,
    info_dir: Option<&Utf8Path>,
) -> ShotResult<String> {
    if base.is_empty() {
        return Err(ShotError::EmptyTrashName);
    }

    if !trash_name_taken(base, files_dir, info_dir) {
        return Ok(base.to_string());
    }

    let base_path = Utf8Path::new(base);
    let stem = base_path.file_stem().unwrap_or(base);
    let ext = base_path
        .extension()
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    (1..MAX_NAME_ATTEMPTS)
        .map(|i| format!("{}.{}{}", stem, i, ext))
        .find(|name| !trash_name_taken(name, files_dir, info_dir))
        .ok_or_else(|| ShotError::TrashNamesExhausted(base.to_string()))
}

fn trash_name_taken(name: &str, files_dir: &Utf8Path, info_dir: Option<&Utf8Path>) -> bool {
    if path_taken(&files_dir.join(name)) {
        return true;
    }

    match info_dir {
        Some(dir) => path_taken(&dir.join(format!("{}.trashinfo", name))),
        None => false,
    }
}

// If we can't tell whether something is there, assume it is.
fn path_taken(path: &Utf8Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

pub fn trash_info_content(abs_path: &Utf8Path, deleted: SystemTime) -> ShotResult<String> {
    Ok(format!(
        "[Trash Info]\nPath={}\nDeletionDate={}\n",
        escape_trash_path(abs_path.as_str()),
        deletion_date(deleted)?
    ))
}

pub fn escape_trash_path(path: &str) -> String {
    utf8_percent_encode(path, TRASH_PATH).to_string()
}

/// Local time, to the second, with no offset. Falls back to UTC if the local offset can't be
/// worked out.
fn deletion_date(deleted: SystemTime) -> ShotResult<String> {
    let utc = OffsetDateTime::from(deleted);
    let offset = UtcOffset::local_offset_at(utc).unwrap_or(UtcOffset::UTC);
    format_deletion_date(utc.to_offset(offset))
}

fn format_deletion_date(timestamp: OffsetDateTime) -> ShotResult<String> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    Ok(timestamp.format(&format)?)
}

fn create_private_dir(dir: &Utf8Path) -> ShotResult<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder
        .create(dir)
        .map_err(|e| ShotError::io(format!("failed to create {}", dir), e))
}

fn write_private_file(path: &Utf8Path, content: &str) -> ShotResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()));

    written.map_err(|e| {
        let _ = fs::remove_file(path);
        ShotError::io(format!("failed to write {}", path), e)
    })
}
