use crate::error::{ShotError, ShotResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Moves a file with a rename. If the rename can't be done because source and destination are
/// on different filesystems, the file is copied and the source removed instead.
pub fn move_file(src: &Utf8Path, dest: &Utf8Path) -> ShotResult<()> {
    move_file_with(src, dest, |from, to| fs::rename(from, to))
}

fn move_file_with<R>(src: &Utf8Path, dest: &Utf8Path, rename: R) -> ShotResult<()>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(src.as_std_path(), dest.as_std_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_and_remove(src, dest),
        Err(e) => Err(ShotError::io(
            format!("failed to move {} to {}", src, dest),
            e,
        )),
    }
}

fn copy_and_remove(src: &Utf8Path, dest: &Utf8Path) -> ShotResult<()> {
    copy_file(src, dest)?;
    fs::remove_file(src).map_err(|e| ShotError::io(format!("failed to remove {}", src), e))
}

/// Streams src into dest, creating or truncating dest. If anything goes wrong once dest
/// exists, dest is removed so no half-written file is left behind.
pub fn copy_file(src: &Utf8Path, dest: &Utf8Path) -> ShotResult<u64> {
    let mut input =
        File::open(src).map_err(|e| ShotError::io(format!("failed to open {}", src), e))?;
    let mut output =
        File::create(dest).map_err(|e| ShotError::io(format!("failed to create {}", dest), e))?;

    let copied = io::copy(&mut input, &mut output).and_then(|n| output.sync_all().map(|_| n));
    drop(output);

    copied.map_err(|e| {
        let _ = fs::remove_file(dest);
        ShotError::io(format!("failed to copy {} to {}", src, dest), e)
    })
}

/// Makes a path absolute without touching the filesystem, so it works for files which are
/// about to be moved.
pub fn absolute(path: &Utf8Path) -> ShotResult<Utf8PathBuf> {
    let abs = std::path::absolute(path)
        .map_err(|e| ShotError::io(format!("failed to make {} absolute", path), e))?;

    Utf8PathBuf::from_path_buf(abs).map_err(ShotError::NonUtf8Path)
}
