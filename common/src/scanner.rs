use crate::error::{ShotError, ShotResult};
use crate::types::FileCandidate;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Finds the image in dir most likely to be the user's latest screenshot. Files whose names
/// say they are screenshots always beat files which don't, however old they are. Within each
/// group the newest wins, with ties going to whichever came later in the listing.
///
pub fn latest_image(dir: &Utf8Path) -> ShotResult<FileCandidate> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ShotError::NotFound),
        Err(e) => return Err(ShotError::io(format!("failed to read {}", dir), e)),
    };

    let mut latest_tagged: Option<FileCandidate> = None;
    let mut latest_untagged: Option<FileCandidate> = None;

    for entry in entries {
        let entry = entry.map_err(|e| ShotError::io(format!("failed to read {}", dir), e))?;

        // Names we can't represent can't be handed back to the caller either.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        if !has_image_ext(&name) {
            continue;
        }

        let Some(candidate) = candidate_for(&entry, dir.join(&name)) else {
            continue;
        };

        let latest = if is_screenshot_name(&name) {
            &mut latest_tagged
        } else {
            &mut latest_untagged
        };

        if latest
            .as_ref()
            .is_none_or(|current| candidate.modified >= current.modified)
        {
            *latest = Some(candidate);
        }
    }

    latest_tagged.or(latest_untagged).ok_or(ShotError::NotFound)
}

// Only regular files count. Symlinks are skipped whatever they point at: a link moved into
// the temp dir need not resolve from there.
fn candidate_for(entry: &fs::DirEntry, path: Utf8PathBuf) -> Option<FileCandidate> {
    if !entry.file_type().ok()?.is_file() {
        return None;
    }

    let metadata = fs::symlink_metadata(&path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    Some(FileCandidate {
        modified: metadata.modified().ok()?,
        path,
    })
}

/// True for names ending in one of the image extensions, in any case. A bare `.png` counts.
pub fn has_image_ext(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

pub fn is_screenshot_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("screenshot") || lower.contains("screen shot")
}
