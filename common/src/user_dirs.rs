//! Finds the Desktop and Downloads directories.
//!
//! The obvious `$HOME/Desktop` or `$HOME/Downloads` is tried first. Linux desktops may have
//! moved or localised them, so there we fall back to whatever `~/.config/user-dirs.dirs` says.
//!
use crate::error::{ShotError, ShotResult};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDir {
    Desktop,
    Downloads,
}

impl SearchDir {
    pub fn from_downloads_flag(use_downloads: bool) -> Self {
        if use_downloads {
            SearchDir::Downloads
        } else {
            SearchDir::Desktop
        }
    }

    fn default_name(self) -> &'static str {
        match self {
            SearchDir::Desktop => "Desktop",
            SearchDir::Downloads => "Downloads",
        }
    }

    fn xdg_key(self) -> &'static str {
        match self {
            SearchDir::Desktop => "DESKTOP",
            SearchDir::Downloads => "DOWNLOAD",
        }
    }
}

pub fn locate(dir: SearchDir, home: &Utf8Path) -> ShotResult<Utf8PathBuf> {
    let default_dir = home.join(dir.default_name());
    if default_dir.is_dir() {
        return Ok(default_dir);
    }

    if cfg!(target_os = "linux") {
        if let Some(xdg_dir) = xdg_user_dir(home, dir.xdg_key()).filter(|d| d.is_dir()) {
            return Ok(xdg_dir);
        }
    }

    Err(ShotError::NotFound)
}

fn xdg_user_dir(home: &Utf8Path, key: &str) -> Option<Utf8PathBuf> {
    let config = fs::read_to_string(home.join(".config").join("user-dirs.dirs")).ok()?;
    parse_user_dirs(&config, home, key)
}

/// Pulls `XDG_<key>_DIR` out of a user-dirs.dirs file, expanding references to the home
/// directory. Relative paths are taken as relative to home.
pub fn parse_user_dirs(config: &str, home: &Utf8Path, key: &str) -> Option<Utf8PathBuf> {
    let prefix = format!("XDG_{}_DIR=", key);

    let value = config
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(&prefix))?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .replace("${HOME}", home.as_str())
        .replace("$HOME", home.as_str());

    let value = match value.strip_prefix('~') {
        Some(rest) => home.join(rest.trim_start_matches('/')).into_string(),
        None => value,
    };

    if value.is_empty() {
        return None;
    }

    let path = Utf8PathBuf::from(value);
    let path = if path.is_absolute() {
        path
    } else {
        home.join(path)
    };

    Some(clean(&path))
}

// Resolves `.` and `..` without touching the filesystem. `..` never climbs above the root.
fn clean(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component> = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    parts.into_iter().collect()
}
