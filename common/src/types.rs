use crate::error::{ShotError, ShotResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fmt;
use std::time::SystemTime;

/// What the user asked for. Parsed once, then passed by value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Opts {
    pub use_downloads: bool,
    pub clipboard_only: bool,
    pub verbose: bool,
}

/// Environment-derived roots. The home directory is only needed once we go looking in
/// Desktop or Downloads, or need to trash something, so its absence is not an error until then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    pub home: Option<Utf8PathBuf>,
    pub temp_dir: Utf8PathBuf,
}

impl Locations {
    pub fn from_env() -> ShotResult<Self> {
        let home = env::var("HOME")
            .ok()
            .filter(|h| !h.is_empty())
            .map(Utf8PathBuf::from);

        let temp_dir = Utf8PathBuf::from_path_buf(env::temp_dir()).map_err(ShotError::NonUtf8Path)?;

        Ok(Self { home, temp_dir })
    }

    pub fn home(&self) -> ShotResult<&Utf8Path> {
        self.home.as_deref().ok_or(ShotError::NoHome)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardCandidate {
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: Utf8PathBuf,
    pub modified: SystemTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidate {
    Clipboard(ClipboardCandidate),
    File(FileCandidate),
}

/// The outcome of asking one source for a candidate. Keeping "nothing there" apart from "it
/// broke" lets the resolver decide which errors are worth surfacing.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(ShotError),
}

impl<T> From<ShotResult<T>> for Lookup<T> {
    fn from(result: ShotResult<T>) -> Self {
        match result {
            Ok(found) => Lookup::Found(found),
            Err(ShotError::NotFound) => Lookup::NotFound,
            Err(e) => Lookup::Failed(e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Clipboard,
    File(Utf8PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Clipboard => write!(f, "clipboard"),
            Source::File(path) => write!(f, "{}", path),
        }
    }
}

/// Where the image came from, and where it is now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub source: Source,
    pub temp_path: Utf8PathBuf,
}
