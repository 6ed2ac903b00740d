use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ShotResult<T> = Result<T, ShotError>;

/// Everything the core can fail with. `NotFound` is the only variant which is not really a
/// failure: it means there was nothing to pick up, and the caller should exit quietly.
///
#[derive(Debug, Error)]
pub enum ShotError {
    #[error("no image found")]
    NotFound,
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("clipboard image is {size}, which exceeds the {limit} limit")]
    ClipboardTooLarge { size: String, limit: String },
    #[error("failed to encode clipboard image: {0}")]
    Encode(String),
    #[error("trash is not supported on {0}")]
    UnsupportedPlatform(&'static str),
    #[error("empty trash name")]
    EmptyTrashName,
    #[error("unable to find unique trash name for {0}")]
    TrashNamesExhausted(String),
    #[error("failed to format deletion date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("cannot find home directory: HOME is not set")]
    NoHome,
    #[error("{} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),
}

impl ShotError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ShotError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ShotError::NotFound)
    }
}
