//! Everything screenshot-agent needs to find the user's latest screenshot, whether it is on
//! the clipboard or sitting in Desktop or Downloads, and hand it over as a temp file.
//!
pub mod clipboard;
pub mod error;
pub mod file_ops;
pub mod macros;
pub mod resolver;
pub mod scanner;
pub mod staging;
pub mod trash;
pub mod types;
pub mod undo;
pub mod user_dirs;

#[cfg(test)]
pub mod spec_helper;

pub use clipboard::{ImageClipboard, SystemClipboard};
pub use error::{ShotError, ShotResult};
pub use resolver::Resolver;
pub use types::{Locations, Opts, Resolution, Source};
