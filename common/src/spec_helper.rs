use crate::clipboard::ImageClipboard;
use crate::error::{ShotError, ShotResult};
use crate::types::{ClipboardCandidate, Locations};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::{Utf8TempDir, tempdir};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::io;
use std::time::{Duration, SystemTime};

/// Stands in for the system clipboard.
pub enum FakeClipboard {
    Image(Vec<u8>),
    Empty,
    Broken,
}

impl ImageClipboard for FakeClipboard {
    fn read_image(&mut self) -> ShotResult<ClipboardCandidate> {
        match self {
            FakeClipboard::Image(data) => Ok(ClipboardCandidate { data: data.clone() }),
            FakeClipboard::Empty => Err(ShotError::NotFound),
            FakeClipboard::Broken => Err(ShotError::Clipboard("no display".to_string())),
        }
    }
}

/// Writes a file whose mtime is `age` before now.
pub fn write_image(dir: &Utf8Path, name: &str, content: &[u8], age: Duration) -> Utf8PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    set_age(&path, age);
    path
}

pub fn set_age(path: &Utf8Path, age: Duration) {
    let mtime = SystemTime::now() - age;
    set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

pub fn set_future(path: &Utf8Path, ahead: Duration) {
    let mtime = SystemTime::now() + ahead;
    set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

/// A throwaway home directory with Desktop and Downloads, and a separate temp directory.
pub struct ScratchHome {
    pub root: Utf8TempDir,
    pub locations: Locations,
}

impl ScratchHome {
    pub fn new() -> Self {
        let root = tempdir().unwrap();
        let home = root.path().join("home");
        let temp_dir = root.path().join("tmp");

        for dir in [home.join("Desktop"), home.join("Downloads"), temp_dir.clone()] {
            fs::create_dir_all(dir).unwrap();
        }

        Self {
            root,
            locations: Locations {
                home: Some(home),
                temp_dir,
            },
        }
    }

    pub fn home(&self) -> &Utf8Path {
        self.locations.home.as_deref().unwrap()
    }

    pub fn desktop(&self) -> Utf8PathBuf {
        self.home().join("Desktop")
    }

    pub fn downloads(&self) -> Utf8PathBuf {
        self.home().join("Downloads")
    }

    pub fn trash_files(&self) -> Utf8PathBuf {
        self.home().join(".local/share/Trash/files")
    }

    pub fn temp_files(&self) -> Vec<Utf8PathBuf> {
        match fs::read_dir(&self.locations.temp_dir) {
            Ok(entries) => entries
                .map(|e| Utf8PathBuf::from_path_buf(e.unwrap().path()).unwrap())
                .collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => panic!("{}", e),
        }
    }
}
