use crate::clipboard::{ImageClipboard, human_size};
use crate::error::{ShotError, ShotResult};
use crate::scanner::latest_image;
use crate::staging::{materialize_clipboard, materialize_file};
use crate::trash::{Backend, Trash};
use crate::types::{
    Candidate, ClipboardCandidate, FileCandidate, Locations, Lookup, Opts, Resolution, Source,
};
use crate::user_dirs::{SearchDir, locate};
use crate::verbose;
use std::time::{Duration, SystemTime};

/// A file modified this recently is a better bet than whatever is on the clipboard.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(30);

/// The clipboard has no timestamp, so the only thing which can beat it is a file we know was
/// written moments ago. A modification time in the future is put down to clock skew, and
/// counts as fresh.
pub fn prefer_file(candidate: &FileCandidate, now: SystemTime) -> bool {
    match now.duration_since(candidate.modified) {
        Ok(age) => age <= FRESHNESS_WINDOW,
        Err(_) => true,
    }
}

#[derive(Debug)]
pub struct Decision {
    pub candidate: Candidate,
    pub reason: &'static str,
}

/// Picks between what the two lookups found. A find on one side beats an error on the other;
/// errors only come out if nothing was found at all, the directory's first.
pub fn arbitrate(
    clipboard: Lookup<ClipboardCandidate>,
    file: Lookup<FileCandidate>,
    now: SystemTime,
) -> ShotResult<Decision> {
    let (candidate, reason) = match (clipboard, file) {
        (Lookup::Found(clip), Lookup::Found(file)) => {
            if prefer_file(&file, now) {
                (Candidate::File(file), "selected file candidate")
            } else {
                (Candidate::Clipboard(clip), "selected clipboard candidate")
            }
        }
        (Lookup::Found(clip), _) => (
            Candidate::Clipboard(clip),
            "selected clipboard candidate (file missing)",
        ),
        (_, Lookup::Found(file)) => (
            Candidate::File(file),
            "selected file candidate (clipboard missing)",
        ),
        (_, Lookup::Failed(e)) | (Lookup::Failed(e), Lookup::NotFound) => return Err(e),
        (Lookup::NotFound, Lookup::NotFound) => return Err(ShotError::NotFound),
    };

    Ok(Decision { candidate, reason })
}

/// Works out which image the user most likely means, and stages it in a temp file.
pub struct Resolver<C> {
    clipboard: C,
    locations: Locations,
    trash_backend: Option<Backend>,
}

impl<C: ImageClipboard> Resolver<C> {
    pub fn new(clipboard: C, locations: Locations) -> Self {
        Self {
            clipboard,
            locations,
            trash_backend: Backend::native(),
        }
    }

    pub fn with_trash_backend(mut self, backend: Option<Backend>) -> Self {
        self.trash_backend = backend;
        self
    }

    pub fn resolve(&mut self, opts: Opts) -> ShotResult<Resolution> {
        let clipboard = self.check_clipboard(opts);

        if opts.clipboard_only {
            return match clipboard {
                Lookup::Found(clip) => {
                    verbose!(opts, "selected clipboard candidate (clipboard-only)");
                    self.stage(Candidate::Clipboard(clip), opts)
                }
                Lookup::Failed(e) => Err(e),
                Lookup::NotFound => Err(ShotError::NotFound),
            };
        }

        let file = self.search_directory(opts);
        let decision = arbitrate(clipboard, file, SystemTime::now())?;

        match &decision.candidate {
            Candidate::File(file) => verbose!(opts, "{}: {}", decision.reason, file.path),
            Candidate::Clipboard(_) => verbose!(opts, "{}", decision.reason),
        }

        self.stage(decision.candidate, opts)
    }

    fn check_clipboard(&mut self, opts: Opts) -> Lookup<ClipboardCandidate> {
        let lookup = Lookup::from(self.clipboard.read_image());

        match &lookup {
            Lookup::Found(clip) => verbose!(
                opts,
                "clipboard holds a {} image",
                human_size(clip.data.len() as u64)
            ),
            Lookup::NotFound => verbose!(opts, "no image on the clipboard"),
            Lookup::Failed(e) => verbose!(opts, "could not read the clipboard: {}", e),
        }

        lookup
    }

    fn search_directory(&self, opts: Opts) -> Lookup<FileCandidate> {
        let search_dir = SearchDir::from_downloads_flag(opts.use_downloads);

        let lookup = Lookup::from(
            self.locations
                .home()
                .and_then(|home| locate(search_dir, home))
                .and_then(|dir| {
                    verbose!(opts, "searching {}", dir);
                    latest_image(&dir)
                }),
        );

        match &lookup {
            Lookup::Found(file) => verbose!(opts, "latest image is {}", file.path),
            Lookup::NotFound => verbose!(opts, "no image found in {:?}", search_dir),
            Lookup::Failed(e) => verbose!(opts, "could not search {:?}: {}", search_dir, e),
        }

        lookup
    }

    fn stage(&self, candidate: Candidate, opts: Opts) -> ShotResult<Resolution> {
        let temp_dir = &self.locations.temp_dir;

        match candidate {
            Candidate::Clipboard(clip) => Ok(Resolution {
                source: Source::Clipboard,
                temp_path: materialize_clipboard(&clip.data, temp_dir)?,
            }),
            Candidate::File(file) => {
                let trash = Trash::new(self.locations.home()?, self.trash_backend);
                let temp_path = materialize_file(&file, opts, temp_dir, &trash)?;

                Ok(Resolution {
                    source: Source::File(file.path),
                    temp_path,
                })
            }
        }
    }
}
