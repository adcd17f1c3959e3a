use std::{
    path::{Component, Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, Sender, channel},
    },
    time::Duration,
};

use copista::{Event, LoadTicket, Session, SessionError, text::normalize_line_endings};
use derive_more::From;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, From, Error)]
pub enum LibraryError {
    #[error("Failed to read manifest {path}: {error}")]
    #[from(skip)]
    ReadManifest {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {error}")]
    #[from(skip)]
    ParseManifest {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("Failed to read exercise {path}: {error}")]
    #[from(skip)]
    ReadExercise {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Invalid exercise name '{0}'. Names must be relative paths inside the exercises directory")]
    #[from(skip)]
    InvalidName(String),

    #[error("The manifest doesn't list any exercises")]
    Session(SessionError),
}

/// The exercise manifest: `{ "files": ["a.txt", "b.py"] }`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub files: Vec<String>,
}

impl Manifest {
    /// Start a session over the listed files, in manifest order
    pub fn into_session(self) -> Result<Session, LibraryError> {
        Ok(Session::new(self.files)?)
    }
}

/// A directory of exercises
#[derive(Debug, Clone)]
pub struct Library {
    dir: PathBuf,
}

impl Library {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and parse the manifest `file_name`
    pub fn manifest(&self, file_name: &str) -> Result<Manifest, LibraryError> {
        let path = self.dir.join(file_name);

        let contents = std::fs::read_to_string(&path).map_err(|error| {
            LibraryError::ReadManifest {
                path: path.clone(),
                error,
            }
        })?;

        let manifest: Manifest = serde_json::from_str(&contents)
            .map_err(|error| LibraryError::ParseManifest { path, error })?;

        debug!(dir = %self.dir.display(), exercises = manifest.files.len(), "manifest loaded");

        Ok(manifest)
    }

    /// Resolve an exercise name to its file
    ///
    /// Only relative names that stay inside the directory are allowed.
    pub fn exercise_path(&self, name: &str) -> Result<PathBuf, LibraryError> {
        let relative = Path::new(name);
        let valid = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !valid {
            return Err(LibraryError::InvalidName(name.to_string()));
        }

        Ok(self.dir.join(relative))
    }

    /// Read an exercise, with line endings normalized to `\n`
    pub fn read_exercise(&self, name: &str) -> Result<String, LibraryError> {
        let path = self.exercise_path(name)?;

        std::fs::read_to_string(&path)
            .map(|text| normalize_line_endings(&text))
            .map_err(|error| LibraryError::ReadExercise { path, error })
    }
}

/// Cancellation flag shared with a load thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The result of a background load
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<String, String>,
}

impl LoadOutcome {
    /// Turn the outcome into the session event reporting it
    pub fn into_event(self) -> Event {
        match self.result {
            Ok(text) => Event::Loaded {
                ticket: self.ticket,
                text,
            },
            Err(reason) => Event::LoadFailed {
                ticket: self.ticket,
                reason,
            },
        }
    }
}

/// Loads exercises on background threads
///
/// Every call to [`Loader::load`] cancels the load before it. A cancelled load that already
/// finished reading may still be delivered; the session discards it by its ticket.
#[derive(Debug)]
pub struct Loader {
    library: Arc<Library>,
    sender: Sender<LoadOutcome>,
    receiver: Receiver<LoadOutcome>,
    current: Option<CancelToken>,
}

impl Loader {
    pub fn new(library: Library) -> Self {
        let (sender, receiver) = channel();
        Self {
            library: Arc::new(library),
            sender,
            receiver,
            current: None,
        }
    }

    /// Start loading the exercise for `ticket`
    pub fn load(&mut self, ticket: LoadTicket) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }

        let token = CancelToken::default();
        self.current = Some(token.clone());

        let library = Arc::clone(&self.library);
        let sender = self.sender.clone();

        std::thread::spawn(move || {
            let result = library
                .read_exercise(&ticket.name)
                .map_err(|error| error.to_string());

            if token.is_cancelled() {
                trace!(index = ticket.index, "load cancelled");
                return;
            }

            if sender.send(LoadOutcome { ticket, result }).is_err() {
                trace!("loader dropped before the load finished");
            }
        });
    }

    /// A finished load, if there is one
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished load
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
