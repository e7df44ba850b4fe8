//! Error types shared by the playlist model, storage and controller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by playlist and controller operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed argument (empty title, out-of-range option).
    #[error("invalid value: {0}")]
    Validation(String),

    /// The targeted playlist, index entry or track does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Another playlist or track already uses the requested title.
    #[error("{0} already exists")]
    TitleTaken(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to watch tracks directory: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to start controller service: {0}")]
    Spawn(#[source] io::Error),

    /// The controller service thread is no longer running.
    #[error("controller service is not running")]
    ServiceGone,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by a missing file.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type for playlist and controller operations.
pub type Result<T> = std::result::Result<T, Error>;
