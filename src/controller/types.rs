//! Types shared between the controller, its service thread and the UI layer.

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;

use crate::error::Result;
use crate::library::TrackFile;
use crate::playlist::{ConfigData, Playlist};

/// Receives the track-file listing whenever it actually changes.
pub trait TrackListObserver: Send {
    fn update_file_list(&mut self, files: &[TrackFile], dir: &Path);
}

impl<F> TrackListObserver for F
where
    F: FnMut(&[TrackFile], &Path) + Send,
{
    fn update_file_list(&mut self, files: &[TrackFile], dir: &Path) {
        self(files, dir)
    }
}

/// Changes to apply to an existing playlist. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistEdit {
    pub title: Option<String>,
    pub config: Option<ConfigData>,
}

impl PlaylistEdit {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            config: None,
        }
    }

    pub fn config(config: ConfigData) -> Self {
        Self {
            title: None,
            config: Some(config),
        }
    }
}

/// Completion channel for a mutating command.
pub type Completion = Sender<Result<()>>;

#[derive(Debug)]
pub enum ControllerCmd {
    /// Create a playlist unless one with the same slug exists.
    AddPlaylist {
        title: String,
        config: Option<ConfigData>,
        done: Option<Completion>,
    },
    /// Edit a playlist, creating it when absent.
    EditPlaylist {
        title: String,
        edit: PlaylistEdit,
        done: Option<Completion>,
    },
    RemovePlaylist {
        title: String,
        done: Option<Completion>,
    },
    /// Switch the tracks directory; replies whether the change was accepted.
    SetTracksDir {
        dir: PathBuf,
        reply: Option<Sender<bool>>,
    },
    /// Sorted playlist titles.
    Titles { reply: Sender<Vec<String>> },
    Playlist {
        title: String,
        reply: Sender<Option<Playlist>>,
    },
    TrackFiles { reply: Sender<Vec<TrackFile>> },
    TracksDir { reply: Sender<PathBuf> },
    /// Stop the service thread.
    Shutdown,
}
