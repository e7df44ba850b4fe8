use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, info, warn};

use super::types::{PlaylistEdit, TrackListObserver};
use crate::config::{LibrarySettings, Settings};
use crate::error::{Error, Result};
use crate::library::{TrackFile, TrackWatch, WatchEvent};
use crate::playlist::{ConfigData, IndexEntry, Playlist};
use crate::slug::slug;
use crate::storage::DataDir;

/// Owns every playlist, the index entries that mirror them, and the live
/// listing of the tracks directory.
///
/// Index entries and playlists are both unique by slug. The two collections
/// are kept in step eventually: a failed write can leave one side behind
/// until the next startup reconciles them.
pub struct Controller {
    pub(super) data: DataDir,
    pub(super) library: LibrarySettings,
    pub(super) index_entries: Vec<IndexEntry>,
    pub(super) playlists: Vec<Playlist>,
    pub(super) track_files: Vec<TrackFile>,
    pub(super) tracks_dir: PathBuf,
    pub(super) track_watch: Option<TrackWatch>,
    pub(super) watch_generation: u64,
    pub(super) watch_tx: Sender<WatchEvent>,
    pub(super) watch_rx: Receiver<WatchEvent>,
    pub(super) observer: Box<dyn TrackListObserver>,
}

impl Controller {
    /// Create an empty controller. Nothing is read until [`Controller::start`].
    ///
    /// Changes in the tracks directory arrive on [`Controller::watch_events`];
    /// feed them back through [`Controller::handle_watch_event`].
    pub fn new(data: DataDir, library: LibrarySettings, observer: Box<dyn TrackListObserver>) -> Self {
        let tracks_dir = library.tracks_dir.clone();
        let (watch_tx, watch_rx) = unbounded();
        Self {
            data,
            library,
            index_entries: Vec::new(),
            playlists: Vec::new(),
            track_files: Vec::new(),
            tracks_dir,
            track_watch: None,
            watch_generation: 0,
            watch_tx,
            watch_rx,
            observer,
        }
    }

    pub fn from_settings(settings: &Settings, observer: Box<dyn TrackListObserver>) -> Self {
        Self::new(
            DataDir::new(&settings.storage.data_dir),
            settings.library.clone(),
            observer,
        )
    }

    /// Receiver for change notifications from the current tracks watch.
    pub fn watch_events(&self) -> Receiver<WatchEvent> {
        self.watch_rx.clone()
    }

    pub fn data_dir(&self) -> &DataDir {
        &self.data
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn index_entries(&self) -> &[IndexEntry] {
        &self.index_entries
    }

    pub fn track_files(&self) -> &[TrackFile] {
        &self.track_files
    }

    pub fn tracks_dir(&self) -> &Path {
        &self.tracks_dir
    }

    pub fn track_watch(&self) -> Option<&TrackWatch> {
        self.track_watch.as_ref()
    }

    /// Sorted titles of the owned index entries; this is the display order.
    pub fn titles(&self) -> Vec<String> {
        Self::titles_of(&self.index_entries)
    }

    /// Sorted titles of `entries`.
    pub fn titles_of(entries: &[IndexEntry]) -> Vec<String> {
        let mut titles: Vec<String> = entries.iter().map(|e| e.title().to_string()).collect();
        titles.sort();
        titles
    }

    pub fn get_playlist(&self, title: &str) -> Option<&Playlist> {
        self.playlist_position(title).map(|i| &self.playlists[i])
    }

    pub(super) fn playlist_position(&self, title: &str) -> Option<usize> {
        if title.is_empty() {
            return None;
        }
        let slug = slug(title);
        self.playlists.iter().position(|p| p.slug() == slug)
    }

    /// Create and persist a playlist, then record it in the index.
    ///
    /// Does nothing when a playlist with the same slug exists. The index entry
    /// is written even if the playlist file could not be saved; the first
    /// error is returned.
    pub fn add_playlist(&mut self, title: &str, config: Option<&ConfigData>) -> Result<()> {
        if title.is_empty() {
            warn!("Controller: add_playlist() expects a non-empty title");
            return Err(Error::Validation("playlist title must be a non-empty string".into()));
        }
        if self.get_playlist(title).is_some() {
            debug!("Playlist '{title}' already exists");
            return Ok(());
        }

        let mut playlist = Playlist::new(title, config)?;
        let saved = playlist.save(&self.data);
        self.playlists.push(playlist);
        info!("Added playlist '{title}'");

        self.add_index_entry(title)?;
        let indexed = self.save_index();

        match (saved, indexed) {
            (Err(e), Err(index_err)) => {
                error!("Failed to save index after playlist '{title}' failed: {index_err}");
                Err(e)
            }
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Ok(_), Ok(_)) => Ok(()),
        }
    }

    /// Drop a playlist's index entry, delete its file and forget it.
    pub fn remove_playlist(&mut self, title: &str) -> Result<()> {
        if self.playlist_position(title).is_none() {
            warn!("Controller: attempted to remove non-existent playlist '{title}'");
            return Err(Error::NotFound(format!("playlist '{title}'")));
        }

        if let Err(e) = self.remove_index_entry(title) {
            debug!("No index entry to drop for '{title}': {e}");
        }

        let slug = slug(title);
        let data = &self.data;
        let mut removed = Ok(());
        self.playlists.retain(|p| {
            if p.slug() != slug {
                return true;
            }
            match p.remove(data) {
                Ok(()) => {}
                Err(e) if e.is_missing_file() => {
                    warn!("Playlist '{}' had no file to delete", p.title());
                }
                Err(e) => {
                    if removed.is_ok() {
                        removed = Err(e);
                    }
                }
            }
            false
        });
        info!("Removed playlist '{title}'");

        let indexed = self.save_index();
        removed.and(indexed.map(|_| ()))
    }

    /// Apply `edit` to a playlist, or create it when absent.
    ///
    /// A new title is refused when another playlist or an unindexed file
    /// already uses its slug; a config change in the same edit is still saved.
    /// Any applied change is written with exactly one save.
    pub fn edit_playlist(&mut self, title: &str, edit: &PlaylistEdit) -> Result<()> {
        if title.is_empty() {
            warn!("Controller: edit_playlist() expects a non-empty title");
            return Err(Error::Validation("playlist title must be a non-empty string".into()));
        }
        let Some(pos) = self.playlist_position(title) else {
            return self.add_playlist(title, edit.config.as_ref());
        };

        let mut changed = false;
        let mut refused = None;

        if let Some(config) = &edit.config {
            self.playlists[pos].set_config(config);
            changed = true;
        }

        let mut new_title = None;
        if let Some(wanted) = edit.title.as_deref().filter(|t| !t.is_empty()) {
            let wanted_slug = slug(wanted);
            let holder = self.playlists.iter().position(|p| p.slug() == wanted_slug);
            let stray_file = wanted_slug != self.playlists[pos].slug()
                && self.data.playlist_path(&wanted_slug).exists();
            match holder {
                Some(i) if i != pos => {
                    warn!("Playlist '{wanted}' already exists, not renaming '{title}'");
                    refused = Some(Error::TitleTaken(format!("playlist '{wanted}'")));
                }
                _ if stray_file => {
                    warn!("A file for '{wanted}' already exists, not renaming '{title}'");
                    refused = Some(Error::TitleTaken(format!("playlist file for '{wanted}'")));
                }
                _ if self.playlists[pos].title() != wanted => {
                    self.playlists[pos].set_title(wanted)?;
                    new_title = Some(wanted);
                }
                _ => {}
            }
        }

        let mut saved = Ok(());
        if changed || new_title.is_some() {
            saved = self.playlists[pos].save(&self.data).map(|_| ());
        }

        let mut indexed = Ok(());
        if let Some(new_title) = new_title {
            self.edit_index_entry(title, new_title)?;
            info!("Renamed playlist '{title}' to '{new_title}'");
            indexed = self.save_index().map(|_| ());
        }

        match refused {
            Some(e) => Err(e),
            None => saved.and(indexed),
        }
    }
}
