use std::path::Path;

use log::{debug, error, info, warn};

use super::state::Controller;
use crate::error::Result;
use crate::library::{TrackFile, TrackWatch, WatchEvent, scan};

impl Controller {
    /// Switch to a new tracks directory.
    ///
    /// Returns false when `dir` is empty or already current. Otherwise the old
    /// watch is torn down, the new directory is scanned and watched, and the
    /// index is saved so the choice survives a restart. The observer hears
    /// about the new directory exactly once, even when its listing matches
    /// the old one.
    pub fn set_tracks_dir(&mut self, dir: &Path) -> bool {
        if dir.as_os_str().is_empty() || dir == self.tracks_dir {
            return false;
        }

        info!("Tracks directory set to '{}'", dir.display());
        self.tracks_dir = dir.to_path_buf();
        self.stop_watch();
        self.track_files.clear();

        let changed = self.rescan_tracks().unwrap_or_else(|e| {
            warn!("Failed to load tracks from '{}': {e}", dir.display());
            false
        });
        if !changed {
            self.observer
                .update_file_list(&self.track_files, &self.tracks_dir);
        }
        if let Err(e) = self.start_watch() {
            warn!("Failed to watch '{}': {e}", dir.display());
        }
        if let Err(e) = self.save_index() {
            error!("Failed to save index: {e}");
        }
        true
    }

    /// Scan the tracks directory, then watch it for changes.
    pub(super) fn init_tracks(&mut self) -> Result<()> {
        self.rescan_tracks()?;
        self.start_watch()
    }

    fn start_watch(&mut self) -> Result<()> {
        self.watch_generation += 1;
        let watch = TrackWatch::start(&self.tracks_dir, self.watch_generation, self.watch_tx.clone())?;
        self.track_watch = Some(watch);
        Ok(())
    }

    pub(super) fn stop_watch(&mut self) {
        self.track_watch = None;
    }

    /// Re-read the tracks directory. Returns whether the listing changed.
    ///
    /// The observer is only told about listings that differ from the current
    /// one. An unreadable directory empties the listing.
    pub fn rescan_tracks(&mut self) -> Result<bool> {
        match scan(&self.tracks_dir, &self.library) {
            Ok(files) => Ok(self.replace_track_files(files)),
            Err(e) => {
                self.replace_track_files(Vec::new());
                Err(e)
            }
        }
    }

    /// React to a change in the watched directory.
    ///
    /// Events from a watch that has since been replaced are ignored.
    pub fn handle_watch_event(&mut self, event: WatchEvent) -> Result<bool> {
        let current = self.track_watch.as_ref().map(TrackWatch::generation);
        if current != Some(event.generation) {
            debug!("Ignoring stale watch event (generation {})", event.generation);
            return Ok(false);
        }
        self.rescan_tracks()
    }

    fn replace_track_files(&mut self, files: Vec<TrackFile>) -> bool {
        if files == self.track_files {
            debug!("Track listing of '{}' unchanged", self.tracks_dir.display());
            return false;
        }
        self.track_files = files;
        self.observer
            .update_file_list(&self.track_files, &self.tracks_dir);
        true
    }
}
