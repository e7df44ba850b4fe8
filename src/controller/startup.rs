use log::{error, info, warn};

use super::state::Controller;
use crate::error::{Error, Result};
use crate::playlist::{ConfigData, Playlist};
use crate::storage;

impl Controller {
    /// Load persisted state and begin watching the tracks directory.
    ///
    /// Runs in order: index, playlists named by the index, orphaned playlist
    /// files, tracks. Failures are logged and startup carries on with
    /// whatever could be loaded.
    pub fn start(&mut self) {
        if let Err(e) = self.load_index() {
            error!("Failed to load index: {e}");
        }
        self.hydrate_playlists();
        if let Err(e) = self.reconcile_playlists() {
            error!("Failed to reconcile playlist files: {e}");
        }
        if let Err(e) = self.init_tracks() {
            warn!("Failed to load tracks from '{}': {e}", self.tracks_dir.display());
        }
        info!(
            "Controller started with {} playlists and {} tracks",
            self.playlists.len(),
            self.track_files.len()
        );
    }

    fn hydrate_playlists(&mut self) {
        let entries: Vec<(String, String)> = self
            .index_entries
            .iter()
            .map(|e| (e.title().to_string(), e.slug().to_string()))
            .collect();

        for (title, slug) in entries {
            if self.get_playlist(&title).is_some() {
                continue;
            }
            let path = self.data.playlist_path(&slug);

            let loaded = storage::read_text(&path).and_then(|text| Playlist::from_json(&text, &path));
            match loaded {
                Ok(mut playlist) if playlist.slug() == slug => {
                    if playlist.title() != title {
                        warn!(
                            "'{}' is titled '{}', restoring it as '{title}'",
                            path.display(),
                            playlist.title()
                        );
                        let retitled = playlist
                            .set_title(&title)
                            .and_then(|()| playlist.save(&self.data));
                        if let Err(e) = retitled {
                            error!("Failed to save playlist '{title}': {e}");
                        }
                    }
                    self.playlists.push(playlist);
                }
                Ok(stored) => {
                    warn!(
                        "'{}' holds playlist '{}', restoring it as '{title}'",
                        path.display(),
                        stored.title()
                    );
                    let config = ConfigData::from(stored.config());
                    match Playlist::new(&title, Some(&config)) {
                        Ok(mut playlist) => {
                            if let Err(e) = playlist.save(&self.data) {
                                error!("Failed to save playlist '{title}': {e}");
                            }
                            self.playlists.push(playlist);
                        }
                        Err(e) => error!("Failed to restore playlist '{title}': {e}"),
                    }
                }
                Err(e) if e.is_missing_file() => {
                    info!("Playlist '{title}' has no file, creating one");
                    self.recreate_playlist(&title);
                }
                Err(e @ (Error::Parse { .. } | Error::Validation(_))) => {
                    warn!("{e}");
                    if let Err(e) = self.data.quarantine(&path) {
                        error!("Failed to set aside '{}': {e}", path.display());
                        self.keep_unsaved(&title);
                        continue;
                    }
                    self.recreate_playlist(&title);
                }
                Err(e) => {
                    error!("Failed to read playlist '{title}': {e}");
                    self.keep_unsaved(&title);
                }
            }
        }
    }

    fn recreate_playlist(&mut self, title: &str) {
        if let Err(e) = self.add_playlist(title, None) {
            error!("Failed to recreate playlist '{title}': {e}");
        }
    }

    /// Keep an indexed playlist in memory without touching its unreadable file.
    fn keep_unsaved(&mut self, title: &str) {
        match Playlist::new(title, None) {
            Ok(playlist) => self.playlists.push(playlist),
            Err(e) => error!("Failed to restore playlist '{title}': {e}"),
        }
    }

    /// Adopt playlist files that no index entry points at.
    fn reconcile_playlists(&mut self) -> Result<()> {
        let mut adopted = false;

        for file_slug in self.data.playlist_slugs()? {
            if self.playlists.iter().any(|p| p.slug() == file_slug) {
                continue;
            }
            let path = self.data.playlist_path(&file_slug);
            let mut playlist = match storage::read_text(&path)
                .and_then(|text| Playlist::from_json(&text, &path))
            {
                Ok(playlist) => playlist,
                Err(e) => {
                    warn!("Not adopting '{}': {e}", path.display());
                    continue;
                }
            };

            if self.get_playlist(playlist.title()).is_some() {
                warn!(
                    "Not adopting '{}': playlist '{}' already exists",
                    path.display(),
                    playlist.title()
                );
                continue;
            }

            playlist.stored_as(&file_slug);
            if playlist.old_slug().is_some() {
                let target = self.data.playlist_path(playlist.slug());
                if target.exists() {
                    warn!(
                        "Not adopting '{}': '{}' already exists",
                        path.display(),
                        target.display()
                    );
                    continue;
                }
                if let Err(e) = playlist.save(&self.data) {
                    error!("Failed to move '{}': {e}", path.display());
                    continue;
                }
            }

            info!("Adopted orphaned playlist '{}'", playlist.title());
            self.add_index_entry(playlist.title())?;
            self.playlists.push(playlist);
            adopted = true;
        }

        if adopted {
            self.save_index()?;
        }
        Ok(())
    }
}
