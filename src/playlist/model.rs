use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::config::{Config, ConfigData};
use crate::error::{Error, Result};
use crate::slug::slug;
use crate::storage::{self, DataDir, SaveOutcome};

/// A titled config backed by `<slug>.playlist.json` in the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    title: String,
    slug: String,
    /// Slug of the file that still needs to be renamed, if any.
    old_slug: Option<String>,
    config: Config,
}

/// On-disk shape of a playlist file.
#[derive(Serialize)]
struct PlaylistFile<'a> {
    title: &'a str,
    old_slug: &'a str,
    slug: &'a str,
    config: &'a Config,
}

#[derive(Deserialize)]
struct StoredPlaylist {
    #[serde(default)]
    title: String,
    #[serde(default)]
    config: ConfigData,
}

impl Playlist {
    pub fn new(title: &str, config: Option<&ConfigData>) -> Result<Self> {
        if title.is_empty() {
            warn!("Playlist: expected a non-empty title");
            return Err(Error::Validation("playlist title must be a non-empty string".into()));
        }
        Ok(Self {
            title: title.to_string(),
            slug: slug(title),
            old_slug: None,
            config: config.map(Config::from_data).unwrap_or_default(),
        })
    }

    /// Rebuild a playlist from the contents of its file.
    ///
    /// Only the stored title and config are used; the slug is re-derived.
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        let stored: StoredPlaylist = serde_json::from_str(text).map_err(|e| Error::parse(path, e))?;
        Self::new(&stored.title, Some(&stored.config))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn old_slug(&self) -> Option<&str> {
        self.old_slug.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Retitle the playlist. The first slug left behind since the last save is
    /// remembered so the next save can move the file.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        if title.is_empty() {
            warn!("Playlist: set_title() expects a non-empty title");
            return Err(Error::Validation("playlist title must be a non-empty string".into()));
        }
        if title == self.title {
            return Ok(());
        }
        if self.old_slug.is_none() {
            self.old_slug = Some(self.slug.clone());
        }
        self.title = title.to_string();
        self.slug = slug(title);
        Ok(())
    }

    /// Replace the config with one rebuilt from `data`.
    pub fn set_config(&mut self, data: &ConfigData) {
        self.config = Config::from_data(data);
    }

    /// Mark the playlist as stored under `slug`, so the next save renames that file.
    pub(crate) fn stored_as(&mut self, slug: &str) {
        if slug != self.slug {
            self.old_slug = Some(slug.to_string());
        }
    }

    /// Write the playlist to its file, renaming a file left under a previous
    /// title first. Nothing is written when the stored content already matches.
    ///
    /// A pending rename onto a file that already exists fails with
    /// [`Error::TitleTaken`] and stays pending.
    pub fn save(&mut self, data: &DataDir) -> Result<SaveOutcome> {
        let path = data.playlist_path(&self.slug);

        if let Some(old_slug) = self.old_slug.clone() {
            if old_slug != self.slug && path.exists() {
                warn!(
                    "Not moving playlist '{}': '{}' already exists",
                    self.title,
                    path.display()
                );
                return Err(Error::TitleTaken(format!("playlist file '{}'", path.display())));
            }
            let old_path = data.playlist_path(&old_slug);
            if old_slug != self.slug && old_path.is_file() {
                fs::rename(&old_path, &path).map_err(|e| Error::io(&old_path, e))?;
                info!("Renamed '{}' to '{}'", old_path.display(), path.display());
                self.old_slug = None;
                storage::write_if_changed(&path, &self.to_file())?;
                return Ok(SaveOutcome::Renamed);
            }
            // Nothing to move; this is a first save under the new slug.
            self.old_slug = None;
        }

        storage::write_if_changed(&path, &self.to_file())
    }

    /// Delete the playlist's file.
    pub fn remove(&self, data: &DataDir) -> Result<()> {
        let path = data.playlist_path(&self.slug);
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        info!("Removed '{}'", path.display());
        Ok(())
    }

    /// Return the raw contents of the playlist's file.
    pub fn read(&self, data: &DataDir) -> Result<String> {
        storage::read_text(&data.playlist_path(&self.slug))
    }

    fn to_file(&self) -> PlaylistFile<'_> {
        PlaylistFile {
            title: &self.title,
            old_slug: self.old_slug.as_deref().unwrap_or(""),
            slug: &self.slug,
            config: &self.config,
        }
    }
}
