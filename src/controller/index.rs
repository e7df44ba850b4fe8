use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::state::Controller;
use crate::error::{Error, Result};
use crate::playlist::IndexEntry;
use crate::slug::slug;
use crate::storage::{self, SaveOutcome};

/// On-disk shape of `index.json`.
#[derive(Serialize)]
struct IndexFile<'a> {
    entries: &'a [IndexEntry],
    tracks_dir: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredIndex {
    entries: Vec<StoredEntry>,
    tracks_dir: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredEntry {
    title: String,
}

impl Controller {
    pub fn get_index_entry(&self, title: &str) -> Option<&IndexEntry> {
        self.index_position(title).map(|i| &self.index_entries[i])
    }

    fn index_position(&self, title: &str) -> Option<usize> {
        if title.is_empty() {
            return None;
        }
        let slug = slug(title);
        self.index_entries.iter().position(|e| e.slug() == slug)
    }

    /// Record `title` in memory. Returns false when an entry with the same slug exists.
    pub fn add_index_entry(&mut self, title: &str) -> Result<bool> {
        if self.index_position(title).is_some() {
            return Ok(false);
        }
        self.index_entries.push(IndexEntry::new(title)?);
        Ok(true)
    }

    pub fn remove_index_entry(&mut self, title: &str) -> Result<()> {
        match self.index_position(title) {
            Some(i) => {
                self.index_entries.remove(i);
                Ok(())
            }
            None => Err(Error::NotFound(format!("index entry '{title}'"))),
        }
    }

    /// Retitle the entry for `title`, or add one for `new_title` when absent.
    ///
    /// If another entry already carries the new slug, the old entry is dropped
    /// instead so slugs stay unique.
    pub fn edit_index_entry(&mut self, title: &str, new_title: &str) -> Result<()> {
        let Some(i) = self.index_position(title) else {
            self.add_index_entry(new_title)?;
            return Ok(());
        };
        let new_slug = slug(new_title);
        let duplicate = self
            .index_entries
            .iter()
            .enumerate()
            .any(|(j, e)| j != i && e.slug() == new_slug);
        if duplicate {
            self.index_entries.remove(i);
        } else {
            self.index_entries[i].set_title(new_title)?;
        }
        Ok(())
    }

    /// Write `index.json` when it differs from the in-memory index.
    pub fn save_index(&self) -> Result<SaveOutcome> {
        self.data.ensure()?;
        let file = IndexFile {
            entries: &self.index_entries,
            tracks_dir: self.tracks_dir.to_string_lossy().into_owned(),
        };
        storage::write_if_changed(&self.data.index_path(), &file)
    }

    /// Read `index.json` into memory.
    ///
    /// A missing file means a fresh data directory. An unreadable one is moved
    /// aside and the index starts empty; reconciliation rebuilds it from the
    /// playlist files.
    pub(super) fn load_index(&mut self) -> Result<()> {
        self.data.ensure()?;
        let path = self.data.index_path();

        let text = match storage::read_text(&path) {
            Ok(text) => text,
            Err(e) if e.is_missing_file() => {
                info!("No index at '{}', starting empty", path.display());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let stored: StoredIndex = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("{}", Error::parse(&path, e));
                self.data.quarantine(&path)?;
                return Ok(());
            }
        };

        for entry in stored.entries {
            if entry.title.is_empty() {
                warn!("Skipping index entry with an empty title");
                continue;
            }
            if !self.add_index_entry(&entry.title)? {
                warn!("Skipping duplicate index entry '{}'", entry.title);
            }
        }
        if !stored.tracks_dir.is_empty() {
            self.tracks_dir = PathBuf::from(stored.tracks_dir);
        }
        info!(
            "Loaded {} index entries from '{}'",
            self.index_entries.len(),
            path.display()
        );
        Ok(())
    }
}
