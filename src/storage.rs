//! On-disk layout of the data directory and the read-compare-write primitive.
//!
//! Both playlist files and the index file go through [`write_if_changed`], so
//! an unchanged model never touches the disk. Skipping redundant writes keeps
//! file-watch churn and disk I/O down.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

pub const INDEX_FILE: &str = "index.json";
pub const PLAYLIST_SUFFIX: &str = ".playlist.json";
const QUARANTINE_SUFFIX: &str = ".bak";

/// What a save did on disk.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No file existed; one was created.
    Created,
    /// The stored content differed and was replaced.
    Updated,
    /// The stored content already matched; nothing was written.
    Unchanged,
    /// A file under a previous slug was moved to the current one.
    Renamed,
}

/// The directory holding `index.json` and every `<slug>.playlist.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn playlist_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}{PLAYLIST_SUFFIX}"))
    }

    /// Create the directory (and parents) if it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))
    }

    /// List the slugs of every playlist file in the directory, in directory order.
    pub fn playlist_slugs(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.root, e)),
        };

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Unexpected error listing '{}': {e}, skipping", self.root.display());
                    continue;
                }
            };
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(slug) = name.strip_suffix(PLAYLIST_SUFFIX) {
                if !slug.is_empty() && entry.path().is_file() {
                    slugs.push(slug.to_string());
                }
            }
        }
        Ok(slugs)
    }

    /// Move a file that could not be parsed out of the way, keeping its bytes.
    pub fn quarantine(&self, path: &Path) -> Result<PathBuf> {
        let mut target = path.as_os_str().to_owned();
        target.push(QUARANTINE_SUFFIX);
        let target = PathBuf::from(target);
        fs::rename(path, &target).map_err(|e| Error::io(path, e))?;
        warn!("Moved unreadable file '{}' to '{}'", path.display(), target.display());
        Ok(target)
    }
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read and parse a JSON file into an untyped value.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| Error::parse(path, e))
}

/// Serialize `model` and write it to `path` only when the stored document differs.
///
/// The comparison is structural: object keys match regardless of order, arrays
/// compare element by element.
pub fn write_if_changed<T: Serialize>(path: &Path, model: &T) -> Result<SaveOutcome> {
    let current = serde_json::to_value(model).map_err(|e| Error::parse(path, e))?;

    if !path.exists() {
        write_json(path, &current)?;
        debug!("Created '{}'", path.display());
        return Ok(SaveOutcome::Created);
    }

    let stored = read_json(path)?;
    if stored == current {
        debug!("'{}' is up to date, skipping write", path.display());
        return Ok(SaveOutcome::Unchanged);
    }

    write_json(path, &current)?;
    debug!("Updated '{}'", path.display());
    Ok(SaveOutcome::Updated)
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let text = serde_json::to_string(value).map_err(|e| Error::parse(path, e))?;
    fs::write(path, text).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn write_if_changed_creates_then_skips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = json!({ "a": 1, "b": [1, 2] });

        assert_eq!(write_if_changed(&path, &doc).unwrap(), SaveOutcome::Created);
        assert_eq!(write_if_changed(&path, &doc).unwrap(), SaveOutcome::Unchanged);

        let changed = json!({ "a": 2, "b": [1, 2] });
        assert_eq!(write_if_changed(&path, &changed).unwrap(), SaveOutcome::Updated);
    }

    #[test]
    fn structural_comparison_ignores_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, r#"{"b":[1,2],"a":1}"#).unwrap();

        let doc = json!({ "a": 1, "b": [1, 2] });
        assert_eq!(write_if_changed(&path, &doc).unwrap(), SaveOutcome::Unchanged);

        let reordered = json!({ "a": 1, "b": [2, 1] });
        assert_eq!(write_if_changed(&path, &reordered).unwrap(), SaveOutcome::Updated);
    }

    #[test]
    fn malformed_file_is_a_parse_error_and_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "{ not json").unwrap();

        let err = write_if_changed(&path, &json!({})).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn playlist_slugs_lists_only_playlist_files() {
        let dir = tempdir().unwrap();
        let data = DataDir::new(dir.path());
        fs::write(data.playlist_path("rain"), "{}").unwrap();
        fs::write(data.index_path(), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        assert_eq!(data.playlist_slugs().unwrap(), vec!["rain".to_string()]);
    }

    #[test]
    fn playlist_slugs_of_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let data = DataDir::new(dir.path().join("absent"));
        assert!(data.playlist_slugs().unwrap().is_empty());
    }

    #[test]
    fn quarantine_keeps_contents() {
        let dir = tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let path = data.index_path();
        fs::write(&path, "garbage").unwrap();

        let moved = data.quarantine(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(moved, dir.path().join("index.json.bak"));
        assert_eq!(fs::read_to_string(moved).unwrap(), "garbage");
    }
}
