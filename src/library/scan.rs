use std::fs;
use std::path::Path;

use log::warn;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::slug::supported_type;

/// A playable file found in the tracks directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackFile {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// List the files of `dir` whose extension is in the configured whitelist.
///
/// Only the directory itself is read (no recursion). Entries come back in
/// directory order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<TrackFile>> {
    let meta = fs::metadata(dir).map_err(|e| Error::io(dir, e))?;
    if !meta.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links);

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Unexpected error when listing '{}': {e}, skipping", dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !settings.include_hidden && is_hidden(name) {
            continue;
        }
        if let Some(file_type) = supported_type(name, &settings.extensions) {
            files.push(TrackFile {
                name: name.to_string(),
                file_type,
            });
        }
    }

    Ok(files)
}
