use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::Result;

/// Something changed in the watched directory.
///
/// Events carry no per-file detail, only the generation of the watch that
/// produced them, so receivers can drop events from a replaced watch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub generation: u64,
}

/// An active subscription on the tracks directory. Dropping it stops the watch.
pub struct TrackWatch {
    _watcher: RecommendedWatcher,
    dir: PathBuf,
    generation: u64,
}

impl TrackWatch {
    /// Start watching `dir`, forwarding every event as a [`WatchEvent`] on `tx`.
    pub fn start(dir: &Path, generation: u64, tx: Sender<WatchEvent>) -> Result<Self> {
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    debug!("Tracks directory event: {:?}", event.kind);
                    // The receiver is gone once the controller shuts down.
                    let _ = tx.send(WatchEvent { generation });
                }
                Err(e) => warn!("Tracks directory watch error: {e}"),
            })?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Now watching: {}", dir.display());

        Ok(Self {
            _watcher: watcher,
            dir: dir.to_path_buf(),
            generation,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TrackWatch {
    fn drop(&mut self) {
        info!("Stopped watching: {}", self.dir.display());
    }
}

impl std::fmt::Debug for TrackWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackWatch")
            .field("dir", &self.dir)
            .field("generation", &self.generation)
            .finish()
    }
}
