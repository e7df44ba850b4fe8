use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use log::{debug, error, info, warn};

use super::state::Controller;
use super::types::{Completion, ControllerCmd, PlaylistEdit};
use crate::error::{Error, Result};
use crate::library::TrackFile;
use crate::playlist::{ConfigData, Playlist};

pub const SERVICE_THREAD: &str = "weaver-controller";

/// Runs a [`Controller`] on its own thread.
pub struct ControllerService;

impl ControllerService {
    /// Move `controller` onto a service thread, start it, and return a handle to it.
    ///
    /// Commands are handled one at a time in the order they were sent,
    /// interleaved with changes reported by the tracks watch.
    pub fn spawn(controller: Controller) -> Result<ControllerHandle> {
        let (tx, rx) = unbounded::<ControllerCmd>();
        let join = thread::Builder::new()
            .name(SERVICE_THREAD.to_string())
            .spawn(move || run(controller, rx))
            .map_err(Error::Spawn)?;
        Ok(ControllerHandle {
            tx,
            join: Arc::new(Mutex::new(Some(join))),
        })
    }
}

fn run(mut controller: Controller, rx: Receiver<ControllerCmd>) {
    controller.start();
    let watch_rx = controller.watch_events();

    loop {
        select! {
            recv(rx) -> cmd => match cmd {
                Ok(ControllerCmd::Shutdown) | Err(_) => break,
                Ok(cmd) => handle(&mut controller, cmd),
            },
            recv(watch_rx) -> event => {
                // The controller holds a sender, so this side never disconnects.
                let Ok(event) = event else { continue };
                if let Err(e) = controller.handle_watch_event(event) {
                    warn!("Failed to rescan '{}': {e}", controller.tracks_dir().display());
                }
            }
        }
    }
    info!("Controller service stopped");
}

fn handle(controller: &mut Controller, cmd: ControllerCmd) {
    match cmd {
        ControllerCmd::AddPlaylist { title, config, done } => {
            let result = controller.add_playlist(&title, config.as_ref());
            complete(done, "add_playlist", result);
        }
        ControllerCmd::EditPlaylist { title, edit, done } => {
            let result = controller.edit_playlist(&title, &edit);
            complete(done, "edit_playlist", result);
        }
        ControllerCmd::RemovePlaylist { title, done } => {
            let result = controller.remove_playlist(&title);
            complete(done, "remove_playlist", result);
        }
        ControllerCmd::SetTracksDir { dir, reply } => {
            let accepted = controller.set_tracks_dir(&dir);
            if let Some(reply) = reply {
                let _ = reply.send(accepted);
            }
        }
        ControllerCmd::Titles { reply } => {
            let _ = reply.send(controller.titles());
        }
        ControllerCmd::Playlist { title, reply } => {
            let _ = reply.send(controller.get_playlist(&title).cloned());
        }
        ControllerCmd::TrackFiles { reply } => {
            let _ = reply.send(controller.track_files().to_vec());
        }
        ControllerCmd::TracksDir { reply } => {
            let _ = reply.send(controller.tracks_dir().to_path_buf());
        }
        ControllerCmd::Shutdown => {}
    }
}

/// Deliver `result` to the caller, or log it when nobody is listening.
fn complete(done: Option<Completion>, op: &str, result: Result<()>) {
    match done {
        Some(done) => {
            if let Err(unsent) = done.send(result) {
                if let Err(e) = unsent.into_inner() {
                    error!("{op} failed: {e}");
                }
            }
        }
        None => match result {
            Ok(()) => debug!("{op} done"),
            Err(e) => error!("{op} failed: {e}"),
        },
    }
}

/// Cloneable access to a running controller service.
#[derive(Clone)]
pub struct ControllerHandle {
    tx: Sender<ControllerCmd>,
    join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ControllerHandle {
    pub fn send(&self, cmd: ControllerCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| Error::ServiceGone)
    }

    /// Queue a new playlist; the receiver yields the outcome.
    pub fn add_playlist(&self, title: &str, config: Option<ConfigData>) -> Result<Receiver<Result<()>>> {
        let (done, rx) = bounded(1);
        self.send(ControllerCmd::AddPlaylist {
            title: title.to_string(),
            config,
            done: Some(done),
        })?;
        Ok(rx)
    }

    pub fn edit_playlist(&self, title: &str, edit: PlaylistEdit) -> Result<Receiver<Result<()>>> {
        let (done, rx) = bounded(1);
        self.send(ControllerCmd::EditPlaylist {
            title: title.to_string(),
            edit,
            done: Some(done),
        })?;
        Ok(rx)
    }

    pub fn remove_playlist(&self, title: &str) -> Result<Receiver<Result<()>>> {
        let (done, rx) = bounded(1);
        self.send(ControllerCmd::RemovePlaylist {
            title: title.to_string(),
            done: Some(done),
        })?;
        Ok(rx)
    }

    /// Switch the tracks directory and wait for the answer.
    pub fn set_tracks_dir(&self, dir: impl Into<PathBuf>) -> Result<bool> {
        let (reply, rx) = bounded(1);
        self.send(ControllerCmd::SetTracksDir {
            dir: dir.into(),
            reply: Some(reply),
        })?;
        rx.recv().map_err(|_| Error::ServiceGone)
    }

    pub fn titles(&self) -> Result<Vec<String>> {
        let (reply, rx) = bounded(1);
        self.send(ControllerCmd::Titles { reply })?;
        rx.recv().map_err(|_| Error::ServiceGone)
    }

    pub fn playlist(&self, title: &str) -> Result<Option<Playlist>> {
        let (reply, rx) = bounded(1);
        self.send(ControllerCmd::Playlist {
            title: title.to_string(),
            reply,
        })?;
        rx.recv().map_err(|_| Error::ServiceGone)
    }

    pub fn track_files(&self) -> Result<Vec<TrackFile>> {
        let (reply, rx) = bounded(1);
        self.send(ControllerCmd::TrackFiles { reply })?;
        rx.recv().map_err(|_| Error::ServiceGone)
    }

    pub fn tracks_dir(&self) -> Result<PathBuf> {
        let (reply, rx) = bounded(1);
        self.send(ControllerCmd::TracksDir { reply })?;
        rx.recv().map_err(|_| Error::ServiceGone)
    }

    /// Stop the service and wait for its thread to exit.
    pub fn shutdown(&self) {
        let _ = self.send(ControllerCmd::Shutdown);
        self.join();
    }

    /// Wait for the service thread to exit without asking it to stop.
    pub fn join(&self) {
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
