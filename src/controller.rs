//! Playlist controller: owns playlists, the index and the tracks listing.
//!
//! [`Controller`] is a plain synchronous state holder; [`ControllerService`]
//! runs one on a dedicated thread and hands out cloneable
//! [`ControllerHandle`]s for the UI layer.

mod index;
mod service;
mod startup;
mod state;
mod tracks;
mod types;

pub use service::{ControllerHandle, ControllerService, SERVICE_THREAD};
pub use state::Controller;
pub use types::{Completion, ControllerCmd, PlaylistEdit, TrackListObserver};
