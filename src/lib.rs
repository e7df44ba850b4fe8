//! Playlist persistence and tracks-directory sync for an ambient audio player.
//!
//! Playlists live as `<slug>.playlist.json` files next to an `index.json` in
//! the data directory. The [`controller::Controller`] keeps them in memory,
//! writes only what changed, and tracks the audio files of a watched
//! directory for the UI.

pub mod config;
pub mod controller;
pub mod error;
pub mod library;
pub mod playlist;
pub mod runtime;
pub mod slug;
pub mod storage;

pub use error::{Error, Result};
