//! Playlist model: tracks, configs, playlists and index entries.
//!
//! A [`Playlist`] owns a [`Config`] of [`Track`]s and knows how to persist
//! itself as `<slug>.playlist.json`. [`IndexEntry`] is the lightweight record
//! the controller keeps in `index.json` for each playlist.

mod config;
mod index;
mod model;
mod track;

pub use config::{Config, ConfigData};
pub use index::IndexEntry;
pub use model::Playlist;
pub use track::{Track, TrackData, TrackOptions, TrackOptionsPatch};
