//! Configuration loader and schema types.
//!
//! This module exposes the settings used to locate the data and tracks
//! directories, filter track files and pick a log level, plus helpers to load
//! them from disk and the environment.

mod load;
mod schema;

pub use load::{default_config_path, default_data_dir, default_tracks_dir, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
