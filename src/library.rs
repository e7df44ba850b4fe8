//! Track directory listing and watching.
//!
//! `scan` lists the supported audio files of the tracks directory; `watch`
//! keeps a `notify` subscription on it and forwards change events.

mod scan;
mod watch;

pub use scan::{TrackFile, scan};
pub use watch::{TrackWatch, WatchEvent};

#[cfg(test)]
mod tests;
