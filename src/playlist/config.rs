use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::track::{Track, TrackData, TrackOptionsPatch};
use crate::error::{Error, Result};

/// A playlist's ordered track list plus its master volume.
///
/// Titles are unique within a config; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    volume: f64,
    tracks: Vec<Track>,
}

/// Raw config data as found on disk or handed over by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    pub tracks: Vec<TrackData>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: 1.0,
            tracks: Vec::new(),
        }
    }
}

impl Config {
    /// Build a config from raw data, normalizing volume and the track list.
    ///
    /// Each track's directory is recovered from its stored `src`. Tracks with
    /// an empty or duplicate title are dropped.
    pub fn from_data(data: &ConfigData) -> Self {
        let mut config = Self::default();
        if let Some(volume) = data.volume {
            let _ = config.set_volume(volume);
        }
        for t in &data.tracks {
            let _ = config.add_track(&t.title, Some(t.src_dir()), t.options.as_ref());
        }
        config
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&volume) {
            warn!("Config: volume {volume} is outside [0,1], keeping {}", self.volume);
            return Err(Error::Validation(format!("config volume {volume} is outside [0,1]")));
        }
        self.volume = volume;
        Ok(())
    }

    pub fn get_track(&self, title: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.title() == title)
    }

    pub fn get_track_mut(&mut self, title: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.title() == title)
    }

    /// Append a track. A track with the same title already present wins.
    pub fn add_track(
        &mut self,
        title: &str,
        dir: Option<&str>,
        options: Option<&TrackOptionsPatch>,
    ) -> Result<()> {
        if title.is_empty() {
            warn!("Config: add_track() expects a non-empty title");
            return Err(Error::Validation("track title must be a non-empty string".into()));
        }
        if self.get_track(title).is_some() {
            debug!("Config: track '{title}' already present");
            return Ok(());
        }
        self.tracks.push(Track::new(title, dir, options)?);
        Ok(())
    }

    pub fn remove_track(&mut self, title: &str) -> Result<()> {
        match self.tracks.iter().position(|t| t.title() == title) {
            Some(i) => {
                self.tracks.remove(i);
                Ok(())
            }
            None => {
                warn!("Config: attempted to remove non-existent track '{title}'");
                Err(Error::NotFound(format!("track '{title}'")))
            }
        }
    }

    /// Update an existing track's options, or add it when absent.
    pub fn edit_track(
        &mut self,
        title: &str,
        dir: Option<&str>,
        options: Option<&TrackOptionsPatch>,
    ) -> Result<()> {
        if title.is_empty() {
            warn!("Config: edit_track() expects a non-empty title");
            return Err(Error::Validation("track title must be a non-empty string".into()));
        }
        match self.get_track_mut(title) {
            Some(track) => {
                track.set_title(title)?;
                if let Some(patch) = options {
                    track.set_options(patch);
                }
                Ok(())
            }
            None => self.add_track(title, dir, options),
        }
    }

    /// Retitle a track, refusing titles already held by another track.
    pub fn rename_track(&mut self, from: &str, to: &str) -> Result<()> {
        if to.is_empty() {
            warn!("Config: rename_track() expects a non-empty title");
            return Err(Error::Validation("track title must be a non-empty string".into()));
        }
        if from == to {
            return Ok(());
        }
        if self.get_track(to).is_some() {
            warn!("Config: track '{to}' already exists, not renaming '{from}'");
            return Err(Error::TitleTaken(format!("track '{to}'")));
        }
        match self.get_track_mut(from) {
            Some(track) => {
                let dir = TrackData::from(&*track).src_dir().to_string();
                track.set_title(to)?;
                track.set_src(&dir);
                Ok(())
            }
            None => {
                warn!("Config: attempted to rename non-existent track '{from}'");
                Err(Error::NotFound(format!("track '{from}'")))
            }
        }
    }
}

impl From<&Config> for ConfigData {
    fn from(c: &Config) -> Self {
        Self {
            volume: Some(c.volume),
            tracks: c.tracks.iter().map(TrackData::from).collect(),
        }
    }
}
