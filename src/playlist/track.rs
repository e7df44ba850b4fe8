use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::slug::file_type;

/// Playback options of a single track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackOptions {
    /// Track volume in `[0, 1]`.
    pub volume: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Seconds to wait before the track starts.
    pub delay: f64,
    /// Length of the track in seconds.
    pub duration: f64,
    pub start_point: f64,
    pub end_point: f64,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: true,
            delay: 20.0,
            duration: 0.0,
            start_point: 0.0,
            end_point: 0.0,
        }
    }
}

/// A partial set of options; absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackOptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point: Option<f64>,
}

impl From<&TrackOptions> for TrackOptionsPatch {
    fn from(o: &TrackOptions) -> Self {
        Self {
            volume: Some(o.volume),
            looping: Some(o.looping),
            delay: Some(o.delay),
            duration: Some(o.duration),
            start_point: Some(o.start_point),
            end_point: Some(o.end_point),
        }
    }
}

/// Raw track data as found on disk or handed over by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackData {
    pub title: String,
    pub src: String,
    pub options: Option<TrackOptionsPatch>,
}

impl TrackData {
    /// The directory part of `src`, recovered by stripping `"/" + title`.
    pub fn src_dir(&self) -> &str {
        self.src
            .strip_suffix(self.title.as_str())
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or("")
    }
}

/// One audio file of a playlist and its playback options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    title: String,
    file_type: String,
    src: String,
    options: TrackOptions,
}

impl Track {
    /// Create a track titled after its file name, optionally located in `dir`.
    pub fn new(title: &str, dir: Option<&str>, options: Option<&TrackOptionsPatch>) -> Result<Self> {
        let mut track = Self {
            title: String::new(),
            file_type: String::new(),
            src: String::new(),
            options: TrackOptions::default(),
        };
        track.set_title(title)?;
        if let Some(patch) = options {
            track.set_options(patch);
        }
        if let Some(dir) = dir {
            track.set_src(dir);
        }
        Ok(track)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn options(&self) -> &TrackOptions {
        &self.options
    }

    /// Set the title and re-derive the file type from its extension.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        if title.is_empty() {
            warn!("Track: set_title() expects a non-empty title");
            return Err(reject("track title must be a non-empty string"));
        }
        self.title = title.to_string();
        self.file_type = file_type(title).to_string();
        Ok(())
    }

    /// Apply every present field of `patch` through its validated setter.
    ///
    /// Invalid fields are logged and skipped; valid ones still apply. When the
    /// patch carries a duration but no end point, the end point follows the
    /// duration.
    pub fn set_options(&mut self, patch: &TrackOptionsPatch) {
        let results = [
            patch.volume.map(|v| self.set_volume(v)),
            patch.looping.map(|v| {
                self.set_loop(v);
                Ok(())
            }),
            patch.delay.map(|v| self.set_delay(v)),
            patch.duration.map(|v| self.set_duration(v)),
            patch.start_point.map(|v| self.set_start_point(v)),
            patch.end_point.or(patch.duration).map(|v| self.set_end_point(v)),
        ];
        for err in results.into_iter().flatten().filter_map(|r| r.err()) {
            warn!("Track '{}': {err}", self.title);
        }
    }

    /// Point `src` at `dir/title`. An empty directory leaves `src` unchanged.
    pub fn set_src(&mut self, dir: &str) {
        if dir.is_empty() {
            return;
        }
        self.src = format!("{dir}/{}", self.title);
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(reject("volume must be a float in range [0,1]"));
        }
        self.options.volume = volume;
        Ok(())
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.options.looping = looping;
    }

    pub fn set_delay(&mut self, delay: f64) -> Result<()> {
        self.options.delay = non_negative("delay", delay)?;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        self.options.duration = non_negative("duration", duration)?;
        Ok(())
    }

    pub fn set_start_point(&mut self, start_point: f64) -> Result<()> {
        self.options.start_point = non_negative("start_point", start_point)?;
        Ok(())
    }

    pub fn set_end_point(&mut self, end_point: f64) -> Result<()> {
        self.options.end_point = non_negative("end_point", end_point)?;
        Ok(())
    }
}

impl From<&Track> for TrackData {
    fn from(t: &Track) -> Self {
        Self {
            title: t.title.clone(),
            src: t.src.clone(),
            options: Some(TrackOptionsPatch::from(&t.options)),
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    // NaN fails the comparison and is rejected along with negatives.
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(reject(&format!("{field} must be a non-negative float")))
    }
}

fn reject(msg: &str) -> Error {
    Error::Validation(msg.to_string())
}
