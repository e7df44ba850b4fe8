use std::env;
use std::path::Path;

use log::info;

use crate::controller::{Controller, ControllerService};
use crate::library::TrackFile;

mod logging;
mod settings;

/// Start the controller service and keep it running until it stops.
///
/// An optional first argument names the tracks directory to switch to.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings);

    let observer = |files: &[TrackFile], dir: &Path| {
        info!("{} tracks in '{}'", files.len(), dir.display());
    };
    let controller = Controller::from_settings(&settings, Box::new(observer));
    let handle = ControllerService::spawn(controller)?;

    if let Some(dir) = env::args_os().nth(1) {
        handle.set_tracks_dir(dir)?;
    }

    let titles = handle.titles()?;
    info!("{} playlists: {}", titles.len(), titles.join(", "));

    handle.join();
    Ok(())
}
