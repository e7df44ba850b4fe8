use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("weaver: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Logging is not up yet, so report straight to stderr.
            eprintln!("weaver: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
