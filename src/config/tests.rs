use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use log::LevelFilter;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_weaver_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("WEAVER_CONFIG_PATH", "/tmp/weaver-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/weaver-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("weaver")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("weaver")
            .join("config.toml")
    );
}

#[test]
fn default_data_dir_uses_xdg_data_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
    assert_eq!(
        default_data_dir(),
        std::path::PathBuf::from("/tmp/xdg-data").join("weaver")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[storage]
data_dir = "/srv/weaver/data"

[library]
tracks_dir = "/srv/music"
extensions = ["mp3", "flac"]
follow_links = false
include_hidden = false

[log]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("WEAVER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("WEAVER__LOG__LEVEL");

    let s = Settings::load().unwrap();
    assert_eq!(s.storage.data_dir, std::path::PathBuf::from("/srv/weaver/data"));
    assert_eq!(s.library.tracks_dir, std::path::PathBuf::from("/srv/music"));
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "flac".to_string()]);
    assert!(!s.library.follow_links);
    assert!(!s.library.include_hidden);
    assert_eq!(s.log_level(), Some(LevelFilter::Debug));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[log]
level = "warn"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("WEAVER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("WEAVER__LOG__LEVEL", "trace");

    let s = Settings::load().unwrap();
    assert_eq!(s.log.level, "trace");
}

#[test]
fn settings_defaults_cover_supported_extensions() {
    let s = Settings::default();
    assert_eq!(s.library.extensions, vec!["mp3", "m4a", "ogg", "wav"]);
    assert!(s.library.follow_links);
    assert_eq!(s.log_level(), Some(LevelFilter::Info));
}

#[test]
fn validate_rejects_unknown_level_and_empty_extensions() {
    let mut s = Settings::default();
    s.log.level = "loud".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec!["  ".into()];
    assert!(s.validate().is_err());
}
