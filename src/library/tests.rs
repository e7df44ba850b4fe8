use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn names(files: &[TrackFile]) -> Vec<String> {
    let mut names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    names.sort();
    names
}

#[test]
fn scan_keeps_only_supported_extensions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("b.txt"), b"ignore me").unwrap();
    fs::write(dir.path().join("c.wav"), b"not a real wav").unwrap();

    let files = scan(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(names(&files), vec!["a.mp3", "c.wav"]);

    let c = files.iter().find(|f| f.name == "c.wav").unwrap();
    assert_eq!(c.file_type, "wav");
}

#[test]
fn scan_matches_extensions_case_insensitively_and_reports_lowercase_type() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Loud.M4A"), b"x").unwrap();

    let files = scan(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "Loud.M4A");
    assert_eq!(files[0].file_type, "m4a");
}

#[test]
fn scan_does_not_recurse_or_list_directories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.ogg"), b"x").unwrap();
    let sub = dir.path().join("nested.mp3");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"x").unwrap();

    let files = scan(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(names(&files), vec!["root.ogg"]);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let files = scan(dir.path(), &settings).unwrap();
    assert_eq!(names(&files), vec!["visible.mp3"]);
}

#[test]
fn scan_of_missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let err = scan(&dir.path().join("absent"), &LibrarySettings::default()).unwrap_err();
    assert!(err.is_missing_file());
}

#[test]
fn watch_forwards_events_tagged_with_generation() {
    let dir = tempdir().unwrap();
    let (tx, rx) = crossbeam_channel::unbounded();
    let watch = TrackWatch::start(dir.path(), 7, tx).unwrap();
    assert_eq!(watch.generation(), 7);
    assert_eq!(watch.dir(), dir.path());

    fs::write(dir.path().join("new.mp3"), b"x").unwrap();
    let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(event, WatchEvent { generation: 7 });
}
