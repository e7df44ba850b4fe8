//! Title normalization shared by every entity that maps a title to a file.

/// Derive the filesystem-safe slug for a title.
///
/// The title is trimmed and lowercased; runs of whitespace, slashes and quotes
/// collapse to `_`, runs of `;` and `&` collapse to `-`.
pub fn slug(title: &str) -> String {
    #[derive(PartialEq)]
    enum Run {
        None,
        Underscore,
        Dash,
    }

    let mut out = String::with_capacity(title.len());
    let mut run = Run::None;

    for c in title.trim().chars() {
        if c.is_whitespace() || matches!(c, '\\' | '/' | '\'' | '"') {
            if run != Run::Underscore {
                out.push('_');
                run = Run::Underscore;
            }
        } else if matches!(c, ';' | '&') {
            if run != Run::Dash {
                out.push('-');
                run = Run::Dash;
            }
        } else {
            out.extend(c.to_lowercase());
            run = Run::None;
        }
    }

    out
}

/// Return the text after the last `.` of a file name, or `""` when there is none.
pub fn file_type(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}

/// Return the lowercase extension of `name` when it is in `extensions`.
///
/// Matching is case-insensitive and ignores a leading dot in the configured list.
pub fn supported_type(name: &str, extensions: &[String]) -> Option<String> {
    let ext = file_type(name);
    if ext.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| e == ext)
        .then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separator_runs() {
        assert_eq!(slug("My Song"), "my_song");
        assert_eq!(slug("My/Song"), "my_song");
        assert_eq!(slug("My\\Song"), "my_song");
        assert_eq!(slug("My  \t/ Song"), "my_song");
        assert_eq!(slug("Rock 'n' \"Roll\""), "rock_n_roll_");
    }

    #[test]
    fn slug_maps_semicolon_and_ampersand_runs_to_dash() {
        assert_eq!(slug("Track; One & Two"), "track-_one_-_two");
        assert_eq!(slug("a;;&b"), "a-b");
    }

    #[test]
    fn slug_is_idempotent() {
        for title in ["My Song", "  Padded  ", "Track; One & Two", "x/y\\z"] {
            let once = slug(title);
            assert_eq!(slug(&once), once);
        }
    }

    #[test]
    fn file_type_takes_last_extension() {
        assert_eq!(file_type("rain.mp3"), "mp3");
        assert_eq!(file_type("a.b.ogg"), "ogg");
        assert_eq!(file_type("noext"), "");
        assert_eq!(file_type("trailing."), "");
    }

    #[test]
    fn supported_type_is_case_insensitive() {
        let exts = vec!["mp3".to_string(), ".wav".to_string()];
        assert_eq!(supported_type("a.MP3", &exts).as_deref(), Some("mp3"));
        assert_eq!(supported_type("b.wav", &exts).as_deref(), Some("wav"));
        assert_eq!(supported_type("c.txt", &exts), None);
        assert_eq!(supported_type("d", &exts), None);
    }
}
