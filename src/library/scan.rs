use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Case-insensitive suffix filter over the configured audio extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFilter {
    // Lowercased, each with its leading dot.
    suffixes: Vec<String>,
}

impl AudioFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{e}"))
            .collect();
        Self { suffixes }
    }

    pub fn from_settings(settings: &LibrarySettings) -> Self {
        Self::new(&settings.extensions)
    }

    /// Whether `name` ends with one of the allowed extensions.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

impl Default for AudioFilter {
    fn default() -> Self {
        Self::from_settings(&LibrarySettings::default())
    }
}

/// Whether `name` names an entry directly inside a folder (no separators, no
/// `.`/`..`) and fits on one line of the playlist file.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}

/// List the audio files directly inside `folder`.
///
/// Only regular files (symlinks are followed) are returned, in directory
/// listing order. Entries that cannot be inspected are skipped; a folder that
/// cannot be read at all is an error.
pub fn list_audio_files(folder: &Path, filter: &AudioFilter) -> io::Result<Vec<String>> {
    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable folder entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if filter.matches(name) {
            files.push(name.to_string());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn audio_filter_matches_configured_extensions_case_insensitive() {
        let filter = AudioFilter::default();
        assert!(filter.matches("a.mp3"));
        assert!(filter.matches("a.MP3"));
        assert!(filter.matches("Some Song.Wav"));
        assert!(!filter.matches("a.flac"));
        assert!(!filter.matches("a.txt"));
        assert!(!filter.matches("mp3"));
        assert!(!filter.matches(""));
    }

    #[test]
    fn audio_filter_normalizes_dots_and_whitespace() {
        let filter = AudioFilter::new([" .OGG ", "flac", "", "."]);
        assert!(filter.matches("x.ogg"));
        assert!(filter.matches("x.FLAC"));
        assert!(!filter.matches("x.mp3"));
        assert!(!filter.matches("x."));
    }

    #[test]
    fn plain_file_names_reject_paths() {
        assert!(is_plain_file_name("a.mp3"));
        assert!(is_plain_file_name("with space.wav"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../a.mp3"));
        assert!(!is_plain_file_name("sub/a.mp3"));
        assert!(!is_plain_file_name("sub\\a.mp3"));
        assert!(!is_plain_file_name("evil\nx.mp3"));
        assert!(!is_plain_file_name("evil\rx.mp3"));
        assert!(!is_plain_file_name("tab\tx.mp3"));
    }

    #[test]
    fn list_audio_files_only_returns_top_level_audio_files() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.wav"), b"not a real wav").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("playlist.txt"), b"a.wav\n").unwrap();
        let sub = dir.path().join("nested.mp3");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let mut files = list_audio_files(dir.path(), &AudioFilter::default()).unwrap();
        files.sort();
        assert_eq!(files, vec!["a.wav".to_string(), "b.MP3".to_string()]);
    }

    #[test]
    fn list_audio_files_fails_for_missing_folder() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(list_audio_files(&missing, &AudioFilter::default()).is_err());
    }
}
