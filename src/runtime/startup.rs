use std::fs::{self, OpenOptions};
use std::io;

use crate::config::LibrarySettings;

/// Placeholder tracks dropped into a freshly created music folder.
const MOCK_TRACKS: [&str; 2] = ["track1.wav", "track2.mp3"];

/// Make sure the music folder exists, creating (and optionally seeding) it.
pub fn prepare_music_folder(settings: &LibrarySettings) -> io::Result<()> {
    let folder = &settings.music_folder;
    if folder.exists() {
        return Ok(());
    }

    fs::create_dir_all(folder)?;
    tracing::info!(folder = %folder.display(), "created music folder");

    if settings.seeds_mock_tracks() {
        for name in MOCK_TRACKS {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(folder.join(name))?;
        }
        tracing::info!(tracks = MOCK_TRACKS.len(), "seeded placeholder tracks");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_and_seeds_missing_folder() {
        let dir = tempdir().unwrap();
        let settings = LibrarySettings {
            music_folder: dir.path().join("mock_music"),
            seed_mock_tracks: Some(true),
            ..LibrarySettings::default()
        };

        prepare_music_folder(&settings).unwrap();
        assert!(settings.music_folder.join("track1.wav").is_file());
        assert!(settings.music_folder.join("track2.mp3").is_file());
    }

    #[test]
    fn leaves_existing_folder_alone() {
        let dir = tempdir().unwrap();
        let settings = LibrarySettings {
            music_folder: dir.path().to_path_buf(),
            ..LibrarySettings::default()
        };

        prepare_music_folder(&settings).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn seeding_can_be_disabled() {
        let dir = tempdir().unwrap();
        let settings = LibrarySettings {
            music_folder: dir.path().join("music"),
            seed_mock_tracks: Some(false),
            ..LibrarySettings::default()
        };

        prepare_music_folder(&settings).unwrap();
        assert!(settings.music_folder.is_dir());
        assert_eq!(fs::read_dir(&settings.music_folder).unwrap().count(), 0);
    }

    #[test]
    fn custom_folder_is_not_seeded_by_default() {
        let dir = tempdir().unwrap();
        let settings = LibrarySettings {
            music_folder: dir.path().join("srv_music"),
            ..LibrarySettings::default()
        };
        assert!(!settings.seeds_mock_tracks());

        prepare_music_folder(&settings).unwrap();
        assert!(settings.music_folder.is_dir());
        assert_eq!(fs::read_dir(&settings.music_folder).unwrap().count(), 0);
    }

    #[test]
    fn default_folder_is_seeded_by_default() {
        assert!(LibrarySettings::default().seeds_mock_tracks());
    }
}
