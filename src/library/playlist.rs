//! The persisted playlist order and its in-memory cache.
//!
//! The order file holds one track file name per line. Lines that do not pass
//! the audio filter are dropped on load; duplicates are kept. When no order
//! file exists yet, the folder listing becomes the order and is saved right
//! away.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::LibrarySettings;

use super::scan::{AudioFilter, is_plain_file_name, list_audio_files};

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to list music folder {}: {source}", path.display())]
    ListFolder { path: PathBuf, source: io::Error },
    #[error("failed to read playlist {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write playlist {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Location and filter of one music folder's order file.
#[derive(Debug, Clone)]
pub struct PlaylistFile {
    folder: PathBuf,
    path: PathBuf,
    filter: AudioFilter,
}

impl PlaylistFile {
    pub fn new(folder: impl Into<PathBuf>, file_name: &str, filter: AudioFilter) -> Self {
        let folder = folder.into();
        let path = folder.join(file_name);
        Self {
            folder,
            path,
            filter,
        }
    }

    pub fn from_settings(settings: &LibrarySettings) -> Self {
        Self::new(
            settings.music_folder.clone(),
            &settings.playlist_file,
            AudioFilter::from_settings(settings),
        )
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filter(&self) -> &AudioFilter {
        &self.filter
    }

    pub fn list_audio_files(&self) -> Result<Vec<String>, PlaylistError> {
        list_audio_files(&self.folder, &self.filter).map_err(|source| PlaylistError::ListFolder {
            path: self.folder.clone(),
            source,
        })
    }

    /// Read the order file, seeding it from the folder listing when absent.
    pub fn load_order(&self) -> Result<Vec<String>, PlaylistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| self.filter.matches(line))
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let files = self.list_audio_files()?;
                tracing::info!(
                    path = %self.path.display(),
                    tracks = files.len(),
                    "no playlist file, seeding it from the music folder"
                );
                self.save_order(&files)?;
                Ok(files)
            }
            Err(source) => Err(PlaylistError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrite the order file with `files`, one per line.
    ///
    /// The new content is written to a temporary file in the music folder and
    /// renamed over the old one.
    pub fn save_order(&self, files: &[String]) -> Result<(), PlaylistError> {
        let write_err = |source: io::Error| PlaylistError::Write {
            path: self.path.clone(),
            source,
        };

        let tmp = NamedTempFile::new_in(&self.folder).map_err(write_err)?;
        if let Some(perms) = self.target_permissions() {
            tmp.as_file().set_permissions(perms).map_err(write_err)?;
        }
        {
            let mut out = BufWriter::new(tmp.as_file());
            for file in files {
                writeln!(out, "{file}").map_err(write_err)?;
            }
            out.flush().map_err(write_err)?;
        }
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), tracks = files.len(), "playlist order saved");
        Ok(())
    }

    /// Mode for the replacement file: the current file's, or a world-readable
    /// default for a new one. Temp files start out private.
    fn target_permissions(&self) -> Option<fs::Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Playlist order cached in memory and written through to disk on every change.
///
/// The order is read once (at `open`, or lazily on first use) and then only
/// re-read on an explicit `reload`.
#[derive(Debug)]
pub struct PlaylistStore {
    file: PlaylistFile,
    order: Option<Vec<String>>,
}

impl PlaylistStore {
    /// A store that reads the order file on first use.
    pub fn new(file: PlaylistFile) -> Self {
        Self { file, order: None }
    }

    /// A store with the order already loaded (and seeded if needed).
    pub fn open(file: PlaylistFile) -> Result<Self, PlaylistError> {
        let mut store = Self::new(file);
        store.reload()?;
        Ok(store)
    }

    pub fn file(&self) -> &PlaylistFile {
        &self.file
    }

    /// Re-read the order file, replacing the cached order.
    pub fn reload(&mut self) -> Result<&[String], PlaylistError> {
        let order = self.file.load_order()?;
        tracing::info!(tracks = order.len(), "playlist loaded");
        Ok(self.order.insert(order).as_slice())
    }

    /// The current order if it has been loaded.
    pub fn cached(&self) -> Option<&[String]> {
        self.order.as_deref()
    }

    /// The current order, loading it first if needed.
    pub fn files(&mut self) -> Result<&[String], PlaylistError> {
        if self.order.is_none() {
            self.reload()?;
        }
        Ok(self.order.as_deref().unwrap_or_default())
    }

    /// Audio files in the folder that are not part of the playlist.
    pub fn available_tracks(&mut self) -> Result<Vec<String>, PlaylistError> {
        let all = self.file.list_audio_files()?;
        let order = self.files()?;
        Ok(all.into_iter().filter(|f| !order.contains(f)).collect())
    }

    /// Replace the whole order. Entries that fail the audio filter or are not
    /// plain file names are dropped.
    pub fn save_order(&mut self, files: Vec<String>) -> Result<&[String], PlaylistError> {
        let filter = self.file.filter();
        let files: Vec<String> = files
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| is_plain_file_name(f) && filter.matches(f))
            .collect();
        self.file.save_order(&files)?;
        Ok(self.order.insert(files).as_slice())
    }

    /// Append `filename` unless it is already listed.
    ///
    /// Returns `false` for duplicates and for names that are not audio files
    /// directly inside the music folder.
    pub fn add(&mut self, filename: &str) -> Result<bool, PlaylistError> {
        if !is_plain_file_name(filename) || !self.file.filter().matches(filename) {
            tracing::warn!(filename, "refusing to add a non-audio entry to the playlist");
            return Ok(false);
        }
        if self.files()?.iter().any(|f| f == filename) {
            return Ok(false);
        }

        let mut order = self.files()?.to_vec();
        order.push(filename.to_string());
        self.file.save_order(&order)?;
        self.order = Some(order);
        tracing::info!(filename, "added to the playlist");
        Ok(true)
    }

    /// Remove the first occurrence of `filename`. The file itself stays on disk.
    pub fn remove(&mut self, filename: &str) -> Result<bool, PlaylistError> {
        let Some(pos) = self.files()?.iter().position(|f| f == filename) else {
            return Ok(false);
        };

        let mut order = self.files()?.to_vec();
        order.remove(pos);
        self.file.save_order(&order)?;
        self.order = Some(order);
        tracing::info!(filename, "removed from the playlist");
        Ok(true)
    }
}
