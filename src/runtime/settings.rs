use std::path::PathBuf;

use anyhow::{Context, anyhow};

use crate::config;

use super::cli::Cli;

/// Resolve the settings for this run.
///
/// A file named with `--config` must load and validate. The implicit config
/// file is optional: when it is broken the player starts with defaults.
pub fn load_settings(cli: &Cli) -> anyhow::Result<config::Settings> {
    let mut settings = match &cli.config {
        Some(path) => {
            let s = config::Settings::load_from(Some(path.clone()), true)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            s.validate()
                .map_err(|msg| anyhow!("invalid config {}: {msg}", path.display()))?;
            s
        }
        None => match config::Settings::load() {
            Ok(s) => match s.validate() {
                Ok(()) => s,
                Err(msg) => {
                    tracing::warn!("invalid config, using defaults: {msg}");
                    config::Settings::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to load config, using defaults: {e}");
                config::Settings::default()
            }
        },
    };

    apply_overrides(&mut settings, cli.music_folder.clone(), cli.port);
    Ok(settings)
}

fn apply_overrides(settings: &mut config::Settings, music_folder: Option<PathBuf>, port: Option<u16>) {
    if let Some(folder) = music_folder {
        settings.library.music_folder = folder;
    }
    if let Some(port) = port.filter(|p| *p != 0) {
        settings.server.port = port;
    }
}
