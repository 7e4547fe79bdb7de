use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "pijukebox")]
#[command(about = "Web-controlled music player for single-board computers", long_about = None)]
pub struct Cli {
    /// Configuration file path (must exist when given)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Folder with the audio files and playlist.txt
    #[arg(short, long)]
    pub music_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}
