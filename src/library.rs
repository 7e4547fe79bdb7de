//! Music folder scanning and the persisted playlist order.

mod playlist;
mod scan;

pub use playlist::{PlaylistError, PlaylistFile, PlaylistStore};
pub use scan::{AudioFilter, is_plain_file_name};
