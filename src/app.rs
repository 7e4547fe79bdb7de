//! Application module: the playback state machine and the session that ties
//! it to the playlist and GPIO.
//!
//! The state machine lives in `app::model`; `App` in `app::session` is the
//! object the HTTP handlers operate on.

mod model;
mod session;

pub use model::*;
pub use session::*;
