//! HTTP façade: JSON endpoints under `/api` plus optional static UI files.

mod error;
mod handlers;

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::app::App;

/// The session shared by every request.
pub type SharedApp = Arc<Mutex<App>>;

pub fn router(app: SharedApp, static_dir: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/playlist", get(handlers::get_playlist))
        .route("/available_tracks", get(handlers::available_tracks))
        .route("/play_pause", post(handlers::play_pause))
        .route("/stop", post(handlers::stop))
        .route("/status", get(handlers::status))
        .route("/remove_file", post(handlers::remove_file))
        .route("/add_track", post(handlers::add_track))
        .route("/reorder_playlist", post(handlers::reorder_playlist))
        .route("/reload_playlist", post(handlers::reload_playlist));

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(app)
}
