//! JSON handlers for the `/api` routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::app::{App, PlaybackState, Status};

use super::SharedApp;
use super::error::{ApiError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct FilenameRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

impl FilenameRequest {
    /// The file name, treating an empty string as absent.
    fn filename(self) -> Option<String> {
        self.filename.filter(|f| !f.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub new_order: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub state: PlaybackState,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub message: String,
}

impl SuccessResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Run `f` against the session on the blocking pool.
///
/// Session calls touch the filesystem and wait on the audio thread.
async fn with_app<T, F>(app: SharedApp, f: F) -> Result<T>
where
    F: FnOnce(&mut App) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = app
            .lock()
            .map_err(|_| ApiError::Internal("player state lock poisoned".to_string()))?;
        f(&mut *guard)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/playlist
pub async fn get_playlist(State(app): State<SharedApp>) -> Result<Json<FilesResponse>> {
    let files = with_app(app, |app| Ok(app.playlist()?)).await?;
    Ok(Json(FilesResponse { files }))
}

/// GET /api/available_tracks
/// Audio files in the music folder that are not in the playlist
pub async fn available_tracks(State(app): State<SharedApp>) -> Result<Json<FilesResponse>> {
    let files = with_app(app, |app| Ok(app.available_tracks()?)).await?;
    Ok(Json(FilesResponse { files }))
}

/// POST /api/play_pause
/// Starts `filename` when given, otherwise toggles. A missing body counts as `{}`.
pub async fn play_pause(
    State(app): State<SharedApp>,
    body: Option<Json<FilenameRequest>>,
) -> Result<Json<StateResponse>> {
    let filename = body.and_then(|Json(req)| req.filename());
    let state = with_app(app, move |app| Ok(app.play_pause(filename.as_deref())?)).await?;
    Ok(Json(StateResponse { state }))
}

/// POST /api/stop
pub async fn stop(State(app): State<SharedApp>) -> Result<Json<StateResponse>> {
    let state = with_app(app, |app| Ok(app.stop())).await?;
    Ok(Json(StateResponse { state }))
}

/// GET /api/status
pub async fn status(State(app): State<SharedApp>) -> Result<Json<Status>> {
    let status = with_app(app, |app| Ok(app.status())).await?;
    Ok(Json(status))
}

/// POST /api/remove_file
/// Removes a track from the playlist; the file stays on disk
pub async fn remove_file(
    State(app): State<SharedApp>,
    body: Option<Json<FilenameRequest>>,
) -> Result<Json<SuccessResponse>> {
    let filename = body
        .and_then(|Json(req)| req.filename())
        .ok_or_else(|| ApiError::BadRequest("Filename not provided".to_string()))?;

    with_app(app, move |app| {
        if app.remove_track(&filename)? {
            Ok(Json(SuccessResponse::new(format!(
                "File {filename} removed from playlist"
            ))))
        } else {
            Err(ApiError::Rejected("File not found in playlist".to_string()))
        }
    })
    .await
}

/// POST /api/add_track
/// Appends a track to the playlist
pub async fn add_track(
    State(app): State<SharedApp>,
    body: Option<Json<FilenameRequest>>,
) -> Result<Json<SuccessResponse>> {
    let filename = body
        .and_then(|Json(req)| req.filename())
        .ok_or_else(|| ApiError::BadRequest("Filename not provided".to_string()))?;

    with_app(app, move |app| {
        if app.add_track(&filename)? {
            Ok(Json(SuccessResponse::new(format!(
                "File {filename} added to playlist"
            ))))
        } else {
            Err(ApiError::Rejected("File not added to playlist".to_string()))
        }
    })
    .await
}

/// POST /api/reorder_playlist
pub async fn reorder_playlist(
    State(app): State<SharedApp>,
    body: Option<Json<ReorderRequest>>,
) -> Result<Json<SuccessResponse>> {
    let new_order = body
        .and_then(|Json(req)| req.new_order)
        .filter(|order| !order.is_empty())
        .ok_or_else(|| ApiError::BadRequest("New order not provided".to_string()))?;

    with_app(app, move |app| {
        app.reorder_playlist(new_order)?;
        Ok(Json(SuccessResponse::new("Playlist order saved")))
    })
    .await
}

/// POST /api/reload_playlist
/// Re-reads the order file, picking up hand edits
pub async fn reload_playlist(State(app): State<SharedApp>) -> Result<Json<FilesResponse>> {
    let files = with_app(app, |app| Ok(app.reload_playlist()?)).await?;
    Ok(Json(FilesResponse { files }))
}
