use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::library::PlaylistError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field was missing or empty.
    #[error("{0}")]
    BadRequest(String),

    /// The operation was understood but could not be applied, such as adding
    /// a duplicate or removing a track that is not listed. The browser UI
    /// expects these as 500s.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Playlist(ref e) => {
                tracing::error!("Playlist error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
