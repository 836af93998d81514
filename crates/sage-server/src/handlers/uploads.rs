use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Extensions accepted for study material; PDF parsing is out of scope
const ALLOWED_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub saved_as: String,
    pub characters: usize,
    /// Chat-ready framing of the uploaded material
    pub chat_message: String,
}

/// POST /api/v1/uploads
///
/// Saves plain-text study material under the uploads directory and returns a
/// message body the chat endpoint recognizes as a file upload.
pub async fn save_upload(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> impl IntoResponse {
    if req.content.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("upload content is empty", "EMPTY_UPLOAD")),
        )
            .into_response();
    }

    let safe_name = sanitize_filename(&req.filename);
    let extension = safe_name.rsplit('.').next().unwrap_or_default().to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(
                format!(
                    "unsupported file type '{}'; accepted: {}",
                    extension,
                    ALLOWED_EXTENSIONS.join(", ")
                ),
                "UNSUPPORTED_FILE_TYPE",
            )),
        )
            .into_response();
    }

    let path = state.uploads_dir.join(&safe_name);
    if let Err(err) = tokio::fs::create_dir_all(&state.uploads_dir).await {
        tracing::error!(error = %err, "failed to create uploads directory");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(err.to_string(), "UPLOAD_ERROR")),
        )
            .into_response();
    }
    if let Err(err) = tokio::fs::write(&path, &req.content).await {
        tracing::error!(path = ?path, error = %err, "failed to save upload");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(err.to_string(), "UPLOAD_ERROR")),
        )
            .into_response();
    }

    tracing::info!(file = %safe_name, characters = req.content.len(), "upload saved");

    let chat_message = format!(
        "File: {}\nExtracted content: {}",
        safe_name, req.content
    );

    (
        StatusCode::CREATED,
        Json(UploadResponse {
            saved_as: safe_name,
            characters: req.content.chars().count(),
            chat_message,
        }),
    )
        .into_response()
}

/// Reduce a client-supplied name to a safe filename
fn sanitize_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.'))
        .collect();

    if safe.is_empty() || safe.chars().all(|ch| ch == '.') {
        "upload.txt".to_string()
    } else {
        safe
    }
}
