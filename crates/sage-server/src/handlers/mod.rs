pub mod chat;
pub mod content;
pub mod generate;
pub mod grading;
pub mod history;
pub mod memory;
pub mod uploads;

use axum::http::StatusCode;
use axum::response::Json;
use sage_llm::LlmError;
use sage_memory::MemoryError;
use serde::Serialize;

/// Error body shared by every handler
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Map a model failure for the primary generation onto a response
pub fn llm_error_response(err: LlmError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(error = %err, "model call failed");
    let status = match err {
        LlmError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorResponse::new(err.to_string(), "LLM_ERROR")))
}

/// Map a memory failure onto a response
pub fn memory_error_response(err: MemoryError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        MemoryError::UnknownTone { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TONE"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "MEMORY_ERROR"),
    };
    tracing::error!(error = %err, "memory operation failed");
    (status, Json(ErrorResponse::new(err.to_string(), code)))
}
