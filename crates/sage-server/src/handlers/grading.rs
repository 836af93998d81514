use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use sage_core::first_json_object;
use sage_prompt::grading_prompt;

use crate::handlers::llm_error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub is_code: bool,
}

/// Structured grading output requested from the model
#[derive(Debug, Serialize, Deserialize)]
pub struct GradeReport {
    pub grade: f32,
    pub feedback: String,
    #[serde(default)]
    pub detected_issues: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    /// Parsed report when the model produced valid JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<GradeReport>,
    /// Raw model output, kept for when parsing fails
    pub raw: String,
}

/// POST /api/v1/grade
///
/// The model is asked for strict JSON; its output is scanned for the first
/// object span. A response that will not parse degrades to raw text rather
/// than an error.
pub async fn grade_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GradeRequest>,
) -> impl IntoResponse {
    let prompt = grading_prompt(&req.question, &req.answer, req.is_code);

    match state.run_generation(prompt).await {
        Ok(response) => {
            let raw = response.trimmed_text().to_string();
            let report = first_json_object(&raw)
                .and_then(|span| serde_json::from_str::<GradeReport>(span).ok());

            if report.is_none() {
                tracing::warn!("grading output was not parseable JSON");
            }

            state
                .record_history(None, "grading", &req.question, &raw)
                .await;

            (StatusCode::OK, Json(GradeResponse { report, raw })).into_response()
        }
        Err(err) => llm_error_response(err).into_response(),
    }
}
