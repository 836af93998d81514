use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use sage_prompt::{explain_prompt, flashcards_prompt, quiz_prompt, summarize_prompt, Difficulty, QuizKind};

use crate::handlers::llm_error_response;
use crate::state::AppState;

/// Question count for the quick quiz task
const DEFAULT_QUIZ_QUESTIONS: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct GenerateTaskRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub task: String,
    pub text: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTaskResponse {
    pub task: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_error: Option<String>,
}

/// POST /api/v1/generate
///
/// Quick single-text tasks. Unrecognized task names fall back to summarize.
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateTaskRequest>,
) -> impl IntoResponse {
    let user_id = req.user_id.as_deref();
    let difficulty = req.difficulty.unwrap_or_default();

    let task_prompt = match req.task.as_str() {
        "quiz" => quiz_prompt(&req.text, difficulty, DEFAULT_QUIZ_QUESTIONS, QuizKind::Mcq),
        "flashcards" => flashcards_prompt(&req.text),
        "explain" => explain_prompt(&req.text),
        "summarize" => summarize_prompt(&req.text),
        other => {
            tracing::debug!(task = other, "unknown task, defaulting to summarize");
            summarize_prompt(&req.text)
        }
    };

    // Update memory first so facts from this message inform this response
    let memory_error = state.remember_interaction(user_id, &req.text).await;

    let prompt = state.personalized_prompt(user_id, &task_prompt).await;

    match state.run_generation(prompt).await {
        Ok(response) => {
            let output = response.trimmed_text().to_string();
            state
                .record_history(user_id, &req.task, &req.text, &output)
                .await;
            (
                StatusCode::OK,
                Json(GenerateTaskResponse {
                    task: req.task,
                    output,
                    memory_error,
                }),
            )
                .into_response()
        }
        Err(err) => llm_error_response(err).into_response(),
    }
}
