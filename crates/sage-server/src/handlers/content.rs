use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use sage_prompt::{
    adjust_prompt, admin_prompt, help_prompt, ideas_prompt, lecture_prompt, slides_prompt,
    AdjustAction, AdminTemplate, Difficulty,
};

use crate::handlers::llm_error_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub output: String,
}

async fn run_content_task(
    state: &AppState,
    task: &str,
    input: &str,
    prompt: String,
) -> axum::response::Response {
    match state.run_generation(prompt).await {
        Ok(response) => {
            let output = response.trimmed_text().to_string();
            state.record_history(None, task, input, &output).await;
            (StatusCode::OK, Json(ContentResponse { output })).into_response()
        }
        Err(err) => llm_error_response(err).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LectureRequest {
    pub input: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// POST /api/v1/lectures
pub async fn lecture_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LectureRequest>,
) -> impl IntoResponse {
    let prompt = lecture_prompt(&req.input, req.difficulty);
    run_content_task(&state, "lecture", &req.input, prompt).await
}

#[derive(Debug, Deserialize)]
pub struct SlidesRequest {
    pub content: String,
}

/// POST /api/v1/lectures/slides
pub async fn slides_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SlidesRequest>,
) -> impl IntoResponse {
    let prompt = slides_prompt(&req.content);
    run_content_task(&state, "slides", &req.content, prompt).await
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub content: String,
    pub action: AdjustAction,
}

/// POST /api/v1/lectures/adjust
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdjustRequest>,
) -> impl IntoResponse {
    let prompt = adjust_prompt(&req.content, req.action);
    run_content_task(&state, "adjust", &req.content, prompt).await
}

#[derive(Debug, Deserialize)]
pub struct IdeasRequest {
    pub topic: String,
    #[serde(default)]
    pub level: Difficulty,
    #[serde(default)]
    pub variations: bool,
}

/// POST /api/v1/ideas
pub async fn ideas_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IdeasRequest>,
) -> impl IntoResponse {
    let prompt = ideas_prompt(&req.topic, req.level, req.variations);
    run_content_task(&state, "ideas", &req.topic, prompt).await
}

/// POST /api/v1/admin
///
/// The request body is the tagged AdminTemplate itself
pub async fn admin_handler(
    State(state): State<Arc<AppState>>,
    Json(template): Json<AdminTemplate>,
) -> impl IntoResponse {
    let prompt = admin_prompt(&template);
    let input = serde_json::to_string(&template).unwrap_or_default();
    run_content_task(&state, "admin", &input, prompt).await
}

#[derive(Debug, Deserialize)]
pub struct HelpRequest {
    pub question: String,
}

/// POST /api/v1/help
pub async fn help_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HelpRequest>,
) -> impl IntoResponse {
    let prompt = help_prompt(&req.question);
    run_content_task(&state, "help", &req.question, prompt).await
}
