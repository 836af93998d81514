use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use sage_prompt::{chat_prompt, ChatTurn};

use crate::handlers::llm_error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_error: Option<String>,
}

/// POST /api/v1/chat
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let user_id = req.user_id.as_deref();

    let memory_error = state.remember_interaction(user_id, &req.message).await;

    let task_prompt = chat_prompt(&req.message, &req.history);
    let prompt = state.personalized_prompt(user_id, &task_prompt).await;

    match state.run_generation(prompt).await {
        Ok(response) => {
            let reply = response.trimmed_text().to_string();
            state
                .record_history(user_id, "chat", &req.message, &reply)
                .await;
            (
                StatusCode::OK,
                Json(ChatResponse {
                    reply,
                    memory_error,
                }),
            )
                .into_response()
        }
        Err(err) => llm_error_response(err).into_response(),
    }
}
