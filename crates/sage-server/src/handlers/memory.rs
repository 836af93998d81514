use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use sage_memory::{render_context, tones, EducatorProfile, PartialProfile, ProfileStats};

use crate::handlers::memory_error_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub profile: EducatorProfile,
    /// Rendered context paragraph; empty when there is nothing to inject
    pub context: String,
}

impl ProfileResponse {
    fn new(user_id: String, profile: EducatorProfile) -> Self {
        let context = render_context(&profile);
        Self {
            user_id,
            profile,
            context,
        }
    }
}

/// GET /api/v1/memory/:user_id
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let profile = state.memory.profile(&user_id).await;
    (StatusCode::OK, Json(ProfileResponse::new(user_id, profile)))
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub message: String,
}

/// POST /api/v1/memory/:user_id/interactions
pub async fn process_interaction(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<InteractionRequest>,
) -> impl IntoResponse {
    match state.memory.process_interaction(&user_id, &req.message).await {
        Ok(profile) => {
            (StatusCode::OK, Json(ProfileResponse::new(user_id, profile))).into_response()
        }
        Err(err) => memory_error_response(err).into_response(),
    }
}

/// PUT /api/v1/memory/:user_id
///
/// Manual profile update: the body is a partial profile merged without
/// extraction.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(partial): Json<PartialProfile>,
) -> impl IntoResponse {
    match state.memory.update_profile(&user_id, partial).await {
        Ok(profile) => {
            (StatusCode::OK, Json(ProfileResponse::new(user_id, profile))).into_response()
        }
        Err(err) => memory_error_response(err).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetToneRequest {
    pub tone: String,
}

/// PUT /api/v1/memory/:user_id/tone
///
/// The strict tone path: unknown names are rejected with 422.
pub async fn set_tone(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SetToneRequest>,
) -> impl IntoResponse {
    match state.memory.set_tone(&user_id, &req.tone).await {
        Ok(profile) => {
            (StatusCode::OK, Json(ProfileResponse::new(user_id, profile))).into_response()
        }
        Err(err) => memory_error_response(err).into_response(),
    }
}

/// DELETE /api/v1/memory/:user_id
pub async fn clear_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.memory.clear(&user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => memory_error_response(err).into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub user_id: String,
    pub stats: ProfileStats,
}

/// GET /api/v1/memory/:user_id/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let stats = state.memory.stats(&user_id).await;
    (StatusCode::OK, Json(StatsResponse { user_id, stats }))
}

#[derive(Debug, Serialize)]
pub struct ToneInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TonesResponse {
    pub tones: Vec<ToneInfo>,
}

/// GET /api/v1/tones
pub async fn list_tones() -> impl IntoResponse {
    let tones = tones::all()
        .iter()
        .map(|tone| ToneInfo {
            name: tone.name,
            description: tone.description,
        })
        .collect();

    (StatusCode::OK, Json(TonesResponse { tones }))
}
