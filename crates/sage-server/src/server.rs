//! HTTP server - routes every educator-assistant endpoint onto the shared
//! AppState.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Run the HTTP server until shutdown
pub async fn run_server(state: Arc<AppState>, config: &sage_config::ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let app = create_router(state, config.cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Sage server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
fn create_router(state: Arc<AppState>, cors: bool) -> Router {
    let mut router = Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Generation tasks
        .route("/api/v1/generate", post(handlers::generate::generate_handler))
        .route("/api/v1/chat", post(handlers::chat::chat_handler))
        .route("/api/v1/grade", post(handlers::grading::grade_handler))
        .route("/api/v1/lectures", post(handlers::content::lecture_handler))
        .route("/api/v1/lectures/slides", post(handlers::content::slides_handler))
        .route("/api/v1/lectures/adjust", post(handlers::content::adjust_handler))
        .route("/api/v1/ideas", post(handlers::content::ideas_handler))
        .route("/api/v1/admin", post(handlers::content::admin_handler))
        .route("/api/v1/help", post(handlers::content::help_handler))
        // Educator memory
        .route("/api/v1/tones", get(handlers::memory::list_tones))
        .route(
            "/api/v1/memory/:user_id",
            get(handlers::memory::get_profile)
                .put(handlers::memory::update_profile)
                .delete(handlers::memory::clear_profile),
        )
        .route(
            "/api/v1/memory/:user_id/interactions",
            post(handlers::memory::process_interaction),
        )
        .route("/api/v1/memory/:user_id/tone", put(handlers::memory::set_tone))
        .route("/api/v1/memory/:user_id/stats", get(handlers::memory::get_stats))
        // History and uploads
        .route("/api/v1/history", get(handlers::history::list_history))
        .route("/api/v1/uploads", post(handlers::uploads::save_upload))
        // Middleware
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LlmSettings;
    use crate::storage::HistoryStorage;
    use async_trait::async_trait;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use sage_core::{GenerateRequest, GenerateResponse};
    use sage_llm::{Result as LlmResult, TextGenerator};
    use sage_memory::{MemoryManager, ProfileStore};
    use tempfile::TempDir;

    struct StubGenerator {
        reply: String,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn provider_id(&self) -> &str {
            "stub"
        }

        async fn generate(&self, request: GenerateRequest) -> LlmResult<GenerateResponse> {
            Ok(GenerateResponse::new(request.model, self.reply.clone()))
        }

        async fn validate(&self) -> LlmResult<()> {
            Ok(())
        }
    }

    fn state_in(dir: &TempDir, reply: &str) -> Arc<AppState> {
        let generator: Arc<dyn TextGenerator> = Arc::new(StubGenerator {
            reply: reply.to_string(),
        });
        let store = ProfileStore::new(dir.path().join("user_memory.json"));
        let memory = MemoryManager::new(store, generator.clone(), "mistral");
        let history = HistoryStorage::new(dir.path().join("history.jsonl"));

        Arc::new(AppState {
            memory,
            generator,
            history,
            llm: LlmSettings {
                model: "mistral".to_string(),
                temperature: 0.7,
            },
            uploads_dir: dir.path().join("uploads"),
            history_list_limit: 50,
        })
    }

    #[tokio::test]
    async fn test_router_builds() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "ok");
        let _router = create_router(state, true);
    }

    #[tokio::test]
    async fn test_list_tones_returns_catalog() {
        let response = handlers::memory::list_tones().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_tone_rejects_unknown_name() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "{}");

        let response = handlers::memory::set_tone(
            State(state.clone()),
            Path("teacher-1".to_string()),
            axum::Json(handlers::memory::SetToneRequest {
                tone: "bombastic".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // No mutation happened
        assert!(state
            .memory
            .store()
            .load_optional("teacher-1")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_profile_reflects_tone() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "{}");

        let response = handlers::memory::set_tone(
            State(state.clone()),
            Path("teacher-1".to_string()),
            axum::Json(handlers::memory::SetToneRequest {
                tone: "casual".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let profile = state.memory.profile("teacher-1").await;
        assert_eq!(profile.preferred_tone, "casual");
    }

    #[tokio::test]
    async fn test_clear_profile_returns_no_content() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "{}");

        let response = handlers::memory::clear_profile(
            State(state.clone()),
            Path("teacher-1".to_string()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_generate_handler_uses_stub_model() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "A tidy summary.");

        let response = handlers::generate::generate_handler(
            State(state.clone()),
            axum::Json(handlers::generate::GenerateTaskRequest {
                user_id: None,
                task: "summarize".to_string(),
                text: "The mitochondria is the powerhouse of the cell.".to_string(),
                difficulty: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        // The interaction was recorded in history
        assert_eq!(state.history.count().await, 1);
    }

    #[tokio::test]
    async fn test_interaction_endpoint_updates_profile() {
        let dir = TempDir::new().unwrap();
        let state = state_in(
            &dir,
            r#"{"teaching_subjects": ["Biology"], "preferred_tone": "casual"}"#,
        );

        let response = handlers::memory::process_interaction(
            State(state.clone()),
            Path("teacher-1".to_string()),
            axum::Json(handlers::memory::InteractionRequest {
                message: "I teach biology and like to keep things casual".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let profile = state.memory.profile("teacher-1").await;
        assert_eq!(profile.teaching_subjects, vec!["Biology"]);
        assert_eq!(profile.preferred_tone, "casual");
        assert_eq!(profile.interaction_count, 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "ok");

        let response = handlers::uploads::save_upload(
            State(state),
            axum::Json(handlers::uploads::UploadRequest {
                filename: "slides.pdf".to_string(),
                content: "binary-ish".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_saves_text_file() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir, "ok");

        let response = handlers::uploads::save_upload(
            State(state.clone()),
            axum::Json(handlers::uploads::UploadRequest {
                filename: "notes week 3.md".to_string(),
                content: "# Photosynthesis\nLight reactions...".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(state.uploads_dir.join("notesweek3.md").exists());
    }
}
