use std::time::Duration;

use sage_core::GenerateRequest;
use sage_llm::{LlmError, OllamaConfig, OllamaProvider, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OllamaProvider {
    let config = OllamaConfig::new(server.uri()).with_timeout(Duration::from_secs(5));
    OllamaProvider::new(config).unwrap()
}

#[tokio::test]
async fn generate_parses_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "mistral",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "mistral",
            "response": "Photosynthesis converts light into chemical energy.",
            "done": true,
            "prompt_eval_count": 24,
            "eval_count": 11,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = GenerateRequest::new("mistral", "Explain photosynthesis").temperature(0.7);

    let response = provider.generate(request).await.unwrap();

    assert_eq!(
        response.text,
        "Photosynthesis converts light into chemical energy."
    );
    assert!(response.done);
    assert_eq!(response.usage.prompt_tokens, 24);
    assert_eq!(response.usage.output_tokens, 11);
    assert_eq!(response.usage.total_tokens, 35);
}

#[tokio::test]
async fn generate_sends_temperature_in_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "options": { "temperature": 0.2 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "mistral",
            "response": "{}",
            "done": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = GenerateRequest::new("mistral", "Extract facts").temperature(0.2);

    provider.generate(request).await.unwrap();
}

#[tokio::test]
async fn generate_maps_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"model 'nope' not found"}"#),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = GenerateRequest::new("nope", "hello");

    match provider.generate(request).await {
        Err(LlmError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("not found"));
        }
        other => panic!("expected Api error, got {:?}", other.map(|r| r.text)),
    }
}

#[tokio::test]
async fn generate_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = GenerateRequest::new("mistral", "hello");

    assert!(matches!(
        provider.generate(request).await,
        Err(LlmError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn validate_checks_tags_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    assert!(provider.validate().await.is_ok());
}
