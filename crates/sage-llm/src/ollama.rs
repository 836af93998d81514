use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{Deserialize, Serialize};

use sage_core::{GenerateRequest, GenerateResponse, GenerateUsage};

use crate::error::{LlmError, Result};
use crate::generator::TextGenerator;

/// Connection settings for a local Ollama instance
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl OllamaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new("http://localhost:11434")
    }
}

/// Ollama provider
/// Talks to the `/api/generate` endpoint of a locally hosted model server
pub struct OllamaProvider {
    config: OllamaConfig,
    http_client: reqwest_middleware::ClientWithMiddleware,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let retry_policy = ExponentialBackoff::builder()
            .base(2)
            .build_with_max_retries(3);

        let http_client = reqwest_middleware::ClientBuilder::new(
            Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| LlmError::Config(e.to_string()))?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn map_send_error(e: reqwest_middleware::Error) -> LlmError {
        match e {
            reqwest_middleware::Error::Reqwest(err) if err.is_timeout() => LlmError::Timeout,
            other => LlmError::Network(other.to_string()),
        }
    }
}

/// Request body for `/api/generate`
#[derive(Debug, Serialize)]
struct ApiGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: ApiGenerateOptions,
}

#[derive(Debug, Serialize)]
struct ApiGenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// Response body of a non-streaming `/api/generate` call
#[derive(Debug, Deserialize)]
struct ApiGenerateResponse {
    model: String,
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    fn provider_id(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let body = ApiGenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            // Single-shot contract: the full completion is awaited either way
            stream: false,
            options: ApiGenerateOptions {
                temperature: request.options.temperature,
                num_predict: request.options.max_tokens,
                top_p: request.options.top_p,
            },
        };

        let url = format!("{}/api/generate", self.config.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let data: ApiGenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            model = %data.model,
            output_tokens = data.eval_count,
            "ollama generation completed"
        );

        Ok(GenerateResponse {
            model: data.model,
            text: data.response,
            done: data.done,
            usage: GenerateUsage::new(data.prompt_eval_count, data.eval_count),
        })
    }

    async fn validate(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(())
    }
}
