use async_trait::async_trait;
use sage_core::{GenerateRequest, GenerateResponse};

use crate::error::Result;

/// A text-generation backend.
///
/// The request carries the full prompt; the provider is responsible for
/// transport, timeouts, and mapping failures onto [`crate::LlmError`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier of the backing provider
    fn provider_id(&self) -> &str;

    /// Run a single prompt to completion
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Check that the provider is reachable
    async fn validate(&self) -> Result<()>;
}
