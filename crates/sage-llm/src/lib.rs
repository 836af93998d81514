mod error;
mod generator;
mod ollama;

pub use error::{LlmError, Result};
pub use generator::TextGenerator;
pub use ollama::{OllamaConfig, OllamaProvider};
