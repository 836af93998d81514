use serde::Serialize;

/// Text generation response
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub model: String,
    pub text: String,
    pub done: bool,
    pub usage: GenerateUsage,
}

impl GenerateResponse {
    /// Create a new response
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            done: true,
            usage: GenerateUsage::default(),
        }
    }

    /// Set usage
    pub fn with_usage(mut self, usage: GenerateUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Get the generated text with surrounding whitespace removed
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateUsage {
    pub prompt_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl GenerateUsage {
    /// Create new usage info
    pub fn new(prompt: u32, output: u32) -> Self {
        Self {
            prompt_tokens: prompt,
            output_tokens: output,
            total_tokens: prompt + output,
        }
    }
}
