/// Text generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: GenerateOptions::default(),
        }
    }

    /// Set options
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.options.temperature = Some(temp);
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max: u32) -> Self {
        self.options.max_tokens = Some(max);
        self
    }

    /// Enable streaming
    pub fn stream(mut self) -> Self {
        self.options.stream = true;
        self
    }
}

/// Options for text generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub stream: bool,
}

impl GenerateOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature (0.0 - 2.0)
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set top_p (0.0 - 1.0)
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: None,
            max_tokens: None,
            top_p: None,
            stream: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_builder() {
        let request = GenerateRequest::new("mistral", "Summarize this")
            .temperature(0.7)
            .max_tokens(300);

        assert_eq!(request.model, "mistral");
        assert_eq!(request.prompt, "Summarize this");
        assert_eq!(request.options.temperature, Some(0.7));
        assert_eq!(request.options.max_tokens, Some(300));
        assert!(!request.options.stream);
    }

    #[test]
    fn test_generate_options() {
        let options = GenerateOptions::new()
            .with_temperature(0.2)
            .with_top_p(0.9)
            .with_streaming();

        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.top_p, Some(0.9));
        assert!(options.stream);
    }
}
