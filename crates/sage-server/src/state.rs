use std::path::PathBuf;
use std::sync::Arc;

use sage_core::{GenerateRequest, GenerateResponse};
use sage_llm::{LlmError, TextGenerator};
use sage_memory::{render_context, tones, MemoryManager};

use crate::storage::{HistoryEntry, HistoryStorage};

/// Model parameters applied to every generation
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
}

/// Shared application state, created once at startup and handed to every
/// handler
pub struct AppState {
    pub memory: MemoryManager,
    pub generator: Arc<dyn TextGenerator>,
    pub history: HistoryStorage,
    pub llm: LlmSettings,
    pub uploads_dir: PathBuf,
    pub history_list_limit: usize,
}

impl AppState {
    /// Run a prompt through the configured model
    pub async fn run_generation(&self, prompt: String) -> Result<GenerateResponse, LlmError> {
        let request =
            GenerateRequest::new(&self.llm.model, prompt).temperature(self.llm.temperature);
        self.generator.generate(request).await
    }

    /// Assemble the final prompt for a task: educator context and tone
    /// instruction first (when a user is known and has any), then the task
    /// prompt itself.
    pub async fn personalized_prompt(&self, user_id: Option<&str>, task_prompt: &str) -> String {
        let Some(user_id) = user_id else {
            return task_prompt.to_string();
        };

        let profile = self.memory.profile(user_id).await;
        let mut prompt = render_context(&profile);
        if !profile.preferred_tone.is_empty() {
            prompt.push_str(&tones::instruction(&profile.preferred_tone));
        }
        prompt.push_str(task_prompt);
        prompt
    }

    /// Feed a message through the memory pipeline.
    ///
    /// Extraction failures are already absorbed inside the manager; a failed
    /// save is returned as a message so handlers can report it alongside the
    /// primary response instead of failing the request.
    pub async fn remember_interaction(
        &self,
        user_id: Option<&str>,
        message: &str,
    ) -> Option<String> {
        let user_id = user_id?;
        match self.memory.process_interaction(user_id, message).await {
            Ok(_) => None,
            Err(err) => {
                tracing::error!(user_id, error = %err, "failed to persist educator memory");
                Some(err.to_string())
            }
        }
    }

    /// Record an interaction in the history log; failures are logged only
    pub async fn record_history(
        &self,
        user_id: Option<&str>,
        task: &str,
        input: &str,
        output: &str,
    ) {
        let entry = HistoryEntry::new(user_id.map(str::to_string), task, input, output);
        if let Err(err) = self.history.append(&entry).await {
            tracing::warn!(task, error = %err, "failed to record history entry");
        }
    }
}
