use std::sync::Arc;

use sage_core::{first_json_object, GenerateRequest};
use sage_llm::TextGenerator;
use serde_json::Value;
use tracing::warn;

use crate::models::PartialProfile;
use crate::tones;

/// Messages shorter than this skip extraction entirely
const MIN_MESSAGE_LEN: usize = 10;

/// Low temperature for consistent structured output
const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Infers structured educator facts from free-form messages via the model.
///
/// Extraction is best-effort: transport errors, timeouts, and malformed
/// output all degrade to an empty fragment so the surrounding interaction
/// can proceed without personalization.
#[derive(Clone)]
pub struct ProfileExtractor {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ProfileExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Extract a profile fragment from a message. Never fails.
    pub async fn extract(&self, message: &str) -> PartialProfile {
        let message = message.trim();
        if message.chars().count() < MIN_MESSAGE_LEN {
            return PartialProfile::default();
        }

        let prompt = extraction_prompt(message, &tones::names().join(", "));
        let request =
            GenerateRequest::new(&self.model, prompt).temperature(EXTRACTION_TEMPERATURE);

        let output = match self.generator.generate(request).await {
            Ok(response) => response.text,
            Err(err) => {
                warn!(error = %err, "profile extraction call failed");
                return PartialProfile::default();
            }
        };

        let Some(json_str) = first_json_object(&output) else {
            warn!("no JSON object found in extraction output");
            return PartialProfile::default();
        };

        match serde_json::from_str::<Value>(json_str) {
            Ok(value) => validate_extraction(&value),
            Err(err) => {
                warn!(error = %err, "failed to parse extraction JSON");
                PartialProfile::default()
            }
        }
    }
}

fn extraction_prompt(message: &str, tone_options: &str) -> String {
    format!(
        "Analyze this teacher's message and extract relevant information about them.\n\
         Return ONLY a valid JSON object with these fields (use empty arrays if nothing found):\n\
         - teaching_subjects: list of subjects they teach (e.g., [\"biology\", \"chemistry\"])\n\
         - grade_levels: list of grade levels or age groups (e.g., [\"9th grade\", \"high school\"])\n\
         - teaching_style: list of teaching approaches (e.g., [\"project-based\", \"hands-on\", \"inquiry-based\"])\n\
         - interests: list of educational interests or focuses (e.g., [\"STEM education\", \"technology integration\"])\n\
         - goals: list of current goals or challenges (e.g., [\"improve engagement\", \"integrate more technology\"])\n\
         - preferred_tone: if the teacher expresses a preference for how they want responses \
         (e.g., \"casual\", \"professional\", \"humorous\"), choose ONE from these options: {tone_options}. \
         Leave empty if not mentioned.\n\n\
         Important: Only extract information that is explicitly mentioned or clearly implied. \
         Don't make assumptions.\n\n\
         Examples of tone preferences:\n\
         - \"Can you be more casual?\" -> \"casual\"\n\
         - \"I prefer a professional approach\" -> \"professional\"\n\
         - \"Make it fun and witty\" -> \"humorous\"\n\
         - \"Keep it brief\" -> \"concise\"\n\n\
         Teacher's message: \"{message}\"\n\n\
         Respond with ONLY valid JSON, no explanation or additional text:"
    )
}

/// Schema-validate a raw extraction payload into a fragment.
///
/// The model's output is untrusted: non-array list fields and non-string
/// entries are dropped, entries are trimmed and deduplicated, and the tone
/// must name a catalog entry or it is dropped to empty.
fn validate_extraction(value: &Value) -> PartialProfile {
    let raw = PartialProfile {
        teaching_subjects: string_list(value, "teaching_subjects"),
        grade_levels: string_list(value, "grade_levels"),
        teaching_style: string_list(value, "teaching_style"),
        interests: string_list(value, "interests"),
        goals: string_list(value, "goals"),
        preferred_tone: value
            .get("preferred_tone")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    };

    raw.sanitized()
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
