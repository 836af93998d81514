use std::sync::Arc;

use chrono::Utc;
use sage_llm::TextGenerator;

use crate::context::render_context;
use crate::extractor::ProfileExtractor;
use crate::models::{EducatorProfile, PartialProfile, ProfileStats};
use crate::store::ProfileStore;
use crate::{tones, MemoryError, MemoryResult};

/// Orchestrates the memory flow for educator interactions.
///
/// Holds the injected store and extraction client; every mutation goes
/// load -> (extract) -> merge -> save. Extraction failures degrade silently,
/// persistence failures are returned to the caller.
#[derive(Clone)]
pub struct MemoryManager {
    store: ProfileStore,
    extractor: ProfileExtractor,
}

impl MemoryManager {
    pub fn new(
        store: ProfileStore,
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
    ) -> Self {
        let extractor = ProfileExtractor::new(generator, model);
        Self { store, extractor }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Process one user message: infer new facts, merge them into the stored
    /// profile, persist, and return the updated profile.
    pub async fn process_interaction(
        &self,
        user_id: &str,
        message: &str,
    ) -> MemoryResult<EducatorProfile> {
        let mut profile = self.store.load(user_id).await;
        let partial = self.extractor.extract(message).await;
        profile.merge(&partial);
        self.store.save(user_id, &profile).await?;
        Ok(profile)
    }

    /// Current profile for a user (empty default if none stored)
    pub async fn profile(&self, user_id: &str) -> EducatorProfile {
        self.store.load(user_id).await
    }

    /// Rendered context paragraph for prompt injection ("" when empty)
    pub async fn context_for(&self, user_id: &str) -> String {
        render_context(&self.store.load(user_id).await)
    }

    /// Explicitly set a user's preferred tone.
    ///
    /// This is the strict path: unknown names are rejected before any
    /// mutation occurs.
    pub async fn set_tone(&self, user_id: &str, tone: &str) -> MemoryResult<EducatorProfile> {
        let entry = tones::find(tone).ok_or_else(|| MemoryError::UnknownTone {
            tone: tone.trim().to_string(),
        })?;

        let mut profile = self.store.load(user_id).await;
        if profile.preferred_tone != entry.name || profile.last_updated.is_none() {
            profile.preferred_tone = entry.name.to_string();
            profile.last_updated = Some(Utc::now());
        }
        self.store.save(user_id, &profile).await?;
        Ok(profile)
    }

    /// Manually merge a caller-supplied fragment, skipping extraction.
    ///
    /// The fragment gets the same sanitation as a model response: list
    /// cleanup plus the catalog check on the tone.
    pub async fn update_profile(
        &self,
        user_id: &str,
        partial: PartialProfile,
    ) -> MemoryResult<EducatorProfile> {
        let partial = partial.sanitized();
        let mut profile = self.store.load(user_id).await;
        profile.merge(&partial);
        self.store.save(user_id, &profile).await?;
        Ok(profile)
    }

    /// Reset a user's profile to the empty structure
    pub async fn clear(&self, user_id: &str) -> MemoryResult<()> {
        self.store.clear(user_id).await
    }

    /// Statistics about a user's stored profile
    pub async fn stats(&self, user_id: &str) -> ProfileStats {
        match self.store.load_optional(user_id).await {
            Some(profile) => profile.stats(),
            None => ProfileStats::missing(),
        }
    }
}
