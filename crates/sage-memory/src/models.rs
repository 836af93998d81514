use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tones;

/// Persisted per-educator record of inferred preferences and interaction metadata.
///
/// List fields preserve insertion order and never contain two entries that are
/// equal case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EducatorProfile {
    #[serde(default)]
    pub teaching_subjects: Vec<String>,
    #[serde(default)]
    pub grade_levels: Vec<String>,
    #[serde(default)]
    pub teaching_style: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    /// Empty means "unset - use default"; otherwise a tone catalog key
    #[serde(default)]
    pub preferred_tone: String,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interaction_count: u64,
}

impl EducatorProfile {
    /// Merge an extraction fragment into this profile.
    ///
    /// New list entries are appended in the fragment's order when their
    /// lowercase form is not already present. The tone is overwritten only by
    /// a non-empty, different value. `last_updated` is refreshed iff anything
    /// changed or the profile had no prior timestamp; `interaction_count`
    /// increments on every call regardless.
    ///
    /// Returns whether any field changed.
    pub fn merge(&mut self, partial: &PartialProfile) -> bool {
        let mut changed = false;

        changed |= merge_list(&mut self.teaching_subjects, &partial.teaching_subjects);
        changed |= merge_list(&mut self.grade_levels, &partial.grade_levels);
        changed |= merge_list(&mut self.teaching_style, &partial.teaching_style);
        changed |= merge_list(&mut self.interests, &partial.interests);
        changed |= merge_list(&mut self.goals, &partial.goals);

        if !partial.preferred_tone.is_empty() && partial.preferred_tone != self.preferred_tone {
            self.preferred_tone = partial.preferred_tone.clone();
            changed = true;
        }

        if changed || self.last_updated.is_none() {
            self.last_updated = Some(Utc::now());
        }

        self.interaction_count += 1;

        changed
    }

    /// Whether any of the summarizable list fields holds data
    pub fn has_teaching_context(&self) -> bool {
        !self.teaching_subjects.is_empty()
            || !self.grade_levels.is_empty()
            || !self.teaching_style.is_empty()
            || !self.interests.is_empty()
            || !self.goals.is_empty()
    }

    /// Statistics snapshot of this profile
    pub fn stats(&self) -> ProfileStats {
        ProfileStats {
            exists: true,
            interaction_count: self.interaction_count,
            last_updated: self.last_updated,
            total_subjects: self.teaching_subjects.len(),
            total_grade_levels: self.grade_levels.len(),
            total_interests: self.interests.len(),
            has_goals: !self.goals.is_empty(),
            has_preferred_tone: !self.preferred_tone.is_empty(),
        }
    }
}

/// Append entries from `incoming` whose lowercase form is absent from `existing`
fn merge_list(existing: &mut Vec<String>, incoming: &[String]) -> bool {
    let mut seen: HashSet<String> = existing.iter().map(|item| item.to_lowercase()).collect();
    let mut changed = false;

    for item in incoming {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if seen.insert(lower) {
            existing.push(trimmed.to_string());
            changed = true;
        }
    }

    changed
}

/// Incomplete profile fragment produced by one extraction call or a manual
/// update request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PartialProfile {
    #[serde(default)]
    pub teaching_subjects: Vec<String>,
    #[serde(default)]
    pub grade_levels: Vec<String>,
    #[serde(default)]
    pub teaching_style: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub preferred_tone: String,
}

impl PartialProfile {
    pub fn is_empty(&self) -> bool {
        self.teaching_subjects.is_empty()
            && self.grade_levels.is_empty()
            && self.teaching_style.is_empty()
            && self.interests.is_empty()
            && self.goals.is_empty()
            && self.preferred_tone.is_empty()
    }

    /// Normalize an untrusted fragment: list entries trimmed, emptied, and
    /// case-insensitively deduplicated; the tone lowercased and dropped to
    /// empty unless it names a catalog entry.
    pub fn sanitized(self) -> Self {
        let preferred_tone = tones::find(&self.preferred_tone)
            .map(|tone| tone.name.to_string())
            .unwrap_or_default();

        Self {
            teaching_subjects: sanitize_list(self.teaching_subjects),
            grade_levels: sanitize_list(self.grade_levels),
            teaching_style: sanitize_list(self.teaching_style),
            interests: sanitize_list(self.interests),
            goals: sanitize_list(self.goals),
            preferred_tone,
        }
    }
}

fn sanitize_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            unique.push(trimmed.to_string());
        }
    }

    unique
}

/// Summary statistics for a stored profile
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileStats {
    pub exists: bool,
    pub interaction_count: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub total_subjects: usize,
    pub total_grade_levels: usize,
    pub total_interests: usize,
    pub has_goals: bool,
    pub has_preferred_tone: bool,
}

impl ProfileStats {
    /// Stats for a user id with no stored profile
    pub fn missing() -> Self {
        Self {
            exists: false,
            interaction_count: 0,
            last_updated: None,
            total_subjects: 0,
            total_grade_levels: 0,
            total_interests: 0,
            has_goals: false,
            has_preferred_tone: false,
        }
    }
}
