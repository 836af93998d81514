use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::{models::EducatorProfile, MemoryError, MemoryResult};

/// File-backed store of educator profiles.
///
/// One JSON file holds the whole `user_id -> profile` mapping; every save
/// rewrites it in full and replaces the file atomically through a sibling
/// temp path. Concurrent savers race with last-writer-wins at whole-file
/// granularity - a documented limitation, acceptable at this write volume.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping. Never fails: a missing or unreadable file and a
    /// corrupt document all degrade to an empty mapping.
    pub async fn load_all(&self) -> HashMap<String, EducatorProfile> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                warn!(path = ?self.path, error = %err, "failed to read profile store");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = ?self.path, error = %err, "corrupt profile store, treating as empty");
                HashMap::new()
            }
        }
    }

    /// Stored profile for a user, if any
    pub async fn load_optional(&self, user_id: &str) -> Option<EducatorProfile> {
        self.load_all().await.remove(user_id)
    }

    /// Stored profile for a user, or the empty default
    pub async fn load(&self, user_id: &str) -> EducatorProfile {
        self.load_optional(user_id).await.unwrap_or_default()
    }

    /// Write one profile into the mapping and persist the whole mapping
    pub async fn save(&self, user_id: &str, profile: &EducatorProfile) -> MemoryResult<()> {
        let mut all = self.load_all().await;
        all.insert(user_id.to_string(), profile.clone());
        self.persist(&all).await
    }

    /// Remove a user's profile. Removing an absent profile is not an error.
    pub async fn clear(&self, user_id: &str) -> MemoryResult<()> {
        let mut all = self.load_all().await;
        if all.remove(user_id).is_some() {
            self.persist(&all).await?;
        }
        Ok(())
    }

    async fn persist(&self, all: &HashMap<String, EducatorProfile>) -> MemoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(all)?;
        let tmp = self.tmp_path();

        if let Err(err) = fs::write(&tmp, content).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(MemoryError::Io(err));
        }

        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(MemoryError::Io(err));
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("user_memory.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let profile = store.load("teacher-1").await;
        assert_eq!(profile, EducatorProfile::default());
        assert!(store.load_optional("teacher-1").await.is_none());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let profile = EducatorProfile {
            teaching_subjects: vec!["Biology".to_string()],
            grade_levels: vec!["9th grade".to_string()],
            preferred_tone: "casual".to_string(),
            interaction_count: 2,
            ..Default::default()
        };

        store.save("teacher-1", &profile).await.unwrap();
        let loaded = store.load("teacher-1").await;

        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_save_keeps_other_users() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = EducatorProfile {
            teaching_subjects: vec!["Math".to_string()],
            ..Default::default()
        };
        let b = EducatorProfile {
            teaching_subjects: vec!["History".to_string()],
            ..Default::default()
        };

        store.save("teacher-a", &a).await.unwrap();
        store.save("teacher-b", &b).await.unwrap();

        assert_eq!(store.load("teacher-a").await, a);
        assert_eq!(store.load("teacher-b").await, b);
        assert_eq!(store.load_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.path(), "{ not json")
            .await
            .unwrap();

        assert!(store.load_all().await.is_empty());

        // Corruption does not block future saves
        let profile = EducatorProfile {
            goals: vec!["recover".to_string()],
            ..Default::default()
        };
        store.save("teacher-1", &profile).await.unwrap();
        assert_eq!(store.load("teacher-1").await, profile);
    }

    #[tokio::test]
    async fn test_clear_removes_profile() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let profile = EducatorProfile {
            interests: vec!["robotics".to_string()],
            interaction_count: 5,
            ..Default::default()
        };
        store.save("teacher-1", &profile).await.unwrap();

        store.clear("teacher-1").await.unwrap();

        assert!(store.load_optional("teacher-1").await.is_none());
        assert_eq!(store.load("teacher-1").await, EducatorProfile::default());
    }

    #[tokio::test]
    async fn test_clear_missing_user_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.clear("nobody").await.is_ok());
    }

    #[tokio::test]
    async fn test_no_temp_artifact_left_after_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save("teacher-1", &EducatorProfile::default())
            .await
            .unwrap();

        assert!(store.path().exists());
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_store_file_is_valid_json_after_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save("teacher-1", &EducatorProfile::default())
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.get("teacher-1").is_some());
    }
}
