use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// One recorded interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub task: String,
    pub input: String,
    pub output: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        user_id: Option<String>,
        task: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            task: task.into(),
            input: input.into(),
            output: output.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only JSONL log of interactions
#[derive(Debug, Clone)]
pub struct HistoryStorage {
    path: PathBuf,
}

impl HistoryStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a JSON line
    pub async fn append(&self, entry: &HistoryEntry) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Most recent entries, newest first. Unparseable lines are skipped.
    pub async fn list(&self, limit: usize) -> Vec<HistoryEntry> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = ?self.path, error = %err, "failed to read history");
                return Vec::new();
            }
        };

        let mut entries: Vec<HistoryEntry> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        let keep = entries.len().saturating_sub(limit);
        entries.drain(..keep);
        entries.reverse();
        entries
    }

    /// Number of recorded entries
    pub async fn count(&self) -> usize {
        match fs::read_to_string(&self.path).await {
            Ok(content) => content.lines().filter(|line| !line.trim().is_empty()).count(),
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> HistoryStorage {
        HistoryStorage::new(dir.path().join("history.jsonl"))
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        for i in 1..=3 {
            let entry = HistoryEntry::new(
                Some("teacher-1".to_string()),
                "summarize",
                format!("input {}", i),
                format!("output {}", i),
            );
            storage.append(&entry).await.unwrap();
        }

        let entries = storage.list(10).await;
        assert_eq!(entries.len(), 3);
        // Newest first
        assert_eq!(entries[0].input, "input 3");
        assert_eq!(entries[2].input, "input 1");
        assert_eq!(storage.count().await, 3);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        for i in 1..=5 {
            let entry = HistoryEntry::new(None, "chat", format!("q{}", i), format!("a{}", i));
            storage.append(&entry).await.unwrap();
        }

        let entries = storage.list(2).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].input, "q5");
        assert_eq!(entries[1].input, "q4");
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.list(10).await.is_empty());
        assert_eq!(storage.count().await, 0);
    }

    #[tokio::test]
    async fn test_corrupt_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let entry = HistoryEntry::new(None, "quiz", "topic", "questions");
        storage.append(&entry).await.unwrap();

        let mut raw = tokio::fs::read_to_string(storage.path()).await.unwrap();
        raw.push_str("{ broken json\n");
        tokio::fs::write(storage.path(), raw).await.unwrap();

        let entries = storage.list(10).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].task, "quiz");
    }
}
