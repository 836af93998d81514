pub mod config;
pub mod manager;

pub use config::{
    Config, ConfigError, ConfigResult, HistoryConfig, LlmConfig, LogLevel, LoggingConfig,
    MemoryConfig, ServerConfig,
};
pub use manager::ConfigManager;

use std::path::PathBuf;

/// Sage data directory (~/.sage)
pub fn sage_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sage"))
}

/// Default config file path
pub fn default_config_path() -> Option<PathBuf> {
    sage_dir().map(|dir| dir.join("config.json"))
}

/// Default profile store path
pub fn default_memory_path() -> Option<PathBuf> {
    sage_dir().map(|dir| dir.join("user_memory.json"))
}

/// Default interaction history path
pub fn default_history_path() -> Option<PathBuf> {
    sage_dir().map(|dir| dir.join("history.jsonl"))
}

/// Default uploads directory
pub fn default_uploads_dir() -> Option<PathBuf> {
    sage_dir().map(|dir| dir.join("uploads"))
}

/// Create the Sage directory layout
pub async fn init_sage_dirs() -> ConfigResult<()> {
    if let Some(sage) = sage_dir() {
        tokio::fs::create_dir_all(&sage).await?;
        tokio::fs::create_dir_all(sage.join("uploads")).await?;
        tokio::fs::create_dir_all(sage.join("logs")).await?;
    }
    Ok(())
}

/// Expand a leading ~ to the user's home directory
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if path.starts_with("~/") {
        dirs::home_dir().map(|home| home.join(&path[2..]))
    } else {
        Some(PathBuf::from(path))
    }
}
