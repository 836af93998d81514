use crate::config::{Config, ConfigError, ConfigResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Configuration manager backed by a JSON file
#[derive(Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: Arc<RwLock<Config>>,
}

impl ConfigManager {
    /// Load configuration, writing a default file if none exists yet
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        let config = if path.exists() {
            info!("Loading config from {:?}", path);
            let content = tokio::fs::read_to_string(path).await?;
            let content = Self::expand_env_vars(&content)?;
            let config: Config = serde_json::from_str(&content)?;
            Self::validate(&config)?;
            config
        } else {
            info!("Config file not found, creating default config at {:?}", path);
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let content = serde_json::to_string_pretty(&default_config)?;
            tokio::fs::write(path, &content).await?;
            default_config
        };

        Ok(Self {
            path: path.to_path_buf(),
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Load from the default location (~/.sage/config.json)
    pub async fn load_default() -> ConfigResult<Self> {
        let config_path = Self::default_config_path()?;
        Self::load(&config_path).await
    }

    /// Default config path (~/.sage/config.json)
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::InvalidPath("Could not find home directory".to_string()))?;
        Ok(home.join(".sage").join("config.json"))
    }

    /// Wrap an existing config (used by tests)
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Shared handle to the current config
    pub fn get(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    /// Persist the current config to its file
    pub async fn save(&self) -> ConfigResult<()> {
        let config = self.config.read().await;
        let content = serde_json::to_string_pretty(&*config)?;
        drop(config);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        info!("Config saved to {:?}", self.path);
        Ok(())
    }

    /// Re-read the config file, replacing the in-memory copy
    pub async fn reload(&self) -> ConfigResult<()> {
        if !self.path.exists() {
            return Err(ConfigError::InvalidPath(format!(
                "Config file not found: {:?}",
                self.path
            )));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let content = Self::expand_env_vars(&content)?;
        let new_config: Config = serde_json::from_str(&content)?;

        Self::validate(&new_config)?;

        let mut config = self.config.write().await;
        *config = new_config;
        drop(config);

        info!("Config reloaded from {:?}", self.path);
        Ok(())
    }

    /// Mutate the config and persist the result
    pub async fn update<F>(&self, f: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.config.write().await;
        f(&mut config);
        drop(config);
        self.save().await
    }

    /// Validate a config
    pub fn validate(config: &Config) -> ConfigResult<()> {
        if config.server.port == 0 {
            return Err(ConfigError::Validation(
                "Server port cannot be 0".to_string(),
            ));
        }

        if config.llm.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "LLM model name cannot be empty".to_string(),
            ));
        }

        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "LLM base URL cannot be empty".to_string(),
            ));
        }

        if config.llm.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "LLM timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Expand ${VAR} or ${VAR:-default} references
    fn expand_env_vars(content: &str) -> ConfigResult<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let full_match = cap.get(0).unwrap().as_str();
            let var_expr = cap.get(1).unwrap().as_str();

            let (var_name, default_value) = if let Some(pos) = var_expr.find(":-") {
                let (name, rest) = var_expr.split_at(pos);
                (name, Some(&rest[2..]))
            } else {
                (var_expr, None)
            };

            let replacement = match std::env::var(var_name) {
                Ok(val) => val,
                Err(_) => {
                    if let Some(default) = default_value {
                        default.to_string()
                    } else {
                        return Err(ConfigError::EnvVarNotFound(var_name.to_string()));
                    }
                }
            };

            result = result.replace(full_match, &replacement);
        }

        Ok(result)
    }

    /// Path of the backing config file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
