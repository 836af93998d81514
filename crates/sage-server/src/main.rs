use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sage_config::ConfigManager;
use sage_llm::{OllamaConfig, OllamaProvider, TextGenerator};
use sage_memory::{MemoryManager, ProfileStore};

mod handlers;
mod logging;
mod server;
mod state;
mod storage;

use logging::init_logging;
use server::run_server;
use state::{AppState, LlmSettings};
use storage::HistoryStorage;

#[derive(Parser, Debug, Clone)]
#[command(name = "sage-server")]
#[command(about = "Sage Educator Assistant HTTP Server")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port (overrides config)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Ollama base URL (overrides config)
    #[arg(long, env = "OLLAMA_BASE_URL")]
    ollama_url: Option<String>,

    /// Model name (overrides config)
    #[arg(long, env = "SAGE_MODEL")]
    model: Option<String>,

    /// Log level (overrides config)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Config file path
    #[arg(long, env = "SAGE_CONFIG", default_value = "~/.sage/config.json")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = sage_config::expand_tilde(&cli.config)
        .unwrap_or_else(|| PathBuf::from(&cli.config));

    if let Err(e) = sage_config::init_sage_dirs().await {
        eprintln!("Warning: Failed to init sage directories: {}", e);
    }

    let config_manager = match ConfigManager::load(&config_path).await {
        Ok(cm) => cm,
        Err(e) => {
            eprintln!("Failed to load config from {:?}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    let config = config_manager.get().read().await.clone();

    // CLI arguments override the config file
    let port = cli.port.unwrap_or(config.server.port);
    let base_url = cli
        .ollama_url
        .clone()
        .unwrap_or_else(|| config.llm.base_url.clone());
    let model = cli.model.clone().unwrap_or_else(|| config.llm.model.clone());

    let log_level = cli.log_level.clone().or_else(|| {
        if cli.debug {
            Some("debug".to_string())
        } else {
            Some(config.logging.level.to_string())
        }
    });
    init_logging(log_level.as_deref());

    tracing::info!("Starting Sage server on port {}", port);
    tracing::info!("LLM configuration:");
    tracing::info!("  Base URL: {}", base_url);
    tracing::info!("  Model: {}", model);
    tracing::info!("  Temperature: {}", config.llm.temperature);
    tracing::info!("  Timeout: {}s", config.llm.timeout_seconds);

    let ollama_config = OllamaConfig::new(base_url)
        .with_timeout(Duration::from_secs(config.llm.timeout_seconds));
    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaProvider::new(ollama_config)?);

    let memory_path = config
        .memory
        .path
        .as_deref()
        .and_then(sage_config::expand_tilde)
        .or_else(sage_config::default_memory_path)
        .ok_or_else(|| anyhow::anyhow!("could not resolve memory store path"))?;
    tracing::info!("Profile store: {:?}", memory_path);

    let store = ProfileStore::new(memory_path);
    let memory = MemoryManager::new(store, generator.clone(), model.clone());

    let history_path = config
        .history
        .path
        .as_deref()
        .and_then(sage_config::expand_tilde)
        .or_else(sage_config::default_history_path)
        .ok_or_else(|| anyhow::anyhow!("could not resolve history path"))?;
    let history = HistoryStorage::new(history_path);

    let uploads_dir = sage_config::default_uploads_dir()
        .ok_or_else(|| anyhow::anyhow!("could not resolve uploads directory"))?;

    let state = Arc::new(AppState {
        memory,
        generator,
        history,
        llm: LlmSettings {
            model,
            temperature: config.llm.temperature,
        },
        uploads_dir,
        history_list_limit: config.history.list_limit,
    });

    let mut server_config = config.server.clone();
    server_config.port = port;

    run_server(state, &server_config).await
}
