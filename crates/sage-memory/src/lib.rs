mod context;
mod extractor;
mod manager;
mod models;
mod store;
pub mod tones;

pub use context::render_context;
pub use extractor::ProfileExtractor;
pub use manager::MemoryManager;
pub use models::{EducatorProfile, PartialProfile, ProfileStats};
pub use store::ProfileStore;
pub use tones::Tone;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unknown tone: {tone}")]
    UnknownTone { tone: String },
}

pub type MemoryResult<T> = Result<T, MemoryError>;
