//! maqal - Turn Arabic articles into styled markdown and metadata using few-shot LLM prompts
//!
//! "maqal" is Arabic for "article"

pub mod article;
pub mod cli;
pub mod config;
pub mod llm;
pub mod storage;

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for maqal
#[derive(Error, Debug)]
pub enum MaqalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing files for example '{name}': {}", display_paths(.missing))]
    MissingExampleFiles { name: String, missing: Vec<PathBuf> },

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Failed to parse model response: {0}")]
    Parse(String),

    #[error("Article text is empty")]
    EmptyArticle,

    #[error("An output filename is required to save results")]
    MissingFilename,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MaqalError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "maqal";
