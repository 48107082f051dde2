//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Knowledge base could not be loaded
    #[error(transparent)]
    KnowledgeBase(#[from] clauseclear_rules::KnowledgeBaseError),

    /// Labelled evaluation set could not be loaded
    #[error(transparent)]
    Evaluation(#[from] clauseclear_rules::EvaluationError),

    /// Retrieval index error
    #[error("Index error: {0}")]
    Index(#[from] clauseclear_store::IndexError),

    /// Hybrid analysis error
    #[error("Analysis error: {0}")]
    Extractor(#[from] clauseclear_extractor::ExtractorError),

    /// Input document could not be read
    #[error("Input error: {0:#}")]
    Input(#[from] anyhow::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
