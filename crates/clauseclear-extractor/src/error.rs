//! Error types for hybrid analysis

use thiserror::Error;

/// Errors that can occur while classifying clauses
///
/// Per-batch failures are caught by the orchestrator and logged; they reduce
/// that batch's output to zero flags instead of aborting the analysis.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A classifier batch failed or timed out
    #[error("Classifier batch {batch} failed: {reason}")]
    ClassifierBatchFailed {
        /// Zero-based batch index
        batch: usize,
        /// What went wrong
        reason: String,
    },

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Classifier output was not the expected JSON shape
    #[error("Invalid classifier response: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
