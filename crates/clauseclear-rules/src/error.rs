//! Knowledge base error types

use thiserror::Error;

/// Errors that can occur while loading a knowledge base
///
/// Both variants are fatal at startup: without a knowledge base nothing can
/// be scored.
#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    /// Backing resource is absent or unreadable
    #[error("Knowledge base not found: {0}")]
    ConfigurationMissing(String),

    /// Required keys are missing or have the wrong type
    #[error("Knowledge base malformed: {0}")]
    ConfigurationMalformed(String),
}

impl From<serde_json::Error> for KnowledgeBaseError {
    fn from(e: serde_json::Error) -> Self {
        KnowledgeBaseError::ConfigurationMalformed(e.to_string())
    }
}

impl From<toml::de::Error> for KnowledgeBaseError {
    fn from(e: toml::de::Error) -> Self {
        KnowledgeBaseError::ConfigurationMalformed(e.to_string())
    }
}

/// Errors that can occur while loading a labelled evaluation set
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// Labelled set file is absent or unreadable
    #[error("Labelled set not found: {0}")]
    LabelledSetMissing(String),

    /// Labelled set is not valid JSON of the expected shape
    #[error("Labelled set malformed: {0}")]
    LabelledSetMalformed(#[from] serde_json::Error),
}
