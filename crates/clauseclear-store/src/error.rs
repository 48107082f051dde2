//! Retrieval index error types

use thiserror::Error;

/// Errors that can occur during index build, search or persistence
#[derive(Error, Debug)]
pub enum IndexError {
    /// No artifact exists for the document; build before searching
    #[error("Index not built for document: {0}")]
    IndexNotBuilt(String),

    /// Build was called with no clauses
    #[error("Cannot build an index over zero clauses")]
    EmptyCorpus,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Artifact (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted artifact is inconsistent or storage is unusable
    #[error("Persistence error: {0}")]
    Persistence(String),
}
