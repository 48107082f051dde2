//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the deterministic core and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::Severity;
use std::path::Path;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (clauseclear-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// A clause as presented to an external classifier
///
/// `number` is the clause's position within its batch (1-based); classifier
/// answers refer back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedClause {
    /// Batch-local number
    pub number: u32,

    /// Clause text
    pub text: String,
}

/// A classifier's verdict on one numbered clause
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Batch-local number the verdict refers to
    pub id: u32,

    /// Assigned severity
    pub severity: Severity,

    /// Plain-language justification
    pub justification: String,
}

/// Trait for classifying a batch of clauses with an external service
///
/// Implemented by the application layer (clauseclear-extractor) on top of an
/// [`LlmProvider`], or directly by test doubles. A malformed or non-JSON
/// response must be reported as an error, which the caller treats as a
/// recoverable per-batch failure.
pub trait ClauseClassifier {
    /// Error type for classification
    type Error;

    /// Classify a batch of numbered clauses
    fn classify_batch(&self, batch: &[NumberedClause]) -> Result<Vec<Classification>, Self::Error>;
}

/// Trait for extracting per-page text from a document
///
/// Implemented by the interface layer (clauseclear-cli)
pub trait PageExtractor {
    /// Error type for extraction
    type Error;

    /// Extract one string per page, in page order
    ///
    /// A page that yields no text is returned as an empty string.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, Self::Error>;
}
