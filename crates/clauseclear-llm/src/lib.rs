//! ClauseClear LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `clauseclear-domain`, used
//! by the hybrid analysis pipeline to classify clauses the deterministic rules
//! did not resolve.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic canned responses for tests
//! - `OllamaProvider`: local Ollama HTTP API
//!
//! # Examples
//!
//! ```
//! use clauseclear_llm::MockProvider;
//! use clauseclear_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("[]");
//! assert_eq!(provider.generate("classify these clauses").unwrap(), "[]");
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod ollama;

use thiserror::Error;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Async runtime could not be started for a blocking call
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}
