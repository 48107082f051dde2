//! ClauseClear Extractor
//!
//! Turns raw document text into clauses and flags the ones worth a closer
//! look.
//!
//! # Overview
//!
//! Segmentation splits page text into clause-sized fragments and assigns each
//! a page-scoped id. Hybrid analysis then runs a fast pattern pass and sends
//! whatever it does not recognise to an external classifier.
//!
//! # Architecture
//!
//! ```text
//! Pages → ClauseSegmenter → Clauses → HybridOrchestrator → Flags
//!                                        ├─ fast rules
//!                                        └─ ClauseClassifier (batched)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use clauseclear_extractor::{segment_pages, HybridConfig, HybridOrchestrator, LlmClassifier};
//! use clauseclear_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let clauses = segment_pages(&["The tenant shall pay a security deposit of 6 months rent."]);
//!
//! let classifier = LlmClassifier::new(MockProvider::new("[]"));
//! let orchestrator = HybridOrchestrator::new(classifier, HybridConfig::default())?;
//!
//! for flag in orchestrator.analyze(clauses).await {
//!     println!("{} [{}] {}", flag.clause_id, flag.severity.as_str(), flag.reason);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cancel;
mod classifier;
mod config;
mod error;
pub mod fast_rules;
mod orchestrator;
mod parser;
mod prompt;
pub mod segmenter;
mod types;


pub use cancel::CancellationToken;
pub use classifier::LlmClassifier;
pub use config::HybridConfig;
pub use error::ExtractorError;
pub use orchestrator::HybridOrchestrator;
pub use parser::{parse_classifier_response, DEFAULT_JUSTIFICATION};
pub use prompt::{PromptBuilder, CLASSIFICATION_SCHEMA};
pub use segmenter::{segment, segment_pages, ClauseSegmenter, Segment};
pub use types::{HybridMetadata, HybridReport};
