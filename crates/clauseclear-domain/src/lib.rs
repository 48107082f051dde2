//! ClauseClear Domain Layer
//!
//! This crate contains the value types and trait seams shared by every other
//! ClauseClear crate. It carries no business logic beyond small conversions,
//! and its only external dependency is `serde` for the wire shape of the
//! value types.
//!
//! ## Key Concepts
//!
//! - **Clause**: a minimal addressable unit of contract text, identified by a
//!   [`ClauseId`] that is stable across segmentation, scoring and indexing
//! - **Rule / Thresholds**: the scoring configuration carried by a knowledge base
//! - **RiskVerdict**: the deterministic score/level/evidence produced for a clause
//! - **Flag**: one risk finding emitted by hybrid analysis
//!
//! ## Architecture
//!
//! - Pure data and conversions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (LLM, classifier, text extraction)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clause;
pub mod flag;
pub mod risk;
pub mod rule;
pub mod search;
pub mod traits;

// Re-exports for convenience
pub use clause::{Clause, ClauseId};
pub use flag::{Flag, Severity};
pub use risk::{RiskLevel, RiskVerdict};
pub use rule::{Rule, Thresholds};
pub use search::{IndexShape, SearchHit};
