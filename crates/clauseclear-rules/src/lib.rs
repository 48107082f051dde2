//! ClauseClear Rules
//!
//! Deterministic clause risk scoring driven by a knowledge base.
//!
//! The crate provides:
//! - Knowledge base schema, loading and validation (JSON or TOML)
//! - Numeric matchers for months, percentages and deposit sizes
//! - The weighted rule engine producing a [`RiskVerdict`] per clause
//! - An evaluation harness over labelled clauses
//!
//! # Examples
//!
//! ```
//! use clauseclear_domain::{Clause, RiskLevel};
//! use clauseclear_rules::{KnowledgeBase, RuleEngine};
//! use std::sync::Arc;
//!
//! let kb = Arc::new(KnowledgeBase::embedded().unwrap());
//! let engine = RuleEngine::new(kb);
//!
//! let clause = Clause::from_text("P01_C001", 1, "The late fee will be 5% of the monthly rent.");
//! let verdict = engine.score(&clause);
//! assert_eq!(verdict.risk_level, RiskLevel::Yellow);
//! ```
//!
//! [`RiskVerdict`]: clauseclear_domain::RiskVerdict

#![warn(missing_docs)]

mod engine;
mod error;
mod evaluation;
mod knowledge;
pub mod matchers;

pub use engine::{score, LevelSummary, RuleEngine, ScoredClause};
pub use error::{EvaluationError, KnowledgeBaseError};
pub use evaluation::{evaluate, EvaluationReport, LabelledClause, LabelledSet, Mismatch};
pub use knowledge::{rule_ids, KnowledgeBase, REQUIRED_RULE_IDS};
