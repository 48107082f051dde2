//! Retrieval result types

use crate::ClauseId;
use serde::{Deserialize, Serialize};

/// Shape of a built term-weight matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexShape {
    /// Number of rows (one per clause)
    pub rows: usize,

    /// Number of columns (vocabulary size)
    pub cols: usize,
}

/// One ranked retrieval result, joined back to a live clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Clause id
    pub id: ClauseId,

    /// Page the clause is on
    pub page: u32,

    /// Clause text
    pub text: String,

    /// Cosine similarity to the query
    pub score: f64,
}
