//! ClauseClear Storage Layer
//!
//! Lexical retrieval over segmented clauses, one index per document.
//!
//! # Architecture
//!
//! - TF-IDF vectorizer over unigrams and bigrams, bounded vocabulary
//! - In-memory registry of immutable per-document artifacts, swapped atomically
//! - Optional SQLite write-through so artifacts survive restarts
//!
//! # Examples
//!
//! ```
//! use clauseclear_domain::Clause;
//! use clauseclear_store::RetrievalIndex;
//!
//! let clauses = vec![
//!     Clause::from_text("a", 1, "rent deposit terms"),
//!     Clause::from_text("b", 1, "termination rights"),
//! ];
//!
//! let index = RetrievalIndex::new();
//! index.build("lease-42", &clauses).unwrap();
//!
//! let hits = index.search("lease-42", "deposit", &clauses, 1).unwrap();
//! assert_eq!(hits[0].id.as_str(), "a");
//! ```

#![warn(missing_docs)]

mod error;
mod index;
mod sqlite;
pub mod tfidf;

pub use error::IndexError;
pub use index::{Artifact, ArtifactStore, RankedClause, RetrievalIndex, RowMeta, DEFAULT_TOP_K};
pub use sqlite::SqliteArtifactStore;
