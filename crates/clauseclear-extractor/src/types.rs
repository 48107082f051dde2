//! Result types for hybrid analysis

use clauseclear_domain::Flag;
use serde::{Deserialize, Serialize};

/// Outcome of a hybrid analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HybridReport {
    /// All flags, sorted by clause id
    pub flags: Vec<Flag>,

    /// Metadata about the run
    pub metadata: HybridMetadata,
}

/// Counters describing a hybrid analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridMetadata {
    /// Clauses received
    pub clauses_received: usize,

    /// Clauses skipped as too short to matter
    pub clauses_skipped: usize,

    /// Flags produced by the fast rule pass
    pub rule_flags: usize,

    /// Flags produced by the classifier
    pub classifier_flags: usize,

    /// Classifier batches dispatched
    pub batches: usize,

    /// Batches that failed, timed out or were abandoned
    pub failed_batches: usize,

    /// Whether the run was cancelled before every batch finished
    pub cancelled: bool,
}
