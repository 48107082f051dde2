//! Scoring rules and thresholds carried by a knowledge base

use serde::{Deserialize, Serialize};

/// A weighted scoring rule
///
/// Rules are loaded once from the knowledge base and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier (e.g. `large_deposit`)
    pub id: String,

    /// Contribution to the clause score when triggered, in (0, 1]
    pub weight: f64,

    /// Human-readable reason reported when the rule triggers
    pub description: String,
}

/// Numeric limits used by the rule checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Security deposit considered acceptable, in months of rent
    pub max_security_deposit_months: u32,

    /// Late fee considered acceptable, as a percentage
    pub max_late_fee_percent: f64,
}
