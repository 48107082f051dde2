//! Risk module - levels and verdicts produced by the rule engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score above which a clause is RED
pub const RED_ABOVE: f64 = 0.69;

/// Score above which a clause is YELLOW
pub const YELLOW_ABOVE: f64 = 0.29;

/// Reason emitted when no rule triggered
pub const NO_ISSUES_REASON: &str = "No obvious issues matched; still review manually.";

/// Traffic-light risk level
///
/// Band boundaries are exclusive on the lower side: 0.29 is GREEN, 0.30 is
/// YELLOW, 0.69 is YELLOW and 0.70 is RED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Nothing notable
    Green,

    /// Review carefully
    Yellow,

    /// Likely unfavourable
    Red,
}

impl RiskLevel {
    /// All levels, lowest risk first
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Green, RiskLevel::Yellow, RiskLevel::Red];

    /// Map a (rounded) score onto a level
    ///
    /// # Examples
    ///
    /// ```
    /// use clauseclear_domain::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_score(0.29), RiskLevel::Green);
    /// assert_eq!(RiskLevel::from_score(0.30), RiskLevel::Yellow);
    /// assert_eq!(RiskLevel::from_score(0.70), RiskLevel::Red);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score > RED_ABOVE {
            RiskLevel::Red
        } else if score > YELLOW_ABOVE {
            RiskLevel::Yellow
        } else {
            RiskLevel::Green
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Green => "GREEN",
            RiskLevel::Yellow => "YELLOW",
            RiskLevel::Red => "RED",
        }
    }

    /// Parse a level from a string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GREEN" => Some(RiskLevel::Green),
            "YELLOW" => Some(RiskLevel::Yellow),
            "RED" => Some(RiskLevel::Red),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic risk verdict for one clause
///
/// Always reproducible from the clause text and the knowledge base; never the
/// source of truth on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Aggregated score in [0, 1], rounded to two decimals
    pub risk_score: f64,

    /// Level derived from the score
    pub risk_level: RiskLevel,

    /// Triggered rule ids, in first-trigger order
    pub triggered_rules: Vec<String>,

    /// Human-readable reasons, one per triggered rule
    pub reasons: Vec<String>,
}

impl RiskVerdict {
    /// Verdict for a clause on which no rule triggered
    pub fn clear() -> Self {
        Self {
            risk_score: 0.0,
            risk_level: RiskLevel::Green,
            triggered_rules: Vec::new(),
            reasons: vec![NO_ISSUES_REASON.to_string()],
        }
    }

    /// Whether the given rule id triggered
    pub fn triggered(&self, rule_id: &str) -> bool {
        self.triggered_rules.iter().any(|r| r == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Green);
        assert_eq!(RiskLevel::from_score(0.29), RiskLevel::Green);
        assert_eq!(RiskLevel::from_score(0.30), RiskLevel::Yellow);
        assert_eq!(RiskLevel::from_score(0.69), RiskLevel::Yellow);
        assert_eq!(RiskLevel::from_score(0.70), RiskLevel::Red);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Red);
    }

    #[test]
    fn test_parse_round_trip() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(RiskLevel::parse("yellow"), Some(RiskLevel::Yellow));
        assert_eq!(RiskLevel::parse("amber"), None);
    }

    #[test]
    fn test_level_serializes_uppercase() {
        let json = serde_json::to_string(&RiskLevel::Red).unwrap();
        assert_eq!(json, "\"RED\"");
    }

    #[test]
    fn test_clear_verdict() {
        let verdict = RiskVerdict::clear();
        assert_eq!(verdict.risk_score, 0.0);
        assert_eq!(verdict.risk_level, RiskLevel::Green);
        assert!(verdict.triggered_rules.is_empty());
        assert_eq!(verdict.reasons, vec![NO_ISSUES_REASON.to_string()]);
    }
}
