//! Flags emitted by hybrid analysis

use crate::ClauseId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Minor point
    Low,

    /// Worth negotiating
    Medium,

    /// Likely unfavourable
    High,

    /// Informational only
    Info,
}

impl Severity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Info => "Info",
        }
    }

    /// Parse a severity, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One risk finding tied to a clause
///
/// At most one flag exists per clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Clause the flag refers to
    pub clause_id: ClauseId,

    /// Clause text the finding is based on
    pub evidence: String,

    /// Why the clause was flagged
    pub reason: String,

    /// Severity of the finding
    pub severity: Severity,

    /// Suggested negotiation point (fast rule path only)
    pub negotiation_hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse(" medium "), Some(Severity::Medium));
        assert_eq!(Severity::parse("INFO"), Some(Severity::Info));
        assert_eq!(Severity::parse("critical"), None);
    }

    #[test]
    fn test_flag_serializes_missing_hint_as_null() {
        let flag = Flag {
            clause_id: ClauseId::from("P01_C002"),
            evidence: "text".to_string(),
            reason: "reason".to_string(),
            severity: Severity::Low,
            negotiation_hint: None,
        };
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["clause_id"], "P01_C002");
        assert_eq!(json["severity"], "Low");
        assert!(json["negotiation_hint"].is_null());
    }
}
