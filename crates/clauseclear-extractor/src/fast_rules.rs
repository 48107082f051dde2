//! Fast deterministic flagging pass
//!
//! A short ordered list of phrase patterns checked before any classifier
//! call. The first pattern that matches a clause decides its flag.

use clauseclear_domain::{Clause, Flag, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

/// One fast-path rule
#[derive(Debug)]
pub struct FastRule {
    /// Display name, used in the flag reason
    pub name: &'static str,
    /// Severity of the emitted flag
    pub severity: Severity,
    /// Suggestion attached to the flag
    pub negotiation_hint: &'static str,
    pattern: Lazy<Regex>,
}

impl FastRule {
    /// Whether the rule matches the clause text
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Build the flag this rule emits for a clause
    pub fn flag(&self, clause: &Clause) -> Flag {
        Flag {
            clause_id: clause.id.clone(),
            evidence: clause.text.clone(),
            reason: format!("Rule-based flag: {}", self.name),
            severity: self.severity,
            negotiation_hint: Some(self.negotiation_hint.to_string()),
        }
    }
}

/// Fast-path rules in precedence order
pub static FAST_RULES: [FastRule; 3] = [
    FastRule {
        name: "High Security Deposit",
        severity: Severity::High,
        negotiation_hint: "In many places, the security deposit is legally capped at 2-3 months' rent. Consider negotiating this down.",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)security deposit of (\d+) month").expect("valid fast rule regex")
        }),
    },
    FastRule {
        name: "Unfair Lock-in vs. Notice Period",
        severity: Severity::High,
        negotiation_hint: "A long lock-in period with a short notice period can be restrictive. Try to align these more closely.",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)lock-in period of (\d+) months and a notice period of (\d+) month")
                .expect("valid fast rule regex")
        }),
    },
    FastRule {
        name: "High Late Fee",
        severity: Severity::Medium,
        negotiation_hint: "A high percentage-based late fee can be costly. Suggest a smaller, fixed fee instead.",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)late fee of (\d+)%").expect("valid fast rule regex")
        }),
    },
];

/// Flag for the first matching rule, if any
pub fn match_fast_rule(clause: &Clause) -> Option<Flag> {
    FAST_RULES
        .iter()
        .find(|rule| rule.matches(&clause.text))
        .map(|rule| rule.flag(clause))
}

/// Split clauses into fast-path flags and clauses left for the classifier
pub fn apply_fast_rules(clauses: Vec<Clause>) -> (Vec<Flag>, Vec<Clause>) {
    let mut flags = Vec::new();
    let mut remaining = Vec::new();

    for clause in clauses {
        match match_fast_rule(&clause) {
            Some(flag) => flags.push(flag),
            None => remaining.push(clause),
        }
    }

    (flags, remaining)
}
