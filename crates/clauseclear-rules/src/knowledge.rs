//! Knowledge base schema and loading
//!
//! A knowledge base is an immutable bundle of weighted rules and numeric
//! thresholds. It is loaded once at process start and passed explicitly to
//! the rule engine; there is no mutation API, so changing rules means
//! restarting the process.

use crate::error::KnowledgeBaseError;
use clauseclear_domain::{Rule, Thresholds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Rule ids referenced by the rule engine
pub mod rule_ids {
    /// Lock-in period without a matching notice period
    pub const LOCKIN_GT_NOTICE: &str = "lockin_gt_notice";
    /// Deposit of four months or more
    pub const VERY_LARGE_DEPOSIT: &str = "very_large_deposit";
    /// Deposit above the configured limit
    pub const LARGE_DEPOSIT: &str = "large_deposit";
    /// Deposit mentioned without a resolvable month figure
    pub const LARGE_DEPOSIT_UNSURE: &str = "large_deposit_unsure";
    /// One party may terminate on its own terms
    pub const UNILATERAL_TERMINATION: &str = "unilateral_termination";
    /// Late fee above the configured percentage
    pub const HIGH_LATE_FEE: &str = "high_late_fee";
}

/// Every rule id the engine can trigger; a knowledge base must define all of them
pub const REQUIRED_RULE_IDS: [&str; 6] = [
    rule_ids::LOCKIN_GT_NOTICE,
    rule_ids::VERY_LARGE_DEPOSIT,
    rule_ids::LARGE_DEPOSIT,
    rule_ids::LARGE_DEPOSIT_UNSURE,
    rule_ids::UNILATERAL_TERMINATION,
    rule_ids::HIGH_LATE_FEE,
];

const EMBEDDED_KB: &str = include_str!("../knowledge/legal_kb.json");

/// Serialized form of a knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnowledgeBaseSource {
    severity_rules: Vec<Rule>,
    thresholds: Thresholds,
}

/// Immutable scoring configuration
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
    by_id: HashMap<String, usize>,
    thresholds: Thresholds,
}

impl KnowledgeBase {
    /// Load a knowledge base from a file
    ///
    /// Files ending in `.toml` are parsed as TOML; anything else as JSON.
    ///
    /// # Errors
    ///
    /// - [`KnowledgeBaseError::ConfigurationMissing`] if the file does not exist
    ///   or cannot be read
    /// - [`KnowledgeBaseError::ConfigurationMalformed`] if required keys are
    ///   missing, have the wrong type, or fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KnowledgeBaseError::ConfigurationMissing(format!("{}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let kb = if is_toml {
            Self::from_toml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };

        info!(
            "Loaded knowledge base from {} ({} rules)",
            path.display(),
            kb.rules.len()
        );
        Ok(kb)
    }

    /// Load the knowledge base bundled with this crate
    pub fn embedded() -> Result<Self, KnowledgeBaseError> {
        Self::from_json_str(EMBEDDED_KB)
    }

    /// Parse a knowledge base from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        let source: KnowledgeBaseSource = serde_json::from_str(json)?;
        Self::from_parts(source.severity_rules, source.thresholds)
    }

    /// Parse a knowledge base from a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, KnowledgeBaseError> {
        let source: KnowledgeBaseSource = toml::from_str(toml_str)?;
        Self::from_parts(source.severity_rules, source.thresholds)
    }

    /// Build and validate a knowledge base from rules and thresholds
    pub fn from_parts(rules: Vec<Rule>, thresholds: Thresholds) -> Result<Self, KnowledgeBaseError> {
        let mut by_id = HashMap::with_capacity(rules.len());

        for (idx, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(KnowledgeBaseError::ConfigurationMalformed(format!(
                    "rule at position {} has an empty id",
                    idx
                )));
            }
            if !(rule.weight > 0.0 && rule.weight <= 1.0) {
                return Err(KnowledgeBaseError::ConfigurationMalformed(format!(
                    "rule '{}' has weight {} outside (0, 1]",
                    rule.id, rule.weight
                )));
            }
            if by_id.insert(rule.id.clone(), idx).is_some() {
                return Err(KnowledgeBaseError::ConfigurationMalformed(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
        }

        for required in REQUIRED_RULE_IDS {
            if !by_id.contains_key(required) {
                return Err(KnowledgeBaseError::ConfigurationMalformed(format!(
                    "missing required rule '{}'",
                    required
                )));
            }
        }

        if !(thresholds.max_late_fee_percent >= 0.0) {
            return Err(KnowledgeBaseError::ConfigurationMalformed(format!(
                "max_late_fee_percent must be non-negative, got {}",
                thresholds.max_late_fee_percent
            )));
        }

        debug!("Validated knowledge base with {} rules", rules.len());

        Ok(Self {
            rules,
            by_id,
            thresholds,
        })
    }

    /// Look up a rule by id
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.by_id.get(id).map(|&idx| &self.rules[idx])
    }

    /// Weight of a rule, or zero for an unknown id
    pub fn weight(&self, id: &str) -> f64 {
        self.rule(id).map_or(0.0, |r| r.weight)
    }

    /// All rules in source order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Numeric thresholds
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Serialize back to the JSON source shape
    pub fn to_json_pretty(&self) -> Result<String, KnowledgeBaseError> {
        let source = KnowledgeBaseSource {
            severity_rules: self.rules.clone(),
            thresholds: self.thresholds.clone(),
        };
        Ok(serde_json::to_string_pretty(&source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_kb_is_valid() {
        let kb = KnowledgeBase::embedded().unwrap();
        for id in REQUIRED_RULE_IDS {
            assert!(kb.rule(id).is_some(), "missing {}", id);
        }
        assert_eq!(kb.thresholds().max_security_deposit_months, 2);
    }

    #[test]
    fn test_rules_keep_source_order() {
        let kb = KnowledgeBase::embedded().unwrap();
        let ids: Vec<&str> = kb.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids[0], rule_ids::LOCKIN_GT_NOTICE);
        assert_eq!(ids[ids.len() - 1], rule_ids::HIGH_LATE_FEE);
    }

    #[test]
    fn test_missing_thresholds_is_malformed() {
        let json = r#"{"severity_rules": []}"#;
        let result = KnowledgeBase::from_json_str(json);
        assert!(matches!(result, Err(KnowledgeBaseError::ConfigurationMalformed(_))));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let json = r#"{
            "severity_rules": [{"id": "x", "weight": "heavy", "description": "d"}],
            "thresholds": {"max_security_deposit_months": 2, "max_late_fee_percent": 2.0}
        }"#;
        let result = KnowledgeBase::from_json_str(json);
        assert!(matches!(result, Err(KnowledgeBaseError::ConfigurationMalformed(_))));
    }

    #[test]
    fn test_missing_description_is_malformed() {
        let json = r#"{
            "severity_rules": [{"id": "x", "weight": 0.5}],
            "thresholds": {"max_security_deposit_months": 2, "max_late_fee_percent": 2.0}
        }"#;
        assert!(KnowledgeBase::from_json_str(json).is_err());
    }

    #[test]
    fn test_missing_required_rule_is_malformed() {
        let kb = KnowledgeBase::embedded().unwrap();
        let rules: Vec<Rule> = kb
            .rules()
            .iter()
            .filter(|r| r.id != rule_ids::HIGH_LATE_FEE)
            .cloned()
            .collect();

        match KnowledgeBase::from_parts(rules, kb.thresholds().clone()) {
            Err(KnowledgeBaseError::ConfigurationMalformed(msg)) => {
                assert!(msg.contains("high_late_fee"));
            }
            other => panic!("Expected ConfigurationMalformed, got {:?}", other),
        }
    }

    #[test]
    fn test_weight_out_of_range_is_malformed() {
        let kb = KnowledgeBase::embedded().unwrap();
        let mut rules = kb.rules().to_vec();
        rules[0].weight = 1.5;
        assert!(KnowledgeBase::from_parts(rules.clone(), kb.thresholds().clone()).is_err());

        rules[0].weight = 0.0;
        assert!(KnowledgeBase::from_parts(rules, kb.thresholds().clone()).is_err());
    }

    #[test]
    fn test_duplicate_rule_id_is_malformed() {
        let kb = KnowledgeBase::embedded().unwrap();
        let mut rules = kb.rules().to_vec();
        rules.push(rules[0].clone());
        assert!(KnowledgeBase::from_parts(rules, kb.thresholds().clone()).is_err());
    }

    #[test]
    fn test_toml_source() {
        let kb = KnowledgeBase::embedded().unwrap();
        let mut toml_str = String::from(
            "[thresholds]\nmax_security_deposit_months = 3\nmax_late_fee_percent = 1.5\n\n",
        );
        for rule in kb.rules() {
            toml_str.push_str(&format!(
                "[[severity_rules]]\nid = \"{}\"\nweight = {}\ndescription = \"{}\"\n\n",
                rule.id, rule.weight, rule.description
            ));
        }

        let parsed = KnowledgeBase::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.thresholds().max_security_deposit_months, 3);
        assert_eq!(parsed.rules().len(), kb.rules().len());
    }

    #[test]
    fn test_json_round_trip_keeps_rules() {
        let kb = KnowledgeBase::embedded().unwrap();
        let json = kb.to_json_pretty().unwrap();
        let parsed = KnowledgeBase::from_json_str(&json).unwrap();
        assert_eq!(parsed.rules(), kb.rules());
    }

    #[test]
    fn test_unknown_rule_weight_is_zero() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert_eq!(kb.weight("no_such_rule"), 0.0);
    }
}
