//! Integration tests for knowledge base loading and the evaluation harness

use clauseclear_domain::{Clause, RiskLevel};
use clauseclear_rules::{
    evaluate, rule_ids, KnowledgeBase, KnowledgeBaseError, LabelledSet, RuleEngine,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_is_configuration_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = KnowledgeBase::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(KnowledgeBaseError::ConfigurationMissing(_))));
}

#[test]
fn test_json_file_round_trip() {
    let kb = KnowledgeBase::embedded().unwrap();
    let file = write_temp(".json", &kb.to_json_pretty().unwrap());

    let loaded = KnowledgeBase::load(file.path()).unwrap();
    assert_eq!(loaded.rules(), kb.rules());
    assert_eq!(loaded.thresholds(), kb.thresholds());
}

#[test]
fn test_toml_file_is_detected_by_extension() {
    let kb = KnowledgeBase::embedded().unwrap();
    let mut body = String::from(
        "[thresholds]\nmax_security_deposit_months = 3\nmax_late_fee_percent = 10.0\n\n",
    );
    for rule in kb.rules() {
        body.push_str(&format!(
            "[[severity_rules]]\nid = \"{}\"\nweight = {}\ndescription = \"{}\"\n\n",
            rule.id, rule.weight, rule.id
        ));
    }
    let file = write_temp(".toml", &body);

    let loaded = KnowledgeBase::load(file.path()).unwrap();
    assert_eq!(loaded.thresholds().max_security_deposit_months, 3);

    // A 5% fee no longer exceeds the configured limit
    let engine = RuleEngine::new(Arc::new(loaded));
    let verdict = engine.score(&Clause::from_text("c", 1, "The late fee will be 5% of the rent."));
    assert!(!verdict.triggered(rule_ids::HIGH_LATE_FEE));
}

#[test]
fn test_malformed_json_file() {
    let file = write_temp(".json", "{ \"severity_rules\": [ }");
    let result = KnowledgeBase::load(file.path());
    assert!(matches!(result, Err(KnowledgeBaseError::ConfigurationMalformed(_))));
}

#[test]
fn test_labelled_fixture_evaluation() {
    let kb = KnowledgeBase::embedded().unwrap();
    let set = LabelledSet::load(fixture("labelled_clauses.json")).unwrap();
    let report = evaluate(&kb, &set.items);

    assert_eq!(report.total, 6);
    assert_eq!(report.correct, 5);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].id, "T06");
    assert_eq!(report.count(RiskLevel::Red, RiskLevel::Red), 2);
    assert!((report.accuracy - 5.0 / 6.0).abs() < 1e-9);
}
