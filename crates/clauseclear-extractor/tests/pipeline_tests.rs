//! Segmentation through hybrid analysis

use clauseclear_domain::Severity;
use clauseclear_extractor::{segment_pages, HybridConfig, HybridOrchestrator, LlmClassifier};
use clauseclear_llm::MockProvider;

const LEASE_PAGE_ONE: &str = "The tenant shall pay a security deposit of 6 months rent to the owner before \
taking possession of the premises described in the schedule below. \
The tenant shall be responsible for every repair to the premises, including structural repairs, \
for the whole duration of the tenancy and any renewal of it.";

const LEASE_PAGE_TWO: &str = "Rent is due monthly. The premises are located at 14 Lake Road, \
Springfield, and include one covered parking space for a single vehicle.";

#[test]
fn test_pages_fold_into_ids() {
    let clauses = segment_pages(&[LEASE_PAGE_ONE, "", LEASE_PAGE_TWO]);

    let ids: Vec<&str> = clauses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["P01_C001", "P01_C002", "P03_C001", "P03_C002"]);
    assert!(clauses[0].text.starts_with("The tenant shall pay"));
    assert!(clauses.iter().all(|c| c.text.trim().len() > 10));
}

#[tokio::test]
async fn test_document_flags() {
    let provider = MockProvider::new("[]");
    provider.add_response(
        "structural repairs",
        r#"[{"id": 1, "severity": "Medium", "justification": "You pay for every repair, even big ones."},
            {"id": 2, "severity": "Info", "justification": "This is the address."}]"#,
    );
    let orchestrator =
        HybridOrchestrator::new(LlmClassifier::new(provider.clone()), HybridConfig::default())
            .unwrap();

    let clauses = segment_pages(&[LEASE_PAGE_ONE, LEASE_PAGE_TWO]);
    let flags = orchestrator.analyze(clauses).await;

    let summary: Vec<(&str, Severity, bool)> = flags
        .iter()
        .map(|f| (f.clause_id.as_str(), f.severity, f.negotiation_hint.is_some()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("P01_C001", Severity::High, true),
            ("P01_C002", Severity::Medium, false),
            ("P02_C002", Severity::Info, false),
        ]
    );
    assert_eq!(provider.call_count(), 1);
}
