//! Command tests against temporary documents and index databases

use clauseclear_cli::cli::{AnalyzeArgs, DocumentArgs, EvaluateArgs, IndexArgs, KbAction, KbArgs, SearchArgs};
use clauseclear_cli::commands;
use clauseclear_cli::config::OutputFormat;
use clauseclear_cli::{CliError, Config, Formatter};
use clauseclear_rules::KnowledgeBase;
use clauseclear_store::IndexError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const LEASE: &str = "A security deposit of 5 months' rent is required. \
There is also a 6-month lock-in period.\x0c\
The landlord may terminate this agreement at any time. \
The tenant may keep one small pet in the apartment.";

struct Workspace {
    dir: TempDir,
    config: Config,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = Config {
            index_db: Some(dir.path().join("data").join("index.db")),
            ..Config::default()
        };
        Self { dir, config }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

fn search_args(file: PathBuf, query: &str) -> SearchArgs {
    SearchArgs {
        file,
        query: query.to_string(),
        document_id: None,
        top_k: Some(2),
    }
}

#[test]
fn test_index_then_search_and_query() {
    let ws = Workspace::new();
    let lease = ws.write("lease.txt", LEASE);

    commands::execute_index(
        IndexArgs {
            file: lease.clone(),
            document_id: None,
        },
        &ws.config,
        &formatter(),
    )
    .unwrap();
    assert!(ws.config.index_db_path().unwrap().exists());

    commands::execute_search(search_args(lease.clone(), "security deposit"), &ws.config, &formatter())
        .unwrap();

    let kb = Arc::new(KnowledgeBase::embedded().unwrap());
    commands::execute_query(search_args(lease, "terminate"), &ws.config, kb, &formatter()).unwrap();
}

#[test]
fn test_search_before_index_is_reported() {
    let ws = Workspace::new();
    let lease = ws.write("lease.txt", LEASE);

    let result = commands::execute_search(search_args(lease, "deposit"), &ws.config, &formatter());
    assert!(matches!(
        result,
        Err(CliError::Index(IndexError::IndexNotBuilt(id))) if id == "lease"
    ));
}

#[test]
fn test_explicit_document_id() {
    let ws = Workspace::new();
    let lease = ws.write("lease.txt", LEASE);

    commands::execute_index(
        IndexArgs {
            file: lease.clone(),
            document_id: Some("unit-4b".to_string()),
        },
        &ws.config,
        &formatter(),
    )
    .unwrap();

    let args = SearchArgs {
        document_id: Some("unit-4b".to_string()),
        ..search_args(lease.clone(), "pet")
    };
    commands::execute_search(args, &ws.config, &formatter()).unwrap();

    // The file stem was never indexed
    assert!(commands::execute_search(search_args(lease, "pet"), &ws.config, &formatter()).is_err());
}

#[test]
fn test_missing_document() {
    let ws = Workspace::new();
    let result = commands::execute_segment(
        DocumentArgs {
            file: ws.dir.path().join("absent.txt"),
        },
        &formatter(),
    );
    assert!(matches!(result, Err(CliError::Input(_))));
}

#[test]
fn test_analyze_and_segment() {
    let ws = Workspace::new();
    let lease = ws.write("lease.txt", LEASE);
    let kb = Arc::new(KnowledgeBase::embedded().unwrap());

    commands::execute_segment(DocumentArgs { file: lease.clone() }, &formatter()).unwrap();
    commands::execute_analyze(
        AnalyzeArgs {
            file: lease,
            level: None,
        },
        kb,
        &Formatter::new(OutputFormat::Table, false),
    )
    .unwrap();
}

#[test]
fn test_evaluate_labelled_set() {
    let ws = Workspace::new();
    let labelled = ws.write(
        "labelled.json",
        r#"{"items": [
            {"id": "a", "text": "The landlord may terminate this agreement at any time.", "expected_level": "RED"},
            {"id": "b", "text": "The tenant may keep one small pet.", "expected_level": "GREEN"}
        ]}"#,
    );
    let kb = KnowledgeBase::embedded().unwrap();

    commands::execute_evaluate(EvaluateArgs { file: labelled }, &kb, &formatter()).unwrap();

    let missing = commands::execute_evaluate(
        EvaluateArgs {
            file: ws.dir.path().join("absent.json"),
        },
        &kb,
        &formatter(),
    );
    assert!(matches!(missing, Err(CliError::Evaluation(_))));
}

#[test]
fn test_kb_validate_and_export() {
    let ws = Workspace::new();
    let export = ws.dir.path().join("kb.json");

    commands::execute_kb(
        KbArgs {
            action: KbAction::Export {
                output: Some(export.clone()),
            },
        },
        || Ok(KnowledgeBase::embedded()?),
        &formatter(),
    )
    .unwrap();

    commands::execute_kb(
        KbArgs {
            action: KbAction::Validate { path: export },
        },
        || unreachable!("validate reads its own file"),
        &formatter(),
    )
    .unwrap();

    let broken = ws.write("broken.json", r#"{"severity_rules": []}"#);
    let result = commands::execute_kb(
        KbArgs {
            action: KbAction::Validate { path: broken },
        },
        || unreachable!("validate reads its own file"),
        &formatter(),
    );
    assert!(matches!(result, Err(CliError::KnowledgeBase(_))));
}
