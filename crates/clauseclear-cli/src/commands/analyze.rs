//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::extract::{load_clauses, TextPageExtractor};
use crate::output::Formatter;
use clauseclear_domain::RiskLevel;
use clauseclear_rules::{KnowledgeBase, LevelSummary, RuleEngine, ScoredClause};
use std::sync::Arc;

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, kb: Arc<KnowledgeBase>, formatter: &Formatter) -> Result<()> {
    let clauses = load_clauses(&TextPageExtractor, &args.file)?;
    let engine = RuleEngine::new(kb);

    let scored = engine.analyze(&clauses);
    let summary = LevelSummary::from_scored(&scored);
    let shown = filter_level(scored, args.level.map(Into::into));

    println!("{}", formatter.format_scored(&shown, &summary)?);
    Ok(())
}

/// Keep only clauses at the requested level; the summary still covers all of them.
fn filter_level(scored: Vec<ScoredClause>, level: Option<RiskLevel>) -> Vec<ScoredClause> {
    match level {
        Some(level) => scored
            .into_iter()
            .filter(|s| s.verdict.risk_level == level)
            .collect(),
        None => scored,
    }
}
