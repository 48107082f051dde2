//! Search and query command implementations.

use crate::cli::SearchArgs;
use crate::commands::index::open_index;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{default_document_id, load_clauses, TextPageExtractor};
use crate::output::Formatter;
use clauseclear_domain::Clause;
use clauseclear_rules::{KnowledgeBase, RuleEngine};
use std::sync::Arc;

/// Execute the search command.
pub fn execute_search(args: SearchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (document_id, clauses, top_k) = prepare(&args, config)?;
    let index = open_index(config)?;

    let hits = index.search(&document_id, &args.query, &clauses, top_k)?;
    println!("{}", formatter.format_hits(&hits)?);
    Ok(())
}

/// Execute the query command.
pub fn execute_query(
    args: SearchArgs,
    config: &Config,
    kb: Arc<KnowledgeBase>,
    formatter: &Formatter,
) -> Result<()> {
    let (document_id, clauses, top_k) = prepare(&args, config)?;
    let index = open_index(config)?;
    let engine = RuleEngine::new(kb);

    let ranked = index.query(&document_id, &args.query, &clauses, top_k, &engine)?;
    println!("{}", formatter.format_ranked(&ranked)?);
    Ok(())
}

/// Resolve the document id, current clauses and result count.
///
/// Clauses are re-read from the document so results reflect its current text.
fn prepare(args: &SearchArgs, config: &Config) -> Result<(String, Vec<Clause>, usize)> {
    let clauses = load_clauses(&TextPageExtractor, &args.file)?;
    let document_id = args
        .document_id
        .clone()
        .unwrap_or_else(|| default_document_id(&args.file));
    let top_k = args.top_k.unwrap_or(config.top_k);
    Ok((document_id, clauses, top_k))
}
