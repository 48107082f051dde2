//! Index command implementation.

use crate::cli::IndexArgs;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{default_document_id, load_clauses, TextPageExtractor};
use crate::output::Formatter;
use clauseclear_store::{RetrievalIndex, SqliteArtifactStore};
use std::fs;
use tracing::debug;

/// Execute the index command.
pub fn execute_index(args: IndexArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let clauses = load_clauses(&TextPageExtractor, &args.file)?;
    let document_id = args
        .document_id
        .unwrap_or_else(|| default_document_id(&args.file));

    if clauses.is_empty() {
        println!(
            "{}",
            formatter.warning(&format!("No clauses found in {}, nothing indexed", args.file.display()))
        );
        return Ok(());
    }

    let index = open_index(config)?;
    let shape = index.build(&document_id, &clauses)?;

    println!("{}", formatter.index_built(&document_id, shape));
    Ok(())
}

/// Open the persistent retrieval index named by the configuration.
pub fn open_index(config: &Config) -> Result<RetrievalIndex> {
    let path = config.index_db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("Opening index database {}", path.display());

    let store = SqliteArtifactStore::new(&path)?;
    Ok(RetrievalIndex::with_store(Box::new(store)))
}
