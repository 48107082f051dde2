//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::error::Result;
use crate::output::Formatter;
use clauseclear_rules::{evaluate, KnowledgeBase, LabelledSet};

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, kb: &KnowledgeBase, formatter: &Formatter) -> Result<()> {
    let set = LabelledSet::load(&args.file)?;
    let report = evaluate(kb, &set.items);
    println!("{}", formatter.format_evaluation(&report)?);
    Ok(())
}
