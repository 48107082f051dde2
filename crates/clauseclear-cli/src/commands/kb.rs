//! Knowledge base command implementation.

use crate::cli::{KbAction, KbArgs};
use crate::error::Result;
use crate::output::Formatter;
use clauseclear_rules::KnowledgeBase;
use std::fs;

/// Execute a knowledge base action.
///
/// `active` loads the knowledge base the other commands would use.
pub fn execute_kb<F>(args: KbArgs, active: F, formatter: &Formatter) -> Result<()>
where
    F: FnOnce() -> Result<KnowledgeBase>,
{
    match args.action {
        KbAction::Show => {
            let kb = active()?;
            println!("{}", formatter.format_knowledge_base(&kb)?);
        }
        KbAction::Validate { path } => {
            let kb = KnowledgeBase::load(&path)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "{} is valid ({} rules)",
                    path.display(),
                    kb.rules().len()
                ))
            );
        }
        KbAction::Export { output } => {
            let json = active()?.to_json_pretty()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("{}", formatter.success(&format!("Wrote {}", path.display())));
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}
