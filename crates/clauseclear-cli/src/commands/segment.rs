//! Segment command implementation.

use crate::cli::DocumentArgs;
use crate::error::Result;
use crate::extract::{load_clauses, TextPageExtractor};
use crate::output::Formatter;

/// Execute the segment command.
pub fn execute_segment(args: DocumentArgs, formatter: &Formatter) -> Result<()> {
    let clauses = load_clauses(&TextPageExtractor, &args.file)?;
    println!("{}", formatter.format_clauses(&clauses)?);
    Ok(())
}
