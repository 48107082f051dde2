//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ClauseClear - Flag risky clauses in rental agreements and contracts.
#[derive(Debug, Parser)]
#[command(name = "clauseclear")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAUSECLEAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Knowledge base file (JSON or TOML)
    #[arg(long, global = true, env = "CLAUSECLEAR_KB")]
    pub kb: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a document into clauses
    Segment(DocumentArgs),

    /// Score every clause with the rule engine
    Analyze(AnalyzeArgs),

    /// Build the retrieval index for a document
    Index(IndexArgs),

    /// Search a document's clauses
    Search(SearchArgs),

    /// Search and attach rule-engine verdicts
    Query(SearchArgs),

    /// Fast rules plus LLM classification
    Hybrid(HybridArgs),

    /// Measure rule-engine accuracy on a labelled set
    Evaluate(EvaluateArgs),

    /// Inspect the knowledge base
    Kb(KbArgs),
}

/// A document to read.
#[derive(Debug, Parser)]
pub struct DocumentArgs {
    /// Plain-text document; pages are separated by form feeds
    pub file: PathBuf,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Plain-text document; pages are separated by form feeds
    pub file: PathBuf,

    /// Only show clauses at this level
    #[arg(short, long, value_enum)]
    pub level: Option<LevelArg>,
}

/// Arguments for the index command.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Plain-text document; pages are separated by form feeds
    pub file: PathBuf,

    /// Document id (defaults to the file stem)
    #[arg(short, long)]
    pub document_id: Option<String>,
}

/// Arguments for the search and query commands.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Plain-text document the index was built from
    pub file: PathBuf,

    /// Search query text
    pub query: String,

    /// Document id (defaults to the file stem)
    #[arg(short, long)]
    pub document_id: Option<String>,

    /// Maximum number of results
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Arguments for the hybrid command.
#[derive(Debug, Parser)]
pub struct HybridArgs {
    /// Plain-text document; pages are separated by form feeds
    pub file: PathBuf,

    /// Skip the LLM and report fast-rule flags only
    #[arg(long)]
    pub offline: bool,

    /// Ollama endpoint
    #[arg(long, env = "CLAUSECLEAR_LLM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Clauses per classifier call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Seconds allowed per classifier call
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// JSON file of labelled clauses
    pub file: PathBuf,
}

/// Arguments for knowledge base inspection.
#[derive(Debug, Parser)]
pub struct KbArgs {
    #[command(subcommand)]
    pub action: KbAction,
}

/// Knowledge base actions.
#[derive(Debug, Subcommand)]
pub enum KbAction {
    /// List rules and thresholds
    Show,

    /// Check a knowledge base file
    Validate {
        /// File to check
        path: PathBuf,
    },

    /// Write the active knowledge base as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Risk level argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LevelArg {
    /// Low risk
    Green,
    /// Needs attention
    Yellow,
    /// High risk
    Red,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<LevelArg> for clauseclear_domain::RiskLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Green => clauseclear_domain::RiskLevel::Green,
            LevelArg::Yellow => clauseclear_domain::RiskLevel::Yellow,
            LevelArg::Red => clauseclear_domain::RiskLevel::Red,
        }
    }
}
