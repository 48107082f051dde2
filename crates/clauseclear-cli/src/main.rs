//! ClauseClear CLI - flag risky clauses in contracts.

use clap::Parser;
use clauseclear_cli::commands;
use clauseclear_cli::{Cli, Command, Config, Formatter};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so command output stays clean on stdout.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> clauseclear_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let load_kb = || config.load_knowledge_base(cli.kb.as_deref());

    match cli.command {
        Command::Segment(args) => commands::execute_segment(args, &formatter)?,
        Command::Analyze(args) => {
            commands::execute_analyze(args, Arc::new(load_kb()?), &formatter)?;
        }
        Command::Index(args) => commands::execute_index(args, &config, &formatter)?,
        Command::Search(args) => commands::execute_search(args, &config, &formatter)?,
        Command::Query(args) => {
            commands::execute_query(args, &config, Arc::new(load_kb()?), &formatter)?;
        }
        Command::Hybrid(args) => {
            commands::execute_hybrid(args, &config, format, &formatter).await?;
        }
        Command::Evaluate(args) => commands::execute_evaluate(args, &load_kb()?, &formatter)?,
        Command::Kb(args) => commands::execute_kb(args, load_kb, &formatter)?,
    }

    Ok(())
}
