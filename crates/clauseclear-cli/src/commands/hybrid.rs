//! Hybrid command implementation.

use crate::cli::HybridArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::extract::{load_clauses, TextPageExtractor};
use crate::output::Formatter;
use clauseclear_domain::traits::{Classification, ClauseClassifier, NumberedClause};
use clauseclear_domain::Clause;
use clauseclear_extractor::{
    CancellationToken, ExtractorError, HybridConfig, HybridOrchestrator, HybridReport, LlmClassifier,
};
use clauseclear_llm::OllamaProvider;
use std::time::Duration;
use tracing::{info, warn};

/// Classifier that never answers, leaving only fast-rule flags.
struct RulesOnly;

impl ClauseClassifier for RulesOnly {
    type Error = ExtractorError;

    fn classify_batch(&self, _batch: &[NumberedClause]) -> std::result::Result<Vec<Classification>, Self::Error> {
        Ok(Vec::new())
    }
}

/// Execute the hybrid command.
pub async fn execute_hybrid(
    args: HybridArgs,
    config: &Config,
    format: OutputFormat,
    formatter: &Formatter,
) -> Result<()> {
    let clauses = load_clauses(&TextPageExtractor, &args.file)?;
    let hybrid_config = hybrid_config(&args, config);

    let report = if args.offline {
        run(RulesOnly, hybrid_config, clauses).await?
    } else {
        let endpoint = args.endpoint.clone().unwrap_or_else(|| config.llm.endpoint.clone());
        let model = args.model.clone().unwrap_or_else(|| config.llm.model.clone());
        info!("Classifying with {} at {}", model, endpoint);

        let provider = OllamaProvider::new(endpoint, model)
            .with_max_retries(config.llm.max_retries)
            .with_timeout(Duration::from_secs(config.llm.timeout_secs));
        run(LlmClassifier::new(provider), hybrid_config, clauses).await?
    };

    println!("{}", formatter.format_report(&report)?);

    if format == OutputFormat::Table {
        if report.metadata.cancelled {
            println!("{}", formatter.warning("Cancelled; classifier results are incomplete"));
        } else if report.metadata.failed_batches > 0 {
            println!(
                "{}",
                formatter.warning("Some classifier batches failed; their clauses carry no flags")
            );
        }
    }
    Ok(())
}

/// Apply command-line overrides to the configured settings.
fn hybrid_config(args: &HybridArgs, config: &Config) -> HybridConfig {
    let mut hybrid = config.hybrid.clone();
    if let Some(batch_size) = args.batch_size {
        hybrid.batch_size = batch_size;
    }
    if let Some(timeout) = args.timeout {
        hybrid.batch_timeout_secs = timeout;
    }
    hybrid
}

async fn run<C>(classifier: C, config: HybridConfig, clauses: Vec<Clause>) -> Result<HybridReport>
where
    C: ClauseClassifier + Send + Sync + 'static,
    C::Error: std::fmt::Display,
{
    let orchestrator = HybridOrchestrator::new(classifier, config)?;

    // Ctrl-C abandons outstanding batches but keeps what is already known
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling analysis");
            on_interrupt.cancel();
        }
    });

    let report = orchestrator.analyze_with_cancel(clauses, &token).await;
    watcher.abort();
    Ok(report)
}
