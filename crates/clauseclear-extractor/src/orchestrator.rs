//! Hybrid clause analysis
//!
//! Clauses go through three stages: trivially short clauses are skipped,
//! the fast rule pass flags what it recognises, and everything else is sent
//! to the classifier in bounded, independently failing batches.

use crate::cancel::CancellationToken;
use crate::config::HybridConfig;
use crate::error::ExtractorError;
use crate::fast_rules::apply_fast_rules;
use crate::types::{HybridMetadata, HybridReport};
use clauseclear_domain::traits::{ClauseClassifier, NumberedClause};
use clauseclear_domain::{Clause, Flag};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Combines the fast rule pass with a fallback classifier
pub struct HybridOrchestrator<C> {
    classifier: Arc<C>,
    config: HybridConfig,
}

impl<C> HybridOrchestrator<C>
where
    C: ClauseClassifier + Send + Sync + 'static,
    C::Error: std::fmt::Display,
{
    /// Create an orchestrator, rejecting an invalid configuration
    pub fn new(classifier: C, config: HybridConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            classifier: Arc::new(classifier),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Analyze clauses and return flags sorted by clause id
    pub async fn analyze(&self, clauses: Vec<Clause>) -> Vec<Flag> {
        self.analyze_with_cancel(clauses, &CancellationToken::new())
            .await
            .flags
    }

    /// Analyze clauses, abandoning outstanding classifier batches on cancel
    ///
    /// Batch failures never fail the analysis. A failed, timed out or
    /// abandoned batch contributes no flags and is counted in
    /// [`HybridMetadata::failed_batches`].
    pub async fn analyze_with_cancel(
        &self,
        clauses: Vec<Clause>,
        token: &CancellationToken,
    ) -> HybridReport {
        let mut metadata = HybridMetadata {
            clauses_received: clauses.len(),
            ..HybridMetadata::default()
        };

        let candidates: Vec<Clause> = clauses
            .into_iter()
            .filter(|c| c.word_count() > self.config.trivial_word_count)
            .collect();
        metadata.clauses_skipped = metadata.clauses_received - candidates.len();

        let (mut flags, remaining) = apply_fast_rules(candidates);
        metadata.rule_flags = flags.len();

        let batches: Vec<Vec<Clause>> = remaining
            .chunks(self.config.batch_size)
            .map(<[Clause]>::to_vec)
            .collect();
        metadata.batches = batches.len();

        debug!(
            "Dispatching {} clauses in {} batches (max {} in flight)",
            remaining.len(),
            batches.len(),
            self.config.max_in_flight_batches
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_in_flight_batches));
        let mut tasks = JoinSet::new();
        for (index, batch) in batches.into_iter().enumerate() {
            let classifier = Arc::clone(&self.classifier);
            let semaphore = Arc::clone(&semaphore);
            let limit = self.config.batch_timeout();
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| batch_failed(index, e.to_string()))?;
                run_batch(classifier, index, batch, limit).await
            });
        }

        let mut finished = 0;
        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tasks.abort_all();
                    metadata.cancelled = true;
                    break;
                }

                joined = tasks.join_next() => {
                    let Some(joined) = joined else {
                        break;
                    };
                    finished += 1;
                    match joined {
                        Ok(Ok(batch_flags)) => {
                            metadata.classifier_flags += batch_flags.len();
                            flags.extend(batch_flags);
                        }
                        Ok(Err(e)) => {
                            warn!("{}", e);
                            metadata.failed_batches += 1;
                        }
                        Err(e) => {
                            warn!("Classifier task failed: {}", e);
                            metadata.failed_batches += 1;
                        }
                    }
                }
            }
        }

        if metadata.cancelled {
            let abandoned = metadata.batches - finished;
            metadata.failed_batches += abandoned;
            warn!("Analysis cancelled, abandoned {} classifier batches", abandoned);
        }

        flags.sort_by(|a, b| a.clause_id.cmp(&b.clause_id));

        info!(
            "Hybrid analysis: {} clauses, {} skipped, {} rule flags, {} classifier flags, {}/{} batches failed",
            metadata.clauses_received,
            metadata.clauses_skipped,
            metadata.rule_flags,
            metadata.classifier_flags,
            metadata.failed_batches,
            metadata.batches
        );

        HybridReport { flags, metadata }
    }
}

fn batch_failed(batch: usize, reason: impl Into<String>) -> ExtractorError {
    ExtractorError::ClassifierBatchFailed {
        batch,
        reason: reason.into(),
    }
}

/// Classify one batch and turn the answers into flags
async fn run_batch<C>(
    classifier: Arc<C>,
    index: usize,
    batch: Vec<Clause>,
    limit: Duration,
) -> Result<Vec<Flag>, ExtractorError>
where
    C: ClauseClassifier + Send + Sync + 'static,
    C::Error: std::fmt::Display,
{
    let numbered: Vec<NumberedClause> = batch
        .iter()
        .enumerate()
        .map(|(i, clause)| NumberedClause {
            number: (i + 1) as u32,
            text: clause.text.clone(),
        })
        .collect();

    // The classifier is synchronous
    let call = tokio::task::spawn_blocking(move || {
        classifier
            .classify_batch(&numbered)
            .map_err(|e| e.to_string())
    });

    let classifications = match timeout(limit, call).await {
        Err(_) => {
            return Err(batch_failed(
                index,
                format!("timed out after {}s", limit.as_secs()),
            ))
        }
        Ok(Err(e)) => return Err(batch_failed(index, format!("task join error: {}", e))),
        Ok(Ok(Err(reason))) => return Err(batch_failed(index, reason)),
        Ok(Ok(Ok(classifications))) => classifications,
    };

    // At most one flag per clause; later answers for the same number are ignored
    let mut seen = HashSet::new();
    let flags: Vec<Flag> = classifications
        .into_iter()
        .filter_map(|c| {
            let clause = (c.id as usize).checked_sub(1).and_then(|i| batch.get(i))?;
            if !seen.insert(c.id) {
                return None;
            }
            Some(Flag {
                clause_id: clause.id.clone(),
                evidence: clause.text.clone(),
                reason: c.justification,
                severity: c.severity,
                negotiation_hint: None,
            })
        })
        .collect();

    debug!("Batch {} produced {} flags", index, flags.len());
    Ok(flags)
}
