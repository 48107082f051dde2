//! LLM-backed clause classifier

use crate::error::ExtractorError;
use crate::parser::parse_classifier_response;
use crate::prompt::{PromptBuilder, CLASSIFICATION_SCHEMA};
use clauseclear_domain::traits::{Classification, ClauseClassifier, LlmProvider, NumberedClause};
use std::collections::HashSet;
use tracing::debug;

/// Classifies clause batches by prompting an LLM provider
pub struct LlmClassifier<L> {
    provider: L,
}

impl<L> LlmClassifier<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Wrap a provider
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.provider
    }
}

impl<L> ClauseClassifier for LlmClassifier<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Error = ExtractorError;

    fn classify_batch(&self, batch: &[NumberedClause]) -> Result<Vec<Classification>, Self::Error> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = PromptBuilder::new(batch).build();
        debug!("Classifier prompt length: {} chars", prompt.len());

        let response = self
            .provider
            .generate_structured(&prompt, CLASSIFICATION_SCHEMA)
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        let known: HashSet<u32> = batch.iter().map(|c| c.number).collect();
        let classifications = parse_classifier_response(&response)?
            .into_iter()
            .filter(|c| known.contains(&c.id))
            .collect();

        Ok(classifications)
    }
}
