//! Accuracy evaluation over hand-labelled clauses

use crate::engine::score;
use crate::error::EvaluationError;
use crate::knowledge::KnowledgeBase;
use clauseclear_domain::{Clause, RiskLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One clause with the level a reviewer assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledClause {
    /// Sample identifier
    pub id: String,

    /// Clause text
    pub text: String,

    /// Level the engine is expected to produce
    pub expected_level: RiskLevel,
}

/// A labelled evaluation set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelledSet {
    /// Samples to evaluate
    #[serde(default)]
    pub items: Vec<LabelledClause>,
}

impl LabelledSet {
    /// Read a labelled set from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EvaluationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EvaluationError::LabelledSetMissing(format!("{}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// A sample the engine got wrong
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Sample identifier
    pub id: String,
    /// Clause text
    pub text: String,
    /// Labelled level
    pub expected: RiskLevel,
    /// Level the engine produced
    pub predicted: RiskLevel,
    /// Reasons the engine gave
    pub reasons: Vec<String>,
}

/// Outcome of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Samples evaluated
    pub total: usize,

    /// Samples whose predicted level matched
    pub correct: usize,

    /// `correct / total`, or 0.0 for an empty set
    pub accuracy: f64,

    /// Counts indexed by `[expected][predicted]` in [`RiskLevel::ALL`] order
    pub confusion: [[usize; 3]; 3],

    /// Every sample the engine got wrong, in input order
    pub mismatches: Vec<Mismatch>,
}

impl EvaluationReport {
    /// Confusion count for an expected/predicted pair
    pub fn count(&self, expected: RiskLevel, predicted: RiskLevel) -> usize {
        self.confusion[level_index(expected)][level_index(predicted)]
    }
}

fn level_index(level: RiskLevel) -> usize {
    match level {
        RiskLevel::Green => 0,
        RiskLevel::Yellow => 1,
        RiskLevel::Red => 2,
    }
}

/// Score every labelled sample and compare against its label
pub fn evaluate(kb: &KnowledgeBase, items: &[LabelledClause]) -> EvaluationReport {
    let mut confusion = [[0usize; 3]; 3];
    let mut mismatches = Vec::new();
    let mut correct = 0;

    for item in items {
        let clause = Clause::from_text(item.id.as_str(), 1, item.text.as_str());
        let verdict = score(&clause, kb);
        let predicted = verdict.risk_level;

        confusion[level_index(item.expected_level)][level_index(predicted)] += 1;

        if predicted == item.expected_level {
            correct += 1;
        } else {
            debug!(
                "Mismatch for {}: expected {}, got {}",
                item.id, item.expected_level, predicted
            );
            mismatches.push(Mismatch {
                id: item.id.clone(),
                text: item.text.clone(),
                expected: item.expected_level,
                predicted,
                reasons: verdict.reasons,
            });
        }
    }

    let total = items.len();
    let accuracy = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    info!("Evaluated {} samples, accuracy {:.2}", total, accuracy);

    EvaluationReport {
        total,
        correct,
        accuracy,
        confusion,
        mismatches,
    }
}
