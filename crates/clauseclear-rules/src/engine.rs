//! Weighted rule engine

use crate::knowledge::{rule_ids, KnowledgeBase};
use crate::matchers::{
    extract_deposit_months, extract_months, extract_percentages, has_unilateral_termination,
};
use clauseclear_domain::risk::NO_ISSUES_REASON;
use clauseclear_domain::{Clause, RiskLevel, RiskVerdict};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Deposit size that always counts as very large, in months
pub const VERY_LARGE_DEPOSIT_MONTHS: u32 = 4;

/// Deposit size that counts as large, in months
///
/// Fixed regardless of the knowledge base's `max_security_deposit_months`.
pub const LARGE_DEPOSIT_MONTHS: u32 = 2;

/// Fraction of the lock-in weight applied when the deposit is not very large
const LOCKIN_PARTIAL_FACTOR: f64 = 0.5;

/// A clause paired with its verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredClause {
    /// The scored clause
    #[serde(flatten)]
    pub clause: Clause,

    /// Verdict for the clause
    #[serde(flatten)]
    pub verdict: RiskVerdict,
}

/// Count of clauses per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// GREEN clauses
    pub green: usize,
    /// YELLOW clauses
    pub yellow: usize,
    /// RED clauses
    pub red: usize,
}

impl LevelSummary {
    /// Tally levels over scored clauses
    pub fn from_scored(scored: &[ScoredClause]) -> Self {
        let mut summary = Self::default();
        for item in scored {
            summary.record(item.verdict.risk_level);
        }
        summary
    }

    /// Add one clause at the given level
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Green => self.green += 1,
            RiskLevel::Yellow => self.yellow += 1,
            RiskLevel::Red => self.red += 1,
        }
    }

    /// Total clauses counted
    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red
    }
}

/// Scores clauses against a shared knowledge base
#[derive(Debug, Clone)]
pub struct RuleEngine {
    kb: Arc<KnowledgeBase>,
}

impl RuleEngine {
    /// Create an engine over the given knowledge base
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// The knowledge base in use
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Score a single clause
    pub fn score(&self, clause: &Clause) -> RiskVerdict {
        score(clause, &self.kb)
    }

    /// Score clauses in input order
    pub fn analyze(&self, clauses: &[Clause]) -> Vec<ScoredClause> {
        let scored: Vec<ScoredClause> = clauses
            .iter()
            .map(|clause| ScoredClause {
                clause: clause.clone(),
                verdict: self.score(clause),
            })
            .collect();

        let summary = LevelSummary::from_scored(&scored);
        debug!(
            "Scored {} clauses: {} green, {} yellow, {} red",
            summary.total(),
            summary.green,
            summary.yellow,
            summary.red
        );
        scored
    }
}

/// Running total of triggered rules
struct Tally<'a> {
    kb: &'a KnowledgeBase,
    total: f64,
    triggered: Vec<String>,
}

impl<'a> Tally<'a> {
    fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            total: 0.0,
            triggered: Vec::new(),
        }
    }

    fn add(&mut self, rule_id: &str, factor: f64) {
        self.total += self.kb.weight(rule_id) * factor;
        self.triggered.push(rule_id.to_string());
    }

    fn finish(self) -> RiskVerdict {
        if self.triggered.is_empty() {
            return RiskVerdict::clear();
        }

        let capped = self.total.min(1.0);
        // Ties go to the even cent: 0.125 reports as 0.12
        let risk_score = (capped * 100.0).round_ties_even() / 100.0;

        let reasons = self
            .triggered
            .iter()
            .filter_map(|id| self.kb.rule(id))
            .map(|rule| rule.description.clone())
            .collect::<Vec<_>>();

        RiskVerdict {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            triggered_rules: self.triggered,
            reasons: if reasons.is_empty() {
                vec![NO_ISSUES_REASON.to_string()]
            } else {
                reasons
            },
        }
    }
}

/// Score one clause against a knowledge base
///
/// Rule checks run in a fixed order and are independently additive:
///
/// 1. Lock-in period mentioned without a notice period
/// 2. Deposit magnitude (at most one of the three deposit rules)
/// 3. One-sided termination right
/// 4. Late fee above the configured percentage
///
/// The summed weight is capped at 1.0 and rounded to two decimals; the level
/// is derived from the rounded score.
pub fn score(clause: &Clause, kb: &KnowledgeBase) -> RiskVerdict {
    let text = clause.text.to_lowercase();
    let thresholds = kb.thresholds();
    let deposit_months = extract_deposit_months(&text);
    let mut tally = Tally::new(kb);

    if text.contains("lock-in period") && text.contains("months") && !text.contains("notice period") {
        if deposit_months.is_some_and(|m| m >= VERY_LARGE_DEPOSIT_MONTHS) {
            tally.add(rule_ids::LOCKIN_GT_NOTICE, 1.0);
        } else if !extract_months(&text).is_empty() {
            tally.add(rule_ids::LOCKIN_GT_NOTICE, LOCKIN_PARTIAL_FACTOR);
        }
    }

    match deposit_months {
        Some(m) if m >= VERY_LARGE_DEPOSIT_MONTHS => {
            tally.add(rule_ids::VERY_LARGE_DEPOSIT, 1.0);
        }
        Some(m) if m >= LARGE_DEPOSIT_MONTHS => {
            tally.add(rule_ids::LARGE_DEPOSIT, 1.0);
        }
        Some(_) => {}
        None if text.contains("security deposit") => {
            tally.add(rule_ids::LARGE_DEPOSIT_UNSURE, 1.0);
        }
        None => {}
    }

    if has_unilateral_termination(&text) {
        tally.add(rule_ids::UNILATERAL_TERMINATION, 1.0);
    }

    if extract_percentages(&text)
        .into_iter()
        .any(|p| p > thresholds.max_late_fee_percent)
    {
        tally.add(rule_ids::HIGH_LATE_FEE, 1.0);
    }

    tally.finish()
}
