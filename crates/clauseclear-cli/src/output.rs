//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clauseclear_domain::{Clause, Flag, IndexShape, RiskLevel, SearchHit, Severity};
use clauseclear_extractor::HybridReport;
use clauseclear_rules::{EvaluationReport, KnowledgeBase, LevelSummary, ScoredClause};
use clauseclear_store::RankedClause;
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest clause excerpt shown in tables.
const EXCERPT_CHARS: usize = 70;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format segmented clauses.
    pub fn format_clauses(&self, clauses: &[Clause]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(clauses),
            OutputFormat::Quiet => Ok(join_ids(clauses.iter().map(|c| c.id.as_str()))),
            OutputFormat::Table => {
                if clauses.is_empty() {
                    return Ok(self.colorize("No clauses found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Page", "Words", "Text"]);
                for clause in clauses {
                    builder.push_record([
                        clause.id.to_string(),
                        clause.page.to_string(),
                        clause.word_count().to_string(),
                        excerpt(&clause.text),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format rule-engine verdicts with a level summary.
    pub fn format_scored(&self, scored: &[ScoredClause], summary: &LevelSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&serde_json::json!({
                "summary": summary,
                "clauses": scored,
            })),
            OutputFormat::Quiet => Ok(join_ids(scored.iter().map(|s| s.clause.id.as_str()))),
            OutputFormat::Table => {
                let footer = self.summary_line(summary);
                if scored.is_empty() {
                    return Ok(format!("{}\n{}", self.colorize("No clauses found.", "yellow"), footer));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Level", "Score", "Rules", "Text"]);
                for item in scored {
                    builder.push_record([
                        item.clause.id.to_string(),
                        self.level_label(item.verdict.risk_level),
                        format!("{:.2}", item.verdict.risk_score),
                        item.verdict.triggered_rules.join(", "),
                        excerpt(&item.clause.text),
                    ]);
                }
                Ok(format!("{}\n{}", render(builder), footer))
            }
        }
    }

    /// Format search hits.
    pub fn format_hits(&self, hits: &[SearchHit]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(hits),
            OutputFormat::Quiet => Ok(join_ids(hits.iter().map(|h| h.id.as_str()))),
            OutputFormat::Table => {
                if hits.is_empty() {
                    return Ok(self.colorize("No matching clauses.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Page", "Score", "Text"]);
                for hit in hits {
                    builder.push_record([
                        hit.id.to_string(),
                        hit.page.to_string(),
                        format!("{:.3}", hit.score),
                        excerpt(&hit.text),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format search hits with verdicts.
    pub fn format_ranked(&self, ranked: &[RankedClause]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(ranked),
            OutputFormat::Quiet => Ok(join_ids(ranked.iter().map(|r| r.hit.id.as_str()))),
            OutputFormat::Table => {
                if ranked.is_empty() {
                    return Ok(self.colorize("No matching clauses.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Page", "Score", "Level", "Reasons", "Text"]);
                for item in ranked {
                    builder.push_record([
                        item.hit.id.to_string(),
                        item.hit.page.to_string(),
                        format!("{:.3}", item.hit.score),
                        self.level_label(item.verdict.risk_level),
                        item.verdict.reasons.join("; "),
                        excerpt(&item.hit.text),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a hybrid analysis report.
    pub fn format_report(&self, report: &HybridReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report),
            OutputFormat::Quiet => Ok(join_ids(report.flags.iter().map(|f| f.clause_id.as_str()))),
            OutputFormat::Table => {
                let meta = &report.metadata;
                let footer = self.info(&format!(
                    "{} clauses, {} skipped as trivial, {} rule flags, {} classifier flags, {}/{} batches failed",
                    meta.clauses_received,
                    meta.clauses_skipped,
                    meta.rule_flags,
                    meta.classifier_flags,
                    meta.failed_batches,
                    meta.batches
                ));
                if report.flags.is_empty() {
                    return Ok(format!("{}\n{}", self.colorize("No flags raised.", "green"), footer));
                }
                Ok(format!("{}\n{}", self.flags_table(&report.flags), footer))
            }
        }
    }

    fn flags_table(&self, flags: &[Flag]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["ID", "Severity", "Reason", "Suggestion"]);
        for flag in flags {
            builder.push_record([
                flag.clause_id.to_string(),
                self.severity_label(flag.severity),
                flag.reason.clone(),
                flag.negotiation_hint.clone().unwrap_or_default(),
            ]);
        }
        render(builder)
    }

    /// Format an evaluation report.
    pub fn format_evaluation(&self, report: &EvaluationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report),
            OutputFormat::Quiet => Ok(join_ids(report.mismatches.iter().map(|m| m.id.as_str()))),
            OutputFormat::Table => {
                let mut out = format!(
                    "Accuracy: {}/{} ({:.1}%)\n",
                    report.correct,
                    report.total,
                    report.accuracy * 100.0
                );

                let mut confusion = Builder::default();
                let mut header = vec!["expected \\ predicted".to_string()];
                header.extend(RiskLevel::ALL.iter().map(|l| l.as_str().to_string()));
                confusion.push_record(header);
                for expected in RiskLevel::ALL {
                    let mut row = vec![expected.as_str().to_string()];
                    row.extend(
                        RiskLevel::ALL
                            .iter()
                            .map(|predicted| report.count(expected, *predicted).to_string()),
                    );
                    confusion.push_record(row);
                }
                out.push_str(&render(confusion));

                if !report.mismatches.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["ID", "Expected", "Predicted", "Text"]);
                    for m in &report.mismatches {
                        builder.push_record([
                            m.id.clone(),
                            self.level_label(m.expected),
                            self.level_label(m.predicted),
                            excerpt(&m.text),
                        ]);
                    }
                    out.push('\n');
                    out.push_str(&render(builder));
                }
                Ok(out)
            }
        }
    }

    /// Format knowledge base rules and thresholds.
    pub fn format_knowledge_base(&self, kb: &KnowledgeBase) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(kb.to_json_pretty()?),
            OutputFormat::Quiet => Ok(join_ids(kb.rules().iter().map(|r| r.id.as_str()))),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Rule", "Weight", "Description"]);
                for rule in kb.rules() {
                    builder.push_record([
                        rule.id.clone(),
                        format!("{:.2}", rule.weight),
                        rule.description.clone(),
                    ]);
                }
                let thresholds = kb.thresholds();
                Ok(format!(
                    "{}\nMax security deposit: {} months\nMax late fee: {}%",
                    render(builder),
                    thresholds.max_security_deposit_months,
                    thresholds.max_late_fee_percent
                ))
            }
        }
    }

    /// Format the result of an index build.
    pub fn index_built(&self, document_id: &str, shape: IndexShape) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({
                "document_id": document_id,
                "rows": shape.rows,
                "cols": shape.cols,
            })
            .to_string(),
            OutputFormat::Quiet => document_id.to_string(),
            OutputFormat::Table => self.success(&format!(
                "Indexed '{}': {} clauses, {} terms",
                document_id, shape.rows, shape.cols
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn summary_line(&self, summary: &LevelSummary) -> String {
        format!(
            "{} {}  {} {}  {} {}",
            self.level_label(RiskLevel::Red),
            summary.red,
            self.level_label(RiskLevel::Yellow),
            summary.yellow,
            self.level_label(RiskLevel::Green),
            summary.green
        )
    }

    fn level_label(&self, level: RiskLevel) -> String {
        let color = match level {
            RiskLevel::Red => "red",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Green => "green",
        };
        self.colorize(level.as_str(), color)
    }

    fn severity_label(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::High => "red",
            Severity::Medium => "yellow",
            Severity::Low => "cyan",
            Severity::Info => "blue",
        };
        self.colorize(severity.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Shorten text for table cells.
fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clauseclear_domain::RiskVerdict;
    use clauseclear_rules::RuleEngine;
    use std::sync::Arc;

    fn clauses() -> Vec<Clause> {
        vec![
            Clause::from_text(
                "P01_C001",
                1,
                "A security deposit of 5 months' rent is required. There is also a 6-month lock-in period.",
            ),
            Clause::from_text("P01_C002", 1, "The tenant may keep one small pet."),
        ]
    }

    fn scored() -> Vec<ScoredClause> {
        let engine = RuleEngine::new(Arc::new(KnowledgeBase::embedded().unwrap()));
        engine.analyze(&clauses())
    }

    #[test]
    fn test_clause_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_clauses(&clauses()).unwrap();
        assert!(output.contains("P01_C001"));
        assert!(output.contains("Words"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_clauses(&clauses()).unwrap();
        assert_eq!(output, "P01_C001\nP01_C002");
    }

    #[test]
    fn test_scored_json_has_summary() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let scored = scored();
        let output = formatter
            .format_scored(&scored, &LevelSummary::from_scored(&scored))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["summary"]["red"], 1);
        assert_eq!(value["clauses"][0]["id"], "P01_C001");
        assert_eq!(value["clauses"][0]["risk_level"], "RED");
    }

    #[test]
    fn test_scored_table_shows_levels() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let scored = scored();
        let output = formatter
            .format_scored(&scored, &LevelSummary::from_scored(&scored))
            .unwrap();
        assert!(output.contains("RED"));
        assert!(output.contains("very_large_deposit"));
    }

    #[test]
    fn test_ranked_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let ranked = vec![RankedClause {
            hit: SearchHit {
                id: "P01_C002".into(),
                page: 1,
                text: "The tenant may keep one small pet.".to_string(),
                score: 0.4567,
            },
            verdict: RiskVerdict::clear(),
        }];
        let output = formatter.format_ranked(&ranked).unwrap();
        assert!(output.contains("0.457"));
        assert!(output.contains("GREEN"));
    }

    #[test]
    fn test_empty_hits() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_hits(&[]).unwrap();
        assert!(output.contains("No matching clauses"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "word ".repeat(40);
        let cut = excerpt(&long);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= EXCERPT_CHARS);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.level_label(RiskLevel::Red), "RED");
    }
}
