//! Numeric signal extraction over lower-cased clause text
//!
//! Each matcher is a compiled regex held in a `Lazy` static. Deposit sizing
//! uses an ordered list of strategies where the first strategy that matches
//! decides the answer.

use once_cell::sync::Lazy;
use regex::Regex;

static MONTHS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*month").expect("valid months regex"));

static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid percent regex"));

static UNILATERAL_TERMINATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(landlord|owner|lender)\s+(?:reserves\s+the\s+right\s+to|may)\s+terminate(?:\s+this\s+agreement)?(?:\s+(?:at\s+their\s+sole\s+discretion|at\s+any\s+time|without\s+notice))?",
    )
    .expect("valid termination regex")
});

/// One way of reading a deposit size out of clause text
#[derive(Debug)]
pub struct DepositStrategy {
    /// Short label used in debug output
    pub name: &'static str,
    pattern: Lazy<Regex>,
}

impl DepositStrategy {
    /// Apply the strategy, returning the month count of the first match
    pub fn apply(&self, text: &str) -> Option<u32> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Deposit strategies in precedence order
pub static DEPOSIT_STRATEGIES: [DepositStrategy; 3] = [
    DepositStrategy {
        name: "months_of_rent",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)(\d+)\s*months?(?:['’]s?)?\s*(?:rent|deposit|advance)")
                .expect("valid deposit regex")
        }),
    },
    DepositStrategy {
        name: "security_deposit_then_months",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)security\s+deposit.*?(\d+)\s*months?").expect("valid deposit regex")
        }),
    },
    DepositStrategy {
        name: "months_then_security_deposit",
        pattern: Lazy::new(|| {
            Regex::new(r"(?i)(\d+)\s*months?\s+security\s+deposit").expect("valid deposit regex")
        }),
    },
];

/// Every `<integer> month(s)` figure, left to right
///
/// Figures too large for `u32` are skipped.
pub fn extract_months(text: &str) -> Vec<u32> {
    MONTHS_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Every `<number>%` figure, left to right
pub fn extract_percentages(text: &str) -> Vec<f64> {
    PERCENT_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Deposit size in months, from the first strategy that matches
pub fn extract_deposit_months(text: &str) -> Option<u32> {
    DEPOSIT_STRATEGIES.iter().find_map(|strategy| strategy.apply(text))
}

/// Whether a party reserves a one-sided right to terminate
pub fn has_unilateral_termination(text: &str) -> bool {
    UNILATERAL_TERMINATION_RE.is_match(text)
}
