//! Clause module - the addressable unit of contract text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a clause within one document
///
/// Segmentation assigns ids of the form `P{page:02}_C{index:03}`. The id is
/// the join key between segmentation output, risk verdicts, index metadata
/// and flags.
///
/// Ordering follows document order: ids in the segmentation form compare by
/// page and then clause number, so `P100_C001` sorts after `P11_C001`. Other
/// ids sort before them, by string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseId(String);

impl ClauseId {
    /// Create a clause id from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build the canonical id for the `index`-th clause (1-based) on `page`
    ///
    /// # Examples
    ///
    /// ```
    /// use clauseclear_domain::ClauseId;
    ///
    /// let id = ClauseId::for_position(1, 3);
    /// assert_eq!(id.as_str(), "P01_C003");
    /// ```
    pub fn for_position(page: u32, index: usize) -> Self {
        Self(format!("P{:02}_C{:03}", page, index))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Page and clause number, if the id is in segmentation form
    pub fn position(&self) -> Option<(u32, usize)> {
        let (page, index) = self.0.strip_prefix('P')?.split_once("_C")?;
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(page) || !all_digits(index) {
            return None;
        }
        Some((page.parse().ok()?, index.parse().ok()?))
    }
}

impl Ord for ClauseId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.position(), &self.0).cmp(&(other.position(), &other.0))
    }
}

impl PartialOrd for ClauseId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClauseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClauseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A clause - the fundamental unit of analysis
///
/// Clauses are created by segmentation and are immutable afterwards.
/// `start` and `end` are byte offsets into the whitespace-normalised text of
/// the page the clause came from.
///
/// A clause deserialized without a `text` field gets an empty text; the rule
/// engine scores such a clause as GREEN with the default reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Unique identifier within the document
    pub id: ClauseId,

    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Clause text
    #[serde(default)]
    pub text: String,

    /// Start offset (inclusive)
    #[serde(default)]
    pub start: usize,

    /// End offset (exclusive)
    #[serde(default)]
    pub end: usize,
}

impl Clause {
    /// Create a new clause
    pub fn new(id: impl Into<ClauseId>, page: u32, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id: id.into(),
            page,
            text: text.into(),
            start,
            end,
        }
    }

    /// Create a clause from text alone, with offsets spanning the whole text
    ///
    /// Convenient for scoring ad-hoc text outside of a segmented document.
    pub fn from_text(id: impl Into<ClauseId>, page: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self::new(id, page, text, 0, end)
    }

    /// Number of whitespace-separated words in the clause text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

fn default_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_id_for_position() {
        assert_eq!(ClauseId::for_position(1, 1).as_str(), "P01_C001");
        assert_eq!(ClauseId::for_position(12, 140).as_str(), "P12_C140");
    }

    #[test]
    fn test_clause_id_ordering_follows_document_order() {
        let a = ClauseId::for_position(1, 9);
        let b = ClauseId::for_position(1, 10);
        let c = ClauseId::for_position(2, 1);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_clause_id_ordering_past_padding() {
        let mut ids = vec![
            ClauseId::for_position(100, 1),
            ClauseId::for_position(2, 1000),
            ClauseId::for_position(11, 1),
            ClauseId::for_position(2, 999),
        ];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(ClauseId::as_str).collect();
        assert_eq!(ordered, vec!["P02_C999", "P02_C1000", "P11_C001", "P100_C001"]);
    }

    #[test]
    fn test_clause_id_position() {
        assert_eq!(ClauseId::from("P100_C001").position(), Some((100, 1)));
        assert_eq!(ClauseId::from("c1").position(), None);
        assert_eq!(ClauseId::from("P+1_C2").position(), None);
        assert!(ClauseId::from("zzz") < ClauseId::for_position(1, 1));
    }

    #[test]
    fn test_clause_id_display() {
        let id = ClauseId::from("P03_C007");
        assert_eq!(id.to_string(), "P03_C007");
    }

    #[test]
    fn test_word_count() {
        let clause = Clause::from_text("a", 1, "  The tenant shall   pay rent ");
        assert_eq!(clause.word_count(), 5);
    }

    #[test]
    fn test_missing_text_deserializes_as_empty() {
        let clause: Clause = serde_json::from_str(r#"{"id": "P01_C001", "page": 2}"#).unwrap();
        assert_eq!(clause.id.as_str(), "P01_C001");
        assert_eq!(clause.page, 2);
        assert!(clause.text.is_empty());
    }

    #[test]
    fn test_clause_json_shape() {
        let clause = Clause::new("P01_C001", 1, "Rent is due monthly.", 0, 20);
        let json = serde_json::to_value(&clause).unwrap();
        assert_eq!(json["id"], "P01_C001");
        assert_eq!(json["page"], 1);
        assert_eq!(json["end"], 20);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: id ordering matches (page, index) ordering
        #[test]
        fn test_position_ordering_property(p1 in 1u32..500, i1 in 1usize..5000, p2 in 1u32..500, i2 in 1usize..5000) {
            let a = ClauseId::for_position(p1, i1);
            let b = ClauseId::for_position(p2, i2);

            prop_assert_eq!(a < b, (p1, i1) < (p2, i2));
            prop_assert_eq!(a == b, (p1, i1) == (p2, i2));
        }
    }
}
