//! Clause segmentation for extracted page text

use clauseclear_domain::{Clause, ClauseId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fragments this many characters or shorter are dropped as noise
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 10;

/// Abbreviations whose trailing period never ends a sentence
pub const PROTECTED_ABBREVIATIONS: [&str; 6] = ["rs", "re", "mr", "mrs", "ms", "dr"];

static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s+[A-Z][a-z]").expect("valid boundary regex"));

static SEMICOLON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s+").expect("valid semicolon regex"));

static ENUMERATOR_RE: Lazy<Regex> = Lazy::new(|| {
    // A number whose closing period was consumed as a sentence boundary is
    // also an enumerator ("Para 3" before ". The ...")
    Regex::new(
        r"(?i)^(?:(?:para(?:graph)?\.?\s*)?\d+(?:\.\d+)*(?:\.(?:\s+|$)|$)|[a-z]\.(?:\s+|$))",
    )
    .expect("valid enumerator regex")
});

/// One fragment of normalised text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Fragment text
    pub text: String,
    /// Start byte offset in the normalised text
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

/// Splits raw page text into clause-sized fragments
///
/// 1. Whitespace runs collapse to a single space
/// 2. Sentences break at `. ` followed by a capitalised word, except after a
///    protected abbreviation or a single-letter enumerator at sentence start
/// 3. Sentences break again at `; `
/// 4. Fragments are trimmed and lose any leading enumerator (`12.`, `Para 3.`, `B.`)
/// 5. Fragments no longer than the noise limit are dropped
#[derive(Debug, Clone)]
pub struct ClauseSegmenter {
    min_fragment_chars: usize,
}

impl ClauseSegmenter {
    /// Create a segmenter with the default noise limit
    pub fn new() -> Self {
        Self {
            min_fragment_chars: DEFAULT_MIN_FRAGMENT_CHARS,
        }
    }

    /// Override the noise limit
    pub fn with_min_fragment_chars(mut self, min_fragment_chars: usize) -> Self {
        self.min_fragment_chars = min_fragment_chars;
        self
    }

    /// Segment one page of text
    ///
    /// Offsets refer to [`normalize_whitespace`] applied to `raw`.
    pub fn segment(&self, raw: &str) -> Vec<Segment> {
        let text = normalize_whitespace(raw);
        let mut segments = Vec::new();

        for (s_start, s_end) in sentence_spans(&text) {
            let sentence = &text[s_start..s_end];
            let mut piece_start = 0;
            for m in SEMICOLON_RE.find_iter(sentence) {
                self.push_piece(&text, s_start + piece_start, s_start + m.start(), &mut segments);
                piece_start = m.end();
            }
            self.push_piece(&text, s_start + piece_start, s_end, &mut segments);
        }

        segments
    }

    /// Segment pages and assign clause ids
    ///
    /// Pages are numbered from 1 and fragments within a page from 1, giving
    /// ids like `P01_C003`. Empty pages contribute nothing.
    pub fn segment_pages<S: AsRef<str>>(&self, pages: &[S]) -> Vec<Clause> {
        pages
            .iter()
            .enumerate()
            .flat_map(|(idx, page)| {
                let page_no = idx as u32 + 1;
                self.segment(page.as_ref())
                    .into_iter()
                    .enumerate()
                    .map(move |(i, seg)| {
                        Clause::new(
                            ClauseId::for_position(page_no, i + 1),
                            page_no,
                            seg.text,
                            seg.start,
                            seg.end,
                        )
                    })
            })
            .collect()
    }

    fn push_piece(&self, text: &str, start: usize, end: usize, out: &mut Vec<Segment>) {
        let piece = &text[start..end];
        let trimmed_start = start + (piece.len() - piece.trim_start().len());
        let trimmed = piece.trim();

        let (start, trimmed) = match ENUMERATOR_RE.find(trimmed) {
            Some(m) => (trimmed_start + m.end(), &trimmed[m.end()..]),
            None => (trimmed_start, trimmed),
        };

        if trimmed.chars().count() <= self.min_fragment_chars {
            return;
        }

        out.push(Segment {
            text: trimmed.to_string(),
            start,
            end: start + trimmed.len(),
        });
    }
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment text with the default settings
pub fn segment(raw: &str) -> Vec<Segment> {
    ClauseSegmenter::new().segment(raw)
}

/// Segment pages with the default settings
pub fn segment_pages<S: AsRef<str>>(pages: &[S]) -> Vec<Clause> {
    ClauseSegmenter::new().segment_pages(pages)
}

/// Collapse whitespace runs to single spaces and trim the ends
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte spans of sentences; the terminating period belongs to neither side
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BOUNDARY_RE.find_iter(text) {
        if is_protected(&text[start..m.start()]) {
            continue;
        }
        spans.push((start, m.start()));
        // Next sentence starts at the capital letter
        start = m.end() - 2;
    }

    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

/// Whether the word ending right before a period blocks a boundary
///
/// A single capital letter is protected only in enumerator position: at the
/// start of the sentence or right after an earlier period ("A. First. B. Second").
fn is_protected(before_period: &str) -> bool {
    let (lead, last) = before_period.rsplit_once(' ').unwrap_or(("", before_period));
    let word = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    let single_capital = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase());
    let lead = lead.trim_end();

    (single_capital && (lead.is_empty() || lead.ends_with('.')))
        || PROTECTED_ABBREVIATIONS
            .iter()
            .any(|abbr| word.eq_ignore_ascii_case(abbr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(raw: &str) -> Vec<String> {
        segment(raw).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn test_currency_abbreviation_is_not_a_boundary() {
        assert_eq!(
            texts("Monthly rent is Rs. 14500. The rent is due on the fifth."),
            vec!["Monthly rent is Rs. 14500", "The rent is due on the fifth."]
        );
        assert_eq!(
            texts("The deposit is Rs. Fifty thousand only. Interest is not payable on it."),
            vec!["The deposit is Rs. Fifty thousand only", "Interest is not payable on it."]
        );
    }

    #[test]
    fn test_single_letter_enumerators_do_not_split() {
        assert_eq!(
            texts("A. First point. B. Second point."),
            vec!["First point. B. Second point."]
        );
    }

    #[test]
    fn test_trailing_party_letter_splits() {
        assert_eq!(
            texts("Rent is paid to Party A. The deposit is refundable on exit."),
            vec!["Rent is paid to Party A", "The deposit is refundable on exit."]
        );
        assert_eq!(
            texts("Fixtures are listed in Schedule B. Keys are handed over at signing."),
            vec!["Fixtures are listed in Schedule B", "Keys are handed over at signing."]
        );
    }

    #[test]
    fn test_acronyms_do_not_split() {
        assert_eq!(
            texts("Payment goes to the account. NEFT transfers are accepted by the bank."),
            vec!["Payment goes to the account. NEFT transfers are accepted by the bank."]
        );
    }

    #[test]
    fn test_semicolon_split() {
        assert_eq!(
            texts("The tenant shall pay rent monthly; the landlord shall maintain the roof."),
            vec!["The tenant shall pay rent monthly", "the landlord shall maintain the roof."]
        );
    }

    #[test]
    fn test_enumerators_are_stripped() {
        assert_eq!(
            texts("12. The tenant shall not sublet the premises."),
            vec!["The tenant shall not sublet the premises."]
        );
        assert_eq!(
            texts("Para 3. The lock-in period is eleven months."),
            vec!["The lock-in period is eleven months."]
        );
        assert_eq!(
            texts("paragraph 4.2. Rent increases by five percent yearly."),
            vec!["Rent increases by five percent yearly."]
        );
    }

    #[test]
    fn test_decimal_figures_are_not_enumerators() {
        assert_eq!(
            texts("12.5% interest applies to late payments."),
            vec!["12.5% interest applies to late payments."]
        );
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        assert_eq!(
            texts("Signed. The tenant agrees to every term above."),
            vec!["The tenant agrees to every term above."]
        );
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(
            texts("The   tenant\n\nshall keep\tthe premises clean."),
            vec!["The tenant shall keep the premises clean."]
        );
    }

    #[test]
    fn test_offsets_point_into_normalized_text() {
        let raw = "1. The tenant pays rent.  The landlord repairs the roof; both parties sign here.";
        let normalized = normalize_whitespace(raw);
        for seg in segment(raw) {
            assert_eq!(&normalized[seg.start..seg.end], seg.text);
        }
    }

    #[test]
    fn test_segment_pages_assigns_ids() {
        let pages = vec![
            "The tenant pays rent monthly. The landlord repairs the roof.",
            "",
            "Either party may end this agreement with notice.",
        ];
        let clauses = segment_pages(&pages);
        let ids: Vec<&str> = clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["P01_C001", "P01_C002", "P03_C001"]);
        assert_eq!(clauses[2].page, 3);
        assert_eq!(clauses[1].text, "The landlord repairs the roof.");
    }

    #[test]
    fn test_custom_noise_limit() {
        let segmenter = ClauseSegmenter::new().with_min_fragment_chars(0);
        let texts: Vec<String> = segmenter
            .segment("Signed. The tenant agrees.")
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(texts, vec!["Signed", "The tenant agrees."]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn contract_text() -> impl Strategy<Value = String> {
        let words = prop::sample::select(vec![
            "The", "tenant", "shall", "pay", "Rs.", "14500", "A.", "B.", "12.", "Para",
            "rent.", "Deposit", "is", "due;", "landlord", "may", "terminate.", "\n", "  ",
        ]);
        prop::collection::vec(words, 0..40).prop_map(|w| w.join(" "))
    }

    proptest! {
        #[test]
        fn segmentation_is_pure(text in contract_text()) {
            prop_assert_eq!(segment(&text), segment(&text));
        }

        #[test]
        fn fragments_exceed_noise_limit(text in contract_text()) {
            for seg in segment(&text) {
                prop_assert!(seg.text.trim().chars().count() > DEFAULT_MIN_FRAGMENT_CHARS);
            }
        }

        #[test]
        fn fragments_are_ordered_and_disjoint(text in ".{0,200}") {
            let normalized = normalize_whitespace(&text);
            let segments = segment(&text);
            let mut last_end = 0;
            for seg in &segments {
                prop_assert!(seg.start >= last_end);
                prop_assert!(seg.end > seg.start);
                prop_assert_eq!(&normalized[seg.start..seg.end], seg.text.as_str());
                last_end = seg.end;
            }
        }
    }
}
