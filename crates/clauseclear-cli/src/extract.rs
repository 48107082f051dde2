//! Plain-text page extraction.

use anyhow::Context;
use clauseclear_domain::traits::PageExtractor;
use clauseclear_domain::Clause;
use clauseclear_extractor::segment_pages;
use std::fs;
use std::path::Path;

/// Page separator in plain-text documents (form feed).
pub const PAGE_BREAK: char = '\x0c';

/// Reads UTF-8 text files, one page per form-feed separated section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPageExtractor;

impl PageExtractor for TextPageExtractor {
    type Error = anyhow::Error;

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, Self::Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(split_pages(&contents))
    }
}

/// Split text into pages on form feeds.
pub fn split_pages(contents: &str) -> Vec<String> {
    contents.split(PAGE_BREAK).map(str::to_string).collect()
}

/// Extract and segment a document into clauses.
pub fn load_clauses<E>(extractor: &E, path: &Path) -> anyhow::Result<Vec<Clause>>
where
    E: PageExtractor<Error = anyhow::Error>,
{
    let pages = extractor.extract_pages(path)?;
    Ok(segment_pages(&pages))
}

/// Document id derived from a file name, used when none is given.
pub fn default_document_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_pages() {
        let pages = split_pages("first page\x0csecond page\x0c");
        assert_eq!(pages, vec!["first page", "second page", ""]);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TextPageExtractor
            .extract_pages(Path::new("/nonexistent/lease.txt"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/lease.txt"));
    }

    #[test]
    fn test_load_clauses_numbers_pages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lease.txt");
        fs::write(
            &path,
            "The tenant shall pay rent on the first day of each month.\x0c\
             The owner shall maintain the common areas of the building.",
        )
        .unwrap();

        let clauses = load_clauses(&TextPageExtractor, &path).unwrap();
        let ids: Vec<&str> = clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["P01_C001", "P02_C001"]);
        assert_eq!(clauses[1].page, 2);
    }

    #[test]
    fn test_default_document_id() {
        assert_eq!(default_document_id(Path::new("/tmp/lease-2024.txt")), "lease-2024");
    }
}
