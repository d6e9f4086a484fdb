//! Search term parsing and matching.
//!
//! # Invariants
//! - A parsed term is never empty; whitespace is part of the term.
//! - Matching is a substring test with Unicode case folding on both sides.
//! - No character in the term has wildcard meaning.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for search term parsing.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Term was absent or the empty string.
    EmptyTerm,
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTerm => write!(f, "search term must not be empty"),
        }
    }
}

impl Error for SearchError {}

/// Non-empty search term, kept exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    pub fn parse(raw: Option<&str>) -> SearchResult<Self> {
        match raw {
            None | Some("") => Err(SearchError::EmptyTerm),
            Some(raw) => Ok(Self {
                raw: raw.to_string(),
                folded: raw.to_lowercase(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `text` contains the term, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchError, SearchTerm};

    #[test]
    fn parse_rejects_missing_and_empty_terms() {
        assert_eq!(SearchTerm::parse(None), Err(SearchError::EmptyTerm));
        assert_eq!(SearchTerm::parse(Some("")), Err(SearchError::EmptyTerm));
    }

    #[test]
    fn parse_keeps_whitespace() {
        assert_eq!(SearchTerm::parse(Some("  ")).unwrap().as_str(), "  ");
        assert_eq!(SearchTerm::parse(Some(" title")).unwrap().as_str(), " title");
    }

    #[test]
    fn leading_space_is_part_of_the_match() {
        let term = SearchTerm::parse(Some(" title")).unwrap();
        assert!(term.matches("What is the TITLE?"));
        assert!(!term.matches("Who wrote the subtitle?"));
    }

    #[test]
    fn matching_folds_non_ascii_case() {
        let term = SearchTerm::parse(Some("ísland")).unwrap();
        assert!(term.matches("Capital of ÍSLAND?"));
        assert!(SearchTerm::parse(Some("STRASSE")).unwrap().matches("Die strasse"));
    }

    #[test]
    fn wildcard_characters_are_literal() {
        let term = SearchTerm::parse(Some("100%")).unwrap();
        assert!(term.matches("Is 100% visible?"));
        assert!(!term.matches("Is 1000 visible?"));
        assert!(!SearchTerm::parse(Some("_")).unwrap().matches("abc"));
    }
}
