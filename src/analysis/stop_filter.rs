//! Stop word filter.
//!
//! Stop words are excluded from both indexing and query matching. The set
//! is configured once from a space-delimited string and never changes.
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::stop_filter::StopFilter;
//!
//! let filter = StopFilter::from_text("in the").unwrap();
//! let terms = filter.filter(["cat", "in", "the", "city"]);
//! assert_eq!(terms, vec!["cat", "city"]);
//! ```

use ahash::AHashSet;

use crate::analysis::tokenizer::{WhitespaceTokenizer, is_valid_term};
use crate::error::{HalberdError, Result};

/// A filter that removes stop words from a term sequence.
#[derive(Clone, Debug, Default)]
pub struct StopFilter {
    words: AHashSet<String>,
}

impl StopFilter {
    /// Create a filter with no stop words.
    pub fn new() -> Self {
        StopFilter::default()
    }

    /// Parse a space-delimited list of stop words.
    ///
    /// Fails with `InvalidArgument` if a stop word contains control characters.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(WhitespaceTokenizer::new().tokenize(text))
    }

    /// Build a filter from individual words. Empty words are ignored.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_term(word) {
                return Err(HalberdError::invalid_argument(format!(
                    "stop word {word:?} contains control characters"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(StopFilter { words: set })
    }

    /// Check whether `term` is a stop word.
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Remove stop words, preserving order and duplicates of the rest.
    pub fn filter<'a, I>(&self, terms: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        terms
            .into_iter()
            .filter(|term| !self.is_stop_word(term))
            .collect()
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no stop words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the name of this filter.
    pub fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_text("the and").unwrap();
        let result = filter.filter(["hello", "the", "world", "and", "test"]);

        assert_eq!(result, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_filter_keeps_order_and_duplicates() {
        let filter = StopFilter::from_text("a").unwrap();
        let result = filter.filter(["b", "a", "c", "b", "a"]);
        assert_eq!(result, vec!["b", "c", "b"]);
    }

    #[test]
    fn test_from_text_collapses_whitespace_and_duplicates() {
        let filter = StopFilter::from_text("  in   the in ").unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("in"));
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("In"));
    }

    #[test]
    fn test_from_words_rejects_control_characters() {
        let result = StopFilter::from_words(["ok", "b\u{1}ad"]);
        assert!(matches!(result, Err(HalberdError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.filter(["x", "y"]), vec!["x", "y"]);
        assert_eq!(filter.name(), "stop");
    }
}
