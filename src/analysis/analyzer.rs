//! Analyzer combining tokenization, validation and stop word removal.

use crate::analysis::stop_filter::StopFilter;
use crate::analysis::tokenizer::{Tokens, WhitespaceTokenizer, is_valid_term};
use crate::error::{HalberdError, Result};

/// The analysis pipeline applied to document text.
///
/// # Examples
///
/// ```
/// use halberd::analysis::{Analyzer, StopFilter};
///
/// let analyzer = Analyzer::new(StopFilter::from_text("in the").unwrap());
/// let terms = analyzer.analyze("cat in the city").unwrap();
/// assert_eq!(terms, vec!["cat", "city"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    tokenizer: WhitespaceTokenizer,
    stop_filter: StopFilter,
}

impl Analyzer {
    /// Create an analyzer using the given stop words.
    pub fn new(stop_filter: StopFilter) -> Self {
        Analyzer {
            tokenizer: WhitespaceTokenizer::new(),
            stop_filter,
        }
    }

    /// Split `text` into validated, non-stop terms in their original order.
    ///
    /// Fails with `InvalidArgument` on the first term containing a control
    /// character; stop words are validated too.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut terms = Vec::new();
        for term in self.tokenizer.tokenize(text) {
            if !is_valid_term(term) {
                return Err(HalberdError::invalid_argument(format!(
                    "term {term:?} contains control characters"
                )));
            }
            if !self.stop_filter.is_stop_word(term) {
                terms.push(term);
            }
        }
        Ok(terms)
    }

    /// Split `text` into raw space-delimited tokens without validation.
    pub fn tokens<'a>(&self, text: &'a str) -> Tokens<'a> {
        self.tokenizer.tokenize(text)
    }

    /// Check whether `term` is a configured stop word.
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_filter.is_stop_word(term)
    }

    /// The configured stop words.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }
}
