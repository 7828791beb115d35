//! Query parser for converting raw query strings into structured queries.

use crate::analysis::Analyzer;
use crate::analysis::tokenizer::is_valid_term;
use crate::error::{HalberdError, Result};
use crate::query::terms::{Query, QueryTerm};

/// Parses raw query text against the stop words of an [`Analyzer`].
///
/// Supported syntax:
/// - Plus-terms: `cat`
/// - Minus-terms: `-dog`
///
/// A bare `-`, a doubled minus (`--dog`) and terms containing control
/// characters are rejected with `InvalidQuery`.
///
/// # Examples
///
/// ```
/// use halberd::analysis::{Analyzer, StopFilter};
/// use halberd::query::QueryParser;
///
/// let analyzer = Analyzer::new(StopFilter::from_text("the").unwrap());
/// let parser = QueryParser::new(&analyzer);
///
/// let query = parser.parse("the fluffy -dog cat fluffy").unwrap();
/// assert_eq!(query.plus_terms, vec!["cat", "fluffy"]);
/// assert_eq!(query.minus_terms, vec!["dog"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct QueryParser<'s> {
    analyzer: &'s Analyzer,
}

impl<'s> QueryParser<'s> {
    /// Create a parser that uses the stop words of `analyzer`.
    pub fn new(analyzer: &'s Analyzer) -> Self {
        QueryParser { analyzer }
    }

    /// Classify a single space-free token.
    pub fn parse_term<'a>(&self, token: &'a str) -> Result<QueryTerm<'a>> {
        if token.is_empty() {
            return Err(HalberdError::invalid_query("empty query term"));
        }

        let (text, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if text.is_empty() {
            return Err(HalberdError::invalid_query(
                "missing term after minus sign",
            ));
        }
        if text.starts_with('-') {
            return Err(HalberdError::invalid_query(format!(
                "more than one minus sign in {token:?}"
            )));
        }
        if !is_valid_term(text) {
            return Err(HalberdError::invalid_query(format!(
                "term {text:?} contains control characters"
            )));
        }

        Ok(QueryTerm {
            text,
            is_minus,
            is_stop: self.analyzer.is_stop_word(text),
        })
    }

    /// Parse a query into its canonical form: sorted, deduplicated term sets.
    pub fn parse<'a>(&self, text: &'a str) -> Result<Query<'a>> {
        let mut query = self.parse_unordered(text)?;
        query.canonicalize();
        Ok(query)
    }

    /// Parse a query keeping the raw term order and any repeated terms.
    ///
    /// Used by the parallel matcher, which deduplicates its own output.
    pub fn parse_unordered<'a>(&self, text: &'a str) -> Result<Query<'a>> {
        let mut query = Query::new();
        for token in self.analyzer.tokens(text) {
            query.push(self.parse_term(token)?);
        }
        Ok(query)
    }
}
