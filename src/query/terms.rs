//! Parsed query types.

/// A single classified query token, borrowed from the raw query text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryTerm<'a> {
    /// Term text with any minus prefix removed.
    pub text: &'a str,
    /// Whether the token was prefixed with `-`.
    pub is_minus: bool,
    /// Whether the term is a configured stop word.
    pub is_stop: bool,
}

/// A structured query with stop words removed.
///
/// Queries built by [`QueryParser::parse`](crate::query::QueryParser::parse)
/// are canonical: both term lists are sorted and free of duplicates. Queries
/// built by [`QueryParser::parse_unordered`](crate::query::QueryParser::parse_unordered)
/// keep the raw query order and may repeat terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_terms: Vec<&'a str>,
    pub minus_terms: Vec<&'a str>,
}

impl<'a> Query<'a> {
    /// Create an empty query.
    pub fn new() -> Self {
        Query::default()
    }

    /// True when the query has neither plus- nor minus-terms.
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }

    /// Add a classified term. Stop words are ignored.
    pub fn push(&mut self, term: QueryTerm<'a>) {
        if term.is_stop {
            return;
        }
        if term.is_minus {
            self.minus_terms.push(term.text);
        } else {
            self.plus_terms.push(term.text);
        }
    }

    /// Sort both term lists and remove duplicates.
    pub fn canonicalize(&mut self) {
        self.plus_terms.sort_unstable();
        self.plus_terms.dedup();
        self.minus_terms.sort_unstable();
        self.minus_terms.dedup();
    }

    /// Whether `term` is one of the minus-terms.
    pub fn is_minus_term(&self, term: &str) -> bool {
        self.minus_terms.contains(&term)
    }
}
