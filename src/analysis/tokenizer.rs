//! Whitespace tokenizer and term validation.

use std::str::Split;

/// A tokenizer that splits text on runs of ASCII spaces.
///
/// Empty tokens are never produced and the left-to-right order of the text
/// is preserved. Terms are compared byte-wise, so no case folding happens.
/// Tabs, newlines and other control characters are not separators; they stay
/// inside the token so that [`is_valid_term`] rejects it.
///
/// # Examples
///
/// ```
/// use halberd::analysis::tokenizer::WhitespaceTokenizer;
///
/// let tokenizer = WhitespaceTokenizer::new();
/// let terms: Vec<_> = tokenizer.tokenize("  hello   world ").collect();
/// assert_eq!(terms, vec!["hello", "world"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Split `text` into terms borrowed from it.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens {
            inner: text.split(' '),
        }
    }

    /// Get the name of this tokenizer.
    pub fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Iterator over the non-empty space-delimited tokens of a text.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.find(|token| !token.is_empty())
    }
}

/// Check that a term contains no control characters (code points below
/// U+0020).
pub fn is_valid_term(term: &str) -> bool {
    !term.chars().any(|c| c < ' ')
}
