//! Text analysis: space tokenization, term validation and stop words.
//!
//! The [`analyzer::Analyzer`] combines the pieces into the single pipeline
//! used for both documents and queries, so a term that is dropped from a
//! document is also dropped from every query.

pub mod analyzer;
pub mod stop_filter;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use stop_filter::StopFilter;
pub use tokenizer::{Tokens, WhitespaceTokenizer, is_valid_term};
