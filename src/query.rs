//! Query representation and parsing.
//!
//! A raw query is a whitespace-separated list of terms. A term prefixed with
//! a single `-` is a minus-term: any document containing it is excluded from
//! results. Every other term is a plus-term that contributes to relevance.

pub mod parser;
pub mod terms;

pub use parser::QueryParser;
pub use terms::{Query, QueryTerm};
