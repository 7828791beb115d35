//! Ranking and matching over the document store.

pub mod filter;
pub mod matcher;
pub mod ranking;

pub use filter::{ByStatus, DocumentPredicate};
pub use matcher::MatchResult;
pub use ranking::{Ranker, inverse_document_frequency};
