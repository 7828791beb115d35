//! Document storage with forward and inverted term indexes.
//!
//! The forward index maps a document to the normalized frequency of each of
//! its terms; the inverted index maps a term to the documents containing it
//! with the same frequency values. The two are kept bidirectionally
//! consistent after every insertion and removal.

pub mod inverted;
pub mod store;

pub use inverted::{InvertedIndex, Postings};
pub use store::{DocumentStore, TermFrequencies};
