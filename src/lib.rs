//! # Halberd
//!
//! An in-process TF-IDF full-text ranking engine for Rust.
//!
//! ## Features
//!
//! - Whitespace tokenization with a stop-word filter
//! - Plus/minus query syntax
//! - Forward and inverted indexes kept mutually consistent
//! - Top-K ranking with rating tie-breaks
//! - Sequential and parallel ranking, matching and removal
//! - Pagination, request tracking, batch queries and duplicate removal
//!
//! ## Example
//!
//! ```
//! use halberd::prelude::*;
//!
//! let mut engine = SearchEngine::new("and in on").unwrap();
//! engine.add_document(1, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! engine.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let results = engine.find_top_documents("fluffy cat -collar").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, 2);
//! ```

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod document;
pub mod engine;
pub mod error;
pub mod execution;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::batch::{process_queries, process_queries_joined};
    pub use crate::config::EngineConfig;
    pub use crate::dedup::remove_duplicates;
    pub use crate::document::{Document, DocumentData, DocumentId, DocumentStatus};
    pub use crate::engine::SearchEngine;
    pub use crate::error::{HalberdError, Result};
    pub use crate::execution::ExecutionPolicy;
    pub use crate::paginator::{Page, Paginator, paginate};
    pub use crate::request_queue::RequestQueue;
    pub use crate::search::{ByStatus, DocumentPredicate};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
