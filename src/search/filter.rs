//! Document predicates used to filter ranking candidates.
//!
//! A predicate sees the id, status and rating of each candidate before its
//! relevance is accumulated. Any `Fn(DocumentId, DocumentStatus, i32) -> bool`
//! closure is a predicate, and [`ByStatus`] covers the common status filter.
//!
//! # Examples
//!
//! ```
//! use halberd::document::DocumentStatus;
//! use halberd::search::{ByStatus, DocumentPredicate};
//!
//! let even_ids = |id: i64, _status: DocumentStatus, _rating: i32| id % 2 == 0;
//! assert!(even_ids.matches(2, DocumentStatus::Banned, 0));
//!
//! let banned = ByStatus(DocumentStatus::Banned);
//! assert!(!banned.matches(2, DocumentStatus::Actual, 0));
//! ```

use crate::document::{DocumentId, DocumentStatus};

/// Filter over `(id, status, rating)`.
///
/// Predicates must be `Sync` because the parallel ranking path evaluates them
/// from several worker threads.
pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Accepts documents with exactly the given status. The default accepts
/// [`DocumentStatus::Actual`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByStatus(pub DocumentStatus);

impl DocumentPredicate for ByStatus {
    fn matches(&self, _id: DocumentId, status: DocumentStatus, _rating: i32) -> bool {
        status == self.0
    }
}
