//! Sliding-window tracking of search requests that returned nothing.

use std::collections::VecDeque;

use crate::document::{Document, DocumentStatus};
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::execution::ExecutionPolicy;
use crate::search::filter::DocumentPredicate;

/// Requests kept in the window: one per minute over a day.
pub const REQUEST_WINDOW: usize = 1440;

/// Forwards queries to an engine and counts the empty results among the
/// most recent [`REQUEST_WINDOW`] requests.
#[derive(Debug)]
pub struct RequestQueue<'e> {
    engine: &'e SearchEngine,
    requests: VecDeque<bool>,
    no_result_requests: usize,
    window: usize,
}

impl<'e> RequestQueue<'e> {
    pub fn new(engine: &'e SearchEngine) -> Self {
        Self::with_window(engine, REQUEST_WINDOW)
    }

    /// A queue remembering the last `window` requests. A zero window is
    /// treated as one.
    pub fn with_window(engine: &'e SearchEngine, window: usize) -> Self {
        let window = window.max(1);
        RequestQueue {
            engine,
            requests: VecDeque::with_capacity(window),
            no_result_requests: 0,
            window,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents(raw_query)?;
        self.record(results.is_empty());
        Ok(results)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents_by_status(raw_query, status)?;
        self.record(results.is_empty());
        Ok(results)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        self.add_find_request_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Forward a filtered query ranked under `policy`.
    pub fn add_find_request_with<P>(
        &mut self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let results = self
            .engine
            .find_top_documents_with(policy, raw_query, predicate)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// Empty-result requests inside the window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Requests currently inside the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == self.window && self.requests.pop_front() == Some(true) {
            self.no_result_requests -= 1;
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use crate::search::ByStatus;

    fn engine() -> SearchEngine {
        let mut engine = SearchEngine::new("and in at").unwrap();
        engine
            .add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        engine
            .add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        engine
            .add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8])
            .unwrap();
        engine
            .add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2])
            .unwrap();
        engine
            .add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1])
            .unwrap();
        engine
    }

    #[test]
    fn test_window_expires_old_empty_requests() {
        let engine = engine();
        let mut queue = RequestQueue::new(&engine);

        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        queue.add_find_request("big collar").unwrap();
        queue.add_find_request("sparrow").unwrap();

        assert_eq!(queue.len(), REQUEST_WINDOW);
        assert_eq!(queue.no_result_requests(), 1437);
    }

    #[test]
    fn test_status_and_predicate_requests() {
        let engine = engine();
        let mut queue = RequestQueue::with_window(&engine, 2);

        let banned = queue
            .add_find_request_by_status("curly", DocumentStatus::Banned)
            .unwrap();
        assert!(banned.is_empty());

        let high = queue
            .add_find_request_by("big", |_: DocumentId, _: DocumentStatus, rating: i32| rating > 2)
            .unwrap();
        assert_eq!(high.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(queue.no_result_requests(), 1);

        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 0);
    }

    #[test]
    fn test_requests_under_each_policy() {
        let engine = engine();
        let mut queue = RequestQueue::with_window(&engine, 4);

        for policy in ExecutionPolicy::ALL {
            let found = queue
                .add_find_request_with(policy, "sparrow", ByStatus::default())
                .unwrap();
            assert_eq!(found.len(), 2);
            let missing = queue
                .add_find_request_with(policy, "sparrow", ByStatus(DocumentStatus::Banned))
                .unwrap();
            assert!(missing.is_empty());
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.no_result_requests(), 2);
        assert!(queue
            .add_find_request_with(ExecutionPolicy::Parallel, "dog\n-cat", ByStatus::default())
            .is_err());
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_errors_record_nothing() {
        let engine = engine();
        let mut queue = RequestQueue::new(&engine);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert!(queue.is_empty());
    }
}
