//! The document store: metadata, forward index, inverted index, live ids.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rayon::prelude::*;

use crate::document::{DocumentData, DocumentId, DocumentStatus};
use crate::error::{HalberdError, Result};
use crate::execution::ExecutionPolicy;
use crate::index::inverted::InvertedIndex;

/// Normalized frequency of each term in one document.
pub type TermFrequencies = BTreeMap<String, f64>;

static EMPTY_FREQUENCIES: TermFrequencies = BTreeMap::new();

/// Owns every live document and both term indexes.
///
/// Mutations take `&mut self`; reads take `&self` and may run concurrently
/// with each other.
#[derive(Debug)]
pub struct DocumentStore {
    documents: BTreeMap<DocumentId, DocumentData>,
    forward: BTreeMap<DocumentId, TermFrequencies>,
    inverted: InvertedIndex,
    ids: BTreeSet<DocumentId>,
}

impl DocumentStore {
    /// Create an empty store whose inverted index has `shard_count` shards.
    pub fn new(shard_count: usize) -> Self {
        DocumentStore {
            documents: BTreeMap::new(),
            forward: BTreeMap::new(),
            inverted: InvertedIndex::new(shard_count),
            ids: BTreeSet::new(),
        }
    }

    /// Check that `id` may be used for a new document.
    pub fn ensure_insertable(&self, id: DocumentId) -> Result<()> {
        if id < 0 {
            return Err(HalberdError::invalid_argument(format!(
                "document id {id} is negative"
            )));
        }
        if self.ids.contains(&id) {
            return Err(HalberdError::DuplicateDocument(id));
        }
        Ok(())
    }

    /// Insert a document whose text has already been analyzed into `terms`.
    ///
    /// Each occurrence of a term adds `1 / terms.len()` to its frequency, and
    /// the resulting values are written identically to both indexes. A
    /// document without terms gets an empty forward entry.
    pub fn insert(&mut self, id: DocumentId, data: DocumentData, terms: &[&str]) -> Result<()> {
        self.ensure_insertable(id)?;

        let mut frequencies = TermFrequencies::new();
        if !terms.is_empty() {
            let weight = 1.0 / terms.len() as f64;
            for &term in terms {
                *frequencies.entry(term.to_string()).or_insert(0.0) += weight;
            }
        }
        for (term, &frequency) in &frequencies {
            self.inverted.insert(term, id, frequency);
        }

        debug!(
            "indexed document {id}: {} terms, {} distinct",
            terms.len(),
            frequencies.len()
        );

        self.forward.insert(id, frequencies);
        self.documents.insert(id, data);
        self.ids.insert(id);
        Ok(())
    }

    /// Remove document `id` from every structure.
    ///
    /// All checks happen before the first erasure and each per-term erasure
    /// is infallible, so a failed call leaves the store untouched. Under
    /// [`ExecutionPolicy::Parallel`] the inverted-index buckets are erased
    /// concurrently, each under its own shard lock.
    pub fn remove(&mut self, id: DocumentId, policy: ExecutionPolicy) -> Result<()> {
        if !self.ids.contains(&id) {
            return Err(HalberdError::DocumentNotFound(id));
        }

        let frequencies = self.forward.get(&id).unwrap_or(&EMPTY_FREQUENCIES);
        let inverted = &self.inverted;

        match policy {
            ExecutionPolicy::Sequential => {
                for term in frequencies.keys() {
                    inverted.erase(term, id);
                }
            }
            ExecutionPolicy::Parallel => {
                let terms: Vec<&str> = frequencies.keys().map(String::as_str).collect();
                terms.par_iter().for_each(|term| {
                    inverted.erase(term, id);
                });
            }
        }

        debug!(
            "removed document {id} ({} terms, {policy:?})",
            frequencies.len()
        );

        self.forward.remove(&id);
        self.documents.remove(&id);
        self.ids.remove(&id);
        Ok(())
    }

    /// Term frequencies of document `id`; empty when the id is absent.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.forward.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Stored metadata of document `id`.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Status of document `id`.
    pub fn status(&self, id: DocumentId) -> Option<DocumentStatus> {
        self.documents.get(&id).map(|data| data.status)
    }

    /// Whether `id` is a live document.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.ids.len()
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = DocumentId> + ExactSizeIterator + '_ {
        self.ids.iter().copied()
    }

    /// The set of live ids.
    pub fn id_set(&self) -> &BTreeSet<DocumentId> {
        &self.ids
    }

    /// The inverted index.
    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    /// Verify that the forward and inverted indexes mirror each other and
    /// that the id set, metadata and forward index cover the same ids.
    pub fn verify_consistency(&self) -> Result<()> {
        let inconsistent = |msg: String| Err(HalberdError::other(format!("inconsistent index: {msg}")));

        if self.documents.len() != self.ids.len() || self.forward.len() != self.ids.len() {
            return inconsistent(format!(
                "{} ids, {} documents, {} forward entries",
                self.ids.len(),
                self.documents.len(),
                self.forward.len()
            ));
        }

        let snapshot = self.inverted.snapshot();
        let mut pairs = 0usize;
        for (term, postings) in &snapshot {
            if postings.is_empty() {
                return inconsistent(format!("empty bucket for {term:?}"));
            }
            for (id, frequency) in postings {
                let forward = self.forward.get(id).and_then(|f| f.get(term));
                if forward != Some(frequency) {
                    return inconsistent(format!(
                        "term {term:?} in document {id}: inverted {frequency}, forward {forward:?}"
                    ));
                }
                pairs += 1;
            }
        }

        let forward_pairs: usize = self.forward.values().map(BTreeMap::len).sum();
        if forward_pairs != pairs {
            return inconsistent(format!(
                "{forward_pairs} forward pairs but {pairs} inverted pairs"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(text: &str) -> DocumentData {
        DocumentData {
            text: text.to_string(),
            status: DocumentStatus::Actual,
            rating: 0,
        }
    }

    fn store_with(docs: &[(DocumentId, &str)]) -> DocumentStore {
        let mut store = DocumentStore::new(4);
        for &(id, text) in docs {
            let terms: Vec<&str> = text.split_whitespace().collect();
            store.insert(id, data(text), &terms).unwrap();
        }
        store
    }

    #[test]
    fn test_insert_computes_normalized_frequencies() {
        let store = store_with(&[(1, "cat and cat and one more cat")]);
        let freqs = store.word_frequencies(1);

        assert!((freqs["cat"] - 3.0 / 7.0).abs() < 1e-12);
        assert!((freqs["and"] - 2.0 / 7.0).abs() < 1e-12);
        let sum: f64 = freqs.values().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(store.verify_consistency().is_ok());
    }

    #[test]
    fn test_insert_rejects_bad_ids() {
        let mut store = store_with(&[(1, "cat")]);

        assert!(matches!(
            store.insert(-1, data("dog"), &["dog"]),
            Err(HalberdError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.insert(1, data("dog"), &["dog"]),
            Err(HalberdError::DuplicateDocument(1))
        ));
        assert_eq!(store.document_count(), 1);
        assert!(store.verify_consistency().is_ok());
    }

    #[test]
    fn test_insert_empty_document() {
        let mut store = DocumentStore::new(2);
        store.insert(3, data(""), &[]).unwrap();

        assert!(store.contains(3));
        assert!(store.word_frequencies(3).is_empty());
        assert_eq!(store.inverted().term_count(), 0);
        store.remove(3, ExecutionPolicy::Sequential).unwrap();
        assert!(!store.contains(3));
    }

    #[test]
    fn test_remove_under_both_policies() {
        for policy in ExecutionPolicy::ALL {
            let mut store = store_with(&[(1, "cat with dog"), (2, "cat and cat"), (3, "dog")]);
            store.remove(1, policy).unwrap();

            assert!(!store.contains(1));
            assert!(store.word_frequencies(1).is_empty());
            assert!(store.document(1).is_none());
            assert!(!store.inverted().contains("cat", 1));
            assert!(store.inverted().postings("with").is_none());
            assert_eq!(store.inverted().document_frequency("dog"), 1);
            assert_eq!(store.ids().collect::<Vec<_>>(), vec![2, 3]);
            assert!(store.verify_consistency().is_ok());
        }
    }

    #[test]
    fn test_remove_missing_leaves_store_unchanged() {
        for policy in ExecutionPolicy::ALL {
            let mut store = store_with(&[(1, "cat")]);
            let before = store.inverted().snapshot();

            assert!(matches!(
                store.remove(9, policy),
                Err(HalberdError::DocumentNotFound(9))
            ));
            assert_eq!(store.inverted().snapshot(), before);
            assert_eq!(store.document_count(), 1);
        }
    }

    #[test]
    fn test_ids_are_ascending() {
        let store = store_with(&[(5, "a"), (1, "b"), (3, "c")]);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![1, 3, 5]);
        // Restartable.
        assert_eq!(store.ids().count(), 3);
    }
}
