//! Inverted index from terms to per-document frequencies.

use std::collections::BTreeMap;

use crate::document::DocumentId;
use crate::util::concurrent_map::{ReadAccess, ShardedMap};

/// Documents containing one term, with the term's normalized frequency in
/// each document.
pub type Postings = BTreeMap<DocumentId, f64>;

/// Term to postings map, sharded by term hash.
///
/// Lookups and erasures lock only the shard owning the term, which lets the
/// parallel removal path erase one document from many buckets at once.
/// Buckets that become empty are dropped, so every stored bucket is non-empty.
#[derive(Debug)]
pub struct InvertedIndex {
    terms: ShardedMap<String, Postings>,
}

impl InvertedIndex {
    /// Create an empty index with `shard_count` shards.
    pub fn new(shard_count: usize) -> Self {
        InvertedIndex {
            terms: ShardedMap::new(shard_count),
        }
    }

    /// Record `frequency` of `term` in document `id`.
    pub fn insert(&mut self, term: &str, id: DocumentId, frequency: f64) {
        self.terms.entry_mut(term.to_string()).insert(id, frequency);
    }

    /// Postings of `term`, if any live document contains it.
    pub fn postings(&self, term: &str) -> Option<ReadAccess<'_, Postings>> {
        self.terms.get(term)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings(term).map_or(0, |postings| postings.len())
    }

    /// Whether document `id` contains `term`.
    pub fn contains(&self, term: &str, id: DocumentId) -> bool {
        self.postings(term)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Erase document `id` from the bucket of `term`, dropping the bucket
    /// when it becomes empty. Returns whether the id was present.
    ///
    /// Takes `&self`: only the owning shard is write-locked. Erasing an id
    /// that is already absent is a no-op.
    pub fn erase(&self, term: &str, id: DocumentId) -> bool {
        let mut erased = false;
        self.terms.update_or_remove(term, |postings| {
            erased = postings.remove(&id).is_some();
            !postings.is_empty()
        });
        erased
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.terms.shard_count()
    }

    /// A consolidated copy of the whole index.
    pub fn snapshot(&self) -> BTreeMap<String, Postings> {
        self.terms.build_ordinary_map()
    }
}
