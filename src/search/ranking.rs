//! TF-IDF ranking of documents against a parsed query.
//!
//! Relevance of a document is the sum over plus-terms of
//! `tf(term, doc) * ln(N / df(term))`, where `N` is the number of live
//! documents and `df` the number of documents containing the term. The
//! predicate only gates plus-term accumulation; minus-terms then veto every
//! document containing them, whatever the predicate said.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::trace;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::document::{Document, DocumentId};
use crate::execution::ExecutionPolicy;
use crate::index::store::DocumentStore;
use crate::query::Query;
use crate::search::filter::DocumentPredicate;
use crate::util::concurrent_map::ShardedMap;

/// `ln(document_count / document_frequency)`.
///
/// Zero when the term occurs in every document.
pub fn inverse_document_frequency(document_count: usize, document_frequency: usize) -> f64 {
    (document_count as f64 / document_frequency as f64).ln()
}

/// Selects and orders the top documents for a query.
#[derive(Clone, Copy, Debug)]
pub struct Ranker {
    max_results: usize,
    epsilon: f64,
    shard_count: usize,
}

impl Ranker {
    pub fn new(config: &EngineConfig) -> Self {
        Ranker {
            max_results: config.max_results,
            epsilon: config.relevance_epsilon,
            shard_count: config.shard_count,
        }
    }

    /// Rank all candidates and keep the best `max_results`.
    pub fn rank<P>(
        &self,
        store: &DocumentStore,
        query: &Query<'_>,
        predicate: &P,
        policy: ExecutionPolicy,
    ) -> Vec<Document>
    where
        P: DocumentPredicate + ?Sized,
    {
        let relevance = match policy {
            ExecutionPolicy::Sequential => accumulate_sequential(store, query, predicate),
            ExecutionPolicy::Parallel => {
                accumulate_parallel(store, query, predicate, self.shard_count)
            }
        };

        let mut documents: Vec<Document> = relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                store
                    .document(id)
                    .map(|data| Document::new(id, relevance, data.rating))
            })
            .collect();

        trace!(
            "ranking {} candidates for {} plus-terms",
            documents.len(),
            query.plus_terms.len()
        );

        self.sort(&mut documents);
        documents.truncate(self.max_results);
        documents
    }

    /// Order documents by descending relevance; relevance values closer than
    /// epsilon are tied and ordered by descending rating.
    ///
    /// Ties are resolved per run of neighbours whose relevance differs by
    /// less than epsilon, which keeps the ordering total. Within a run,
    /// equal ratings fall back to ascending id, so results do not depend on
    /// rounding noise from the accumulation order.
    pub fn sort(&self, documents: &mut [Document]) {
        documents.sort_by(|a, b| {
            b.relevance
                .total_cmp(&a.relevance)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut start = 0;
        while start < documents.len() {
            let mut end = start + 1;
            while end < documents.len()
                && documents[end - 1].relevance - documents[end].relevance < self.epsilon
            {
                end += 1;
            }
            if end - start > 1 {
                documents[start..end].sort_by(tie_order);
            }
            start = end;
        }
    }
}

fn tie_order(a: &Document, b: &Document) -> Ordering {
    b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id))
}

fn accumulate_sequential<P>(
    store: &DocumentStore,
    query: &Query<'_>,
    predicate: &P,
) -> BTreeMap<DocumentId, f64>
where
    P: DocumentPredicate + ?Sized,
{
    let document_count = store.document_count();
    let mut relevance = BTreeMap::new();

    for term in &query.plus_terms {
        if query.is_minus_term(term) {
            continue;
        }
        let Some(postings) = store.inverted().postings(term) else {
            continue;
        };
        let idf = inverse_document_frequency(document_count, postings.len());
        for (&id, &tf) in postings.iter() {
            let Some(data) = store.document(id) else {
                continue;
            };
            if predicate.matches(id, data.status, data.rating) {
                let entry = relevance.entry(id).or_insert(0.0);
                // A term present in every document has idf 0: the document
                // still matches, it just gains nothing.
                if idf > 0.0 {
                    *entry += tf * idf;
                }
            }
        }
    }

    for term in &query.minus_terms {
        if let Some(postings) = store.inverted().postings(term) {
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
    }

    relevance
}

fn accumulate_parallel<P>(
    store: &DocumentStore,
    query: &Query<'_>,
    predicate: &P,
    shard_count: usize,
) -> BTreeMap<DocumentId, f64>
where
    P: DocumentPredicate + ?Sized,
{
    let document_count = store.document_count();
    let relevance: ShardedMap<DocumentId, f64> = ShardedMap::new(shard_count);

    query
        .plus_terms
        .par_iter()
        .filter(|term| !query.is_minus_term(term))
        .for_each(|term| {
            let Some(postings) = store.inverted().postings(term) else {
                return;
            };
            let idf = inverse_document_frequency(document_count, postings.len());
            for (&id, &tf) in postings.iter() {
                let Some(data) = store.document(id) else {
                    continue;
                };
                if predicate.matches(id, data.status, data.rating) {
                    let mut entry = relevance.access(id);
                    if idf > 0.0 {
                        *entry += tf * idf;
                    }
                }
            }
        });

    // Vetoes start only after every plus-term worker has finished.
    query.minus_terms.par_iter().for_each(|term| {
        if let Some(postings) = store.inverted().postings(term) {
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
    });

    relevance.into_ordinary_map()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker(max_results: usize) -> Ranker {
        Ranker::new(&EngineConfig::default().with_max_results(max_results))
    }

    #[test]
    fn test_inverse_document_frequency() {
        assert_eq!(inverse_document_frequency(3, 3), 0.0);
        assert!((inverse_document_frequency(3, 1) - 3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_sort_by_relevance_then_rating() {
        let mut docs = vec![
            Document::new(1, 0.1, 9),
            Document::new(2, 0.5, 1),
            Document::new(3, 0.5 + 1e-9, 7),
            Document::new(4, 0.3, 2),
        ];
        ranker(5).sort(&mut docs);

        let ids: Vec<DocumentId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_sort_ties_are_deterministic() {
        let mut docs = vec![
            Document::new(8, 0.0, 1),
            Document::new(2, 0.0, 1),
            Document::new(5, 0.0, 1),
        ];
        ranker(5).sort(&mut docs);
        let ids: Vec<DocumentId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 5, 8]);
    }

    #[test]
    fn test_sort_handles_many_near_ties() {
        // Sorting must not panic when many values sit within epsilon.
        let mut docs: Vec<Document> = (0..200)
            .map(|i| Document::new(i, (i % 7) as f64 * 4e-7, (i % 5) as i32))
            .collect();
        ranker(5).sort(&mut docs);
        assert_eq!(docs.len(), 200);
    }
}
