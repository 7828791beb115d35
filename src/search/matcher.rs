//! Reports which query terms a single document contains.

use rayon::prelude::*;

use crate::document::{DocumentId, DocumentStatus};
use crate::error::{HalberdError, Result};
use crate::index::store::DocumentStore;
use crate::query::Query;

/// Matched plus-terms (sorted, unique) and the document's status.
pub type MatchResult<'q> = (Vec<&'q str>, DocumentStatus);

/// Match a canonical query against document `id` using the inverted index.
///
/// Any minus-term present in the document short-circuits to an empty term
/// list.
pub fn match_sequential<'q>(
    store: &DocumentStore,
    query: &Query<'q>,
    id: DocumentId,
) -> Result<MatchResult<'q>> {
    let status = store
        .status(id)
        .ok_or(HalberdError::DocumentNotFound(id))?;
    let inverted = store.inverted();

    if query
        .minus_terms
        .iter()
        .any(|term| inverted.contains(term, id))
    {
        return Ok((Vec::new(), status));
    }

    let matched = query
        .plus_terms
        .iter()
        .copied()
        .filter(|term| inverted.contains(term, id))
        .collect();
    Ok((matched, status))
}

/// Match a query that may be unsorted and contain repeats, checking terms
/// concurrently against the document's own forward-index entry.
pub fn match_parallel<'q>(
    store: &DocumentStore,
    query: &Query<'q>,
    id: DocumentId,
) -> Result<MatchResult<'q>> {
    let status = store
        .status(id)
        .ok_or(HalberdError::DocumentNotFound(id))?;
    let frequencies = store.word_frequencies(id);

    if query
        .minus_terms
        .par_iter()
        .any(|term| frequencies.contains_key(*term))
    {
        return Ok((Vec::new(), status));
    }

    let mut matched: Vec<&'q str> = query
        .plus_terms
        .par_iter()
        .copied()
        .filter(|term| frequencies.contains_key(*term))
        .collect();
    matched.par_sort_unstable();
    matched.dedup();
    Ok((matched, status))
}
