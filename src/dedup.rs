//! Removal of documents whose term sets duplicate an earlier document.

use std::collections::BTreeSet;

use ahash::AHashSet;
use log::info;

use crate::document::DocumentId;
use crate::engine::SearchEngine;
use crate::error::Result;

/// Remove every document whose set of distinct terms equals that of a
/// document with a smaller id. Term frequencies are ignored.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Result<Vec<DocumentId>> {
    let mut seen: AHashSet<BTreeSet<&str>> = AHashSet::new();
    let mut duplicates = Vec::new();

    for id in engine.document_ids() {
        let terms: BTreeSet<&str> = engine
            .word_frequencies(id)
            .keys()
            .map(String::as_str)
            .collect();
        if !seen.insert(terms) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        info!("Found duplicate document id {id}");
        engine.remove_document(id)?;
    }
    Ok(duplicates)
}
