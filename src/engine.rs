//! The search engine facade.
//!
//! [`SearchEngine`] ties the analyzer, the document store and the ranking and
//! matching routines together behind the public API used by every
//! collaborator (pagination, request tracking, batch queries, duplicate
//! removal and the CLI).
//!
//! # Examples
//!
//! ```
//! use halberd::document::DocumentStatus;
//! use halberd::engine::SearchEngine;
//!
//! let mut engine = SearchEngine::new("in the").unwrap();
//! engine.add_document(1, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! engine.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//! engine.add_document(3, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
//!
//! let results = engine.find_top_documents("fluffy groomed cat").unwrap();
//! assert_eq!(results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 3, 1]);
//! ```
//!
//! Reads take `&self` and may run concurrently; `add_document` and the
//! removal methods take `&mut self`, so concurrent mutation requires the
//! caller to wrap the engine in a lock of its choice.

use std::collections::btree_set;
use std::iter::Copied;

use crate::analysis::{Analyzer, StopFilter};
use crate::config::EngineConfig;
use crate::document::{
    Document, DocumentData, DocumentId, DocumentStatus, compute_average_rating,
};
use crate::error::{HalberdError, Result};
use crate::execution::ExecutionPolicy;
use crate::index::store::{DocumentStore, TermFrequencies};
use crate::query::{Query, QueryParser};
use crate::search::filter::{ByStatus, DocumentPredicate};
use crate::search::matcher::{self, MatchResult};
use crate::search::ranking::Ranker;

/// An in-memory TF-IDF search engine.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    analyzer: Analyzer,
    ranker: Ranker,
    store: DocumentStore,
}

impl SearchEngine {
    /// Create an engine with default settings and the given space-delimited
    /// stop words.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_config(EngineConfig::new(stop_words))
    }

    /// Create an engine with default settings from individual stop words.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = stop_words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .collect();
        let stop_filter = StopFilter::from_words(&words)?;
        Ok(Self::build(EngineConfig::new(words.join(" ")), stop_filter))
    }

    /// Create an engine from a full configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let stop_filter = StopFilter::from_text(&config.stop_words)?;
        Ok(Self::build(config, stop_filter))
    }

    fn build(config: EngineConfig, stop_filter: StopFilter) -> Self {
        SearchEngine {
            analyzer: Analyzer::new(stop_filter),
            ranker: Ranker::new(&config),
            store: DocumentStore::new(config.shard_count),
            config,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The analyzer applied to documents and queries.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Add a document.
    ///
    /// Fails with `InvalidArgument` for a negative id or a term containing
    /// control characters, `DuplicateDocument` for a live id, and
    /// `EmptyDocument` when the text has no indexable term and empty
    /// documents are disabled. A failed call changes nothing.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.store.ensure_insertable(id)?;

        let terms = self.analyzer.analyze(text)?;
        if terms.is_empty() && !self.config.allow_empty_documents {
            return Err(HalberdError::EmptyDocument(id));
        }

        let data = DocumentData {
            text: text.to_string(),
            status,
            rating: compute_average_rating(ratings),
        };
        self.store.insert(id, data, &terms)
    }

    /// Remove a document sequentially.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    /// Remove a document, erasing its inverted-index entries in parallel.
    pub fn remove_document_parallel(&mut self, id: DocumentId) -> Result<()> {
        self.remove_document_with(ExecutionPolicy::Parallel, id)
    }

    /// Remove a document with the given execution policy.
    ///
    /// Fails with `DocumentNotFound` for an unknown id and leaves the index
    /// unchanged in that case.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocumentId) -> Result<()> {
        self.store.remove(id, policy)
    }

    /// Top documents with status `ACTUAL`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, ByStatus::default())
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, ByStatus(status))
    }

    /// Top documents accepted by `predicate`.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Top documents accepted by `predicate`, ranked with the given policy.
    ///
    /// A malformed query fails as a whole with `InvalidQuery`.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let query = self.parse_query(raw_query)?;
        Ok(self.ranker.rank(&self.store, &query, &predicate, policy))
    }

    /// Plus-terms of the query found in document `id`, or none if a
    /// minus-term is found, together with the document's status.
    pub fn match_document<'q>(&self, raw_query: &'q str, id: DocumentId) -> Result<MatchResult<'q>> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Parallel form of [`match_document`](Self::match_document).
    pub fn match_document_parallel<'q>(
        &self,
        raw_query: &'q str,
        id: DocumentId,
    ) -> Result<MatchResult<'q>> {
        self.match_document_with(ExecutionPolicy::Parallel, raw_query, id)
    }

    /// Match with the given policy. Both policies return the same terms.
    pub fn match_document_with<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        id: DocumentId,
    ) -> Result<MatchResult<'q>> {
        let parser = QueryParser::new(&self.analyzer);
        match policy {
            ExecutionPolicy::Sequential => {
                let query = parser.parse(raw_query)?;
                matcher::match_sequential(&self.store, &query, id)
            }
            ExecutionPolicy::Parallel => {
                let query = parser.parse_unordered(raw_query)?;
                matcher::match_parallel(&self.store, &query, id)
            }
        }
    }

    /// Parse a query into its canonical form.
    pub fn parse_query<'q>(&self, raw_query: &'q str) -> Result<Query<'q>> {
        QueryParser::new(&self.analyzer).parse(raw_query)
    }

    /// Term frequencies of document `id`; empty if it does not exist.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.store.word_frequencies(id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl DoubleEndedIterator<Item = DocumentId> + '_ {
        self.store.ids()
    }

    /// Stored metadata of document `id`.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.store.document(id)
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.store.inverted().term_count()
    }

    /// Ids of the documents containing `term`, ascending.
    pub fn documents_containing(&self, term: &str) -> Vec<DocumentId> {
        self.store
            .inverted()
            .postings(term)
            .map(|postings| postings.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Check that the forward and inverted indexes agree.
    pub fn verify_consistency(&self) -> Result<()> {
        self.store.verify_consistency()
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = DocumentId;
    type IntoIter = Copied<btree_set::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.id_set().iter().copied()
    }
}
