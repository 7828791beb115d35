//! Configuration for the search engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::RELEVANCE_EPSILON;
use crate::error::{HalberdError, Result};

/// Default number of results returned by a top-documents query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Configuration for [`SearchEngine`](crate::engine::SearchEngine).
///
/// All settings are fixed once the engine is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Space-delimited stop words, excluded from indexing and queries.
    pub stop_words: String,

    /// Maximum number of results returned by a top-documents query.
    pub max_results: usize,

    /// Relevance difference below which two results are ordered by rating.
    pub relevance_epsilon: f64,

    /// Number of independently locked shards in the inverted index and in
    /// the parallel relevance accumulator.
    pub shard_count: usize,

    /// Whether documents without any indexable term are accepted.
    pub allow_empty_documents: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stop_words: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            relevance_epsilon: RELEVANCE_EPSILON,
            shard_count: num_cpus::get() * 4,
            allow_empty_documents: true,
        }
    }
}

impl EngineConfig {
    /// Create a default configuration with the given stop words.
    pub fn new<S: Into<String>>(stop_words: S) -> Self {
        Self {
            stop_words: stop_words.into(),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the stop words.
    pub fn with_stop_words<S: Into<String>>(mut self, stop_words: S) -> Self {
        self.stop_words = stop_words.into();
        self
    }

    /// Set the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the relevance tie tolerance.
    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    /// Set the shard count.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Set whether empty documents are accepted.
    pub fn with_allow_empty_documents(mut self, allow: bool) -> Self {
        self.allow_empty_documents = allow;
        self
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(HalberdError::invalid_config("shard_count must be positive"));
        }
        if self.max_results == 0 {
            return Err(HalberdError::invalid_config("max_results must be positive"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(HalberdError::invalid_config(
                "relevance_epsilon must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}
