//! Document identity, status, stored metadata and ranked results.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Identifier of a document. Valid ids are non-negative.
pub type DocumentId = i64;

/// Default tolerance below which two relevance values are considered equal.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Caller-assigned status of a document. The engine never changes it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

/// Metadata stored for every live document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentData {
    /// Raw text as given to `add_document`.
    pub text: String,
    pub status: DocumentStatus,
    /// Floor of the mean of the caller's ratings.
    pub rating: i32,
}

/// A ranked search result.
///
/// Equality treats relevance values closer than [`RELEVANCE_EPSILON`] as equal,
/// so results computed through different accumulation orders compare equal.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.rating == other.rating
            && (self.relevance - other.relevance).abs() < RELEVANCE_EPSILON
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Compute the floor of the arithmetic mean of `ratings`, or 0 when empty.
///
/// The sum is taken in 64 bits so long rating lists cannot overflow.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // The mean of i32 values always fits back into i32.
    sum.div_euclid(ratings.len() as i64) as i32
}
