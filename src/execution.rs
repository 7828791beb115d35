//! Execution strategy shared by removal, matching and ranking.

use serde::{Deserialize, Serialize};

/// How an operation schedules its internal work.
///
/// Both strategies produce the same observable result; they differ only in
/// whether per-term work is spread across the rayon thread pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    /// Both policies, for running the same check under each.
    pub const ALL: [ExecutionPolicy; 2] = [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel];

    pub fn is_parallel(self) -> bool {
        self == ExecutionPolicy::Parallel
    }
}
