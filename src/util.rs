//! Utility modules: the sharded concurrent map and scope timing.

pub mod concurrent_map;
pub mod log_duration;

pub use concurrent_map::{ShardHash, ShardedMap};
pub use log_duration::LogDuration;
