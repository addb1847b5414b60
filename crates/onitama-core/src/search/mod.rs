//! Game-tree search
//!
//! - `exhaustive` - full traversal with optional subtree cache and metrics
//! - `infinity` - repeated-position (cycle) detection
//! - `stack` - explicit traversal stack shared by both
//! - `cache` - tri-state transposition cache
//! - `metrics` - per-depth move statistics

mod cache;
mod config;
mod error;
mod exhaustive;
mod infinity;
mod metrics;
mod stack;
mod types;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, CacheProbe, TranspositionCache};
pub use config::{ConfigError, SearchConfig, CACHEABLE_SUBTREE_MIN_HEIGHT};
pub use error::{SearchError, SearchResult};
pub use exhaustive::{search_exhaustive, search_exhaustive_from, ExhaustiveSearcher};
pub use infinity::{search_infinity_paths, InfinitySearcher, MIN_CYCLE_DEPTH};
pub use metrics::DepthMetric;
pub use stack::{Frame, TraversalStack};
pub use types::{ExhaustiveResult, InfinityResult, TraversalStats};
