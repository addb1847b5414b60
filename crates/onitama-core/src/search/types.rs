//! Search result types

use std::time::Duration;

use serde::Serialize;

use crate::moves::Move;

use super::metrics::DepthMetric;

/// Traversal counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Moves applied
    pub applied: u64,
    /// Moves undone
    pub undone: u64,
    /// Subtrees answered from the cache
    pub cache_hits: u64,
    /// Revisits of a subtree still being explored
    pub cache_pending: u64,
    /// Cache entries reserved
    pub cache_reserved: u64,
}

/// Exhaustive search result
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExhaustiveResult {
    /// Per-depth totals, index = depth, index 0 unused
    pub metrics: Vec<DepthMetric>,
    /// Every winning line, root move first
    pub win_paths: Vec<Vec<Move>>,
    pub elapsed: Duration,
    pub stats: TraversalStats,
}

impl ExhaustiveResult {
    /// Total moves generated over all depths
    pub fn total_generated(&self) -> u64 {
        self.metrics.iter().skip(1).map(|m| m.generated_moves).sum()
    }
}

/// Infinity-branch search result
#[derive(Clone, Debug, Default, Serialize)]
pub struct InfinityResult {
    /// Move paths from the root ending in a repeated position
    pub paths: Vec<Vec<Move>>,
    pub elapsed: Duration,
    pub stats: TraversalStats,
}
