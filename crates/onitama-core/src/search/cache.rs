//! Transposition cache for fully explored subtrees
//!
//! An entry is reserved when a node is first entered and marked ready once
//! its whole subtree has been traversed. A probe that finds a reserved but
//! unfinished entry is a cycle in progress: the caller must not reuse it.

use std::collections::HashMap;

use crate::position::{KeyBuildHasher, PositionKey};

use super::metrics::DepthMetric;

/// Cached subtree statistics
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Metrics by ply offset from `depth`; index 0 is unused
    metrics: Box<[DepthMetric]>,
    target_depth: u8,
    depth: u8,
    stack_len: usize,
    ready: bool,
}

impl CacheEntry {
    #[inline]
    pub fn metrics(&self) -> &[DepthMetric] {
        &self.metrics
    }

    /// Target depth of the search that created the entry
    #[inline]
    pub fn target_depth(&self) -> u8 {
        self.target_depth
    }

    /// Ply at which the subtree was entered
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Traversal stack length when the entry was reserved
    #[inline]
    pub fn stack_len(&self) -> usize {
        self.stack_len
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Plies below the entry the metrics cover
    #[inline]
    fn covered_height(&self) -> u8 {
        self.target_depth.saturating_sub(self.depth)
    }
}

/// Result of a cache probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheProbe<'a> {
    /// Nothing usable; the caller may reserve the key
    Absent,
    /// Reserved by a node still on the current path
    Pending,
    /// Complete statistics, indexed by ply offset
    Ready(&'a [DepthMetric]),
}

/// Position-keyed subtree cache owned by one searcher
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<PositionKey, CacheEntry, KeyBuildHasher>,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key` for a node at `depth` in a search to `target_depth`
    ///
    /// A ready entry is usable when it covers at least the remaining
    /// `target_depth - depth` plies; within a single search that means it
    /// was created at `depth` or shallower. Ready entries covering fewer
    /// plies are reported `Absent` and get replaced on reservation.
    pub fn probe(&self, key: &PositionKey, depth: u8, target_depth: u8) -> CacheProbe<'_> {
        match self.entries.get(key) {
            None => CacheProbe::Absent,
            Some(entry) if !entry.ready => CacheProbe::Pending,
            Some(entry) if entry.covered_height() >= target_depth.saturating_sub(depth) => {
                CacheProbe::Ready(&entry.metrics)
            }
            Some(_) => CacheProbe::Absent,
        }
    }

    /// Insert a not-ready entry for a node being entered
    pub fn reserve(&mut self, key: PositionKey, target_depth: u8, depth: u8, stack_len: usize) {
        self.entries.insert(
            key,
            CacheEntry {
                metrics: Box::default(),
                target_depth,
                depth,
                stack_len,
                ready: false,
            },
        );
    }

    /// Attach the finished subtree metrics and mark the entry ready
    pub fn complete(&mut self, key: &PositionKey, metrics: Box<[DepthMetric]>) {
        if let Some(entry) = self.entries.get_mut(key) {
            debug_assert!(!entry.ready, "completing an entry that is already ready");
            entry.metrics = metrics;
            entry.ready = true;
        } else {
            debug_assert!(false, "completing an entry that was never reserved");
        }
    }

    pub fn get(&self, key: &PositionKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
