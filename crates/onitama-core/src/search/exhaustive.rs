//! Exhaustive tree traversal with compile-time feature configuration
//!
//! Every node down to the target depth is visited through an explicit
//! stack. Caching and metric collection are const generic switches, so a
//! disabled feature costs nothing on the hot path.

use std::time::{Duration, Instant};

use crate::cards::CardConfig;
use crate::moves::Move;
use crate::position::{Position, PositionKey, MAX_DEPTH};

use super::cache::{CacheProbe, TranspositionCache};
use super::config::SearchConfig;
use super::error::SearchError;
use super::metrics::{metric_row, DepthMetric};
use super::stack::{Frame, TraversalStack};
use super::types::{ExhaustiveResult, TraversalStats};

/// A cached node whose subtree is still being traversed
struct OpenEntry {
    key: PositionKey,
    depth: u8,
    /// Metrics by ply offset from `depth`
    metrics: Vec<DepthMetric>,
}

/// Exhaustive searcher
///
/// # Type Parameters
/// - `USE_CACHE`: memoize subtrees in a [`TranspositionCache`]
/// - `USE_METRICS`: collect [`DepthMetric`]s per depth
///
/// ```
/// use onitama_core::{Card, CardConfig, ExhaustiveSearcher, SearchConfig};
///
/// let cards = CardConfig::new([Card::Tiger, Card::Crab], [Card::Monkey, Card::Crane], Card::Dragon);
/// let mut searcher = ExhaustiveSearcher::<true, true>::new(cards, SearchConfig::default());
/// let result = searcher.search(2).unwrap();
/// assert_eq!(result.metrics[1].generated_moves, 10);
/// ```
pub struct ExhaustiveSearcher<const USE_CACHE: bool = true, const USE_METRICS: bool = true> {
    pos: Position,
    config: SearchConfig,
    stack: TraversalStack,
    cache: TranspositionCache,
    /// Reserved cache entries on the current path, innermost last
    open: Vec<OpenEntry>,
    metrics: Vec<DepthMetric>,
    win_paths: Vec<Vec<Move>>,
    stats: TraversalStats,
    target: u8,
    min_height: u8,
}

impl<const USE_CACHE: bool, const USE_METRICS: bool> ExhaustiveSearcher<USE_CACHE, USE_METRICS> {
    /// Searcher over the standard starting position
    pub fn new(cards: CardConfig, config: SearchConfig) -> Self {
        Self::with_position(Position::new(cards), config)
    }

    /// Searcher over a prepared depth-0 position
    pub fn with_position(pos: Position, config: SearchConfig) -> Self {
        Self {
            pos,
            config,
            stack: TraversalStack::with_capacity(256),
            cache: TranspositionCache::new(),
            open: Vec::new(),
            metrics: Vec::new(),
            win_paths: Vec::new(),
            stats: TraversalStats::default(),
            target: 0,
            min_height: config.effective_min_height(),
        }
    }

    /// Root position
    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Subtree cache; it persists across calls to [`Self::search`]
    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Visit every node down to `target_depth`
    pub fn search(&mut self, target_depth: u8) -> Result<ExhaustiveResult, SearchError> {
        if target_depth as usize > MAX_DEPTH {
            return Err(SearchError::DepthOutOfRange(target_depth));
        }
        if self.pos.depth() != 0 {
            return Err(SearchError::NotAtRoot(self.pos.depth()));
        }
        if target_depth == 0 {
            return Ok(ExhaustiveResult {
                elapsed: Duration::ZERO,
                ..ExhaustiveResult::default()
            });
        }

        let start = Instant::now();
        self.reset(target_depth);

        log::debug!(
            "exhaustive search: depth={} cards={} cache={} metrics={} min_height={} prune_on_win={}",
            target_depth,
            self.pos.cards(),
            USE_CACHE,
            USE_METRICS,
            self.min_height,
            self.config.prune_on_win
        );

        if self.expand_root() {
            self.run();
        }

        debug_assert_eq!(self.pos.depth(), 0);
        debug_assert!(self.open.is_empty());
        debug_assert_eq!(self.stats.applied, self.stats.undone);

        let result = ExhaustiveResult {
            metrics: std::mem::take(&mut self.metrics),
            win_paths: std::mem::take(&mut self.win_paths),
            elapsed: start.elapsed(),
            stats: self.stats,
        };

        log::debug!(
            "exhaustive search finished: applied={} win_paths={} cache_hits={} pending={} reserved={} elapsed={:?}",
            result.stats.applied,
            result.win_paths.len(),
            result.stats.cache_hits,
            result.stats.cache_pending,
            result.stats.cache_reserved,
            result.elapsed
        );

        Ok(result)
    }

    fn reset(&mut self, target_depth: u8) {
        self.target = target_depth;
        self.stack.clear();
        self.open.clear();
        self.win_paths.clear();
        self.stats = TraversalStats::default();
        self.metrics = if USE_METRICS {
            metric_row(0, self.pos.side_to_move(), target_depth as usize + 1)
        } else {
            Vec::new()
        };
    }

    /// Record the root's moves; returns whether there is anything to traverse
    fn expand_root(&mut self) -> bool {
        self.pos.generate_moves();
        let any_win = self.record_node();

        if self.target == 1 || (self.config.prune_on_win && any_win) {
            return false;
        }
        self.stack.push_children(self.pos.moves());
        true
    }

    fn run(&mut self) {
        loop {
            match self.stack.pop() {
                Frame::Descend => {
                    if self.stack.is_empty() {
                        break;
                    }
                    self.retreat();
                }
                Frame::Play(mv) => {
                    self.pos.apply_move(mv);
                    self.stats.applied += 1;
                    self.visit();
                }
            }
        }
    }

    /// Handle a freshly entered node
    fn visit(&mut self) {
        if USE_CACHE {
            let depth = self.pos.depth();
            let remaining = self.target - depth;
            if remaining >= self.min_height {
                let key = self.pos.key();
                match self.cache.probe(&key, depth, self.target) {
                    CacheProbe::Ready(cached) => {
                        if USE_METRICS {
                            for i in 1..=remaining as usize {
                                let metric = &cached[i];
                                self.metrics[depth as usize + i].increment(metric);
                                if let Some(open) = self.open.last_mut() {
                                    open.metrics[(depth - open.depth) as usize + i]
                                        .increment(metric);
                                }
                            }
                        }
                        self.stats.cache_hits += 1;
                        log::trace!("cache hit at depth {depth}: {:016x}", key.zobrist());
                        self.retreat();
                        return;
                    }
                    CacheProbe::Pending => {
                        // Cycle in progress: explore it live
                        self.stats.cache_pending += 1;
                    }
                    CacheProbe::Absent => {
                        self.cache.reserve(key, self.target, depth, self.stack.len());
                        let metrics = if USE_METRICS {
                            metric_row(depth, self.pos.side_to_move(), remaining as usize + 1)
                        } else {
                            Vec::new()
                        };
                        self.open.push(OpenEntry {
                            key,
                            depth,
                            metrics,
                        });
                        self.stats.cache_reserved += 1;
                    }
                }
            }
        }

        self.expand();
    }

    /// Generate children and either push them or back out
    fn expand(&mut self) {
        self.pos.generate_moves();
        let any_win = self.record_node();
        let child_depth = self.pos.depth() + 1;

        if child_depth >= self.target || (self.config.prune_on_win && any_win) {
            self.retreat();
            return;
        }
        self.stack.push_children(self.pos.moves());
    }

    /// Fold the current node's generated moves into metrics and win paths
    ///
    /// Returns whether any of the moves wins.
    fn record_node(&mut self) -> bool {
        let moves = self.pos.moves();
        let child_depth = self.pos.depth() + 1;

        if USE_METRICS {
            let metric = DepthMetric::from_moves(child_depth, self.pos.side_to_move(), moves);
            self.metrics[child_depth as usize].increment(&metric);
            if USE_CACHE {
                if let Some(open) = self.open.last_mut() {
                    open.metrics[(child_depth - open.depth) as usize].increment(&metric);
                }
            }
        }

        let mut any_win = false;
        for &mv in moves.iter().filter(|mv| mv.is_win()) {
            any_win = true;
            let history = self.pos.move_history();
            let mut path = Vec::with_capacity(history.len() + 1);
            path.extend_from_slice(history);
            path.push(mv);
            self.win_paths.push(path);
        }
        any_win
    }

    /// Undo the current node, completing its cache entry if it owns one
    fn retreat(&mut self) {
        if USE_CACHE {
            let depth = self.pos.depth();
            if matches!(self.open.last(), Some(open) if open.depth == depth) {
                if let Some(done) = self.open.pop() {
                    if USE_METRICS {
                        if let Some(parent) = self.open.last_mut() {
                            let offset = (done.depth - parent.depth) as usize;
                            for (i, metric) in done.metrics.iter().enumerate().skip(1) {
                                parent.metrics[offset + i].increment(metric);
                            }
                        }
                    }
                    self.cache.complete(&done.key, done.metrics.into_boxed_slice());
                }
            }
        }

        self.pos.undo_move();
        self.stats.undone += 1;
    }
}

/// Exhaustive search from the standard starting position
///
/// `config.enable_caching` and `config.enable_metrics` pick one of the four
/// searcher instantiations.
pub fn search_exhaustive(
    cards: &CardConfig,
    target_depth: u8,
    config: &SearchConfig,
) -> Result<ExhaustiveResult, SearchError> {
    search_exhaustive_from(Position::new(*cards), target_depth, config)
}

/// Exhaustive search from a prepared depth-0 position
pub fn search_exhaustive_from(
    pos: Position,
    target_depth: u8,
    config: &SearchConfig,
) -> Result<ExhaustiveResult, SearchError> {
    let config = *config;
    match (config.enable_caching, config.enable_metrics) {
        (true, true) => {
            ExhaustiveSearcher::<true, true>::with_position(pos, config).search(target_depth)
        }
        (true, false) => {
            ExhaustiveSearcher::<true, false>::with_position(pos, config).search(target_depth)
        }
        (false, true) => {
            ExhaustiveSearcher::<false, true>::with_position(pos, config).search(target_depth)
        }
        (false, false) => {
            ExhaustiveSearcher::<false, false>::with_position(pos, config).search(target_depth)
        }
    }
}
