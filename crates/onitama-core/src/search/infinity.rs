//! Infinity-branch detection
//!
//! Onitama has no repetition rule, so a line that returns to an earlier
//! position can be played forever. This searcher walks the tree with the
//! same explicit stack as the exhaustive search, without caching or metrics,
//! and reports every path whose last position repeats an ancestor.

use std::time::{Duration, Instant};

use crate::cards::CardConfig;
use crate::moves::Move;
use crate::position::{Position, PositionKey, MAX_DEPTH};

use super::error::SearchError;
use super::stack::{Frame, TraversalStack};
use super::types::{InfinityResult, TraversalStats};

/// Shortest repetition that can exist: two moves per side
pub const MIN_CYCLE_DEPTH: u8 = 4;

/// Cycle searcher
pub struct InfinitySearcher {
    pos: Position,
    stack: TraversalStack,
    /// Keys of the root and every position on the current path
    path_keys: Vec<PositionKey>,
    paths: Vec<Vec<Move>>,
    stats: TraversalStats,
    target: u8,
    limit_hits: usize,
}

impl InfinitySearcher {
    /// Searcher over the standard starting position
    pub fn new(cards: CardConfig) -> Self {
        Self::with_position(Position::new(cards))
    }

    /// Searcher over a prepared depth-0 position
    pub fn with_position(pos: Position) -> Self {
        Self {
            pos,
            stack: TraversalStack::with_capacity(256),
            path_keys: Vec::with_capacity(MAX_DEPTH + 1),
            paths: Vec::new(),
            stats: TraversalStats::default(),
            target: 0,
            limit_hits: 0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Collect up to `limit_hits` cycle paths (0 = no limit) no longer than
    /// `target_depth`
    pub fn search(
        &mut self,
        target_depth: u8,
        limit_hits: usize,
    ) -> Result<InfinityResult, SearchError> {
        if target_depth as usize > MAX_DEPTH {
            return Err(SearchError::DepthOutOfRange(target_depth));
        }
        if self.pos.depth() != 0 {
            return Err(SearchError::NotAtRoot(self.pos.depth()));
        }
        if target_depth < MIN_CYCLE_DEPTH {
            return Ok(InfinityResult {
                elapsed: Duration::ZERO,
                ..InfinityResult::default()
            });
        }

        let start = Instant::now();
        self.target = target_depth;
        self.limit_hits = limit_hits;
        self.stack.clear();
        self.paths.clear();
        self.stats = TraversalStats::default();
        self.path_keys.clear();
        self.path_keys.push(self.pos.key());

        log::debug!(
            "infinity search: depth={} limit={} cards={}",
            target_depth,
            limit_hits,
            self.pos.cards()
        );

        self.pos.generate_moves();
        self.stack.push_children(self.pos.moves());
        self.run();

        debug_assert_eq!(self.pos.depth(), 0);
        debug_assert_eq!(self.stats.applied, self.stats.undone);

        let result = InfinityResult {
            paths: std::mem::take(&mut self.paths),
            elapsed: start.elapsed(),
            stats: self.stats,
        };

        log::debug!(
            "infinity search finished: paths={} applied={} elapsed={:?}",
            result.paths.len(),
            result.stats.applied,
            result.elapsed
        );

        Ok(result)
    }

    fn run(&mut self) {
        loop {
            match self.stack.pop() {
                Frame::Descend => {
                    if self.stack.is_empty() {
                        return;
                    }
                    self.retreat();
                }
                Frame::Play(mv) => {
                    self.pos.apply_move(mv);
                    self.stats.applied += 1;

                    if self.check_repetition() && self.limit_reached() {
                        self.unwind();
                        return;
                    }

                    if self.pos.depth() >= self.target {
                        self.retreat();
                    } else {
                        self.pos.generate_moves();
                        self.stack.push_children(self.pos.moves());
                    }
                }
            }
        }
    }

    /// Compare the new position with the ancestors that have the same side
    /// to move, record the path on a match, and push the key
    fn check_repetition(&mut self) -> bool {
        let key = self.pos.key();
        let repeated = self
            .path_keys
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .any(|ancestor| *ancestor == key);
        self.path_keys.push(key);

        if repeated {
            let path = self.pos.move_history().to_vec();
            log::trace!(
                "cycle at depth {}: {}",
                path.len(),
                path.iter().map(|mv| mv.to_string()).collect::<Vec<_>>().join(" ")
            );
            self.paths.push(path);
        }
        repeated
    }

    #[inline]
    fn limit_reached(&self) -> bool {
        self.limit_hits != 0 && self.paths.len() >= self.limit_hits
    }

    fn retreat(&mut self) {
        self.path_keys.pop();
        self.pos.undo_move();
        self.stats.undone += 1;
    }

    /// Back out to the root and drop pending frames
    fn unwind(&mut self) {
        while self.pos.depth() > 0 {
            self.retreat();
        }
        self.stack.clear();
    }
}

/// Cycle search from the standard starting position
pub fn search_infinity_paths(
    cards: &CardConfig,
    target_depth: u8,
    limit_hits: usize,
) -> Result<InfinityResult, SearchError> {
    InfinitySearcher::new(*cards).search(target_depth, limit_hits)
}
