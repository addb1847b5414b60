//! # onitama-core
//!
//! Exhaustive game-tree analysis core for Onitama.
//!
//! ## Module layout
//!
//! - `board`: squares, colors, piece types and 25-square bitboards
//! - `cards`: movement cards, card configurations and target tables
//! - `moves`: 16-bit move encoding with the 3-bit action tag
//! - `position`: reversible position state (apply/undo, move generation, keys)
//! - `search`: explicit-stack traversal, transposition cache, metrics and
//!   infinity-branch detection
//!

pub mod board;
pub mod cards;
pub mod moves;
pub mod position;
pub mod search;

pub use board::{Bitboard, Color, PieceType, Square, SquareError};
pub use cards::{Card, CardConfig, CardError};
pub use moves::{ActionTag, Move, MoveVec};
pub use position::{Position, PositionKey, MAX_DEPTH};
pub use search::{
    search_exhaustive, search_exhaustive_from, search_infinity_paths, ConfigError, DepthMetric,
    ExhaustiveResult, ExhaustiveSearcher, InfinityResult, InfinitySearcher, SearchConfig,
    SearchError, TraversalStats,
};
