//! Position module
//!
//! This module manages the complete game state: bitboards, side to move,
//! card slots and the history of applied moves. Moves are applied and undone
//! in place; nothing is copied during a traversal.
//!
//! ## Module Structure
//! - `core` - Position struct and basic methods
//! - `moves` - Move application and undo
//! - `movegen` - Legal move generation
//! - `zobrist` - Zobrist hashing for position identification
//! - `key` - Exact position keys for the transposition cache
//! - `perft` - Recursive node counting

// Private modules
mod core;
mod key;
mod movegen;
mod moves;
mod perft;
mod zobrist;


pub use self::core::{Position, MAX_DEPTH};
pub use self::key::{KeyBuildHasher, KeyHasher, PositionKey};
pub use self::zobrist::{ZobristTable, ZOBRIST};
