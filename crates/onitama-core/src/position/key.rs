//! Exact position keys
//!
//! The transposition cache needs equality on the full game content, not on
//! a hash that may collide. A key packs the content into 121 bits:
//!
//! | bits    | content              |
//! |---------|----------------------|
//! | 0-24    | blue students        |
//! | 25-49   | blue master          |
//! | 50-74   | red students         |
//! | 75-99   | red master           |
//! | 100     | side to move (red=1) |
//! | 101-120 | five 4-bit card ids  |
//!
//! and carries the Zobrist hash of the same content for bucket selection.

use std::hash::{BuildHasherDefault, Hash, Hasher};

use crate::board::{Color, PieceType, BOARD_SQUARES};
use crate::cards::NUM_CARDS;

use super::Position;

const SIDE_SHIFT: u32 = 4 * BOARD_SQUARES as u32;
const CARDS_SHIFT: u32 = SIDE_SHIFT + 1;

/// Exact, hashable encoding of a position's content
#[derive(Clone, Copy, Debug)]
pub struct PositionKey {
    hash: u64,
    packed: u128,
}

impl PositionKey {
    /// Zobrist hash of the encoded content
    #[inline]
    pub fn zobrist(&self) -> u64 {
        self.hash
    }

    /// Packed content
    #[inline]
    pub fn packed(&self) -> u128 {
        self.packed
    }
}

impl PartialEq for PositionKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.packed == other.packed
    }
}

impl Eq for PositionKey {}

impl Hash for PositionKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Position {
    /// Encode the current content (depth and history are not included)
    pub fn key(&self) -> PositionKey {
        let mut packed = 0u128;

        for color in Color::ALL {
            for piece in PieceType::ALL {
                let board = self.boards[color.index()][piece.index()];
                let field = color.index() * PieceType::NUM + piece.index();
                packed |= (board.0 as u128) << (field * BOARD_SQUARES);
            }
        }

        packed |= (self.side_to_move.index() as u128) << SIDE_SHIFT;

        for (slot, card) in self.cards.slots().iter().enumerate() {
            packed |= (card.id() as u128) << (CARDS_SHIFT as usize + slot * 4);
        }
        debug_assert!(packed >> (CARDS_SHIFT as usize + NUM_CARDS * 4) == 0);

        PositionKey {
            hash: self.hash,
            packed,
        }
    }
}

/// Hasher that passes a pre-computed Zobrist value straight through
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyHasher(u64);

impl Hasher for KeyHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.0 = value;
    }

    fn write(&mut self, bytes: &[u8]) {
        // Only reached for non-key types; mix bytes so it still hashes.
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }
}

/// `BuildHasher` for maps keyed by [`PositionKey`]
pub type KeyBuildHasher = BuildHasherDefault<KeyHasher>;
