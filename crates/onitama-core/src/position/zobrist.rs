//! Zobrist hashing for position identification
//!
//! Provides fast incremental hash computation for the transposition cache
//! and cycle detection. The hash covers boards, side to move and card slots;
//! depth and history are not part of it.

use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Color, PieceType, Square, BOARD_SQUARES};
use crate::cards::{Card, NUM_CARDS};

use super::Position;

/// Zobrist hash tables
pub struct ZobristTable {
    /// Hash values for pieces on squares \[color\]\[piece_type\]\[square\]
    pub piece_square: [[[u64; BOARD_SQUARES]; PieceType::NUM]; Color::NUM],

    /// Hash values for cards in slots \[slot\]\[card\]
    pub card_slot: [[u64; Card::NUM]; NUM_CARDS],

    /// Hash value for side to move (Red)
    pub side_to_move: u64,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristTable {
    /// Create new Zobrist table with random values
    pub fn new() -> Self {
        // Use fixed seed for reproducibility
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x0A1D_7A3A_5EED_2024);

        let mut table = ZobristTable {
            piece_square: [[[0; BOARD_SQUARES]; PieceType::NUM]; Color::NUM],
            card_slot: [[0; Card::NUM]; NUM_CARDS],
            side_to_move: rng.random(),
        };

        for color in 0..Color::NUM {
            for piece in 0..PieceType::NUM {
                for sq in 0..BOARD_SQUARES {
                    table.piece_square[color][piece][sq] = rng.random();
                }
            }
        }

        for slot in 0..NUM_CARDS {
            for card in 0..Card::NUM {
                table.card_slot[slot][card] = rng.random();
            }
        }

        table
    }

    /// Get hash value for a piece on a square
    #[inline]
    pub fn piece_square_hash(&self, color: Color, piece_index: usize, sq: Square) -> u64 {
        self.piece_square[color.index()][piece_index][sq.index()]
    }

    /// Get hash value for a card in a slot
    #[inline]
    pub fn card_hash(&self, slot: usize, card: Card) -> u64 {
        self.card_slot[slot][card.index()]
    }

    /// Get hash value for side to move
    #[inline]
    pub fn side_hash(&self, color: Color) -> u64 {
        match color {
            Color::Blue => 0,
            Color::Red => self.side_to_move,
        }
    }
}

// Global Zobrist table instance
lazy_static! {
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

impl Position {
    /// Compute Zobrist hash from scratch
    pub fn compute_hash(&self) -> u64 {
        let mut hash = ZOBRIST.side_hash(self.side_to_move);

        for color in Color::ALL {
            for piece in PieceType::ALL {
                for sq in self.boards[color.index()][piece.index()] {
                    hash ^= ZOBRIST.piece_square_hash(color, piece.index(), sq);
                }
            }
        }

        for (slot, &card) in self.cards.slots().iter().enumerate() {
            hash ^= ZOBRIST.card_hash(slot, card);
        }

        hash
    }
}
