//! Board representation
//!
//! - `Bitboard`: 25 squares packed into the low bits of a `u32`
//! - `Square`: `row * 5 + col`, row 0 is Blue's home row
//! - `Color`, `PieceType`: the two players and the two piece kinds

mod bitboard;
mod types;

pub use bitboard::{Bitboard, BitboardIter};
pub use types::{Color, PieceType, Square, SquareError, BOARD_SIZE, BOARD_SQUARES};
