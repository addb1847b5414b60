//! Basic types for the Onitama board
//!
//! This module contains the fundamental types Square, PieceType and Color.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board width and height
pub const BOARD_SIZE: u8 = 5;

/// Number of squares on the board
pub const BOARD_SQUARES: usize = 25;

/// Square text that is not a board coordinate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square '{0}'")]
pub struct SquareError(pub String);

/// Square on the board (0-24)
///
/// Index is `row * 5 + col`. Row 0 is Blue's home row and row 4 is Red's.
/// In text form columns are `a`-`e` and rows `1`-`5`, so Blue's master
/// starts on `c1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    /// Create square from column and row
    #[inline]
    pub const fn new(col: u8, row: u8) -> Self {
        debug_assert!(col < BOARD_SIZE && row < BOARD_SIZE);
        Square(row * BOARD_SIZE + col)
    }

    /// Column (0-4, a-e)
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Row (0-4, 1-5)
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Get index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Square reached by moving `(dx, dy)`, or `None` when it leaves the board
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let col = self.col() as i8 + dx;
        let row = self.row() as i8 + dy;
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&col) && (0..size).contains(&row) {
            Some(Square::new(col as u8, row as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError(s.to_string()));
        }
        let col = bytes[0].wrapping_sub(b'a');
        let row = bytes[1].wrapping_sub(b'1');
        if col >= BOARD_SIZE || row >= BOARD_SIZE {
            return Err(SquareError(s.to_string()));
        }
        Ok(Square::new(col, row))
    }
}

/// Player color
///
/// Blue sits on row 0 and moves first from the standard setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[default]
    Blue = 0,
    Red = 1,
}

impl Color {
    /// Number of colors
    pub const NUM: usize = 2;

    /// All colors in index order
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    /// Get the opposite color
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Use as array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Home row of this color
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Blue => 0,
            Color::Red => BOARD_SIZE - 1,
        }
    }

    /// Temple square (where this color's master starts)
    ///
    /// The opposing master wins by stepping onto it.
    #[inline]
    pub const fn temple(self) -> Square {
        Square::new(2, self.home_row())
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opposite()
    }
}

/// Piece type
///
/// The discriminants are the friendly/hostile indices used by the move
/// action tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    Student = 0,
    Master = 1,
}

impl PieceType {
    /// Number of piece types
    pub const NUM: usize = 2;

    /// All piece types in index order
    pub const ALL: [PieceType; 2] = [PieceType::Student, PieceType::Master];

    /// Use as array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert from index (0 = student, anything else = master)
    #[inline]
    pub const fn from_index(index: usize) -> PieceType {
        if index == 0 {
            PieceType::Student
        } else {
            PieceType::Master
        }
    }
}
