//! Move representation and utilities
//!
//! A move is packed into 16 bits:
//! - bits 0-5: source square (0-24)
//! - bits 6-11: destination square (0-24)
//! - bits 12-14: action tag (moved piece, capture, win)
//! - bit 15: card slot (which of the two hand cards was used)
//!
//! The win flag is bit 0 of the action tag, so `Move::WIN_MASK` tests it on
//! the raw value without decoding.

use crate::board::{PieceType, Square};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Move list for one node
///
/// Five pieces, two cards and at most four offsets per card bound a node to
/// 40 moves. The inline capacity is the next size smallvec supports, so the
/// list never spills to the heap.
pub type MoveVec = SmallVec<[Move; 64]>;

/// 3-bit action tag
///
/// | tag | b2 b1 b0 | moved   | captured | win  |
/// |-----|----------|---------|----------|------|
/// | 0   | 000      | student | student  | no   |
/// | 1   | 001      | student | master   | yes  |
/// | 2   | 010      | master  | student  | no   |
/// | 3   | 011      | master  | master   | yes  |
/// | 4   | 100      | student | none     | no   |
/// | 5   | 101      | student | none     | yes  |
/// | 6   | 110      | master  | none     | no   |
/// | 7   | 111      | master  | none     | yes  |
///
/// Tag 5 is never produced by move generation: a student cannot take the
/// temple. It still decodes as listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionTag(u8);

impl ActionTag {
    /// Hostile index reported when nothing was captured
    pub const NO_CAPTURE: usize = 2;

    const WIN_BIT: u8 = 0b001;
    const MASTER_BIT: u8 = 0b010;
    const NO_CAPTURE_BIT: u8 = 0b100;

    /// Create from a raw 3-bit value
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        debug_assert!(bits < 8);
        ActionTag(bits & 0b111)
    }

    /// Raw 3-bit value
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build the tag for a generated move
    ///
    /// `temple` is set when a master lands on the opposing temple. When that
    /// square also holds a student the capture wins the encoding: the tag
    /// table has no code for "student captured and temple taken", and the
    /// captured student has to be restored on undo.
    #[inline]
    pub fn classify(moved: PieceType, captured: Option<PieceType>, temple: bool) -> Self {
        let mut bits = (moved as u8) << 1;
        match captured {
            Some(piece) => bits |= piece as u8,
            None => {
                bits |= Self::NO_CAPTURE_BIT;
                if temple {
                    bits |= Self::WIN_BIT;
                }
            }
        }
        ActionTag(bits)
    }

    /// Index of the piece type that moved (0 = student, 1 = master)
    #[inline]
    pub const fn friendly_index(self) -> usize {
        ((self.0 & Self::MASTER_BIT) >> 1) as usize
    }

    /// Index of the captured piece type (0 = student, 1 = master), or
    /// [`ActionTag::NO_CAPTURE`]
    #[inline]
    pub const fn hostile_index(self) -> usize {
        if self.0 & Self::NO_CAPTURE_BIT != 0 {
            Self::NO_CAPTURE
        } else {
            (self.0 & 1) as usize
        }
    }

    /// A master was captured or the opposing temple was taken
    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 & Self::WIN_BIT != 0
    }

    /// A hostile piece was removed from the board
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & Self::NO_CAPTURE_BIT == 0
    }

    /// Piece type that moved
    #[inline]
    pub const fn moved_piece(self) -> PieceType {
        PieceType::from_index(self.friendly_index())
    }

    /// Piece type that was captured
    #[inline]
    pub const fn captured_piece(self) -> Option<PieceType> {
        if self.is_capture() {
            Some(PieceType::from_index(self.hostile_index()))
        } else {
            None
        }
    }
}

/// Move representation
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move {
    data: u16,
}

impl Default for Move {
    /// Returns the null move
    #[inline]
    fn default() -> Self {
        Self::NULL
    }
}

impl Move {
    /// Null move
    ///
    /// All-zero: a student "capturing" a student on its own square. Move
    /// generation never produces it.
    pub const NULL: Self = Move { data: 0 };

    const SQUARE_MASK: u16 = 0x3F;
    const TO_SHIFT: u16 = 6;
    const TAG_SHIFT: u16 = 12;
    const CARD_SHIFT: u16 = 15;

    /// Mask of the win bit (action tag bit 0)
    pub const WIN_MASK: u16 = 1 << Self::TAG_SHIFT;

    /// Pack a move
    #[inline]
    pub fn new(from: Square, to: Square, tag: ActionTag, card_slot: u8) -> Self {
        debug_assert!(from.index() < 25 && to.index() < 25);
        debug_assert!(card_slot < 2);
        let mut data = from.0 as u16;
        data |= (to.0 as u16) << Self::TO_SHIFT;
        data |= (tag.bits() as u16) << Self::TAG_SHIFT;
        data |= ((card_slot & 1) as u16) << Self::CARD_SHIFT;
        Move { data }
    }

    /// Check if this is the null move
    #[inline]
    pub const fn is_null(self) -> bool {
        self.data == 0
    }

    /// Source square
    #[inline]
    pub const fn from(self) -> Square {
        Square((self.data & Self::SQUARE_MASK) as u8)
    }

    /// Destination square
    #[inline]
    pub const fn to(self) -> Square {
        Square(((self.data >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    /// Action tag
    #[inline]
    pub const fn tag(self) -> ActionTag {
        ActionTag(((self.data >> Self::TAG_SHIFT) & 0b111) as u8)
    }

    /// Hand slot of the card that was used (0 or 1)
    #[inline]
    pub const fn card_slot(self) -> u8 {
        (self.data >> Self::CARD_SHIFT) as u8
    }

    /// Win test on the raw encoding
    #[inline]
    pub const fn is_win(self) -> bool {
        self.data & Self::WIN_MASK != 0
    }

    /// Source equals destination: the player could not move and only
    /// exchanged a card
    #[inline]
    pub const fn is_pass(self) -> bool {
        let from = self.data & Self::SQUARE_MASK;
        let to = (self.data >> Self::TO_SHIFT) & Self::SQUARE_MASK;
        !self.is_null() && from == to
    }

    /// Convert to u16 for storage
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self.data
    }

    /// Create from u16
    #[inline]
    pub const fn from_u16(data: u16) -> Self {
        Move { data }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if self.is_win() {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} tag={} card={})", self.tag().bits(), self.card_slot())
    }
}
