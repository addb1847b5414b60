//! Movement cards and card configurations
//!
//! Each card is a list of `(dx, dy)` offsets seen from Blue's side of the
//! board (`dy > 0` moves towards Red, `dx > 0` towards Blue's right). Red
//! plays the same card rotated by 180 degrees.
//!
//! Destination bitboards for every (card, color, square) are pre-computed
//! once so move generation is a table lookup.

use crate::board::{Bitboard, Color, Square, BOARD_SQUARES};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of cards in play (two per player plus the side card)
pub const NUM_CARDS: usize = 5;

/// Slot index of the side card inside a [`CardConfig`]
pub const SIDE_SLOT: usize = 4;

/// Errors raised while building cards or card configurations from input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown card '{0}'")]
    UnknownCard(String),

    #[error("a card configuration needs exactly 5 cards, got {0}")]
    WrongCount(usize),
}

/// Movement card of the base game deck
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Card {
    Tiger = 0,
    Crab,
    Monkey,
    Crane,
    Dragon,
    Elephant,
    Mantis,
    Boar,
    Frog,
    Goose,
    Horse,
    Eel,
    Rabbit,
    Rooster,
    Ox,
    Cobra,
}

impl Card {
    /// Number of distinct cards
    pub const NUM: usize = 16;

    /// All cards in id order
    pub const ALL: [Card; Card::NUM] = [
        Card::Tiger,
        Card::Crab,
        Card::Monkey,
        Card::Crane,
        Card::Dragon,
        Card::Elephant,
        Card::Mantis,
        Card::Boar,
        Card::Frog,
        Card::Goose,
        Card::Horse,
        Card::Eel,
        Card::Rabbit,
        Card::Rooster,
        Card::Ox,
        Card::Cobra,
    ];

    /// Card id (0-15), fits in 4 bits
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Use as array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case card name
    pub const fn name(self) -> &'static str {
        match self {
            Card::Tiger => "tiger",
            Card::Crab => "crab",
            Card::Monkey => "monkey",
            Card::Crane => "crane",
            Card::Dragon => "dragon",
            Card::Elephant => "elephant",
            Card::Mantis => "mantis",
            Card::Boar => "boar",
            Card::Frog => "frog",
            Card::Goose => "goose",
            Card::Horse => "horse",
            Card::Eel => "eel",
            Card::Rabbit => "rabbit",
            Card::Rooster => "rooster",
            Card::Ox => "ox",
            Card::Cobra => "cobra",
        }
    }

    /// Movement offsets `(dx, dy)` from Blue's point of view
    pub const fn offsets(self) -> &'static [(i8, i8)] {
        match self {
            Card::Tiger => &[(0, 2), (0, -1)],
            Card::Crab => &[(0, 1), (-2, 0), (2, 0)],
            Card::Monkey => &[(-1, 1), (1, 1), (-1, -1), (1, -1)],
            Card::Crane => &[(0, 1), (-1, -1), (1, -1)],
            Card::Dragon => &[(-2, 1), (2, 1), (-1, -1), (1, -1)],
            Card::Elephant => &[(-1, 1), (1, 1), (-1, 0), (1, 0)],
            Card::Mantis => &[(-1, 1), (1, 1), (0, -1)],
            Card::Boar => &[(0, 1), (-1, 0), (1, 0)],
            Card::Frog => &[(-1, 1), (-2, 0), (1, -1)],
            Card::Goose => &[(-1, 1), (-1, 0), (1, 0), (1, -1)],
            Card::Horse => &[(0, 1), (-1, 0), (0, -1)],
            Card::Eel => &[(-1, 1), (-1, -1), (1, 0)],
            Card::Rabbit => &[(1, 1), (2, 0), (-1, -1)],
            Card::Rooster => &[(1, 1), (-1, 0), (1, 0), (-1, -1)],
            Card::Ox => &[(0, 1), (1, 0), (0, -1)],
            Card::Cobra => &[(1, 1), (-1, 0), (1, -1)],
        }
    }

    /// Convert from card id
    #[inline]
    pub fn from_id(id: u8) -> Option<Card> {
        Card::ALL.get(id as usize).copied()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Card::ALL
            .iter()
            .copied()
            .find(|card| card.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CardError::UnknownCard(needle.to_string()))
    }
}

/// The five cards in play and who holds them
///
/// Slot layout: `[blue_0, blue_1, red_0, red_1, side]`. The same card may
/// appear in several slots; constructed research configurations rely on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardConfig {
    slots: [Card; NUM_CARDS],
}

impl CardConfig {
    /// Create a configuration from both hands and the side card
    pub const fn new(blue: [Card; 2], red: [Card; 2], side: Card) -> Self {
        Self {
            slots: [blue[0], blue[1], red[0], red[1], side],
        }
    }

    /// Create a configuration where every slot holds the same card
    pub const fn uniform(card: Card) -> Self {
        Self {
            slots: [card; NUM_CARDS],
        }
    }

    /// Build from five cards in slot order
    pub fn from_slice(cards: &[Card]) -> Result<Self, CardError> {
        let slots: [Card; NUM_CARDS] =
            cards.try_into().map_err(|_| CardError::WrongCount(cards.len()))?;
        Ok(Self { slots })
    }

    /// Slot index of a player's hand card (`slot` is 0 or 1)
    #[inline]
    pub const fn hand_slot_index(color: Color, slot: u8) -> usize {
        color.index() * 2 + slot as usize
    }

    /// Card held by `color` in hand slot `slot`
    #[inline]
    pub fn hand_card(&self, color: Color, slot: u8) -> Card {
        self.slots[Self::hand_slot_index(color, slot)]
    }

    /// Both hand cards of `color`
    #[inline]
    pub fn hand(&self, color: Color) -> [Card; 2] {
        [self.hand_card(color, 0), self.hand_card(color, 1)]
    }

    /// The side card
    #[inline]
    pub fn side(&self) -> Card {
        self.slots[SIDE_SLOT]
    }

    /// All five slots
    #[inline]
    pub fn slots(&self) -> &[Card; NUM_CARDS] {
        &self.slots
    }

    /// Exchange a used hand card with the side card
    ///
    /// The exchange is its own inverse, which is what undo relies on.
    #[inline]
    pub(crate) fn exchange(&mut self, color: Color, slot: u8) {
        self.slots.swap(Self::hand_slot_index(color, slot), SIDE_SLOT);
    }
}

impl fmt::Display for CardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for CardConfig {
    type Err = CardError;

    /// Parse five comma-separated card names in slot order
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s.split(',').map(str::parse).collect::<Result<Vec<Card>, _>>()?;
        Self::from_slice(&cards)
    }
}

/// Pre-computed card destination tables
struct CardTables {
    /// Destinations \[card\]\[color\]\[square\]
    targets: [[[Bitboard; BOARD_SQUARES]; Color::NUM]; Card::NUM],
}

impl CardTables {
    fn new() -> Self {
        let mut targets = [[[Bitboard::EMPTY; BOARD_SQUARES]; Color::NUM]; Card::NUM];

        for card in Card::ALL {
            for color in Color::ALL {
                // Red sees every card rotated by 180 degrees
                let sign = match color {
                    Color::Blue => 1,
                    Color::Red => -1,
                };
                for sq in 0..BOARD_SQUARES {
                    let from = Square(sq as u8);
                    let bb = &mut targets[card.index()][color.index()][sq];
                    for &(dx, dy) in card.offsets() {
                        if let Some(to) = from.offset(dx * sign, dy * sign) {
                            bb.set(to);
                        }
                    }
                }
            }
        }

        Self { targets }
    }
}

lazy_static! {
    static ref CARD_TABLES: CardTables = CardTables::new();
}

/// Squares a piece of `color` on `from` can reach with `card`
///
/// Occupancy is not considered.
#[inline]
pub fn card_targets(card: Card, color: Color, from: Square) -> Bitboard {
    CARD_TABLES.targets[card.index()][color.index()][from.index()]
}
