//! Core position structure

use crate::board::{Bitboard, Color, PieceType, Square, BOARD_SIZE};
use crate::cards::CardConfig;
use crate::moves::{Move, MoveVec};

use super::zobrist::ZOBRIST;

/// Deepest ply a position can reach
pub const MAX_DEPTH: usize = 64;

/// Position representation
#[derive(Clone, Debug)]
pub struct Position {
    /// Piece bitboards \[color\]\[piece_type\]
    pub(super) boards: [[Bitboard; PieceType::NUM]; Color::NUM],

    /// Side to move
    pub(super) side_to_move: Color,

    /// Card slots `[blue_0, blue_1, red_0, red_1, side]`
    pub(super) cards: CardConfig,

    /// Number of applied moves
    pub(super) depth: u8,

    /// Applied moves, `history[1..=depth]`; slot 0 is never written
    pub(super) history: [Move; MAX_DEPTH + 1],

    /// Zobrist hash of boards, side to move and cards
    pub(super) hash: u64,

    /// Moves generated at the current node
    pub(super) moves: MoveVec,
}

impl Position {
    /// Create the standard starting position, Blue to move
    ///
    /// Students stand on columns a, b, d and e of each home row, masters on
    /// the temple square in column c.
    pub fn new(cards: CardConfig) -> Self {
        let mut pos = Self::empty(cards);
        for color in Color::ALL {
            let row = color.home_row();
            for col in 0..BOARD_SIZE {
                let piece = if col == 2 {
                    PieceType::Master
                } else {
                    PieceType::Student
                };
                pos.put_piece(color, piece, Square::new(col, row));
            }
        }
        pos
    }

    /// Create a position with no pieces, Blue to move
    pub fn empty(cards: CardConfig) -> Self {
        let mut pos = Position {
            boards: [[Bitboard::EMPTY; PieceType::NUM]; Color::NUM],
            side_to_move: Color::Blue,
            cards,
            depth: 0,
            history: [Move::NULL; MAX_DEPTH + 1],
            hash: 0,
            moves: MoveVec::new(),
        };
        pos.hash = pos.compute_hash();
        pos
    }

    /// Place a piece on an empty square
    ///
    /// Only valid before any move has been applied.
    pub fn put_piece(&mut self, color: Color, piece: PieceType, sq: Square) {
        assert_eq!(self.depth, 0, "put_piece called at depth {}", self.depth);
        assert!(
            !self.occupied().test(sq),
            "put_piece on occupied square {sq}"
        );
        self.boards[color.index()][piece.index()].set(sq);
        self.hash ^= ZOBRIST.piece_square_hash(color, piece.index(), sq);
        self.moves.clear();
    }

    /// Change the side to move of a set-up position
    pub fn set_side_to_move(&mut self, color: Color) {
        assert_eq!(self.depth, 0, "set_side_to_move called at depth {}", self.depth);
        if self.side_to_move != color {
            self.side_to_move = color;
            self.hash ^= ZOBRIST.side_to_move;
            self.moves.clear();
        }
    }

    /// Bitboard of one piece type of one color
    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceType) -> Bitboard {
        self.boards[color.index()][piece.index()]
    }

    /// All squares occupied by `color`
    #[inline]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        let boards = &self.boards[color.index()];
        boards[0] | boards[1]
    }

    /// All occupied squares
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied_by(Color::Blue) | self.occupied_by(Color::Red)
    }

    /// Piece on a square
    pub fn piece_at(&self, sq: Square) -> Option<(Color, PieceType)> {
        Color::ALL.into_iter().find_map(|color| {
            self.piece_type_at(color, sq).map(|piece| (color, piece))
        })
    }

    /// Piece type of `color` on a square
    #[inline]
    pub(super) fn piece_type_at(&self, color: Color, sq: Square) -> Option<PieceType> {
        PieceType::ALL
            .into_iter()
            .find(|&piece| self.boards[color.index()][piece.index()].test(sq))
    }

    /// Side to move
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current card slots
    #[inline]
    pub fn cards(&self) -> &CardConfig {
        &self.cards
    }

    /// Number of applied moves
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Incrementally maintained Zobrist hash
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Applied moves in order, root first
    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.history[1..=self.depth as usize]
    }

    /// Most recently applied move
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        (self.depth > 0).then(|| self.history[self.depth as usize])
    }
}

impl PartialEq for Position {
    /// Game state equality; the generated move list is not part of it
    fn eq(&self, other: &Self) -> bool {
        self.boards == other.boards
            && self.side_to_move == other.side_to_move
            && self.cards == other.cards
            && self.depth == other.depth
            && self.history == other.history
            && self.hash == other.hash
    }
}

impl Eq for Position {}
