//! Move generation
//!
//! Onitama has no check or pins: every card destination that is on the board
//! and not occupied by a friendly piece is legal.

use crate::board::PieceType;
use crate::cards::card_targets;
use crate::moves::{ActionTag, Move};

use super::Position;

impl Position {
    /// Generate the legal moves of the side to move
    ///
    /// Order: card slot 0 then 1, students then master, ascending source
    /// squares, ascending destinations. The list stays readable through
    /// [`Position::moves`] until the next apply or undo.
    ///
    /// A side that has pieces but nowhere to go still has to exchange a card,
    /// so it gets one pass per card slot (source and destination are its
    /// lowest occupied square).
    pub fn generate_moves(&mut self) -> &[Move] {
        self.moves.clear();

        let us = self.side_to_move;
        let them = us.opposite();
        let own = self.occupied_by(us);
        let enemy_temple = them.temple();

        for slot in 0..2u8 {
            let card = self.cards.hand_card(us, slot);
            for piece in PieceType::ALL {
                for from in self.boards[us.index()][piece.index()] {
                    for to in card_targets(card, us, from) & !own {
                        let captured = self.piece_type_at(them, to);
                        let temple = piece == PieceType::Master && to == enemy_temple;
                        let tag = ActionTag::classify(piece, captured, temple);
                        self.moves.push(Move::new(from, to, tag, slot));
                    }
                }
            }
        }

        if self.moves.is_empty() {
            if let Some(sq) = own.lsb() {
                let piece = self.piece_type_at(us, sq).unwrap_or(PieceType::Student);
                let tag = ActionTag::classify(piece, None, false);
                for slot in 0..2u8 {
                    self.moves.push(Move::new(sq, sq, tag, slot));
                }
            }
        }

        &self.moves
    }

    /// Moves generated at the current node
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}
