//! Move application and undo
//!
//! Both directions mutate the position in place and keep the Zobrist hash
//! in sync. Undo reads the move back from the history, so the caller only
//! needs the move when applying it.

use crate::cards::{CardConfig, SIDE_SLOT};
use crate::moves::{ActionTag, Move};

use super::core::MAX_DEPTH;
use super::zobrist::ZOBRIST;
use super::Position;

impl Position {
    /// Apply a move generated at this position
    ///
    /// Source and destination are cleared then set, in that order, so a pass
    /// (source equal to destination) leaves the board unchanged.
    pub fn apply_move(&mut self, mv: Move) {
        assert!(
            (self.depth as usize) < MAX_DEPTH,
            "apply_move beyond MAX_DEPTH ({MAX_DEPTH}): {mv}"
        );
        debug_assert!(!mv.is_null(), "apply_move with the null move");

        let us = self.side_to_move;
        let them = us.opposite();
        let tag = mv.tag();
        let (from, to) = (mv.from(), mv.to());

        let moved = tag.friendly_index();
        let board = &mut self.boards[us.index()][moved];
        debug_assert!(board.test(from), "no piece of the moving type on {from}");
        board.clear(from);
        board.set(to);
        self.hash ^= ZOBRIST.piece_square_hash(us, moved, from);
        self.hash ^= ZOBRIST.piece_square_hash(us, moved, to);

        let hostile = tag.hostile_index();
        if hostile != ActionTag::NO_CAPTURE {
            self.boards[them.index()][hostile].clear(to);
            self.hash ^= ZOBRIST.piece_square_hash(them, hostile, to);
        }

        self.exchange_card(mv.card_slot());

        self.depth += 1;
        self.history[self.depth as usize] = mv;
        self.side_to_move = them;
        self.hash ^= ZOBRIST.side_to_move;
        self.moves.clear();
    }

    /// Undo the most recently applied move
    pub fn undo_move(&mut self) {
        assert!(self.depth > 0, "undo_move at depth 0");

        let mv = self.history[self.depth as usize];
        self.history[self.depth as usize] = Move::NULL;
        self.depth -= 1;

        let them = self.side_to_move;
        let us = them.opposite();
        self.side_to_move = us;
        self.hash ^= ZOBRIST.side_to_move;

        self.exchange_card(mv.card_slot());

        let tag = mv.tag();
        let (from, to) = (mv.from(), mv.to());

        let hostile = tag.hostile_index();
        if hostile != ActionTag::NO_CAPTURE {
            self.boards[them.index()][hostile].set(to);
            self.hash ^= ZOBRIST.piece_square_hash(them, hostile, to);
        }

        let moved = tag.friendly_index();
        let board = &mut self.boards[us.index()][moved];
        board.clear(to);
        board.set(from);
        self.hash ^= ZOBRIST.piece_square_hash(us, moved, to);
        self.hash ^= ZOBRIST.piece_square_hash(us, moved, from);

        self.moves.clear();
    }

    /// Swap the side to move's hand card in `slot` with the side card
    fn exchange_card(&mut self, slot: u8) {
        let us = self.side_to_move;
        let hand = CardConfig::hand_slot_index(us, slot);
        self.hash ^= self.card_pair_hash(hand);
        self.cards.exchange(us, slot);
        self.hash ^= self.card_pair_hash(hand);
    }

    #[inline]
    fn card_pair_hash(&self, hand: usize) -> u64 {
        let slots = self.cards.slots();
        ZOBRIST.card_hash(hand, slots[hand]) ^ ZOBRIST.card_hash(SIDE_SLOT, slots[SIDE_SLOT])
    }
}
