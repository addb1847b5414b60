//! Perft (performance test) node counting
//!
//! Plain recursion through apply/undo. Used to cross-check the move counts
//! collected by the explicit-stack traversal.

use crate::moves::{Move, MoveVec};

use super::Position;

impl Position {
    /// Count leaf nodes `depth` plies below this position
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves: MoveVec = self.generate_moves().iter().copied().collect();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.apply_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Perft split by root move
    pub fn perft_divide(&mut self, depth: u8) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }

        let moves: MoveVec = self.generate_moves().iter().copied().collect();
        moves
            .into_iter()
            .map(|mv| {
                self.apply_move(mv);
                let nodes = self.perft(depth - 1);
                self.undo_move();
                (mv, nodes)
            })
            .collect()
    }
}
