//! Explicit traversal stack
//!
//! Depth-first search without recursion: a node's children sit on the stack
//! above a `Descend` marker. Popping the marker means every child has been
//! visited and the node itself can be undone.

use crate::moves::Move;

/// One entry of the traversal stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Boundary below a node's children; popping it ascends one ply
    Descend,
    /// A move still to be applied
    Play(Move),
}

/// LIFO stack of frames
#[derive(Debug, Default)]
pub struct TraversalStack {
    frames: Vec<Frame>,
}

impl TraversalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Push a `Descend` marker followed by one `Play` per move
    ///
    /// The last move is popped first.
    #[inline]
    pub fn push_children(&mut self, moves: &[Move]) {
        self.frames.reserve(moves.len() + 1);
        self.frames.push(Frame::Descend);
        self.frames.extend(moves.iter().map(|&mv| Frame::Play(mv)));
    }

    /// Pop the top frame
    ///
    /// # Panics
    /// Panics when the stack is empty: the driver always stops on the root
    /// marker first.
    #[inline]
    pub fn pop(&mut self) -> Frame {
        match self.frames.pop() {
            Some(frame) => frame,
            None => panic!("pop on empty traversal stack"),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceType, Square};
    use crate::moves::ActionTag;

    fn quiet(from: u8, to: u8) -> Move {
        let tag = ActionTag::classify(PieceType::Student, None, false);
        Move::new(Square(from), Square(to), tag, 0)
    }

    #[test]
    fn test_children_pop_in_reverse_then_marker() {
        let mut stack = TraversalStack::new();
        let (a, b) = (quiet(0, 5), quiet(1, 6));
        stack.push_children(&[a, b]);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Frame::Play(b));
        assert_eq!(stack.pop(), Frame::Play(a));
        assert_eq!(stack.pop(), Frame::Descend);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_marker_never_equals_a_move() {
        assert_ne!(Frame::Descend, Frame::Play(Move::NULL));
        assert_ne!(Frame::Descend, Frame::Play(quiet(0, 5)));
    }

    #[test]
    #[should_panic(expected = "pop on empty traversal stack")]
    fn test_pop_empty_panics() {
        TraversalStack::new().pop();
    }
}
