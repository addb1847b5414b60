//! Per-depth move statistics

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::moves::Move;

/// Counters for all moves generated at one depth
///
/// `depth` is the ply the moves lead to and `active_player` the side that
/// generated them. Both are labels: [`DepthMetric::increment`] only sums the
/// counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthMetric {
    pub depth: u8,
    pub active_player: Color,
    pub generated_moves: u64,
    /// Winning moves, temple wins included
    pub masters_killed: u64,
    pub temples_taken: u64,
    pub students_killed: u64,
    pub non_violent_moves: u64,
}

impl DepthMetric {
    /// Empty counters for a depth
    pub const fn new(depth: u8, active_player: Color) -> Self {
        Self {
            depth,
            active_player,
            generated_moves: 0,
            masters_killed: 0,
            temples_taken: 0,
            students_killed: 0,
            non_violent_moves: 0,
        }
    }

    /// Classify one node's generated moves
    pub fn from_moves(depth: u8, active_player: Color, moves: &[Move]) -> Self {
        let mut metric = Self::new(depth, active_player);
        metric.generated_moves = moves.len() as u64;

        for mv in moves {
            let tag = mv.tag().bits();
            let win = u64::from(tag & 1);
            let no_capture = u64::from((tag >> 2) & 1);
            metric.masters_killed += win;
            metric.temples_taken += win & no_capture;
            match tag {
                0 | 2 => metric.students_killed += 1,
                4 | 6 => metric.non_violent_moves += 1,
                _ => {}
            }
        }

        metric
    }

    /// Add the counters of `other`
    #[inline]
    pub fn increment(&mut self, other: &DepthMetric) {
        self.generated_moves += other.generated_moves;
        self.masters_killed += other.masters_killed;
        self.temples_taken += other.temples_taken;
        self.students_killed += other.students_killed;
        self.non_violent_moves += other.non_violent_moves;
    }
}

/// Labelled empty row for the plies `base_depth..base_depth + len`
///
/// `side_at_base` is the side to move at `base_depth`; entry `j` is
/// labelled with the side that generates the moves reaching
/// `base_depth + j`.
pub(crate) fn metric_row(base_depth: u8, side_at_base: Color, len: usize) -> Vec<DepthMetric> {
    (0..len)
        .map(|j| {
            let side = if j % 2 == 1 {
                side_at_base
            } else {
                side_at_base.opposite()
            };
            DepthMetric::new(base_depth + j as u8, side)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::moves::ActionTag;

    fn moves_with_tags(tags: &[u8]) -> Vec<Move> {
        tags.iter()
            .map(|&t| Move::new(Square(1), Square(6), ActionTag::from_bits(t), 0))
            .collect()
    }

    #[test]
    fn test_classification_per_tag() {
        let moves = moves_with_tags(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let metric = DepthMetric::from_moves(3, Color::Red, &moves);

        assert_eq!(metric.depth, 3);
        assert_eq!(metric.active_player, Color::Red);
        assert_eq!(metric.generated_moves, 8);
        assert_eq!(metric.masters_killed, 4); // 1, 3, 5, 7
        assert_eq!(metric.temples_taken, 2); // 5, 7
        assert_eq!(metric.students_killed, 2); // 0, 2
        assert_eq!(metric.non_violent_moves, 2); // 4, 6
    }

    #[test]
    fn test_increment_sums_counters_only() {
        let mut a = DepthMetric::from_moves(2, Color::Blue, &moves_with_tags(&[0, 7]));
        let b = DepthMetric::from_moves(5, Color::Red, &moves_with_tags(&[4, 4, 3]));
        let mut c = b;
        c.increment(&a);
        a.increment(&b);

        assert_eq!(a.depth, 2);
        assert_eq!(a.active_player, Color::Blue);
        assert_eq!(a.generated_moves, 5);
        assert_eq!(a.masters_killed, 2);
        assert_eq!(a.temples_taken, 1);
        assert_eq!(a.students_killed, 1);
        assert_eq!(a.non_violent_moves, 2);

        // commutative on the counters
        assert_eq!(
            (a.generated_moves, a.masters_killed, a.non_violent_moves),
            (c.generated_moves, c.masters_killed, c.non_violent_moves)
        );
    }

    #[test]
    fn test_metric_row_labels() {
        let row = metric_row(0, Color::Blue, 4);
        assert_eq!(row.len(), 4);
        assert_eq!(row[1], DepthMetric::new(1, Color::Blue));
        assert_eq!(row[2], DepthMetric::new(2, Color::Red));
        assert_eq!(row[3], DepthMetric::new(3, Color::Blue));
    }
}
