//! Random walks through apply/undo must restore every position exactly.

use onitama_core::{Card, CardConfig, PieceType, Position, MAX_DEPTH};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

fn arb_card() -> impl Strategy<Value = Card> {
    (0u8..16).prop_map(|id| Card::from_id(id).unwrap())
}

fn arb_cards() -> impl Strategy<Value = CardConfig> {
    prop::collection::vec(arb_card(), 5).prop_map(|cards| CardConfig::from_slice(&cards).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    #[test]
    fn prop_random_walk_undoes_exactly(
        cards in arb_cards(),
        seed in any::<u64>(),
        plies in 1usize..=MAX_DEPTH,
    ) {
        let mut pos = Position::new(cards);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut snapshots = Vec::with_capacity(plies);

        for _ in 0..plies {
            let moves = pos.generate_moves().to_vec();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];

            snapshots.push(pos.clone());
            pos.apply_move(mv);
            prop_assert_eq!(pos.hash(), pos.compute_hash());
            prop_assert_eq!(pos.last_move(), Some(mv));

            if pos.depth() as usize == MAX_DEPTH {
                break;
            }

            // Every child undoes cleanly before the walk continues
            let children = pos.generate_moves().to_vec();
            for child in children {
                let before = pos.clone();
                pos.apply_move(child);
                pos.undo_move();
                prop_assert_eq!(&pos, &before);
            }
        }

        prop_assert_eq!(pos.depth() as usize, snapshots.len());
        while let Some(expected) = snapshots.pop() {
            pos.undo_move();
            prop_assert_eq!(&pos, &expected);
            prop_assert_eq!(pos.key(), expected.key());
        }
        prop_assert_eq!(pos.depth(), 0);
    }

    #[test]
    fn prop_generated_moves_are_legal(cards in arb_cards(), seed in any::<u64>()) {
        let mut pos = Position::new(cards);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for _ in 0..24 {
            let us = pos.side_to_move();
            let own = pos.occupied_by(us);
            let moves = pos.generate_moves().to_vec();
            if moves.is_empty() {
                break;
            }

            for mv in &moves {
                prop_assert!(!mv.is_null());
                prop_assert!(own.test(mv.from()));
                let moved = mv.tag().moved_piece();
                prop_assert!(pos.pieces(us, moved).test(mv.from()));
                if !mv.is_pass() {
                    prop_assert!(!own.test(mv.to()));
                }
                match mv.tag().captured_piece() {
                    Some(piece) => prop_assert!(pos.pieces(!us, piece).test(mv.to())),
                    None => prop_assert!(!pos.occupied_by(!us).test(mv.to())),
                }
                let temple_win = !mv.is_pass()
                    && moved == PieceType::Master
                    && mv.to() == (!us).temple()
                    && mv.tag().captured_piece().is_none();
                let master_captured = mv.tag().captured_piece() == Some(PieceType::Master);
                prop_assert_eq!(mv.is_win(), temple_win || master_captured);
            }

            let mv = moves[rng.random_range(0..moves.len())];
            pos.apply_move(mv);
        }
    }
}
