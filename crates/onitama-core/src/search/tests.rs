//! Searcher behaviour tests

use crate::board::{Color, PieceType, Square};
use crate::cards::{Card, CardConfig};
use crate::position::{Position, MAX_DEPTH};

use super::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn standard_cards() -> CardConfig {
    CardConfig::new([Card::Tiger, Card::Crab], [Card::Monkey, Card::Crane], Card::Dragon)
}

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Two masters and nothing else; Ox lets them shuffle back and forth
fn masters_only() -> Position {
    let mut pos = Position::empty(CardConfig::uniform(Card::Ox));
    pos.put_piece(Color::Blue, PieceType::Master, sq("a1"));
    pos.put_piece(Color::Red, PieceType::Master, sq("e5"));
    pos
}

fn uncached() -> SearchConfig {
    SearchConfig {
        enable_caching: false,
        ..SearchConfig::default()
    }
}

fn counters(metrics: &[DepthMetric]) -> Vec<(u64, u64, u64, u64, u64)> {
    metrics
        .iter()
        .map(|m| {
            (
                m.generated_moves,
                m.masters_killed,
                m.temples_taken,
                m.students_killed,
                m.non_violent_moves,
            )
        })
        .collect()
}

#[test]
fn test_depth_zero_is_empty() {
    init_logger();
    let result = search_exhaustive(&standard_cards(), 0, &SearchConfig::default()).unwrap();
    assert!(result.metrics.is_empty());
    assert!(result.win_paths.is_empty());
    assert_eq!(result.elapsed, std::time::Duration::ZERO);
    assert_eq!(result.stats, TraversalStats::default());
}

#[test]
fn test_depth_out_of_range() {
    let depth = MAX_DEPTH as u8 + 1;
    assert_eq!(
        search_exhaustive(&standard_cards(), depth, &SearchConfig::default()).unwrap_err(),
        SearchError::DepthOutOfRange(depth)
    );
    assert_eq!(
        search_infinity_paths(&standard_cards(), depth, 0).unwrap_err(),
        SearchError::DepthOutOfRange(depth)
    );
}

#[test]
fn test_search_requires_root() {
    let mut pos = Position::new(standard_cards());
    let mv = pos.generate_moves()[0];
    pos.apply_move(mv);

    let mut searcher = ExhaustiveSearcher::<true, true>::with_position(pos, SearchConfig::default());
    assert_eq!(searcher.search(3).unwrap_err(), SearchError::NotAtRoot(1));
}

#[test]
fn test_depth_one_only_counts_root() {
    let result = search_exhaustive(&standard_cards(), 1, &SearchConfig::default()).unwrap();
    assert_eq!(result.metrics.len(), 2);
    assert_eq!(result.metrics[1].generated_moves, 10);
    assert_eq!(result.metrics[1].non_violent_moves, 10);
    assert_eq!(result.metrics[1].active_player, Color::Blue);
    assert_eq!(result.stats.applied, 0);
}

#[test]
fn test_metrics_match_perft() {
    init_logger();
    let cards = standard_cards();
    let mut pos = Position::new(cards);

    for config in [SearchConfig::default(), uncached()] {
        let result = search_exhaustive(&cards, 4, &config).unwrap();
        for depth in 1..=4u8 {
            assert_eq!(
                result.metrics[depth as usize].generated_moves,
                pos.perft(depth),
                "depth {depth} caching={}",
                config.enable_caching
            );
            assert_eq!(result.metrics[depth as usize].depth, depth);
        }
        assert_eq!(result.metrics[2].active_player, Color::Red);
        assert_eq!(result.stats.applied, result.stats.undone);
    }
}

#[test]
fn test_cache_matches_uncached_with_transpositions() {
    init_logger();
    // Uniform cards: the two hand slots give duplicate moves, so every
    // node is reached at least twice
    let cards = CardConfig::uniform(Card::Ox);
    let cached = SearchConfig {
        min_cacheable_height: 1,
        ..SearchConfig::default()
    };

    let with_cache = search_exhaustive(&cards, 4, &cached).unwrap();
    let without = search_exhaustive(&cards, 4, &uncached()).unwrap();

    assert_eq!(counters(&with_cache.metrics), counters(&without.metrics));
    assert!(with_cache.stats.cache_hits > 0);
    assert!(with_cache.stats.cache_reserved > 0);
    assert!(with_cache.stats.applied < without.stats.applied);
    assert_eq!(without.stats.cache_hits, 0);
}

#[test]
fn test_pending_revisits_are_counted_live() {
    init_logger();
    let config = SearchConfig {
        min_cacheable_height: 1,
        ..SearchConfig::default()
    };
    let cached = search_exhaustive_from(masters_only(), 7, &config).unwrap();
    let live = search_exhaustive_from(masters_only(), 7, &uncached()).unwrap();

    assert!(cached.stats.cache_pending > 0);
    assert_eq!(counters(&cached.metrics), counters(&live.metrics));

    let mut pos = masters_only();
    assert_eq!(cached.metrics[7].generated_moves, pos.perft(7));
}

#[test]
fn test_searcher_reuses_cache_across_depths() {
    let config = SearchConfig {
        min_cacheable_height: 1,
        ..SearchConfig::default()
    };
    let mut searcher = ExhaustiveSearcher::<true, true>::with_position(masters_only(), config);

    let shallow = searcher.search(4).unwrap();
    assert!(!searcher.cache().is_empty());
    let deep = searcher.search(6).unwrap();

    let fresh = search_exhaustive_from(masters_only(), 6, &uncached()).unwrap();
    assert_eq!(counters(&deep.metrics), counters(&fresh.metrics));
    assert_eq!(counters(&shallow.metrics), counters(&fresh.metrics[..5]));
    assert_eq!(searcher.position().depth(), 0);

    searcher.clear_cache();
    assert!(searcher.cache().is_empty());
}

#[test]
fn test_metrics_disabled() {
    let config = SearchConfig {
        enable_metrics: false,
        ..SearchConfig::default()
    };
    let result = search_exhaustive(&standard_cards(), 3, &config).unwrap();
    assert!(result.metrics.is_empty());
    assert!(result.stats.applied > 0);
    assert_eq!(result.stats.applied, result.stats.undone);
}

#[test]
fn test_win_paths_end_in_wins() {
    // Masters two files and two ranks apart: captures happen from ply 3
    let mut pos = Position::empty(CardConfig::uniform(Card::Ox));
    pos.put_piece(Color::Blue, PieceType::Master, sq("b2"));
    pos.put_piece(Color::Red, PieceType::Master, sq("d4"));
    let result = search_exhaustive_from(pos.clone(), 5, &uncached()).unwrap();

    let wins: u64 = result.metrics.iter().map(|m| m.masters_killed).sum();
    assert!(wins > 0);
    assert_eq!(result.win_paths.len() as u64, wins);

    for path in &result.win_paths {
        let last = path.last().unwrap();
        assert!(last.is_win());
        assert!(path[..path.len() - 1].iter().all(|mv| !mv.is_null()));

        // Replaying the path from the root reproduces the winning move
        let mut replay = pos.clone();
        for &mv in &path[..path.len() - 1] {
            assert!(replay.generate_moves().contains(&mv));
            replay.apply_move(mv);
        }
        assert!(replay.generate_moves().contains(last));
    }
}

#[test]
fn test_prune_on_win_stops_below_winning_nodes() {
    // Blue master one step from the red temple
    let mut pos = Position::empty(CardConfig::uniform(Card::Ox));
    pos.put_piece(Color::Blue, PieceType::Master, sq("c4"));
    pos.put_piece(Color::Red, PieceType::Master, sq("a5"));

    let pruned = SearchConfig {
        prune_on_win: true,
        ..uncached()
    };
    let result = search_exhaustive_from(pos.clone(), 3, &pruned).unwrap();
    assert_eq!(result.stats.applied, 0);
    assert_eq!(result.metrics[1].masters_killed, 2);
    assert_eq!(result.metrics[1].temples_taken, 2);
    assert_eq!(result.metrics[2].generated_moves, 0);

    let full = search_exhaustive_from(pos, 3, &uncached()).unwrap();
    assert!(full.stats.applied > 0);
    assert!(full.metrics[2].generated_moves > 0);
}

#[test]
fn test_all_instantiations_agree() {
    let cards = standard_cards();
    let reference = search_exhaustive(&cards, 3, &uncached()).unwrap();

    for (enable_caching, enable_metrics) in [(true, true), (true, false), (false, false)] {
        let config = SearchConfig {
            enable_caching,
            enable_metrics,
            min_cacheable_height: 1,
            prune_on_win: false,
        };
        let result = search_exhaustive(&cards, 3, &config).unwrap();
        if enable_metrics {
            assert_eq!(counters(&result.metrics), counters(&reference.metrics));
        }
        if !enable_caching {
            assert_eq!(result.win_paths, reference.win_paths);
            assert_eq!(result.stats.applied, reference.stats.applied);
        }
    }
}

#[test]
fn test_infinity_shallow_depth_is_empty() {
    for depth in 0..MIN_CYCLE_DEPTH {
        let result = search_infinity_paths(&CardConfig::uniform(Card::Horse), depth, 0).unwrap();
        assert!(result.paths.is_empty());
        assert_eq!(result.stats.applied, 0);
    }
}

#[test]
fn test_infinity_finds_four_ply_cycle() {
    init_logger();
    let cards = CardConfig::uniform(Card::Horse);
    let mut searcher = InfinitySearcher::new(cards);
    let result = searcher.search(4, 1).unwrap();

    assert_eq!(result.paths.len(), 1);
    let path = &result.paths[0];
    assert_eq!(path.len(), 4);
    assert_eq!(searcher.position().depth(), 0);
    assert_eq!(result.stats.applied, result.stats.undone);

    let mut pos = Position::new(cards);
    let root = pos.key();
    for &mv in path {
        assert!(pos.generate_moves().contains(&mv));
        pos.apply_move(mv);
    }
    assert_eq!(pos.key(), root);
}

#[test]
fn test_infinity_without_limit_collects_more() {
    let cards = CardConfig::uniform(Card::Horse);
    let limited = search_infinity_paths(&cards, 4, 3).unwrap();
    assert_eq!(limited.paths.len(), 3);

    let all = search_infinity_paths(&cards, 4, 0).unwrap();
    assert!(all.paths.len() > 3);
    assert!(all.paths.iter().all(|p| p.len() == 4));
}

#[test]
fn test_distinct_cards_cannot_cycle_in_four_plies() {
    // The side card changes every ply, so five distinct cards need more
    // than four plies to return to the same card state
    let result = search_infinity_paths(&standard_cards(), 4, 0).unwrap();
    assert!(result.paths.is_empty());
    assert!(result.stats.applied > 0);
}

#[test]
fn test_searchers_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<ExhaustiveSearcher<true, true>>();
    assert_send::<ExhaustiveSearcher<false, false>>();
    assert_send::<InfinitySearcher>();
    assert_send::<Position>();
}
