//! Independent searches on worker threads, one searcher per card configuration.

use onitama_core::{search_exhaustive, Card, CardConfig, ExhaustiveSearcher, SearchConfig};

#[test]
fn workers_match_sequential_results() {
    let workloads = [
        CardConfig::new([Card::Tiger, Card::Crab], [Card::Monkey, Card::Crane], Card::Dragon),
        CardConfig::new([Card::Boar, Card::Frog], [Card::Goose, Card::Eel], Card::Rabbit),
        CardConfig::new([Card::Rooster, Card::Ox], [Card::Cobra, Card::Mantis], Card::Elephant),
        CardConfig::uniform(Card::Horse),
    ];
    let config = SearchConfig::default();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = workloads
            .iter()
            .map(|cards| {
                let mut searcher = ExhaustiveSearcher::<true, true>::new(*cards, config);
                scope.spawn(move || searcher.search(4))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked").unwrap())
            .collect()
    });

    for (cards, result) in workloads.iter().zip(&parallel) {
        let sequential = search_exhaustive(cards, 4, &config).unwrap();
        assert_eq!(result.metrics, sequential.metrics, "{cards}");
        assert_eq!(result.win_paths, sequential.win_paths, "{cards}");
        assert_eq!(result.stats, sequential.stats, "{cards}");
    }
}
