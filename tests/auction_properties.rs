//! End-to-end property tests for the auction simulation
//!
//! Runs the full simulation through the public API and checks the
//! guarantees the design makes: deterministic replay under a fixed seed,
//! monotone prices, item non-overlap, exhaustive win classification, and
//! the first-bid timeout discard rule.

use auction_abm::application::auction::GeneratorConfig;
use auction_abm::application::agents::SniperBidderConfig;
use auction_abm::{
    MemoryBidLog, RunMetrics, SimulationConfig, SimulationRunner, Strategy,
};

fn run(config: SimulationConfig) -> (RunMetrics, Vec<auction_abm::BidRecord>) {
    let _ = env_logger::try_init();
    let log = MemoryBidLog::new();
    let metrics = SimulationRunner::new(config, Box::new(log.clone()))
        .run()
        .expect("valid config");
    (metrics, log.bids())
}

fn busy_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_items: 6,
        mean_bidders: 10.0,
        item_duration: 40.0,
        first_bid_timeout: 20.0,
        inter_item_delay: 5.0,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn determinism_fixed_seed_reproduces_bid_records() {
    let (metrics_a, records_a) = run(busy_config(42));
    let (metrics_b, records_b) = run(busy_config(42));

    assert_eq!(records_a, records_b);
    assert_eq!(metrics_a.wins, metrics_b.wins);
    assert_eq!(metrics_a.total_bids, metrics_b.total_bids);
    assert_eq!(metrics_a.items.len(), metrics_b.items.len());
    for (a, b) in metrics_a.items.iter().zip(&metrics_b.items) {
        assert_eq!(a.final_price, b.final_price);
        assert_eq!(a.winner, b.winner);
    }
}

#[test]
fn every_item_is_classified_exactly_once() {
    let (metrics, _) = run(busy_config(7));
    assert_eq!(metrics.wins.total(), 6);
    assert_eq!(metrics.items.len(), 6);
    assert!(metrics.total_bids > 0, "a busy run commits bids");
}

#[test]
fn price_is_monotone_within_each_item() {
    let (metrics, records) = run(busy_config(19));

    for item in &metrics.items {
        let prices: Vec<f64> = records
            .iter()
            .filter(|record| record.item == item.id)
            .map(|record| record.price)
            .collect();
        for pair in prices.windows(2) {
            assert!(pair[1] > pair[0], "item {} price regressed", item.id);
        }
        if let Some(last) = prices.last() {
            assert_eq!(*last, item.final_price);
        }
        assert!(item.final_price >= item.start_price);
    }
}

#[test]
fn items_never_overlap() {
    let (metrics, _) = run(busy_config(23));
    let mut items = metrics.items.clone();
    items.sort_by_key(|item| item.id);
    for pair in items.windows(2) {
        assert!(
            pair[0].closed <= pair[1].opened,
            "items {} and {} overlap",
            pair[0].id,
            pair[1].id
        );
    }
}

#[test]
fn commits_never_share_an_instant() {
    let (_, records) = run(busy_config(31));
    for pair in records.windows(2) {
        if pair[0].item == pair[1].item {
            assert!(
                pair[1].elapsed > pair[0].elapsed,
                "two commits in the same instant on item {}",
                pair[0].item
            );
        }
    }
}

#[test]
fn empty_item_is_discarded_at_first_bid_deadline() {
    let config = SimulationConfig {
        num_items: 1,
        mean_bidders: 0.0,
        item_duration: 60.0,
        first_bid_timeout: 30.0,
        seed: Some(1),
        ..Default::default()
    };
    let (metrics, records) = run(config);

    assert!(records.is_empty());
    assert_eq!(metrics.wins.no_sale, 1);
    assert_eq!(metrics.wins.total(), 1);

    let item = &metrics.items[0];
    assert_eq!(item.winner, None);
    assert!(!item.sold());
    assert_eq!(item.bids, 0);
    assert_eq!(item.final_price, item.start_price);
    // Closed early at the deadline, not at the full duration.
    assert!((item.closed - item.opened - 30.0).abs() < 1e-9);
}

#[test]
fn disabled_timeout_runs_empty_item_to_full_duration() {
    let config = SimulationConfig {
        num_items: 1,
        mean_bidders: 0.0,
        item_duration: 60.0,
        first_bid_timeout: 0.0,
        seed: Some(1),
        ..Default::default()
    };
    let (metrics, _) = run(config);

    let item = &metrics.items[0];
    assert_eq!(item.winner, None);
    assert!((item.closed - item.opened - 60.0).abs() < 1e-9);
}

#[test]
fn lone_sniper_wins_with_exactly_one_commit() {
    let config = SimulationConfig {
        num_items: 1,
        item_duration: 60.0,
        // No early exit: the sniper only acts near the end.
        first_bid_timeout: 0.0,
        seed: Some(5),
        snipers: SniperBidderConfig {
            // Valuation far above any plausible starting price, and a
            // deterministic fire time 2 seconds before close.
            valuation_mean: 5.0,
            valuation_sd: 0.0,
            reaction_mean: 2.0,
            reaction_sd: 0.0,
            jitter_sd: 0.0,
        },
        generator: GeneratorConfig {
            agent_share: 0.0,
            ratchet_share: 0.0,
            fixed_population: Some(1),
            ..Default::default()
        },
        ..Default::default()
    };
    let (metrics, records) = run(config);

    assert_eq!(metrics.wins.sniper, 1);
    assert_eq!(metrics.total_bids, 1);
    assert_eq!(records.len(), 1);

    let item = &metrics.items[0];
    assert_eq!(item.winner, Some(Strategy::Sniper));
    assert!(item.sold());
    // The single commit lands in the sniper's tail window.
    assert!(records[0].elapsed >= 58.0);
    assert!(records[0].elapsed < 60.0);
}

#[test]
fn strategy_mix_produces_varied_winners_across_seeds() {
    // Statistical sanity rather than a sharp assertion: across several
    // seeded runs each closing state should be reachable.
    let mut sold = 0u64;
    let mut total = 0u64;
    for seed in 0..4 {
        let (metrics, _) = run(busy_config(seed));
        sold += metrics.wins.total() - metrics.wins.no_sale;
        total += metrics.wins.total();
    }
    assert_eq!(total, 24);
    assert!(sold > 0, "bidders win items in busy runs");
}
