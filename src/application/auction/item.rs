//! Auction item lifecycle
//!
//! Opens an item (valuation draw, bidder population, pollers, first-bid
//! timeout), sleeps for the item duration, then closes it. The close path is
//! shared with the first-bid timeout; whichever runs first takes the live
//! item and the other becomes a no-op.

use super::{ArbitrationPoller, AuctionWorld, BidderGenerator, FirstBidTimeout, LiveItem, priority};
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::domain::{ItemState, ItemSummary, Strategy};
use rand_distr::{Distribution, Exp, Normal};

/// Multiplier distribution for the public starting price.
const START_PRICE_MEAN: f64 = 0.8;
const START_PRICE_SD: f64 = 0.2;
/// Floor on the starting price as a fraction of fair value.
const START_PRICE_FLOOR: f64 = 0.05;

/// Lifecycle process for a single item.
pub struct AuctionItemProcess {
    id: u32,
    auction_pid: ProcessId,
    opened: bool,
}

impl AuctionItemProcess {
    pub fn new(id: u32, auction_pid: ProcessId) -> Self {
        Self {
            id,
            auction_pid,
            opened: false,
        }
    }
}

impl Process<AuctionWorld> for AuctionItemProcess {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        if !self.opened {
            self.opened = true;
            let now = sim.now();

            let (real_price, start_price, duration, timeout_offset, population) = {
                let config = &sim.world.config;
                let mean_value = config.value_scale * config.num_items as f64;
                let real_price = Exp::new(1.0 / mean_value).unwrap().sample(&mut sim.rng);
                let multiplier = Normal::new(START_PRICE_MEAN, START_PRICE_SD)
                    .unwrap()
                    .sample(&mut sim.rng);
                let start_price = (real_price * multiplier).max(real_price * START_PRICE_FLOOR);
                let population = BidderGenerator::population(config, &mut sim.rng);
                (
                    real_price,
                    start_price,
                    config.item_duration,
                    config.effective_first_bid_timeout(),
                    population,
                )
            };

            let state = ItemState::new(
                self.id,
                real_price,
                start_price,
                now,
                now + duration,
                now + timeout_offset,
            );
            log::info!(
                "item {} open at {}: fair value {:.2}, starting price {:.2}, {} bidders",
                self.id,
                now,
                real_price,
                start_price,
                population
            );

            debug_assert!(sim.world.live.is_none(), "no two items open concurrently");
            let mut children = Vec::with_capacity(population as usize + 5);
            for strategy in [Strategy::Agent, Strategy::Ratchet, Strategy::Sniper] {
                children.push(sim.spawn(
                    Box::new(ArbitrationPoller::new(strategy)),
                    now,
                    priority::POLLER,
                ));
            }
            children.push(sim.spawn(
                Box::new(BidderGenerator::new(population)),
                now,
                priority::GENERATOR,
            ));
            children.push(sim.spawn(
                Box::new(FirstBidTimeout),
                now + timeout_offset,
                priority::TIMEOUT,
            ));

            sim.world.live = Some(LiveItem {
                state,
                auction_pid: self.auction_pid,
                item_pid: pid,
                children,
            });
            Transition::WaitFor(duration)
        } else {
            close_item(sim);
            Transition::Done
        }
    }

    fn label(&self) -> &'static str {
        "auction-item"
    }
}

/// Close the currently open item: record the outcome exactly once, cancel
/// every process the item spawned, and hand control back to the auction loop.
///
/// Called from the item's own close resume or from the first-bid timeout;
/// taking `live` makes the second caller a no-op.
pub(crate) fn close_item(sim: &mut Sim<AuctionWorld>) {
    let Some(live) = sim.world.live.take() else {
        return;
    };
    sim.cancel(live.item_pid);
    for child in &live.children {
        sim.cancel(*child);
    }
    sim.world.queues.clear();

    let winner = live.state.winner;
    debug_assert_eq!(
        winner.is_some(),
        live.state.bid_count > 0,
        "winner is recorded iff a bid committed"
    );
    sim.world.stats.record(winner);

    let summary = ItemSummary {
        id: live.state.id,
        real_price: live.state.real_price,
        start_price: live.state.start_price,
        final_price: live.state.current_price,
        bids: live.state.bid_count,
        opened: live.state.start,
        closed: sim.now(),
        winner,
    };
    match winner {
        Some(strategy) => log::info!(
            "item {} sold at {} for {:.2} to {} after {} bids",
            summary.id,
            summary.closed,
            summary.final_price,
            strategy,
            summary.bids
        ),
        None => log::info!("item {} unsold at {}", summary.id, summary.closed),
    }
    sim.world.completed.push(summary);

    sim.world.run_gate.release(live.auction_pid);
    sim.activate(live.auction_pid, sim.now());
}
