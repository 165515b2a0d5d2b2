//! Arbitration pollers
//!
//! One poller per strategy per item. Each tick it checks "my queue is
//! non-empty and the facility is free"; on success it commits exactly one
//! price increment and wakes every bidder queued across all three strategies,
//! so a committed bid is visible to all waiting competitors before any of
//! them re-decides. Ties among strategies at the same instant resolve by
//! poller scheduling order.

use super::AuctionWorld;
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::domain::{BidRecord, Strategy};

/// Per-strategy commit poller.
pub struct ArbitrationPoller {
    strategy: Strategy,
}

impl ArbitrationPoller {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }
}

impl Process<AuctionWorld> for ArbitrationPoller {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        let now = sim.now();
        let woken = {
            let AuctionWorld {
                config,
                facility,
                queues,
                live,
                sink,
                ..
            } = &mut sim.world;
            let Some(live) = live.as_mut() else {
                return Transition::Done;
            };
            if now >= live.state.end {
                return Transition::Done;
            }

            if !queues.is_empty(self.strategy) && facility.try_acquire(pid) {
                let price = live.state.record_bid(self.strategy, config.increment_rate);
                let record = BidRecord {
                    item: live.state.id,
                    elapsed: now - live.state.start,
                    price,
                };
                sink.record_bid(&record);
                log::debug!(
                    "item {}: {} bid committed at {} -> {:.2}",
                    live.state.id,
                    self.strategy,
                    now,
                    price
                );
                let woken = queues.drain_all();
                facility.release(pid);
                Some(woken)
            } else {
                None
            }
        };

        if let Some(woken) = woken {
            for bidder in woken {
                sim.activate(bidder, now);
            }
        }

        Transition::WaitFor(sim.world.config.poll_interval)
    }

    fn label(&self) -> &'static str {
        "arbitration-poller"
    }
}
