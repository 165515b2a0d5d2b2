//! Auction loop
//!
//! Sequences the configured number of items. The run gate (a facility around
//! the loop body) guarantees no two items are ever open concurrently: it is
//! acquired before each open and released by the item's close path.

use super::{AuctionItemProcess, AuctionWorld, priority};
use crate::application::kernel::{Process, ProcessId, Sim, Transition};

pub struct AuctionLoop {
    next_item: u32,
    awaiting_close: bool,
}

impl AuctionLoop {
    pub fn new() -> Self {
        Self {
            next_item: 0,
            awaiting_close: false,
        }
    }
}

impl Default for AuctionLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Process<AuctionWorld> for AuctionLoop {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        if self.awaiting_close {
            // Reactivated by the close path of the item we spawned.
            self.awaiting_close = false;
            if self.next_item >= sim.world.config.num_items {
                log::info!(
                    "run complete at {}: agent {} / ratchet {} / sniper {} / unsold {}",
                    sim.now(),
                    sim.world.stats.agent,
                    sim.world.stats.ratchet,
                    sim.world.stats.sniper,
                    sim.world.stats.no_sale
                );
                return Transition::Done;
            }
            return Transition::WaitFor(sim.world.config.inter_item_delay);
        }

        let acquired = sim.world.run_gate.try_acquire(pid);
        debug_assert!(acquired, "two items must never be open concurrently");

        self.next_item += 1;
        sim.spawn(
            Box::new(AuctionItemProcess::new(self.next_item, pid)),
            sim.now(),
            priority::CONTROL,
        );
        self.awaiting_close = true;
        Transition::Passivate
    }

    fn label(&self) -> &'static str {
        "auction-loop"
    }
}
