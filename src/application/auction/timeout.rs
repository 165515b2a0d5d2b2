//! First-bid timeout
//!
//! Early-exit rule: if an item has attracted no bid by its deadline, it is
//! discarded immediately instead of running out the full duration. Fires
//! exactly once; when a bid already exists it is a no-op.

use super::{AuctionWorld, close_item};
use crate::application::kernel::{Process, ProcessId, Sim, Transition};

pub struct FirstBidTimeout;

impl Process<AuctionWorld> for FirstBidTimeout {
    fn resume(&mut self, _pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        let no_interest = sim
            .world
            .live
            .as_ref()
            .is_some_and(|live| live.state.bid_count == 0);
        if no_interest {
            let id = sim.world.live.as_ref().map(|live| live.state.id).unwrap_or(0);
            log::info!("item {id}: no bid before first-bid deadline, discarding");
            close_item(sim);
        }
        Transition::Done
    }

    fn label(&self) -> &'static str {
        "first-bid-timeout"
    }
}
