//! Shared auction world
//!
//! All state the cooperating processes mutate between suspension points:
//! the two facilities, the decision queues, the currently open item, and the
//! run-level statistics. Scoped to a single `Sim` and passed to every resume.

use super::{DecisionQueues, Facility};
use crate::application::kernel::ProcessId;
use crate::application::simulation::SimulationConfig;
use crate::domain::{ItemState, ItemSummary, WinnerStats};
use crate::infrastructure::BidSink;

/// Book-keeping for the currently open item.
#[derive(Debug)]
pub struct LiveItem {
    pub state: ItemState,
    /// The auction loop to reactivate once this item closes.
    pub auction_pid: ProcessId,
    /// The item lifecycle process (holds the pending close resume).
    pub item_pid: ProcessId,
    /// Pollers, generator, first-bid timeout, and every spawned bidder.
    /// All cancelled when the item closes; stale handles are no-ops.
    pub children: Vec<ProcessId>,
}

/// Process-wide shared state for one simulation run.
pub struct AuctionWorld {
    pub config: SimulationConfig,
    /// Serializes price commits within the open item.
    pub facility: Facility,
    /// Mutual exclusion around the auction loop body: guarantees no two
    /// items are ever open concurrently.
    pub run_gate: Facility,
    pub queues: DecisionQueues,
    /// `Some` exactly while an item is open.
    pub live: Option<LiveItem>,
    pub stats: WinnerStats,
    pub completed: Vec<ItemSummary>,
    pub sink: Box<dyn BidSink>,
}

impl AuctionWorld {
    pub fn new(config: SimulationConfig, sink: Box<dyn BidSink>) -> Self {
        Self {
            config,
            facility: Facility::new(),
            run_gate: Facility::new(),
            queues: DecisionQueues::new(),
            live: None,
            stats: WinnerStats::default(),
            completed: Vec::new(),
            sink,
        }
    }
}
