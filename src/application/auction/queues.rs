//! Per-strategy decision queues
//!
//! Bidders that have decided to attempt a bid enqueue themselves here and
//! passivate; arbitration commits one increment and wakes everything queued
//! across all three strategies.

use crate::application::kernel::ProcessId;
use crate::domain::Strategy;
use std::collections::VecDeque;

/// One FIFO per bidder strategy, insertion order = decision order.
///
/// A bidder appears in at most one queue at a time: it passivates immediately
/// after pushing itself and is drained before it is woken.
#[derive(Debug, Default)]
pub struct DecisionQueues {
    agent: VecDeque<ProcessId>,
    ratchet: VecDeque<ProcessId>,
    sniper: VecDeque<ProcessId>,
}

impl DecisionQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, strategy: Strategy, pid: ProcessId) {
        self.queue_mut(strategy).push_back(pid);
    }

    pub fn is_empty(&self, strategy: Strategy) -> bool {
        self.queue(strategy).is_empty()
    }

    pub fn len(&self, strategy: Strategy) -> usize {
        self.queue(strategy).len()
    }

    /// Empty all three queues, returning the waiting bidders in queue order
    /// (agent, ratchet, sniper). Used by the cross-strategy wake fan-out.
    pub fn drain_all(&mut self) -> Vec<ProcessId> {
        let mut woken =
            Vec::with_capacity(self.agent.len() + self.ratchet.len() + self.sniper.len());
        woken.extend(self.agent.drain(..));
        woken.extend(self.ratchet.drain(..));
        woken.extend(self.sniper.drain(..));
        woken
    }

    pub fn clear(&mut self) {
        self.agent.clear();
        self.ratchet.clear();
        self.sniper.clear();
    }

    fn queue(&self, strategy: Strategy) -> &VecDeque<ProcessId> {
        match strategy {
            Strategy::Agent => &self.agent,
            Strategy::Ratchet => &self.ratchet,
            Strategy::Sniper => &self.sniper,
        }
    }

    fn queue_mut(&mut self, strategy: Strategy) -> &mut VecDeque<ProcessId> {
        match strategy {
            Strategy::Agent => &mut self.agent,
            Strategy::Ratchet => &mut self.ratchet,
            Strategy::Sniper => &mut self.sniper,
        }
    }
}
