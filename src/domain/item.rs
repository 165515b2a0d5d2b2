//! Auction item state and run statistics
//!
//! Value objects shared by the auction processes: the public state of the
//! currently open item, the per-run win histogram, and the per-bid record
//! emitted to the logging sink.

use super::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bidding strategy of a generated bidder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Aggressive bidder that enters in a tail window before close.
    Agent,
    /// Incremental bidder, occasionally with an irrational valuation.
    Ratchet,
    /// Last-moment bidder that fires exactly once near close.
    Sniper,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Agent => write!(f, "agent"),
            Strategy::Ratchet => write!(f, "ratchet"),
            Strategy::Sniper => write!(f, "sniper"),
        }
    }
}

/// Public state of one auction item while it is open.
///
/// `current_price` is shared singleton state scoped to the open item; every
/// mutation goes through [`ItemState::record_bid`], which the arbitration
/// pollers only call while holding the bidding facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemState {
    /// 1-based item number within the run.
    pub id: u32,
    /// Hidden fair value, never shown to bidders directly.
    pub real_price: f64,
    /// Public starting price drawn around the fair value.
    pub start_price: f64,
    /// Public price, monotonically non-decreasing while the item is open.
    pub current_price: f64,
    pub start: SimTime,
    pub end: SimTime,
    pub first_bid_deadline: SimTime,
    /// Committed bids so far.
    pub bid_count: u32,
    /// Strategy of the last committed bid, `None` until the first bid.
    pub winner: Option<Strategy>,
}

impl ItemState {
    pub fn new(
        id: u32,
        real_price: f64,
        start_price: f64,
        start: SimTime,
        end: SimTime,
        first_bid_deadline: SimTime,
    ) -> Self {
        Self {
            id,
            real_price,
            start_price,
            current_price: start_price,
            start,
            end,
            first_bid_deadline,
            bid_count: 0,
            winner: None,
        }
    }

    /// Price a bidder must be prepared to pay for the next increment.
    pub fn min_next_price(&self, increment_rate: f64) -> f64 {
        self.current_price * (1.0 + increment_rate)
    }

    /// Commit one price increment on behalf of `strategy`.
    ///
    /// The single mutation site for `current_price`. Returns the new price.
    pub fn record_bid(&mut self, strategy: Strategy, increment_rate: f64) -> f64 {
        let new_price = self.current_price * (1.0 + increment_rate);
        debug_assert!(new_price >= self.current_price, "price is non-decreasing");
        self.current_price = new_price;
        self.bid_count += 1;
        self.winner = Some(strategy);
        new_price
    }
}

/// Win histogram over a run; incremented exactly once per closed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerStats {
    pub agent: u64,
    pub ratchet: u64,
    pub sniper: u64,
    /// Items that closed without a single committed bid.
    pub no_sale: u64,
}

impl WinnerStats {
    pub fn record(&mut self, winner: Option<Strategy>) {
        match winner {
            Some(Strategy::Agent) => self.agent += 1,
            Some(Strategy::Ratchet) => self.ratchet += 1,
            Some(Strategy::Sniper) => self.sniper += 1,
            None => self.no_sale += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.agent + self.ratchet + self.sniper + self.no_sale
    }
}

/// One committed bid, as appended to the logging sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    /// 1-based item number.
    pub item: u32,
    /// Seconds since the item opened.
    pub elapsed: f64,
    /// Price after the committed increment.
    pub price: f64,
}

/// Per-item summary collected when an item closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: u32,
    pub real_price: f64,
    pub start_price: f64,
    pub final_price: f64,
    pub bids: u32,
    pub opened: SimTime,
    pub closed: SimTime,
    /// `None` means the item went unsold.
    pub winner: Option<Strategy>,
}

impl ItemSummary {
    pub fn sold(&self) -> bool {
        self.winner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_item() -> ItemState {
        ItemState::new(
            1,
            100.0,
            80.0,
            SimTime::ZERO,
            SimTime::new(60.0),
            SimTime::new(30.0),
        )
    }

    #[test]
    fn test_record_bid_raises_price_and_sets_winner() {
        let mut item = open_item();
        let p1 = item.record_bid(Strategy::Agent, 0.05);
        assert!(p1 > 80.0);
        assert_eq!(item.winner, Some(Strategy::Agent));
        assert_eq!(item.bid_count, 1);

        let p2 = item.record_bid(Strategy::Sniper, 0.05);
        assert!(p2 > p1);
        assert_eq!(item.winner, Some(Strategy::Sniper));
        assert_eq!(item.bid_count, 2);
    }

    #[test]
    fn test_min_next_price() {
        let item = open_item();
        assert!((item.min_next_price(0.05) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_winner_stats_exhaustive() {
        let mut stats = WinnerStats::default();
        stats.record(Some(Strategy::Agent));
        stats.record(Some(Strategy::Ratchet));
        stats.record(Some(Strategy::Sniper));
        stats.record(None);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.no_sale, 1);
    }
}
