//! Agent bidder
//!
//! Aggressive strategy: values the item above its fair price on average, but
//! only starts attempting bids inside a randomly sampled tail window before
//! close. Driven by the shared patience decay.

use super::{Patience, PatienceConfig};
use crate::application::auction::AuctionWorld;
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::domain::{ItemState, SimTime, Strategy};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for agent bidders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentBidderConfig {
    /// Mean of the valuation multiplier around the item's fair price.
    pub valuation_mean: f64,
    /// Standard deviation of the valuation multiplier.
    pub valuation_sd: f64,
    /// Maximum entry offset before close, as a fraction of item duration.
    pub entry_window: f64,
    pub patience: PatienceConfig,
}

impl Default for AgentBidderConfig {
    fn default() -> Self {
        Self {
            valuation_mean: 1.05,
            valuation_sd: 0.15,
            entry_window: 0.6,
            patience: PatienceConfig::default(),
        }
    }
}

/// Aggressive bidder process.
pub struct AgentBidder {
    valuation: f64,
    /// Earliest time this bidder will attempt a bid.
    entry: SimTime,
    end: SimTime,
    patience: Patience,
}

impl AgentBidder {
    /// Draw a new agent bidder for `item`. All stochastic parameters are
    /// fixed at creation.
    pub fn new(item: &ItemState, config: &AgentBidderConfig, rng: &mut StdRng) -> Self {
        let multiplier = Normal::new(config.valuation_mean, config.valuation_sd).unwrap();
        let valuation = (item.real_price * multiplier.sample(rng)).max(0.0);

        let duration = item.end - item.start;
        let offset = if config.entry_window > 0.0 {
            rng.gen_range(0.0..config.entry_window) * duration
        } else {
            0.0
        };
        let entry = SimTime::new((item.end.as_secs() - offset).max(item.start.as_secs()));

        Self {
            valuation,
            entry,
            end: item.end,
            patience: Patience::new(item.start, item.end, config.patience.clone()),
        }
    }
}

impl Process<AuctionWorld> for AgentBidder {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        let now = sim.now();
        let increment_rate = sim.world.config.increment_rate;
        let Some(live) = sim.world.live.as_ref() else {
            return Transition::Done;
        };
        let price = live.state.current_price;
        let min_next = live.state.min_next_price(increment_rate);

        if now >= self.end || price >= self.valuation {
            return Transition::Done;
        }

        self.patience.update(now, &mut sim.rng);
        let draw: f64 = sim.rng.r#gen();
        if draw > self.patience.value() {
            if min_next > self.valuation {
                // The next increment would exceed the valuation for good.
                return Transition::Done;
            }
            if now >= self.entry {
                sim.world.queues.push(Strategy::Agent, pid);
                log::trace!(
                    "agent bidder queued at {} (price {:.2}, valuation {:.2})",
                    now,
                    price,
                    self.valuation
                );
                return Transition::Passivate;
            }
        }

        Transition::WaitFor(self.patience.sleep_interval())
    }

    fn label(&self) -> &'static str {
        "agent-bidder"
    }
}
