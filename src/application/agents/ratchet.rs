//! Ratchet bidder
//!
//! Incremental strategy: participates from the moment it is created and
//! keeps nudging the price while its patience lasts. A small fraction of
//! ratchet bidders draw an irrational (infinite) valuation at creation,
//! modeling the human outlier that will not be outbid.

use super::{Patience, PatienceConfig};
use crate::application::auction::AuctionWorld;
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::domain::{ItemState, Strategy};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for ratchet bidders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatchetBidderConfig {
    /// Mean of the valuation multiplier around the item's fair price.
    pub valuation_mean: f64,
    /// Standard deviation of the valuation multiplier.
    pub valuation_sd: f64,
    /// Probability of drawing an infinite valuation at creation.
    pub outlier_prob: f64,
    pub patience: PatienceConfig,
}

impl Default for RatchetBidderConfig {
    fn default() -> Self {
        Self {
            valuation_mean: 0.95,
            valuation_sd: 0.20,
            outlier_prob: 0.02,
            patience: PatienceConfig::default(),
        }
    }
}

/// Incremental bidder process.
pub struct RatchetBidder {
    valuation: f64,
    end: crate::domain::SimTime,
    patience: Patience,
}

impl RatchetBidder {
    pub fn new(item: &ItemState, config: &RatchetBidderConfig, rng: &mut StdRng) -> Self {
        let valuation = if rng.r#gen::<f64>() < config.outlier_prob {
            f64::INFINITY
        } else {
            let multiplier = Normal::new(config.valuation_mean, config.valuation_sd).unwrap();
            (item.real_price * multiplier.sample(rng)).max(0.0)
        };

        Self {
            valuation,
            end: item.end,
            patience: Patience::new(item.start, item.end, config.patience.clone()),
        }
    }
}

impl Process<AuctionWorld> for RatchetBidder {
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
                return Transition::Done;
            }
            sim.world.queues.push(Strategy::Ratchet, pid);
            log::trace!(
                "ratchet bidder queued at {} (price {:.2}, valuation {:.2})",
                now,
                price,
                self.valuation
            );
            return Transition::Passivate;
        }

        Transition::WaitFor(self.patience.sleep_interval())
    }

    fn label(&self) -> &'static str {
        "ratchet-bidder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SimTime;

    fn test_item() -> ItemState {
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
    fn test_outliers_draw_infinite_valuation() {
        let item = test_item();
        let config = RatchetBidderConfig {
            outlier_prob: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let bidder = RatchetBidder::new(&item, &config, &mut rng);
        assert!(bidder.valuation.is_infinite());
    }

    #[test]
    fn test_outlier_rate_roughly_matches_probability() {
        let item = test_item();
        let config = RatchetBidderConfig {
            outlier_prob: 0.1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let outliers = (0..2000)
            .filter(|_| RatchetBidder::new(&item, &config, &mut rng).valuation.is_infinite())
            .count();
        // 10% of 2000 with generous slack.
        assert!((100..300).contains(&outliers), "got {outliers}");
    }
}
