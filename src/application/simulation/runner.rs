//! Simulation runner
//!
//! Ties the pieces together: builds the kernel and the shared auction world,
//! spawns the auction loop, runs to completion, and aggregates the run
//! metrics.

use super::SimulationConfig;
use crate::application::auction::{AuctionLoop, AuctionWorld, priority};
use crate::application::kernel::Sim;
use crate::domain::{ItemSummary, SimTime, WinnerStats};
use crate::error::ConfigError;
use crate::infrastructure::BidSink;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregated results of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Win histogram; `total()` equals the configured item count.
    pub wins: WinnerStats,
    /// Total committed bids across all items.
    pub total_bids: u64,
    /// Per-item summaries in completion order.
    pub items: Vec<ItemSummary>,
    /// Successful acquisitions of the bidding facility.
    pub facility_acquires: u64,
    /// Failed acquisition attempts on the bidding facility.
    pub facility_rejections: u64,
    /// Simulated time at which the run finished.
    pub final_time: f64,
}

impl RunMetrics {
    /// Human-readable run summary for the batch binary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "items: {} ({} sold, {} unsold)\n",
            self.wins.total(),
            self.wins.total() - self.wins.no_sale,
            self.wins.no_sale
        ));
        out.push_str(&format!(
            "wins:  agent {} / ratchet {} / sniper {}\n",
            self.wins.agent, self.wins.ratchet, self.wins.sniper
        ));
        out.push_str(&format!("bids:  {} committed\n", self.total_bids));
        out.push_str(&format!(
            "facility: {} grants, {} rejections\n",
            self.facility_acquires, self.facility_rejections
        ));
        out.push_str(&format!("simulated time: {:.1}s\n", self.final_time));
        out
    }
}

/// Runs one configured simulation to completion.
pub struct SimulationRunner {
    config: SimulationConfig,
    sink: Box<dyn BidSink>,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig, sink: Box<dyn BidSink>) -> Self {
        Self { config, sink }
    }

    /// Validate the configuration, run every item, and aggregate metrics.
    pub fn run(self) -> Result<RunMetrics, ConfigError> {
        self.config.validate()?;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!(
            "starting run: {} items, {:.0} mean bidders, {:.0}s per item",
            self.config.num_items,
            self.config.mean_bidders,
            self.config.item_duration
        );

        let world = AuctionWorld::new(self.config, self.sink);
        let mut sim = Sim::new(world, rng);
        sim.spawn(
            Box::new(AuctionLoop::new()),
            SimTime::ZERO,
            priority::CONTROL,
        );
        sim.run();

        let final_time = sim.now().as_secs();
        let mut world = sim.world;
        debug_assert!(world.live.is_none(), "no item left open after the run");
        world.sink.record_summary(&world.stats);

        Ok(RunMetrics {
            total_bids: world.completed.iter().map(|item| item.bids as u64).sum(),
            wins: world.stats,
            items: world.completed,
            facility_acquires: world.facility.acquires(),
            facility_rejections: world.facility.rejections(),
            final_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryBidLog;

    fn run_with(config: SimulationConfig) -> (RunMetrics, MemoryBidLog) {
        let log = MemoryBidLog::new();
        let metrics = SimulationRunner::new(config, Box::new(log.clone()))
            .run()
            .expect("valid config");
        (metrics, log)
    }

    #[test]
    fn test_invalid_config_is_rejected_before_running() {
        let config = SimulationConfig {
            num_items: 0,
            ..Default::default()
        };
        let result = SimulationRunner::new(config, Box::new(MemoryBidLog::new())).run();
        assert!(result.is_err());
    }

    #[test]
    fn test_small_run_classifies_every_item() {
        let config = SimulationConfig {
            num_items: 3,
            mean_bidders: 4.0,
            item_duration: 30.0,
            seed: Some(7),
            ..Default::default()
        };
        let (metrics, _) = run_with(config);
        assert_eq!(metrics.wins.total(), 3);
        assert_eq!(metrics.items.len(), 3);
    }

    #[test]
    fn test_summary_is_written_to_sink() {
        let config = SimulationConfig {
            num_items: 2,
            mean_bidders: 3.0,
            item_duration: 20.0,
            seed: Some(11),
            ..Default::default()
        };
        let (metrics, log) = run_with(config);
        assert_eq!(log.summary(), Some(metrics.wins));
    }
}
