//! Simulation configuration

use crate::application::agents::{AgentBidderConfig, RatchetBidderConfig, SniperBidderConfig};
use crate::application::auction::GeneratorConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of items to auction.
    pub num_items: u32,
    /// Mean bidder population per item (Poisson).
    pub mean_bidders: f64,
    /// Item duration in simulated seconds.
    pub item_duration: f64,
    /// First-bid timeout offset after open; 0 disables early exit by
    /// defaulting to the full duration.
    pub first_bid_timeout: f64,
    /// Delay between consecutive items.
    pub inter_item_delay: f64,
    /// Relative price increment per committed bid.
    pub increment_rate: f64,
    /// Arbitration poller tick interval.
    pub poll_interval: f64,
    /// Scale of the fair-value draw: mean item value is
    /// `value_scale * num_items`.
    pub value_scale: f64,
    /// Random seed for determinism; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub agents: AgentBidderConfig,
    pub ratchets: RatchetBidderConfig,
    pub snipers: SniperBidderConfig,
    pub generator: GeneratorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_items: 20,
            mean_bidders: 12.0,
            item_duration: 60.0,
            first_bid_timeout: 30.0,
            inter_item_delay: 5.0,
            increment_rate: 0.05,
            poll_interval: 0.25,
            value_scale: 10.0,
            seed: Some(42),
            agents: AgentBidderConfig::default(),
            ratchets: RatchetBidderConfig::default(),
            snipers: SniperBidderConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject invalid parameters before the run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_items == 0 {
            return Err(ConfigError::InvalidItemCount(self.num_items));
        }
        if !(self.item_duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.item_duration));
        }
        if !(self.mean_bidders >= 0.0) {
            return Err(ConfigError::InvalidBidderCount(self.mean_bidders));
        }
        if !(self.first_bid_timeout >= 0.0) {
            return Err(ConfigError::InvalidTimeout(self.first_bid_timeout));
        }
        if !(self.increment_rate > 0.0 && self.increment_rate < 1.0) {
            return Err(ConfigError::InvalidIncrementRate(self.increment_rate));
        }
        if !(self.poll_interval > 0.0) {
            return Err(ConfigError::InvalidPollInterval(self.poll_interval));
        }
        if !(self.value_scale > 0.0) {
            return Err(ConfigError::InvalidValueScale(self.value_scale));
        }
        if !(self.inter_item_delay >= 0.0) {
            return Err(ConfigError::InvalidInterItemDelay(self.inter_item_delay));
        }
        let agent = self.generator.agent_share;
        let ratchet = self.generator.ratchet_share;
        if !(0.0..=1.0).contains(&agent)
            || !(0.0..=1.0).contains(&ratchet)
            || agent + ratchet > 1.0
        {
            return Err(ConfigError::InvalidStrategyMix { agent, ratchet });
        }
        Ok(())
    }

    /// First-bid timeout with the "0 disables" rule applied.
    pub fn effective_first_bid_timeout(&self) -> f64 {
        if self.first_bid_timeout > 0.0 {
            self.first_bid_timeout.min(self.item_duration)
        } else {
            self.item_duration
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_items() {
        let config = SimulationConfig {
            num_items: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidItemCount(0))
        ));
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let config = SimulationConfig {
            item_duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_rejects_negative_bidders() {
        let config = SimulationConfig {
            mean_bidders: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBidderCount(_))
        ));
    }

    #[test]
    fn test_rejects_bad_increment_rate() {
        let config = SimulationConfig {
            increment_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIncrementRate(_))
        ));
    }

    #[test]
    fn test_zero_timeout_disables_early_exit() {
        let config = SimulationConfig {
            first_bid_timeout: 0.0,
            item_duration: 45.0,
            ..Default::default()
        };
        assert_eq!(config.effective_first_bid_timeout(), 45.0);
    }

    #[test]
    fn test_timeout_clamped_to_duration() {
        let config = SimulationConfig {
            first_bid_timeout: 90.0,
            item_duration: 60.0,
            ..Default::default()
        };
        assert_eq!(config.effective_first_bid_timeout(), 60.0);
    }
}
