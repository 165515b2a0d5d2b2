//! Patience model
//!
//! Decaying propensity score shared by the agent and ratchet bidders. Early
//! in the item's life patience erodes by small exponential draws; in the last
//! quarter it follows a steep quintic decay, so late auctions force a
//! bid-or-quit decision.

use crate::domain::SimTime;
use rand::prelude::*;
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};

/// Elapsed fraction at which the steep late-auction decay takes over.
const LATE_PHASE_START: f64 = 0.75;

/// Tunables for the patience decay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatienceConfig {
    /// Minimum simulated seconds between recomputations.
    pub update_interval: f64,
    /// Mean of the early-phase exponential decay draw.
    pub decay_mean: f64,
    /// Coefficient `k` of the late-phase decay `0.99 - k * x^5`.
    pub late_coeff: f64,
    /// Lower bound on the sleep interval derived from patience.
    pub min_sleep: f64,
}

impl Default for PatienceConfig {
    fn default() -> Self {
        Self {
            update_interval: 1.0,
            decay_mean: 0.03,
            late_coeff: 1.0,
            min_sleep: 0.1,
        }
    }
}

/// Per-bidder patience state, scoped to one item's lifetime.
#[derive(Debug, Clone)]
pub struct Patience {
    value: f64,
    last_update: Option<SimTime>,
    start: SimTime,
    end: SimTime,
    decay: Exp<f64>,
    config: PatienceConfig,
}

impl Patience {
    pub fn new(start: SimTime, end: SimTime, config: PatienceConfig) -> Self {
        debug_assert!(end > start);
        let decay = Exp::new(1.0 / config.decay_mean).unwrap();
        Self {
            value: 1.0,
            last_update: None,
            start,
            end,
            decay,
            config,
        }
    }

    /// Current patience in (-inf, 1].
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sleep interval for the next decision cycle: `max(patience, floor)`.
    pub fn sleep_interval(&self) -> f64 {
        self.value.max(self.config.min_sleep)
    }

    /// Recompute patience, rate-limited to one update per `update_interval`.
    pub fn update(&mut self, now: SimTime, rng: &mut StdRng) {
        if let Some(last) = self.last_update {
            if now - last < self.config.update_interval {
                return;
            }
        }
        self.last_update = Some(now);

        let duration = self.end - self.start;
        let f = ((now - self.start) / duration).clamp(0.0, 1.0);
        if f < LATE_PHASE_START {
            self.value -= self.decay.sample(rng);
        } else {
            let x = (f - LATE_PHASE_START) / (1.0 - LATE_PHASE_START);
            self.value = 0.99 - self.config.late_coeff * x.powi(5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn patience() -> Patience {
        Patience::new(SimTime::ZERO, SimTime::new(100.0), PatienceConfig::default())
    }

    #[test]
    fn test_early_phase_decays_monotonically() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = patience();
        let mut previous = p.value();
        for step in 1..50 {
            p.update(SimTime::new(step as f64), &mut rng);
            assert!(p.value() <= previous);
            previous = p.value();
        }
        assert!(p.value() < 1.0);
    }

    #[test]
    fn test_late_phase_follows_quintic_decay() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = patience();

        // Halfway into the late phase: x = 0.5.
        p.update(SimTime::new(87.5), &mut rng);
        assert_relative_eq!(p.value(), 0.99 - 0.5f64.powi(5), epsilon = 1e-12);

        // At the very end the decay goes slightly negative.
        p.update(SimTime::new(100.0), &mut rng);
        assert_relative_eq!(p.value(), 0.99 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_updates_are_rate_limited() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = patience();
        p.update(SimTime::new(10.0), &mut rng);
        let after_first = p.value();

        // Within the update interval: no change.
        p.update(SimTime::new(10.5), &mut rng);
        assert_eq!(p.value(), after_first);

        p.update(SimTime::new(11.0), &mut rng);
        assert!(p.value() < after_first);
    }

    #[test]
    fn test_sleep_interval_has_floor() {
        let mut p = patience();
        p.value = -3.0;
        assert_eq!(p.sleep_interval(), PatienceConfig::default().min_sleep);
    }
}
