//! Sniper bidder
//!
//! Single-shot strategy: sleeps until a fire time shortly before close, adds
//! reaction jitter, and attempts exactly one bid. A sniper never loops; once
//! woken after queueing it terminates whether or not its strategy committed.

use crate::application::auction::AuctionWorld;
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::domain::{ItemState, SimTime, Strategy};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for sniper bidders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniperBidderConfig {
    /// Mean of the valuation multiplier around the item's fair price.
    pub valuation_mean: f64,
    /// Standard deviation of the valuation multiplier.
    pub valuation_sd: f64,
    /// Mean seconds before close at which the sniper fires.
    pub reaction_mean: f64,
    /// Standard deviation of the fire offset.
    pub reaction_sd: f64,
    /// Standard deviation of the network/reaction jitter added at fire time.
    pub jitter_sd: f64,
}

impl Default for SniperBidderConfig {
    fn default() -> Self {
        Self {
            valuation_mean: 1.10,
            valuation_sd: 0.15,
            reaction_mean: 2.0,
            reaction_sd: 0.5,
            jitter_sd: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SniperPhase {
    /// Waiting for the fire time.
    Armed,
    /// Jitter elapsed; evaluate and bid once.
    Striking,
    /// Queued for arbitration; terminates on wake.
    Queued,
}

/// Last-moment bidder process.
pub struct SniperBidder {
    valuation: f64,
    fire: SimTime,
    end: SimTime,
    jitter_sd: f64,
    phase: SniperPhase,
}

impl SniperBidder {
    /// Draw a new sniper for `item`, created at simulated time `created`.
    pub fn new(
        item: &ItemState,
        config: &SniperBidderConfig,
        created: SimTime,
        rng: &mut StdRng,
    ) -> Self {
        let multiplier = Normal::new(config.valuation_mean, config.valuation_sd).unwrap();
        let valuation = (item.real_price * multiplier.sample(rng)).max(0.0);

        let reaction = Normal::new(config.reaction_mean, config.reaction_sd)
            .unwrap()
            .sample(rng)
            .abs();
        let fire = SimTime::new((item.end.as_secs() - reaction).max(created.as_secs()));

        Self {
            valuation,
            fire,
            end: item.end,
            jitter_sd: config.jitter_sd,
            phase: SniperPhase::Armed,
        }
    }
}

impl Process<AuctionWorld> for SniperBidder {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        match self.phase {
            SniperPhase::Armed => {
                let wait = (self.fire - sim.now()).max(0.0);
                let jitter = if self.jitter_sd > 0.0 {
                    Normal::new(0.0, self.jitter_sd)
                        .unwrap()
                        .sample(&mut sim.rng)
                        .abs()
                } else {
                    0.0
                };
                self.phase = SniperPhase::Striking;
                Transition::WaitFor(wait + jitter)
            }
            SniperPhase::Striking => {
                let now = sim.now();
                let increment_rate = sim.world.config.increment_rate;
                let Some(live) = sim.world.live.as_ref() else {
                    return Transition::Done;
                };
                let min_next = live.state.min_next_price(increment_rate);

                if now < self.end && min_next <= self.valuation {
                    sim.world.queues.push(Strategy::Sniper, pid);
                    log::trace!("sniper queued at {} (valuation {:.2})", now, self.valuation);
                    self.phase = SniperPhase::Queued;
                    Transition::Passivate
                } else {
                    Transition::Done
                }
            }
            // A sniper never loops: one shot, then out.
            SniperPhase::Queued => Transition::Done,
        }
    }

    fn label(&self) -> &'static str {
        "sniper-bidder"
    }
}
