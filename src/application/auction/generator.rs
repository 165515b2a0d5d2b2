//! Bidder generator
//!
//! Spawns the item's bidder population one at a time with small random
//! inter-arrival delays. The population size is drawn once per item; each
//! bidder's strategy is drawn from the configured mix.

use super::{AuctionWorld, priority};
use crate::application::agents::{AgentBidder, RatchetBidder, SniperBidder};
use crate::application::kernel::{Process, ProcessId, Sim, Transition};
use crate::application::simulation::SimulationConfig;
use crate::domain::Strategy;
use rand::prelude::*;
use rand_distr::{Distribution, Exp, Poisson};
use serde::{Deserialize, Serialize};

/// Configuration for bidder population generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Share of bidders following the agent strategy.
    pub agent_share: f64,
    /// Share of bidders following the ratchet strategy; the remainder snipe.
    pub ratchet_share: f64,
    /// Mean inter-arrival delay between bidder creations, in seconds.
    pub arrival_mean: f64,
    /// Exact population size, overriding the Poisson draw. Mainly for
    /// scenario runs and tests.
    pub fixed_population: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            agent_share: 0.40,
            ratchet_share: 0.25,
            arrival_mean: 0.5,
            fixed_population: None,
        }
    }
}

/// Staggered bidder spawner for one item.
pub struct BidderGenerator {
    remaining: u32,
}

impl BidderGenerator {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    /// Draw the bidder population for one item.
    pub fn population(config: &SimulationConfig, rng: &mut StdRng) -> u32 {
        if let Some(n) = config.generator.fixed_population {
            return n;
        }
        if config.mean_bidders <= 0.0 {
            return 0;
        }
        Poisson::new(config.mean_bidders).unwrap().sample(rng) as u32
    }
}

impl Process<AuctionWorld> for BidderGenerator {
    fn resume(&mut self, _pid: ProcessId, sim: &mut Sim<AuctionWorld>) -> Transition {
        if self.remaining == 0 {
            return Transition::Done;
        }
        let now = sim.now();

        let (process, strategy): (Box<dyn Process<AuctionWorld>>, Strategy) = {
            let Some(live) = sim.world.live.as_ref() else {
                return Transition::Done;
            };
            let config = &sim.world.config;
            let mix: f64 = sim.rng.r#gen();
            if mix < config.generator.agent_share {
                (
                    Box::new(AgentBidder::new(&live.state, &config.agents, &mut sim.rng)),
                    Strategy::Agent,
                )
            } else if mix < config.generator.agent_share + config.generator.ratchet_share {
                (
                    Box::new(RatchetBidder::new(
                        &live.state,
                        &config.ratchets,
                        &mut sim.rng,
                    )),
                    Strategy::Ratchet,
                )
            } else {
                (
                    Box::new(SniperBidder::new(
                        &live.state,
                        &config.snipers,
                        now,
                        &mut sim.rng,
                    )),
                    Strategy::Sniper,
                )
            }
        };

        log::trace!("spawning {} bidder at {}", strategy, now);
        let bidder = sim.spawn(process, now, priority::BIDDER);
        if let Some(live) = sim.world.live.as_mut() {
            live.children.push(bidder);
        }
        self.remaining -= 1;

        if self.remaining == 0 {
            return Transition::Done;
        }
        let arrival_mean = sim.world.config.generator.arrival_mean;
        let delay = if arrival_mean > 0.0 {
            Exp::new(1.0 / arrival_mean).unwrap().sample(&mut sim.rng)
        } else {
            0.0
        };
        Transition::WaitFor(delay)
    }

    fn label(&self) -> &'static str {
        "bidder-generator"
    }
}
