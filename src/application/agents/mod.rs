//! Bidder agents
//!
//! The three stochastic bidder processes contesting each item:
//!
//! - **AgentBidder**: aggressive, enters in a tail window before close
//! - **RatchetBidder**: incremental, occasionally irrational
//! - **SniperBidder**: single shot just before close
//!
//! Agent and ratchet bidders share the decaying patience model that drives
//! their decision timing.

mod agent;
mod patience;
mod ratchet;
mod sniper;

pub use agent::{AgentBidder, AgentBidderConfig};
pub use patience::{Patience, PatienceConfig};
pub use ratchet::{RatchetBidder, RatchetBidderConfig};
pub use sniper::{SniperBidder, SniperBidderConfig};
