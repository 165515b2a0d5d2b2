//! Agent-Based Model of sequential single-item auctions
//!
//! Simulates a sequence of auctions, each contested by stochastically
//! generated bidders following one of three behavioral strategies: the
//! aggressive agent, the incremental ratchet, and the last-moment sniper.
//! A cooperative discrete-event kernel drives the simulated clock; a
//! mutual-exclusion facility serializes price commits; per-strategy
//! arbitration pollers commit one bid at a time and wake every waiting
//! competitor before any of them re-decides.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-export key types at crate root
pub use application::simulation::{RunMetrics, SimulationConfig, SimulationRunner};
pub use domain::{BidRecord, ItemSummary, Strategy, WinnerStats};
pub use error::ConfigError;
pub use infrastructure::{BidSink, FileBidLog, MemoryBidLog, NullBidLog};
