//! Application layer: Use cases and orchestration
//!
//! Contains:
//! - **kernel**: Cooperative discrete-event scheduler
//! - **agents**: The three bidder strategy processes
//! - **auction**: Auction loop, item lifecycle, arbitration, facilities
//! - **simulation**: Configuration, runner, and metrics

pub mod agents;
pub mod auction;
pub mod kernel;
pub mod simulation;
