//! Auction concurrency protocol
//!
//! The domain processes scheduled on the kernel: the auction loop, the item
//! lifecycle, the bidder generator, the first-bid timeout, and the per-
//! strategy arbitration pollers, together with the shared world they mutate
//! (facilities, decision queues, open item, statistics).

mod arbitration;
mod facility;
mod generator;
mod item;
mod queues;
mod run_loop;
mod timeout;
mod world;

pub use arbitration::ArbitrationPoller;
pub use facility::Facility;
pub use generator::{BidderGenerator, GeneratorConfig};
pub use item::AuctionItemProcess;
pub use queues::DecisionQueues;
pub use run_loop::AuctionLoop;
pub use timeout::FirstBidTimeout;
pub use world::{AuctionWorld, LiveItem};

pub(crate) use item::close_item;

/// Same-instant resume ordering: control events (auction loop, item close)
/// run before the timeout, the generator before ordinary processes, pollers
/// before the bidders they wake.
pub mod priority {
    pub const CONTROL: i8 = 0;
    pub const TIMEOUT: i8 = 1;
    pub const GENERATOR: i8 = 2;
    pub const POLLER: i8 = 3;
    pub const BIDDER: i8 = 4;
}
