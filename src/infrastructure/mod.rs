//! Infrastructure Layer
//!
//! Sinks consumed by the simulation core.

mod bid_log;

pub use bid_log::{BidSink, FileBidLog, MemoryBidLog, NullBidLog};
