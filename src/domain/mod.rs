//! Domain layer: Pure value objects

mod item;
mod time;

pub use item::{BidRecord, ItemState, ItemSummary, Strategy, WinnerStats};
pub use time::SimTime;
