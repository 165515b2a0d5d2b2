use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Number of items must be positive (got {0})")]
    InvalidItemCount(u32),

    #[error("Item duration must be positive (got {0})")]
    InvalidDuration(f64),

    #[error("Mean bidders per item must be non-negative (got {0})")]
    InvalidBidderCount(f64),

    #[error("First-bid timeout must be non-negative (got {0})")]
    InvalidTimeout(f64),

    #[error("Increment rate must be in (0, 1) (got {0})")]
    InvalidIncrementRate(f64),

    #[error("Poll interval must be positive (got {0})")]
    InvalidPollInterval(f64),

    #[error("Value scale must be positive (got {0})")]
    InvalidValueScale(f64),

    #[error("Inter-item delay must be non-negative (got {0})")]
    InvalidInterItemDelay(f64),

    #[error("Strategy shares must be in [0, 1] and sum to at most 1 (got agent={agent}, ratchet={ratchet})")]
    InvalidStrategyMix { agent: f64, ratchet: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
