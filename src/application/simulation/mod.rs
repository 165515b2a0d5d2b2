//! Simulation orchestration: configuration, runner, and run metrics

mod config;
mod runner;

pub use config::SimulationConfig;
pub use runner::{RunMetrics, SimulationRunner};
