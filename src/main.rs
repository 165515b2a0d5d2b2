//! Batch entrypoint for the auction simulation.

use auction_abm::{FileBidLog, MemoryBidLog, SimulationConfig, SimulationRunner};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "auction-abm")]
#[command(about = "Agent-based model of sequential single-item auctions")]
struct Cli {
    /// Number of items to auction
    #[arg(long, default_value_t = 20)]
    items: u32,

    /// Mean bidder population per item
    #[arg(long, default_value_t = 12.0)]
    bidders: f64,

    /// Item duration in simulated seconds
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// First-bid timeout in seconds; 0 disables the early exit
    #[arg(long, default_value_t = 30.0)]
    first_bid_timeout: f64,

    /// Random seed; omitted means seeding from entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the per-bid CSV log; omitted means no file output
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimulationConfig {
        num_items: cli.items,
        mean_bidders: cli.bidders,
        item_duration: cli.duration,
        first_bid_timeout: cli.first_bid_timeout,
        seed: cli.seed,
        ..Default::default()
    };

    let sink: Box<dyn auction_abm::BidSink> = match &cli.log {
        Some(path) => Box::new(FileBidLog::create(path)),
        None => Box::new(MemoryBidLog::new()),
    };

    match SimulationRunner::new(config, sink).run() {
        Ok(metrics) => {
            print!("{}", metrics.summary());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("auction-abm: {err}");
            eprintln!(
                "usage: auction-abm [--items N] [--bidders N] [--duration SECS] \
                 [--first-bid-timeout SECS] [--seed SEED] [--log PATH]"
            );
            ExitCode::from(2)
        }
    }
}
