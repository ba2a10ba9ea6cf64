//! Cross-chain arbitrage monitor
//!
//! Main entry point: loads env-driven configuration, wires the OKX quote
//! client into the path calculator and opportunity selector, and runs the
//! evaluation loop until Ctrl+C. `--once` runs a single cycle and exits.

use anyhow::Result;
use clap::Parser;
use interchain_arb::arbitrage::{OpportunitySelector, PathCalculator};
use interchain_arb::config::load_config;
use interchain_arb::monitor::Monitor;
use interchain_arb::okx::OkxDexClient;
use tokio::sync::watch;
use tracing::{info, Level};

/// Cross-Chain Arbitrage Monitor - BSC/Solana via OKX DEX aggregator
#[derive(Parser)]
#[command(name = "interchain-arb")]
struct Args {
    /// Run a single evaluation cycle and exit
    #[arg(long)]
    once: bool,

    /// Alternate .env file to load before reading configuration
    #[arg(long, env = "ENV_FILE")]
    env_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Some(path) = &args.env_file {
        dotenv::from_filename(path).ok();
    }

    // Configuration failures are fatal before any cycle runs
    let config = load_config()?;

    info!("Cross-chain arbitrage monitor starting...");
    info!(
        "Token pair: {} / {}",
        config.base_token.symbol, config.quote_token.symbol
    );
    info!("Initial amount: ${}", config.params.initial_amount_usd);
    info!("Profit threshold: ${}", config.params.profit_threshold_usd);
    info!("Slippage tolerance: {}%", config.params.slippage_tolerance);
    info!("Evaluation interval: {:?}", config.params.poll_interval);

    let quotes = OkxDexClient::new(config.okx.clone(), config.params.slippage_tolerance);
    let calculator = PathCalculator::new(
        quotes,
        config.base_token.clone(),
        config.quote_token.clone(),
        config.params.clone(),
    );
    let selector = OpportunitySelector::new(calculator, config.params.clone());
    let monitor = Monitor::new(selector, config.params.poll_interval);

    if args.once {
        monitor.run_once().await;
        return Ok(());
    }

    // Ctrl+C feeds the shutdown token; the monitor finishes the current
    // cycle and stops between cycles
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    info!("Press Ctrl+C to stop monitoring");
    monitor.run(shutdown_rx).await;

    Ok(())
}
