//! Risedle CLI
//!
//! Command-line interface for Risedle snapshot data:
//! - NAV change per timeframe for leveraged tokens
//! - Market overview
//! - Vault history
//! - Default config generation

use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use std::path::PathBuf;

use risedle::api::dto::TimeframesResponse;
use risedle::config::{generate_default_config, Config};
use risedle::history::{fetch_historical_data, HistoricalData, Timeframe};
use risedle::logging::init_logging;
use risedle::snapshot::{SnapshotClient, SnapshotSource, KOVAN};

#[derive(Parser)]
#[command(name = "risedle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Leveraged token snapshots from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Chain id
    #[arg(long, default_value_t = KOVAN, global = true)]
    pub chain: u64,

    /// Snapshot endpoint override for the selected chain
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// NAV change over every timeframe
    Timeframes {
        /// Leveraged token addresses
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// List markets
    Markets,

    /// Hourly vault history
    VaultHistory {
        /// Vault address
        address: String,
        /// Only show the most recent N samples
        #[arg(short, long, default_value = "24")]
        last: usize,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    let level = if cli.verbose { "debug" } else { "warn" };
    config.logging.level = level.to_string();
    init_logging(&config.logging);

    let mut client_config = config.snapshot.client_config();
    if let Some(endpoint) = &cli.endpoint {
        client_config.endpoints.insert(cli.chain, endpoint);
    }
    let client = SnapshotClient::new(client_config)?;

    match cli.command {
        Commands::Timeframes { addresses } => {
            // Each token is an independent fetch
            let fetches = addresses
                .iter()
                .map(|address| fetch_historical_data(&client, cli.chain, address));
            let results = join_all(fetches).await;

            if cli.format == "json" {
                let mut output = serde_json::Map::new();
                for (address, data) in addresses.iter().zip(results) {
                    output.insert(
                        address.clone(),
                        serde_json::to_value(TimeframesResponse::from(data))?,
                    );
                }
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let mut failed = false;
                for (address, data) in addresses.iter().zip(&results) {
                    failed |= data.error.is_some();
                    print_timeframes(address, data);
                }
                if failed {
                    std::process::exit(1);
                }
            }
        }

        Commands::Markets => {
            let data = client.markets(cli.chain).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("AUM: ${:.2}   TVL: ${:.2}", data.aum, data.tvl);
                println!();
                println!(
                    "{:<44} {:>12} {:>10} {:>12} {:>12}",
                    "Leveraged Token", "NAV", "Change", "Borrow APY", "Supply APY"
                );
                println!("{}", "-".repeat(94));

                for market in &data.markets {
                    println!(
                        "{:<44} {:>12.4} {:>10} {:>11.2}% {:>11.2}%",
                        market.leveraged_token_address,
                        market.nav_last,
                        format_change(market.leveraged_token_price_change_percent),
                        market.vault_borrow_apy,
                        market.vault_supply_apy,
                    );
                }
            }
        }

        Commands::VaultHistory { address, last } => {
            let history = client.vault_history(cli.chain, &address).await?;
            let start = history.len().saturating_sub(last);
            let recent = &history[start..];

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(recent)?);
            } else if recent.is_empty() {
                println!("No vault history for {}", address);
            } else {
                println!(
                    "{:<26} {:>11} {:>11} {:>12} {:>16} {:>16}",
                    "Timestamp", "Borrow APY", "Supply APY", "Utilization", "Available", "Debt"
                );
                println!("{}", "-".repeat(97));

                for sample in recent {
                    println!(
                        "{:<26} {:>10.2}% {:>10.2}% {:>11.2}% {:>16.2} {:>16.2}",
                        sample.timestamp,
                        sample.borrow_apy,
                        sample.supply_apy,
                        sample.utilization_rate,
                        sample.total_available_cash,
                        sample.total_outstanding_debt,
                    );
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_timeframes(address: &str, data: &HistoricalData) {
    println!("{}", address);

    if let Some(error) = &data.error {
        eprintln!("  Failed to fetch history: {}", error);
        println!();
        return;
    }

    if !data.is_ready() {
        println!("  No history yet");
        println!();
        return;
    }

    println!(
        "  {:<6} {:>14} {:>14} {:>10} {:>8}",
        "Window", "Oldest NAV", "Latest NAV", "Change", "Samples"
    );

    for timeframe in Timeframe::ALL {
        if let Some(window) = data.window(timeframe) {
            println!(
                "  {:<6} {:>14.4} {:>14.4} {:>10} {:>8}",
                timeframe.label(),
                window.oldest_nav,
                window.latest_nav,
                format_change(window.change),
                window.len(),
            );
        }
    }
    println!();
}

/// Signed percent, or an em dash when the change is not a number
fn format_change(change: f64) -> String {
    if change.is_finite() {
        format!("{:+.2}%", change)
    } else {
        "—".to_string()
    }
}
