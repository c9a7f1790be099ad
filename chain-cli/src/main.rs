//! Command line front end for network bootstrap
//!
//! Finds a live node for the selected network and prints its base URL along
//! with the configuration read from it.
//!
//! Settings come from an optional TOML file, then `CHAIN_*` environment
//! variables, then the flags below.

use anyhow::{Context, Result};
use chain_core::{ActiveAddressParams, NetworkVariant};
use chain_network::{BootstrapSettings, NetworkConfig, NetworkState, ReqwestTransport};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chain-cli", version, about = "Connect to a live network node")]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, env = "CHAIN_SETTINGS_FILE")]
    config: Option<PathBuf>,

    /// Network to connect to: mainnet or devnet
    #[arg(short, long)]
    network: Option<NetworkVariant>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seed node to use instead of the built-in list (repeatable)
    #[arg(long = "seed", value_name = "HOST:PORT")]
    seeds: Vec<String>,

    /// Print the resulting configuration as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective settings and exit
    #[arg(long)]
    print_settings: bool,
}

impl Cli {
    fn settings(&self) -> Result<BootstrapSettings> {
        let mut settings = BootstrapSettings::load(self.config.as_deref())
            .context("failed to load settings")?;

        if let Some(network) = self.network {
            settings = settings.with_network(network);
        }
        if let Some(timeout) = self.timeout {
            settings = settings.with_request_timeout(Duration::from_secs(timeout));
        }
        if !self.seeds.is_empty() {
            settings = settings.with_seeds(self.seeds.clone());
        }

        settings.validate().map_err(anyhow::Error::msg)?;
        Ok(settings)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_summary(config: &NetworkConfig) {
    let identity = &config.identity;

    println!("Network:        {}", config.variant);
    println!("Base URL:       {}", config.base_url());
    println!("Nethash:        {}", identity.nethash);
    println!("Token:          {} ({})", identity.token, identity.symbol);
    println!("Explorer:       {}", identity.explorer);
    println!("Address byte:   {}", identity.address_version);
    println!(
        "Active peer:    {}:{} height {} version {}",
        config.active_peer.ip,
        config.active_peer.port,
        config.active_peer.height,
        config.active_peer.version
    );
    println!("Healthy peers:  {}", config.peer_list.len());
    println!("Fees:");
    for (label, coins) in config.fees.as_coins() {
        println!("  {:<16} {}", label, coins);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    if cli.print_settings {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let transport = ReqwestTransport::new(settings.request_timeout())?;
    let state = NetworkState::new(transport, settings);
    let address_params = ActiveAddressParams::new();

    let config = match state.activate(&address_params).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Unable to connect to blockchain: {}", e);
            return Err(e).context("unable to connect to blockchain, exiting");
        }
    };

    if let Some(params) = address_params.current() {
        tracing::debug!(
            "Address encoding set to version {} / WIF prefix {}",
            params.address_version,
            params.wif_prefix
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(config.as_ref())?);
    } else {
        print_summary(&config);
    }

    Ok(())
}
