use chain_core::{ActiveAddressParams, NetworkVariant};
use chain_network::{optimize, BootstrapSettings, NetworkState, PeerRecord, ReqwestTransport};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("Network Bootstrap Demo");
    println!("======================");

    // 1. Offline: optimize a directory snapshot
    println!("1. Optimizing a sample peer directory...");
    let active = sample_peer("10.0.0.1", 100, "OK");
    let directory = vec![
        sample_peer("10.0.0.2", 100, "OK"),
        sample_peer("10.0.0.3", 115, "OK"),
        sample_peer("10.0.0.4", 50, "OK"),
        sample_peer("10.0.0.5", 114, "FAIL"),
    ];
    let optimized = optimize(&directory, &active, NetworkVariant::Mainnet);
    println!("   Surviving peers: {}", optimized.peers.len());
    println!(
        "   Active peer: {} at height {}",
        optimized.active_peer.endpoint(),
        optimized.active_peer.height
    );

    // 2. Online: bootstrap against the devnet seeds
    println!("2. Bootstrapping devnet...");
    let settings = BootstrapSettings::new()
        .with_network(NetworkVariant::Devnet)
        .with_request_timeout(Duration::from_secs(5));
    let transport = ReqwestTransport::new(settings.request_timeout())?;
    let state = NetworkState::new(transport, settings);
    let address_params = ActiveAddressParams::new();

    match state.activate(&address_params).await {
        Ok(config) => {
            println!("   Base URL: {}", config.base_url());
            println!("   Nethash: {}", config.identity.nethash);
            println!("   Healthy peers: {}", config.peer_list.len());
        }
        Err(e) => println!("   Bootstrap failed: {}", e),
    }

    Ok(())
}

fn sample_peer(ip: &str, height: u64, status: &str) -> PeerRecord {
    PeerRecord {
        ip: ip.to_string(),
        port: 4001,
        status: status.to_string(),
        version: "1.0.1".to_string(),
        height,
        os: None,
        delay: None,
    }
}
