//! Bootstrap loop
//!
//! Draws random seeds until one serves a complete configuration, then refines
//! the active peer from that node's peer directory.

use crate::config::NetworkConfig;
use crate::fetcher::{ConfigFetcher, FetchedConfig};
use crate::optimizer::optimize;
use crate::peer::PeerDirectory;
use crate::settings::BootstrapSettings;
use crate::transport::HttpTransport;
use crate::{NetworkError, NetworkResult};
use chain_core::NetworkVariant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of seeds tried before giving up
pub const MAX_BOOTSTRAP_ATTEMPTS: usize = 10;

/// Runs the seed retry loop and peer optimization over a transport
#[derive(Debug)]
pub struct Bootstrapper<T> {
    transport: T,
    settings: BootstrapSettings,
}

impl<T: HttpTransport> Bootstrapper<T> {
    pub fn new(transport: T, settings: BootstrapSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bootstrap `variant` into a complete configuration snapshot.
    ///
    /// Fails only with [`NetworkError::ExhaustedRetries`] once every attempt
    /// was used, or with a settings error before any request is made.
    pub async fn bootstrap(&self, variant: NetworkVariant) -> NetworkResult<NetworkConfig> {
        let mut rng = StdRng::from_os_rng();
        self.bootstrap_with_rng(variant, &mut rng).await
    }

    /// [`bootstrap`](Self::bootstrap) with a caller supplied random source
    pub async fn bootstrap_with_rng<R: Rng + Send>(
        &self,
        variant: NetworkVariant,
        rng: &mut R,
    ) -> NetworkResult<NetworkConfig> {
        let FetchedConfig {
            endpoint,
            params,
            active_peer,
        } = self.find_seed(variant, rng).await?;

        let directory = PeerDirectory::new(&self.transport, self.settings.request_timeout());
        let listed = directory
            .list_peers(&endpoint, &params.identity.nethash, &active_peer)
            .await;

        let (endpoint, active_peer, peer_list) = match listed {
            Ok(candidates) => {
                let optimized = optimize(&candidates, &active_peer, variant);
                if optimized.promoted {
                    tracing::info!(
                        "Setting new active peer {} at height {}",
                        optimized.active_peer.endpoint(),
                        optimized.active_peer.height
                    );
                    (
                        optimized.active_peer.endpoint(),
                        optimized.active_peer,
                        optimized.peers,
                    )
                } else {
                    (endpoint, active_peer, optimized.peers)
                }
            }
            Err(e) => {
                let degraded = NetworkError::DegradedOptimization(e.to_string());
                tracing::warn!("Keeping seed {}: {}", endpoint, degraded);
                (endpoint, active_peer, Vec::new())
            }
        };

        Ok(NetworkConfig {
            success: params.success,
            identity: params.identity,
            fees: params.fees,
            variant,
            endpoint,
            active_peer,
            peer_list,
        })
    }

    /// Draw random seeds until one validates, up to [`MAX_BOOTSTRAP_ATTEMPTS`].
    ///
    /// Transport and decode failures are absorbed here; a failed seed may be
    /// drawn again.
    pub async fn find_seed<R: Rng + Send>(
        &self,
        variant: NetworkVariant,
        rng: &mut R,
    ) -> NetworkResult<FetchedConfig> {
        let registry = self.settings.seed_registry(variant)?;
        let timeout = self.settings.request_timeout();
        if timeout.is_zero() {
            return Err(NetworkError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        let fetcher = ConfigFetcher::new(&self.transport, timeout);

        tracing::info!(
            "Active network is {}, {} seeds known",
            variant,
            registry.len()
        );

        for attempt in 1..=MAX_BOOTSTRAP_ATTEMPTS {
            let Some(candidate) = registry.pick(&mut *rng) else {
                break;
            };
            tracing::debug!(
                "Attempt {}/{}: random seed selected {}",
                attempt,
                MAX_BOOTSTRAP_ATTEMPTS,
                candidate
            );

            match fetcher.fetch(candidate).await {
                Ok(fetched) => {
                    tracing::info!("Connected to seed {}", candidate);
                    return Ok(fetched);
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!("Discarding seed {}: {}", candidate, e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(NetworkError::ExhaustedRetries {
            variant,
            attempts: MAX_BOOTSTRAP_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{AUTOCONFIGURE_PATH, FEES_PATH};
    use crate::testing::{bodies, ScriptedTransport};
    use chain_core::Endpoint;
    use std::time::Duration;

    fn settings(seeds: &[&str]) -> BootstrapSettings {
        BootstrapSettings::new().with_seeds(seeds.iter().map(|s| s.to_string()).collect())
    }

    /// Script a seed that serves identity, fees and its own status
    fn serve_seed(transport: ScriptedTransport, host: &str, port: u16, height: u64) -> ScriptedTransport {
        let base = format!("http://{}:{}", host, port);
        transport
            .json(
                &format!("{}{}", base, AUTOCONFIGURE_PATH),
                &bodies::autoconfigure("6e84d08b", 23),
            )
            .json(&format!("{}{}", base, FEES_PATH), &bodies::fees())
            .json(
                &format!("{}/api/peers/get/", base),
                &bodies::peer_status(&bodies::peer(host, port, "OK", "1.0.1", height)),
            )
    }

    #[tokio::test]
    async fn test_all_seeds_dead_exhausts_budget() {
        let bootstrapper = Bootstrapper::new(
            ScriptedTransport::new(),
            settings(&["10.0.0.1:4001", "10.0.0.2:4001"]),
        );
        let mut rng = StdRng::seed_from_u64(1);

        let result = bootstrapper
            .bootstrap_with_rng(NetworkVariant::Mainnet, &mut rng)
            .await;

        assert!(matches!(
            result,
            Err(NetworkError::ExhaustedRetries {
                variant: NetworkVariant::Mainnet,
                attempts: MAX_BOOTSTRAP_ATTEMPTS
            })
        ));

        let urls = bootstrapper.transport().urls();
        assert_eq!(urls.len(), MAX_BOOTSTRAP_ATTEMPTS);
        assert!(urls.iter().all(|u| u.ends_with(AUTOCONFIGURE_PATH)));
    }

    #[tokio::test]
    async fn test_promotes_higher_peer_from_directory() {
        let peers = vec![
            bodies::peer("10.0.0.7", 4001, "OK", "1.0.1", 100),
            bodies::peer("10.0.0.8", 4001, "OK", "1.0.1", 115),
            bodies::peer("10.0.0.9", 4001, "OK", "1.0.1", 50),
            bodies::peer("10.0.0.10", 4001, "FAIL", "1.0.1", 114),
        ];
        let transport = serve_seed(ScriptedTransport::new(), "10.0.0.1", 4001, 100)
            .json("http://10.0.0.1:4001/api/peers", &bodies::peers(&peers));

        let bootstrapper = Bootstrapper::new(transport, settings(&["10.0.0.1:4001"]));
        let config = bootstrapper.bootstrap(NetworkVariant::Mainnet).await.unwrap();

        assert_eq!(config.endpoint, Endpoint::new("10.0.0.8", 4001));
        assert_eq!(config.base_url(), "http://10.0.0.8:4001");
        assert_eq!(config.active_peer.height, 115);
        assert_eq!(config.peer_list.len(), 1);
        assert_eq!(config.identity.nethash, "6e84d08b");
        assert_eq!(config.fees.send, 10_000_000);
        assert!(config.success);

        let calls = bootstrapper.transport().calls();
        let directory_call = calls
            .iter()
            .find(|c| c.url == "http://10.0.0.1:4001/api/peers")
            .unwrap();
        assert!(directory_call
            .query
            .contains(&("nethash".to_string(), "6e84d08b".to_string())));
    }

    #[tokio::test]
    async fn test_directory_failure_keeps_seed() {
        let transport = serve_seed(ScriptedTransport::new(), "10.0.0.1", 4001, 321);
        let bootstrapper = Bootstrapper::new(transport, settings(&["10.0.0.1:4001"]));

        let config = bootstrapper.bootstrap(NetworkVariant::Mainnet).await.unwrap();

        assert_eq!(config.endpoint, Endpoint::new("10.0.0.1", 4001));
        assert_eq!(config.active_peer.ip, "10.0.0.1");
        assert_eq!(config.active_peer.height, 321);
        assert!(config.peer_list.is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_self_status_disqualifies_seed() {
        let transport = ScriptedTransport::new()
            .json(
                &format!("http://10.0.0.1:4001{}", AUTOCONFIGURE_PATH),
                &bodies::autoconfigure("6e84d08b", 23),
            )
            .json(&format!("http://10.0.0.1:4001{}", FEES_PATH), &bodies::fees())
            .json(
                "http://10.0.0.1:4001/api/peers/get/",
                &bodies::peer_status(&bodies::peer("10.0.0.1", 4001, "EUNAVAILABLE", "1.0.1", 1)),
            );
        let bootstrapper = Bootstrapper::new(transport, settings(&["10.0.0.1:4001"]));

        let result = bootstrapper.bootstrap(NetworkVariant::Mainnet).await;
        assert!(matches!(result, Err(NetworkError::ExhaustedRetries { .. })));
    }

    #[tokio::test]
    async fn test_skips_dead_seed() {
        let mut successes = 0;

        for seed in 0..8u64 {
            let transport = serve_seed(
                ScriptedTransport::new().json(
                    &format!("http://10.0.0.1:4001{}", AUTOCONFIGURE_PATH),
                    "<html>502 Bad Gateway</html>",
                ),
                "10.0.0.2",
                4001,
                10,
            );
            let bootstrapper =
                Bootstrapper::new(transport, settings(&["10.0.0.1:4001", "10.0.0.2:4001"]));
            let mut rng = StdRng::seed_from_u64(seed);

            match bootstrapper
                .bootstrap_with_rng(NetworkVariant::Mainnet, &mut rng)
                .await
            {
                Ok(config) => {
                    successes += 1;
                    assert_eq!(config.endpoint, Endpoint::new("10.0.0.2", 4001));
                    // Nothing from the dead seed beyond its autoconfigure call
                    let urls = bootstrapper.transport().urls();
                    assert!(urls
                        .iter()
                        .filter(|u| u.starts_with("http://10.0.0.1:4001"))
                        .all(|u| u.ends_with(AUTOCONFIGURE_PATH)));
                }
                Err(e) => assert!(matches!(e, NetworkError::ExhaustedRetries { .. })),
            }
        }

        assert!(successes > 0);
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected_before_any_request() {
        let transport = serve_seed(ScriptedTransport::new(), "10.0.0.1", 4001, 10);
        let bootstrapper = Bootstrapper::new(
            transport,
            settings(&["10.0.0.1:4001"]).with_request_timeout(Duration::ZERO),
        );

        let result = bootstrapper.bootstrap(NetworkVariant::Mainnet).await;
        assert!(matches!(result, Err(NetworkError::Config(_))));
        assert!(bootstrapper.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_seed_override_is_not_retried() {
        let bootstrapper = Bootstrapper::new(ScriptedTransport::new(), settings(&["bogus"]));
        let result = bootstrapper.bootstrap(NetworkVariant::Mainnet).await;

        assert!(matches!(result, Err(NetworkError::InvalidEndpoint(_))));
        assert!(bootstrapper.transport().calls().is_empty());
    }
}
