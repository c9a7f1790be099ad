//! Configuration fetcher
//!
//! Validates one candidate endpoint by reading, in order, its chain identity,
//! its fee schedule and the status record it reports for itself. Any failure
//! disqualifies the candidate; nothing fetched from it is kept.

use crate::config::{ChainParams, ParamsResponse};
use crate::peer::{PeerDirectory, PeerRecord};
use crate::transport::{get_json, HttpTransport};
use crate::NetworkResult;
use chain_core::Endpoint;
use std::time::Duration;

/// Path of the chain identity endpoint
pub const AUTOCONFIGURE_PATH: &str = "/api/loader/autoconfigure";

/// Path of the fee schedule endpoint
pub const FEES_PATH: &str = "/api/blocks/getfees";

/// Everything a validated candidate reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedConfig {
    pub endpoint: Endpoint,
    pub params: ChainParams,
    /// Status record the endpoint reports for itself
    pub active_peer: PeerRecord,
}

pub struct ConfigFetcher<'a, T: ?Sized> {
    transport: &'a T,
    timeout: Duration,
}

impl<'a, T: HttpTransport + ?Sized> ConfigFetcher<'a, T> {
    pub fn new(transport: &'a T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn fetch(&self, endpoint: &Endpoint) -> NetworkResult<FetchedConfig> {
        let mut params = ChainParams::default();

        let autoconfigure: ParamsResponse = get_json(
            self.transport,
            &endpoint.url(AUTOCONFIGURE_PATH),
            &[],
            self.timeout,
        )
        .await?;
        params.merge(autoconfigure);

        let fees: ParamsResponse =
            get_json(self.transport, &endpoint.url(FEES_PATH), &[], self.timeout).await?;
        params.merge(fees);

        let active_peer = PeerDirectory::new(self.transport, self.timeout)
            .peer_status(endpoint)
            .await?;

        Ok(FetchedConfig {
            endpoint: endpoint.clone(),
            params,
            active_peer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bodies, ScriptedTransport};
    use crate::NetworkError;

    const BASE: &str = "http://10.0.0.1:4001";

    fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("10.0.0.1", 4001)
    }

    fn healthy() -> ScriptedTransport {
        ScriptedTransport::new()
            .json(&url(AUTOCONFIGURE_PATH), &bodies::autoconfigure("6e84d08b", 23))
            .json(&url(FEES_PATH), &bodies::fees())
            .json(
                &url("/api/peers/get/"),
                &bodies::peer_status(&bodies::peer("10.0.0.1", 4001, "OK", "1.0.1", 2500)),
            )
    }

    #[tokio::test]
    async fn test_fetch_healthy_candidate() {
        let transport = healthy();
        let fetched = ConfigFetcher::new(&transport, Duration::from_secs(5))
            .fetch(&endpoint())
            .await
            .unwrap();

        assert!(fetched.params.success);
        assert_eq!(fetched.params.identity.nethash, "6e84d08b");
        assert_eq!(fetched.params.identity.address_version, 23);
        assert_eq!(fetched.params.fees.vote, 100_000_000);
        assert_eq!(fetched.active_peer.height, 2500);
        assert_eq!(fetched.endpoint, endpoint());

        assert_eq!(
            transport.urls(),
            vec![
                url(AUTOCONFIGURE_PATH),
                url(FEES_PATH),
                url("/api/peers/get/")
            ]
        );
    }

    #[tokio::test]
    async fn test_autoconfigure_failure_stops_fetch() {
        let transport = ScriptedTransport::new().json(&url(FEES_PATH), &bodies::fees());

        let result = ConfigFetcher::new(&transport, Duration::from_secs(5))
            .fetch(&endpoint())
            .await;

        assert!(matches!(result, Err(NetworkError::Transport(_))));
        assert_eq!(transport.urls(), vec![url(AUTOCONFIGURE_PATH)]);
    }

    #[tokio::test]
    async fn test_malformed_autoconfigure() {
        let transport = ScriptedTransport::new().json(&url(AUTOCONFIGURE_PATH), "{\"success\":");

        let err = ConfigFetcher::new(&transport, Duration::from_secs(5))
            .fetch(&endpoint())
            .await
            .unwrap_err();

        assert!(matches!(err, NetworkError::Decode(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_fees_disqualifies() {
        let transport = ScriptedTransport::new()
            .json(&url(AUTOCONFIGURE_PATH), &bodies::autoconfigure("6e84d08b", 23))
            .status(&url(FEES_PATH), 404, "not found");

        let result = ConfigFetcher::new(&transport, Duration::from_secs(5))
            .fetch(&endpoint())
            .await;

        assert!(matches!(
            result,
            Err(NetworkError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_peer_status_times_out() {
        let transport = ScriptedTransport::new()
            .json(&url(AUTOCONFIGURE_PATH), &bodies::autoconfigure("6e84d08b", 23))
            .json(&url(FEES_PATH), &bodies::fees())
            .hang(&url("/api/peers/get/"));

        let result = ConfigFetcher::new(&transport, Duration::from_secs(1))
            .fetch(&endpoint())
            .await;

        assert!(matches!(result, Err(NetworkError::Timeout)));
    }
}
