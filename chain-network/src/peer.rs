//! Peer records and the peer directory client

use crate::transport::{get_json, HttpTransport};
use crate::{NetworkError, NetworkResult};
use chain_core::{BlockHeight, Endpoint};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path of the full peer directory
pub const PEERS_PATH: &str = "/api/peers";

/// Path of the single peer status lookup
pub const PEER_STATUS_PATH: &str = "/api/peers/get/";

/// Status string of a healthy peer
pub const STATUS_OK: &str = "OK";

/// One entry of a node's peer directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub ip: String,
    pub port: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub height: BlockHeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Round-trip delay reported by the directory, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
}

impl PeerRecord {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.ip.clone(), self.port)
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Body of `/api/peers/get/`
#[derive(Debug, Clone, Deserialize)]
pub struct PeerStatusResponse {
    #[serde(default)]
    pub success: bool,
    pub peer: Option<PeerRecord>,
    pub error: Option<String>,
}

impl PeerStatusResponse {
    /// The reported peer, provided it is present and healthy
    pub fn into_ok_peer(self, endpoint: &Endpoint) -> NetworkResult<PeerRecord> {
        let peer = self.peer.ok_or_else(|| {
            NetworkError::PeerUnavailable(format!(
                "{} did not report its own status: {}",
                endpoint,
                self.error.as_deref().unwrap_or("no peer in response")
            ))
        })?;

        if !peer.is_ok() {
            return Err(NetworkError::PeerUnavailable(format!(
                "{} reports status '{}'",
                endpoint, peer.status
            )));
        }

        Ok(peer)
    }
}

/// Body of `/api/peers`
#[derive(Debug, Clone, Deserialize)]
pub struct PeersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub peers: Vec<PeerRecord>,
    pub error: Option<String>,
}

/// Client for a node's peer directory
pub struct PeerDirectory<'a, T: ?Sized> {
    transport: &'a T,
    timeout: Duration,
}

impl<'a, T: HttpTransport + ?Sized> PeerDirectory<'a, T> {
    pub fn new(transport: &'a T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// List every peer known to `endpoint`.
    ///
    /// The request is tagged with the chain hash and the active peer's
    /// version and port so the node can check protocol compatibility.
    pub async fn list_peers(
        &self,
        endpoint: &Endpoint,
        nethash: &str,
        active_peer: &PeerRecord,
    ) -> NetworkResult<Vec<PeerRecord>> {
        let url = endpoint.url(PEERS_PATH);
        let query = [
            ("nethash", nethash.to_string()),
            ("version", active_peer.version.clone()),
            ("port", active_peer.port.to_string()),
        ];

        let response: PeersResponse = get_json(self.transport, &url, &query, self.timeout).await?;
        if !response.success {
            return Err(NetworkError::Decode(format!(
                "peer directory at {} reported failure: {}",
                endpoint,
                response.error.as_deref().unwrap_or("unknown error")
            )));
        }

        tracing::debug!("{} reported {} peers", endpoint, response.peers.len());
        Ok(response.peers)
    }

    /// Status record `endpoint` reports for itself
    pub async fn peer_status(&self, endpoint: &Endpoint) -> NetworkResult<PeerRecord> {
        let url = endpoint.url(PEER_STATUS_PATH);
        let query = [
            ("ip", endpoint.host().to_string()),
            ("port", endpoint.port().to_string()),
        ];

        let response: PeerStatusResponse =
            get_json(self.transport, &url, &query, self.timeout).await?;
        response.into_ok_peer(endpoint)
    }
}
