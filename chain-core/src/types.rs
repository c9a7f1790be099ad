//! Basic network types

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest currency units per whole coin
pub const SATOSHI: u64 = 100_000_000;

/// Block height type (64-bit unsigned integer)
pub type BlockHeight = u64;

/// Amount in the smallest currency unit
pub type Amount = u64;

/// Network variant the client is bootstrapped against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkVariant {
    /// Primary network
    #[default]
    #[serde(alias = "primary")]
    Mainnet,
    /// Test network
    #[serde(alias = "test", alias = "testnet")]
    Devnet,
}

impl NetworkVariant {
    /// Peer software version accepted by the version gate
    pub fn expected_peer_version(&self) -> &'static str {
        match self {
            NetworkVariant::Mainnet => "1.0.1",
            NetworkVariant::Devnet => "1.1.0",
        }
    }

    /// Private key (WIF) prefix byte
    pub fn wif_prefix(&self) -> u8 {
        match self {
            NetworkVariant::Mainnet => 170,
            NetworkVariant::Devnet => 239,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkVariant::Mainnet => "mainnet",
            NetworkVariant::Devnet => "devnet",
        }
    }
}

impl fmt::Display for NetworkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "primary" => Ok(NetworkVariant::Mainnet),
            "devnet" | "testnet" | "test" => Ok(NetworkVariant::Devnet),
            other => Err(CoreError::UnknownNetwork(other.to_string())),
        }
    }
}

/// A node endpoint identified by host and port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL used for API calls, `http://host:port`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full URL for an API path on this endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let without_scheme = trimmed.strip_prefix("http://").unwrap_or(trimmed);
        let (host, port) = without_scheme
            .rsplit_once(':')
            .ok_or_else(|| CoreError::InvalidEndpoint(format!("missing port in '{}'", s)))?;

        if host.is_empty() {
            return Err(CoreError::InvalidEndpoint(format!("missing host in '{}'", s)));
        }

        let port = port
            .parse::<u16>()
            .map_err(|e| CoreError::InvalidEndpoint(format!("bad port in '{}': {}", s, e)))?;

        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for Endpoint {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.to_string()
    }
}

/// Convert an amount in the smallest unit into whole coins for display
pub fn to_coins(amount: Amount) -> f64 {
    amount as f64 / SATOSHI as f64
}
