//! Bootstrap settings

use crate::seeds::SeedRegistry;
use crate::{NetworkError, NetworkResult};
use chain_core::NetworkVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix of environment variables overriding settings, e.g. `CHAIN_NETWORK`
pub const ENV_PREFIX: &str = "CHAIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    /// Network variant to bootstrap
    pub network: NetworkVariant,

    /// Upper bound for every node request, in milliseconds
    pub request_timeout_ms: u64,

    /// Seed override for `network` as `host:port` strings. Empty uses the
    /// built-in seeds.
    pub seeds: Vec<String>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            network: NetworkVariant::Mainnet,
            request_timeout_ms: 10_000,
            seeds: Vec::new(),
        }
    }
}

impl BootstrapSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an optional TOML file, then `CHAIN_*` environment variables
    pub fn load(path: Option<&Path>) -> NetworkResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("seeds"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate().map_err(NetworkError::Config)?;
        Ok(settings)
    }

    /// Set the network variant
    pub fn with_network(mut self, network: NetworkVariant) -> Self {
        self.network = network;
        self
    }

    /// Set the request timeout. A non-zero timeout below one millisecond is
    /// rounded up to one millisecond.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.request_timeout_ms = if millis == 0 && !timeout.is_zero() {
            1
        } else {
            millis
        };
        self
    }

    /// Override the seed list
    pub fn with_seeds(mut self, seeds: Vec<String>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Seeds to bootstrap `variant` from. The override only applies to the
    /// configured network; other variants use their built-in seeds.
    pub fn seed_registry(&self, variant: NetworkVariant) -> NetworkResult<SeedRegistry> {
        if self.seeds.is_empty() || variant != self.network {
            Ok(SeedRegistry::for_variant(variant))
        } else {
            SeedRegistry::from_strings(variant, &self.seeds)
        }
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> NetworkResult<String> {
        toml::to_string_pretty(self).map_err(|e| NetworkError::Config(e.to_string()))
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }

        if let Some(bad) = self
            .seeds
            .iter()
            .find(|s| s.parse::<chain_core::Endpoint>().is_err())
        {
            return Err(format!("Invalid seed endpoint '{}'", bad));
        }

        Ok(())
    }
}
