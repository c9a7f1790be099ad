//! Seed node registry
//!
//! Hardcoded, per-variant node endpoints used only to find a first live node.

use crate::{NetworkError, NetworkResult};
use chain_core::{Endpoint, NetworkVariant};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Mainnet seed nodes
pub const MAINNET_SEEDS: &[(&str, u16)] = &[
    ("5.39.9.240", 4001),
    ("5.39.9.241", 4001),
    ("5.39.9.242", 4001),
    ("5.39.9.243", 4001),
    ("5.39.9.244", 4001),
    ("5.39.9.250", 4001),
    ("5.39.9.251", 4001),
    ("5.39.9.252", 4001),
    ("5.39.9.253", 4001),
    ("5.39.9.254", 4001),
    ("5.39.9.255", 4001),
    ("5.39.53.48", 4001),
    ("5.39.53.49", 4001),
    ("5.39.53.50", 4001),
    ("5.39.53.51", 4001),
    ("5.39.53.52", 4001),
    ("5.39.53.53", 4001),
    ("5.39.53.54", 4001),
    ("5.39.53.55", 4001),
    ("37.59.129.160", 4001),
    ("37.59.129.161", 4001),
    ("37.59.129.162", 4001),
    ("37.59.129.163", 4001),
    ("37.59.129.164", 4001),
    ("37.59.129.165", 4001),
    ("37.59.129.166", 4001),
    ("37.59.129.167", 4001),
    ("37.59.129.168", 4001),
    ("37.59.129.169", 4001),
    ("37.59.129.170", 4001),
    ("37.59.129.171", 4001),
    ("37.59.129.172", 4001),
    ("37.59.129.173", 4001),
    ("37.59.129.174", 4001),
    ("37.59.129.175", 4001),
    ("193.70.72.80", 4001),
    ("193.70.72.81", 4001),
    ("193.70.72.82", 4001),
    ("193.70.72.83", 4001),
    ("193.70.72.84", 4001),
    ("193.70.72.85", 4001),
    ("193.70.72.86", 4001),
    ("193.70.72.87", 4001),
    ("193.70.72.88", 4001),
    ("193.70.72.89", 4001),
    ("193.70.72.90", 4001),
];

/// Devnet seed nodes
pub const DEVNET_SEEDS: &[(&str, u16)] = &[
    ("167.114.43.48", 4002),
    ("167.114.29.49", 4002),
    ("167.114.43.43", 4002),
    ("167.114.29.54", 4002),
    ("167.114.29.45", 4002),
    ("167.114.29.40", 4002),
    ("167.114.29.56", 4002),
    ("167.114.43.35", 4002),
    ("167.114.29.51", 4002),
    ("167.114.29.59", 4002),
    ("167.114.43.42", 4002),
    ("167.114.29.34", 4002),
    ("167.114.29.62", 4002),
    ("167.114.43.49", 4002),
    ("167.114.29.44", 4002),
    ("167.114.43.37", 4002),
    ("167.114.29.63", 4002),
    ("167.114.29.42", 4002),
    ("167.114.29.48", 4002),
    ("167.114.29.61", 4002),
    ("167.114.43.36", 4002),
    ("167.114.29.57", 4002),
    ("167.114.43.33", 4002),
    ("167.114.29.52", 4002),
    ("167.114.29.50", 4002),
    ("167.114.43.47", 4002),
    ("167.114.29.47", 4002),
    ("167.114.29.36", 4002),
    ("167.114.29.35", 4002),
    ("167.114.43.39", 4002),
    ("167.114.43.45", 4002),
    ("167.114.29.46", 4002),
    ("167.114.29.41", 4002),
    ("167.114.43.34", 4002),
    ("167.114.29.43", 4002),
    ("167.114.43.41", 4002),
    ("167.114.29.60", 4002),
    ("167.114.43.32", 4002),
    ("167.114.29.55", 4002),
    ("167.114.29.53", 4002),
    ("167.114.29.38", 4002),
    ("167.114.43.40", 4002),
    ("167.114.29.32", 4002),
    ("167.114.43.46", 4002),
    ("167.114.43.38", 4002),
    ("167.114.29.33", 4002),
    ("167.114.43.44", 4002),
    ("167.114.43.50", 4002),
    ("167.114.29.37", 4002),
    ("167.114.29.58", 4002),
    ("167.114.29.39", 4002),
];

/// Candidate endpoints for one network variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    variant: NetworkVariant,
    endpoints: Vec<Endpoint>,
}

impl SeedRegistry {
    /// Built-in seeds for a variant
    pub fn for_variant(variant: NetworkVariant) -> Self {
        let table = match variant {
            NetworkVariant::Mainnet => MAINNET_SEEDS,
            NetworkVariant::Devnet => DEVNET_SEEDS,
        };

        Self {
            variant,
            endpoints: table
                .iter()
                .map(|(host, port)| Endpoint::new(*host, *port))
                .collect(),
        }
    }

    /// Parse seeds from `host:port` strings
    pub fn from_strings(variant: NetworkVariant, seeds: &[String]) -> NetworkResult<Self> {
        let endpoints = seeds
            .iter()
            .map(|s| {
                s.parse::<Endpoint>()
                    .map_err(|e| NetworkError::InvalidEndpoint(format!("seed '{}': {}", s, e)))
            })
            .collect::<NetworkResult<Vec<_>>>()?;

        if endpoints.is_empty() {
            return Err(NetworkError::Config(format!(
                "no seed nodes configured for {}",
                variant
            )));
        }

        Ok(Self { variant, endpoints })
    }

    pub fn variant(&self) -> NetworkVariant {
        self.variant
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.endpoints.contains(endpoint)
    }

    /// Draw a uniformly random seed. Draws are independent of earlier ones.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Endpoint> {
        self.endpoints.choose(rng)
    }
}
