//! Network bootstrap and peer selection
//!
//! This crate finds a live node for a network variant, reads the chain
//! identity and fee schedule from it, and refines the active peer using the
//! node's own peer directory. The result is published as an immutable
//! [`NetworkConfig`] snapshot owned by [`NetworkState`].

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod optimizer;
pub mod peer;
pub mod seeds;
pub mod settings;
pub mod state;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::{Bootstrapper, MAX_BOOTSTRAP_ATTEMPTS};
pub use config::{ChainParams, Fees, NetworkConfig, NetworkIdentity};
pub use error::{NetworkError, NetworkResult};
pub use fetcher::{ConfigFetcher, FetchedConfig};
pub use optimizer::{optimize, OptimizedPeers, MAX_HEIGHT_LAG};
pub use peer::{PeerDirectory, PeerRecord};
pub use seeds::SeedRegistry;
pub use settings::BootstrapSettings;
pub use state::NetworkState;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Re-export commonly used types
pub use chain_core::{AddressParams, AddressParamsSink, Endpoint, NetworkVariant};
