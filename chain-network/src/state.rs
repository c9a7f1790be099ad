//! Process-wide network configuration state

use crate::bootstrap::Bootstrapper;
use crate::config::NetworkConfig;
use crate::settings::BootstrapSettings;
use crate::transport::HttpTransport;
use crate::NetworkResult;
use chain_core::{AddressParamsSink, NetworkVariant};
use parking_lot::RwLock;
use std::sync::Arc;

/// Owns the active [`NetworkConfig`] snapshot.
///
/// Readers get an `Arc` to an immutable snapshot. A network switch builds the
/// replacement completely before publishing it with a single pointer swap, so
/// readers never observe a mix of two networks. A failed or cancelled switch
/// leaves the previous snapshot in place.
#[derive(Debug)]
pub struct NetworkState<T> {
    bootstrapper: Bootstrapper<T>,
    current: RwLock<Option<Arc<NetworkConfig>>>,
}

impl<T: HttpTransport> NetworkState<T> {
    /// Create an empty state; nothing is readable until the first switch
    pub fn new(transport: T, settings: BootstrapSettings) -> Self {
        Self {
            bootstrapper: Bootstrapper::new(transport, settings),
            current: RwLock::new(None),
        }
    }

    pub fn bootstrapper(&self) -> &Bootstrapper<T> {
        &self.bootstrapper
    }

    /// Current snapshot, if a network has been activated
    pub fn snapshot(&self) -> Option<Arc<NetworkConfig>> {
        self.current.read().clone()
    }

    /// Base URL of the active endpoint
    pub fn base_url(&self) -> Option<String> {
        self.current.read().as_ref().map(|config| config.base_url())
    }

    /// Bootstrap `variant`, publish the result and hand the address
    /// parameters to `sink`.
    pub async fn switch_network(
        &self,
        variant: NetworkVariant,
        sink: &dyn AddressParamsSink,
    ) -> NetworkResult<Arc<NetworkConfig>> {
        let config = Arc::new(self.bootstrapper.bootstrap(variant).await?);
        self.publish(config.clone(), sink);
        Ok(config)
    }

    /// Bootstrap the variant named in the settings
    pub async fn activate(&self, sink: &dyn AddressParamsSink) -> NetworkResult<Arc<NetworkConfig>> {
        let variant = self.bootstrapper.settings().network;
        self.switch_network(variant, sink).await
    }

    fn publish(&self, config: Arc<NetworkConfig>, sink: &dyn AddressParamsSink) {
        let params = config.address_params();
        let previous = self.current.write().replace(config);

        if let Some(previous) = previous {
            tracing::info!(
                "Replaced {} configuration ({})",
                previous.variant,
                previous.endpoint
            );
        }

        sink.apply(params);
    }
}
