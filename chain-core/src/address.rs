//! Address encoding parameters

use crate::NetworkVariant;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Version bytes used by address and private-key encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParams {
    /// Address version byte reported by the network
    pub address_version: u8,
    /// Dumped private key (WIF) prefix byte
    pub wif_prefix: u8,
}

impl AddressParams {
    /// Build parameters for a variant. The WIF prefix always comes from the
    /// variant so the two bytes can never be mixed across networks.
    pub fn for_variant(variant: NetworkVariant, address_version: u8) -> Self {
        Self {
            address_version,
            wif_prefix: variant.wif_prefix(),
        }
    }
}

/// Receiver of address parameters whenever the active network changes
pub trait AddressParamsSink: Send + Sync {
    /// Apply a new parameter snapshot
    fn apply(&self, params: AddressParams);
}

/// Holds the most recently applied address parameters
#[derive(Debug, Default)]
pub struct ActiveAddressParams {
    current: RwLock<Option<AddressParams>>,
}

impl ActiveAddressParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters currently in effect, if any network was activated
    pub fn current(&self) -> Option<AddressParams> {
        *self.current.read()
    }
}

impl AddressParamsSink for ActiveAddressParams {
    fn apply(&self, params: AddressParams) {
        *self.current.write() = Some(params);
    }
}
