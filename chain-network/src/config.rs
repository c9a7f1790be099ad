//! Network configuration read from live nodes

use crate::peer::PeerRecord;
use chain_core::{to_coins, AddressParams, Amount, Endpoint, NetworkVariant};
use serde::{Deserialize, Serialize};

/// Chain identity reported by `/api/loader/autoconfigure`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub nethash: String,
    pub token: String,
    pub symbol: String,
    pub explorer: String,
    /// Address generator version byte
    pub address_version: u8,
}

/// Fee schedule, in the smallest currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    pub send: Amount,
    pub vote: Amount,
    pub second_signature: Amount,
    pub delegate: Amount,
    pub multi_signature: Amount,
}

impl Fees {
    /// Each fee labelled and converted to whole coins
    pub fn as_coins(&self) -> [(&'static str, f64); 5] {
        [
            ("send", to_coins(self.send)),
            ("vote", to_coins(self.vote)),
            ("second signature", to_coins(self.second_signature)),
            ("delegate", to_coins(self.delegate)),
            ("multi signature", to_coins(self.multi_signature)),
        ]
    }
}

/// Partial identity as it appears on the wire. Absent fields leave the
/// previously merged value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityPatch {
    pub nethash: Option<String>,
    pub token: Option<String>,
    pub symbol: Option<String>,
    pub explorer: Option<String>,
    pub version: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeesPatch {
    pub send: Option<Amount>,
    pub vote: Option<Amount>,
    #[serde(rename = "secondsignature")]
    pub second_signature: Option<Amount>,
    pub delegate: Option<Amount>,
    #[serde(rename = "multisignature")]
    pub multi_signature: Option<Amount>,
}

/// Body shared by the autoconfigure and fee endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamsResponse {
    pub success: Option<bool>,
    pub network: Option<IdentityPatch>,
    pub fees: Option<FeesPatch>,
}

/// Identity and fees accumulated from one candidate's responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub success: bool,
    pub identity: NetworkIdentity,
    pub fees: Fees,
}

impl ChainParams {
    /// Merge a response into the accumulated parameters
    pub fn merge(&mut self, response: ParamsResponse) {
        if let Some(success) = response.success {
            self.success = success;
        }

        if let Some(network) = response.network {
            let identity = &mut self.identity;
            if let Some(nethash) = network.nethash {
                identity.nethash = nethash;
            }
            if let Some(token) = network.token {
                identity.token = token;
            }
            if let Some(symbol) = network.symbol {
                identity.symbol = symbol;
            }
            if let Some(explorer) = network.explorer {
                identity.explorer = explorer;
            }
            if let Some(version) = network.version {
                identity.address_version = version;
            }
        }

        if let Some(fees) = response.fees {
            let current = &mut self.fees;
            current.send = fees.send.unwrap_or(current.send);
            current.vote = fees.vote.unwrap_or(current.vote);
            current.second_signature = fees.second_signature.unwrap_or(current.second_signature);
            current.delegate = fees.delegate.unwrap_or(current.delegate);
            current.multi_signature = fees.multi_signature.unwrap_or(current.multi_signature);
        }
    }
}

/// Complete, immutable view of the network the client is bound to.
///
/// A snapshot is built in full by the bootstrap and published in one step; it
/// is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// `success` flag reported by the node's configuration response
    pub success: bool,
    pub identity: NetworkIdentity,
    pub fees: Fees,
    pub variant: NetworkVariant,
    /// Endpoint further API calls should go to
    pub endpoint: Endpoint,
    pub active_peer: PeerRecord,
    /// Peers that passed optimization. Empty when the directory was unavailable.
    pub peer_list: Vec<PeerRecord>,
}

impl NetworkConfig {
    /// `http://host:port` of the active endpoint
    pub fn base_url(&self) -> String {
        self.endpoint.base_url()
    }

    /// Version bytes for address encoding
    pub fn address_params(&self) -> AddressParams {
        AddressParams::for_variant(self.variant, self.identity.address_version)
    }
}
