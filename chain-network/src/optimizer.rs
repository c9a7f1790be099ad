//! Peer list optimization
//!
//! Re-ranks a peer directory snapshot in two passes:
//!
//! 1. Consistency: keep peers reporting status `OK`, the active peer's port and
//!    the version expected for the network variant. The highest peer above the
//!    current active height becomes the new active peer. The directory is
//!    scanned from its end, so among peers sharing the top height the last
//!    one listed wins.
//! 2. Staleness: drop peers more than [`MAX_HEIGHT_LAG`] blocks behind the
//!    height found in pass 1.
//!
//! The passes must run in this order because pass 2 depends on the maximum
//! height discovered by pass 1.

use crate::peer::PeerRecord;
use chain_core::{BlockHeight, NetworkVariant};

/// Number of blocks a peer may trail the best known height
pub const MAX_HEIGHT_LAG: BlockHeight = 10;

/// Result of [`optimize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedPeers {
    /// Surviving peers, in directory order
    pub peers: Vec<PeerRecord>,
    /// Peer with the highest height, or the original active peer
    pub active_peer: PeerRecord,
    /// Whether `active_peer` replaced the original one
    pub promoted: bool,
}

impl OptimizedPeers {
    pub fn max_height(&self) -> BlockHeight {
        self.active_peer.height
    }
}

/// Whether a peer passes the consistency gate
pub fn is_compatible(peer: &PeerRecord, active_peer: &PeerRecord, variant: NetworkVariant) -> bool {
    peer.is_ok() && peer.port == active_peer.port && peer.version == variant.expected_peer_version()
}

/// Filter `candidates` and pick the best active peer. Performs no I/O.
pub fn optimize(
    candidates: &[PeerRecord],
    active_peer: &PeerRecord,
    variant: NetworkVariant,
) -> OptimizedPeers {
    tracing::debug!(
        "Start to optimize peer list, currently {} peers",
        candidates.len()
    );

    let mut leader = active_peer;
    let mut promoted = false;
    let mut consistent = Vec::with_capacity(candidates.len());
    for peer in candidates
        .iter()
        .rev()
        .filter(|peer| is_compatible(peer, active_peer, variant))
    {
        // Strictly greater: the first peer seen at the top height wins
        if peer.height > leader.height {
            tracing::info!(
                "Found OK peer {}:{} with bigger block height {} > {}",
                peer.ip,
                peer.port,
                peer.height,
                leader.height
            );
            leader = peer;
            promoted = true;
        }
        consistent.push(peer);
    }
    consistent.reverse();

    let max_height = leader.height;
    let peers: Vec<PeerRecord> = consistent
        .into_iter()
        .filter(|peer| max_height.saturating_sub(peer.height) <= MAX_HEIGHT_LAG)
        .cloned()
        .collect();

    tracing::debug!(
        "End of peer optimization, remaining {} peers",
        peers.len()
    );

    OptimizedPeers {
        peers,
        promoted,
        active_peer: leader.clone(),
    }
}
