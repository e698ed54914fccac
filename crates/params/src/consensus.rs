use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::Network;

/// Chain id under which this chain is merge mined.
pub const AUXPOW_CHAIN_ID: i32 = 1829;

/// Upper bound on the length of the chain merkle branch in an auxpow.
///
/// A branch of this length already allows for 2^30 merge-mined chains in a
/// single parent coinbase, anything longer is only useful for DoS.
pub const MAX_CHAIN_MERKLE_BRANCH: usize = 30;

/// Consensus parameters that auxpow validation reads.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ConsensusParams {
    /// Network these parameters belong to.
    network: Network,

    /// Our chain id, committed to in the version of merge-mined headers.
    auxpow_chain_id: i32,

    /// Whether to reject parent blocks that carry our own chain id.
    strict_chain_id: bool,

    /// Maximum accepted length of the chain merkle branch.
    max_chain_merkle_branch: usize,
}

impl ConsensusParams {
    pub fn new(
        network: Network,
        auxpow_chain_id: i32,
        strict_chain_id: bool,
        max_chain_merkle_branch: usize,
    ) -> Self {
        Self {
            network,
            auxpow_chain_id,
            strict_chain_id,
            max_chain_merkle_branch,
        }
    }

    /// Returns the constant parameters for a network.
    ///
    /// The networks only differ by name for now. Strict chain id checking is on
    /// everywhere; relaxing it takes an explicit
    /// [`with_strict_chain_id`](Self::with_strict_chain_id).
    pub fn for_network(network: Network) -> Self {
        Self::new(
            network,
            AUXPOW_CHAIN_ID,
            true,
            MAX_CHAIN_MERKLE_BRANCH,
        )
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn auxpow_chain_id(&self) -> i32 {
        self.auxpow_chain_id
    }

    pub fn strict_chain_id(&self) -> bool {
        self.strict_chain_id
    }

    pub fn max_chain_merkle_branch(&self) -> usize {
        self.max_chain_merkle_branch
    }

    pub fn with_auxpow_chain_id(mut self, chain_id: i32) -> Self {
        self.auxpow_chain_id = chain_id;
        self
    }

    pub fn with_strict_chain_id(mut self, strict: bool) -> Self {
        self.strict_chain_id = strict;
        self
    }

    pub fn with_max_chain_merkle_branch(mut self, max: usize) -> Self {
        self.max_chain_merkle_branch = max;
        self
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}
