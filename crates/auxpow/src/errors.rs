//! Errors raised while decoding or checking an auxpow.

use auxchain_primitives::Buf32;
use bitcoin::consensus::encode;
use thiserror::Error;

/// The merge-mining commitment could not be parsed from the coinbase script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitmentError {
    #[error("merged mining header missing from parent coinbase")]
    MarkerMissing,

    #[error("multiple merged mining headers in parent coinbase")]
    MarkerDuplicated,

    /// Fewer than the 40 payload bytes follow the marker.
    #[error("merged mining commitment truncated ({remaining} bytes after the header)")]
    Truncated { remaining: usize },
}

/// Reasons an auxpow is rejected.
///
/// All of these come from untrusted data and mean the header carrying the auxpow
/// is invalid. None of them are fatal to the node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuxPowError {
    /// The proven transaction is not the first one of the parent block.
    #[error("auxpow coinbase proof has index {index}, expected 0")]
    NotCoinbase { index: i32 },

    /// The parent block is tagged with the chain id being proven.
    #[error("auxpow parent block has our chain id {chain_id}")]
    ChainIdLoopback { chain_id: i32 },

    #[error("auxpow chain merkle branch too long ({len} > {max})")]
    BranchTooLong { len: usize, max: usize },

    #[error("auxpow parent coinbase has no inputs")]
    MissingCoinbaseInput,

    #[error("invalid merged mining commitment: {0}")]
    Commitment(#[from] CommitmentError),

    /// The committed root doesn't match the one computed from the chain branch.
    #[error("auxpow chain merkle root mismatch (committed {committed:?}, computed {computed:?})")]
    RootMismatch { committed: Buf32, computed: Buf32 },

    /// The committed size isn't `2^height` of the chain branch.
    #[error("auxpow chain merkle tree size mismatch (committed {committed}, expected 2^{height})")]
    SizeMismatch { committed: u32, height: usize },

    #[error("auxpow chain index mismatch (got {index}, expected {expected})")]
    IndexMismatch { index: i32, expected: u32 },

    /// The coinbase isn't part of the parent block's transaction tree.
    #[error("auxpow coinbase merkle root doesn't match the parent block")]
    CoinbaseLinkMismatch,
}

/// The serialized auxpow is malformed.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("decode auxpow: {0}")]
    Decode(#[from] encode::Error),

    #[error("{0} trailing bytes after auxpow")]
    TrailingBytes(usize),
}
