//! Merge-mining proofs (auxpow).
//!
//! An auxpow lets a header of this chain borrow the proof of work of a block on a
//! parent chain. The parent coinbase commits to the root of a merkle tree of
//! auxiliary chain block hashes, and this crate verifies that commitment against a
//! given header hash. Checking the parent block's proof of work against our target
//! is left to the caller.

mod auxpow;
mod builder;
mod codec;
mod commitment;
mod errors;
mod json;
mod merkle;
mod slot;
pub mod version;

pub use auxpow::{AuxPow, MerkleTxProof, UNCONFIRMED_INDEX};
pub use builder::{AuxPowBuilder, create_auxpow};
pub use commitment::{
    COMMITMENT_PAYLOAD_LEN, MERGED_MINING_HEADER, MergeMiningCommitment, extract_commitment,
};
pub use errors::{AuxPowError, CommitmentError, FormatError};
pub use json::{AuxPowJson, ParentBlockJson};
pub use merkle::{compute_merkle_root, get_cohashes};
pub use slot::expected_index;
