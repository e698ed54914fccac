use auxchain_params::ConsensusParams;
use auxchain_primitives::{Buf32, compute_block_hash};
use bitcoin::{BlockHash, Transaction, block::Header};
use tracing::*;

use crate::{
    commitment::extract_commitment, errors::AuxPowError, merkle::compute_merkle_root,
    slot::expected_index, version,
};

/// Merkle index marking a [`MerkleTxProof`] as unconfirmed.
///
/// Only meaningful to wallets; a proof with this index is never accepted here.
pub const UNCONFIRMED_INDEX: i32 = -1;

/// A transaction together with the merkle branch placing it in a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTxProof {
    tx: Transaction,
    block_hash: BlockHash,
    branch: Vec<Buf32>,
    index: i32,
}

impl MerkleTxProof {
    pub fn new(tx: Transaction, block_hash: BlockHash, branch: Vec<Buf32>, index: i32) -> Self {
        Self {
            tx,
            block_hash,
            branch,
            index,
        }
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// Hash of the block the proof claims to commit to.
    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    pub fn branch(&self) -> &[Buf32] {
        &self.branch
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn is_confirmed(&self) -> bool {
        self.index != UNCONFIRMED_INDEX
    }

    /// Merkle root implied by the proof.
    ///
    /// Negative indices are wallet sentinels and don't describe a position.
    pub fn compute_root(&self) -> Option<Buf32> {
        let index = u32::try_from(self.index).ok()?;
        let leaf = Buf32::from(self.tx.compute_txid());
        Some(compute_merkle_root(leaf, &self.branch, index))
    }
}

/// Merge-mining proof of work for a block of this chain.
///
/// Links the hash of a block of ours to a parent block header through the
/// parent's coinbase: the coinbase commits to the root of a chain merkle tree
/// containing our hash, and a second merkle branch puts the coinbase into the
/// parent header's transaction tree. The parent header is where the actual work
/// was done.
///
/// Immutable once built; construct it by decoding it or through
/// [`AuxPowBuilder`](crate::AuxPowBuilder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuxPow {
    /// The parent block's coinbase and its branch in the parent block.
    coinbase_tx: MerkleTxProof,

    /// Branch linking the aux block hash to the root committed in the coinbase.
    chain_merkle_branch: Vec<Buf32>,

    /// Index of the aux block hash in the chain merkle tree.
    chain_index: i32,

    /// Parent block header, on which the actual PoW is done.
    parent_block: Header,
}

impl AuxPow {
    pub fn new(
        coinbase_tx: MerkleTxProof,
        chain_merkle_branch: Vec<Buf32>,
        chain_index: i32,
        parent_block: Header,
    ) -> Self {
        Self {
            coinbase_tx,
            chain_merkle_branch,
            chain_index,
            parent_block,
        }
    }

    pub fn coinbase_tx(&self) -> &MerkleTxProof {
        &self.coinbase_tx
    }

    pub fn chain_merkle_branch(&self) -> &[Buf32] {
        &self.chain_merkle_branch
    }

    pub fn chain_index(&self) -> i32 {
        self.chain_index
    }

    pub fn parent_block(&self) -> &Header {
        &self.parent_block
    }

    /// Hash of the parent block, to be checked against the PoW target.
    pub fn parent_block_hash(&self) -> Buf32 {
        compute_block_hash(&self.parent_block)
    }

    pub fn parent_block_id(&self) -> BlockHash {
        self.parent_block_hash().into()
    }

    /// Checks that this auxpow commits to `aux_block_hash` for chain `chain_id`.
    ///
    /// Only the merkle links are verified. The parent block's PoW is not; callers
    /// check [`parent_block_hash`](Self::parent_block_hash) against the target
    /// themselves.
    pub fn check(
        &self,
        aux_block_hash: &Buf32,
        chain_id: i32,
        params: &ConsensusParams,
    ) -> Result<(), AuxPowError> {
        let res = self.check_inner(aux_block_hash, chain_id, params);
        match &res {
            Ok(()) => trace!(%aux_block_hash, chain_id, "auxpow accepted"),
            Err(err) => debug!(%aux_block_hash, chain_id, %err, "auxpow rejected"),
        }
        res
    }

    fn check_inner(
        &self,
        aux_block_hash: &Buf32,
        chain_id: i32,
        params: &ConsensusParams,
    ) -> Result<(), AuxPowError> {
        if self.coinbase_tx.index != 0 {
            return Err(AuxPowError::NotCoinbase {
                index: self.coinbase_tx.index,
            });
        }

        let parent_chain_id = version::chain_id(self.parent_block.version.to_consensus());
        if params.strict_chain_id() && parent_chain_id == chain_id {
            return Err(AuxPowError::ChainIdLoopback { chain_id });
        }

        let height = self.chain_merkle_branch.len();
        if height > params.max_chain_merkle_branch() {
            return Err(AuxPowError::BranchTooLong {
                len: height,
                max: params.max_chain_merkle_branch(),
            });
        }

        // Reinterpreting a negative index is harmless, it can never pass the slot
        // check below.
        let chain_root = compute_merkle_root(
            *aux_block_hash,
            &self.chain_merkle_branch,
            self.chain_index as u32,
        );

        let script = self
            .coinbase_tx
            .tx
            .input
            .first()
            .ok_or(AuxPowError::MissingCoinbaseInput)?
            .script_sig
            .as_bytes();
        let commitment = extract_commitment(script)?;

        if commitment.root != chain_root {
            return Err(AuxPowError::RootMismatch {
                committed: commitment.root,
                computed: chain_root,
            });
        }

        // From height 32 on no u32 size can match, whatever the branch limit says.
        let expected_size = u32::try_from(height)
            .ok()
            .and_then(|h| 1u32.checked_shl(h));
        if expected_size != Some(commitment.size) {
            return Err(AuxPowError::SizeMismatch {
                committed: commitment.size,
                height,
            });
        }

        let expected = expected_index(commitment.nonce, chain_id, height as u32);
        if i64::from(self.chain_index) != i64::from(expected) {
            return Err(AuxPowError::IndexMismatch {
                index: self.chain_index,
                expected,
            });
        }

        let coinbase_leaf = Buf32::from(self.coinbase_tx.tx.compute_txid());
        let coinbase_root = compute_merkle_root(coinbase_leaf, &self.coinbase_tx.branch, 0);
        if coinbase_root != Buf32::from(self.parent_block.merkle_root) {
            return Err(AuxPowError::CoinbaseLinkMismatch);
        }

        Ok(())
    }
}
