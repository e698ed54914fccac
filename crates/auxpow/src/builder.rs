//! Construction of auxpows for mining and tests.
//!
//! Nothing here is used when validating; these build proofs that the validator
//! is then expected to accept (or, with tampered inputs, reject).

use std::iter;

use auxchain_primitives::{Buf32, sha256d};
use bitcoin::{
    Amount, BlockHash, CompactTarget, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
    TxMerkleNode, TxOut, Witness,
    absolute::LockTime,
    block::{Header, Version},
    hashes::Hash,
    script::PushBytesBuf,
    transaction,
};

use crate::{
    auxpow::{AuxPow, MerkleTxProof},
    commitment::{MERGED_MINING_HEADER, MergeMiningCommitment},
    merkle::{compute_merkle_root, get_cohashes},
    version::VERSION_CHAIN_START,
};

/// Builds an auxpow piece by piece.
///
/// The parent block contains the coinbase followed by any transactions added with
/// [`add_parent_tx`](Self::add_parent_tx). With none added, its merkle root is the
/// coinbase txid and the coinbase branch is empty.
#[derive(Clone, Debug)]
pub struct AuxPowBuilder {
    parent_block: Header,
    coinbase_script: ScriptBuf,
    parent_txs: Vec<Transaction>,
    chain_merkle_branch: Vec<Buf32>,
    chain_index: i32,
}

impl AuxPowBuilder {
    /// Starts a builder whose parent block has the given base version and is tagged
    /// with `chain_id`.
    pub fn new(base_version: i32, chain_id: i32) -> Self {
        let version = base_version | chain_id.wrapping_mul(VERSION_CHAIN_START);
        Self {
            parent_block: Header {
                version: Version::from_consensus(version),
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root: TxMerkleNode::all_zeros(),
                time: 0,
                bits: CompactTarget::from_consensus(0),
                nonce: 0,
            },
            coinbase_script: ScriptBuf::new(),
            parent_txs: Vec::new(),
            chain_merkle_branch: Vec::new(),
            chain_index: 0,
        }
    }

    pub fn set_coinbase_script(&mut self, script: ScriptBuf) -> &mut Self {
        self.coinbase_script = script;
        self
    }

    /// Appends a non-coinbase transaction to the parent block.
    pub fn add_parent_tx(&mut self, tx: Transaction) -> &mut Self {
        self.parent_txs.push(tx);
        self
    }

    pub fn set_chain_branch(&mut self, branch: Vec<Buf32>, index: i32) -> &mut Self {
        self.chain_merkle_branch = branch;
        self.chain_index = index;
        self
    }

    /// Builds a chain merkle branch of `height` placing `aux_hash` at `index`, and
    /// returns it together with the resulting root.
    ///
    /// The other leaves stand in for chains we don't care about; they're fixed
    /// filler so the same inputs always produce the same tree.
    pub fn build_auxpow_chain(
        &self,
        aux_hash: Buf32,
        height: u32,
        index: u32,
    ) -> (Vec<Buf32>, Buf32) {
        let branch: Vec<Buf32> = (0..height)
            .map(|level| {
                let mut preimage = *b"auxpow chain filler....";
                preimage[19..].copy_from_slice(&level.to_le_bytes());
                sha256d(&preimage)
            })
            .collect();
        let root = compute_merkle_root(aux_hash, &branch, index);
        (branch, root)
    }

    /// Builds the coinbase script data committing to `root`.
    ///
    /// Without the marker only root, size and nonce are written, which the
    /// validator rejects.
    ///
    /// # Panics
    ///
    /// If `height` is 32 or more, since the tree size doesn't fit the commitment.
    pub fn build_coinbase_data(with_marker: bool, root: Buf32, height: u32, nonce: u32) -> Vec<u8> {
        let Some(size) = 1u32.checked_shl(height) else {
            panic!("builder: chain merkle tree of height {height} can't be committed");
        };
        let commitment = MergeMiningCommitment::new(root, size, nonce);
        if with_marker {
            commitment.to_script_data()
        } else {
            commitment.encode_payload().to_vec()
        }
    }

    /// Assembles the auxpow, fixing the parent merkle root to the parent block's
    /// transactions.
    pub fn build(&self) -> AuxPow {
        let coinbase = coinbase_tx(self.coinbase_script.clone());

        let txids: Vec<Buf32> = iter::once(&coinbase)
            .chain(&self.parent_txs)
            .map(|tx| tx.compute_txid().into())
            .collect();
        let (coinbase_branch, merkle_root) = get_cohashes(&txids, 0);

        let mut parent_block = self.parent_block;
        parent_block.merkle_root = merkle_root.into();

        let coinbase_proof =
            MerkleTxProof::new(coinbase, parent_block.block_hash(), coinbase_branch, 0);
        AuxPow::new(
            coinbase_proof,
            self.chain_merkle_branch.clone(),
            self.chain_index,
            parent_block,
        )
    }
}

/// A coinbase transaction with a single input spending the null outpoint.
fn coinbase_tx(script_sig: ScriptBuf) -> Transaction {
    Transaction {
        version: transaction::Version::ONE,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: Sequence::MAX,
            witness: Witness::default(),
        }],
        output: vec![TxOut {
            value: Amount::ZERO,
            script_pubkey: ScriptBuf::new(),
        }],
    }
}

/// Constructs a minimal auxpow committing to `header`.
///
/// The chain merkle tree has height 0, so the only valid chain index is 0 and the
/// chain root is the header hash itself. The caller must have set the auxpow flag
/// on the header already, since the hash committed to depends on it.
pub fn create_auxpow(header: &Header) -> AuxPow {
    let data = AuxPowBuilder::build_coinbase_data(true, Buf32::from(header.block_hash()), 0, 0);
    let push = PushBytesBuf::try_from(data).expect("builder: commitment fits a push");
    let script = ScriptBuf::builder().push_slice(push).into_script();

    let mut builder = AuxPowBuilder::new(1, 0);
    builder.set_coinbase_script(script);
    builder.build()
}

#[cfg(test)]
mod tests {
    use auxchain_params::ConsensusParams;
    use bitcoin::{Network, Txid, blockdata::constants::genesis_block};

    use super::*;
    use crate::{commitment::extract_commitment, version};

    #[test]
    fn test_create_auxpow_shape() {
        let mut header = genesis_block(Network::Regtest).header;
        version::set_auxpow(&mut header, true);
        let auxpow = create_auxpow(&header);

        assert!(auxpow.chain_merkle_branch().is_empty());
        assert_eq!(auxpow.chain_index(), 0);
        assert!(auxpow.coinbase_tx().branch().is_empty());
        assert_eq!(auxpow.coinbase_tx().index(), 0);
        assert_eq!(auxpow.parent_block().version.to_consensus(), 1);
        assert_eq!(
            auxpow.coinbase_tx().block_hash(),
            auxpow.parent_block().block_hash()
        );
        assert_eq!(
            Buf32::from(auxpow.parent_block().merkle_root),
            Buf32::from(auxpow.coinbase_tx().tx().compute_txid())
        );

        let script = auxpow.coinbase_tx().tx().input[0].script_sig.as_bytes();
        // A single 44 byte push.
        assert_eq!(script[0] as usize, MERGED_MINING_HEADER.len() + 40);
        let commitment = extract_commitment(script).unwrap();
        assert_eq!(commitment.root, Buf32::from(header.block_hash()));
        assert_eq!(commitment.size, 1);
        assert_eq!(commitment.nonce, 0);

        let params = ConsensusParams::default();
        let hash = Buf32::from(header.block_hash());
        assert!(auxpow.check(&hash, params.auxpow_chain_id(), &params).is_ok());
    }

    #[test]
    fn test_auxpow_flag_changes_commitment() {
        let mut header = genesis_block(Network::Regtest).header;
        let plain = create_auxpow(&header);
        version::set_auxpow(&mut header, true);
        let flagged = create_auxpow(&header);

        let params = ConsensusParams::default();
        let hash = Buf32::from(header.block_hash());
        assert!(flagged.check(&hash, params.auxpow_chain_id(), &params).is_ok());
        assert!(plain.check(&hash, params.auxpow_chain_id(), &params).is_err());
    }

    #[test]
    fn test_chain_is_deterministic() {
        let aux_hash = Buf32::from([3; 32]);
        let a = AuxPowBuilder::new(1, 0).build_auxpow_chain(aux_hash, 6, 17);
        let b = AuxPowBuilder::new(2, 5).build_auxpow_chain(aux_hash, 6, 17);
        assert_eq!(a, b);
        assert_eq!(a.0.len(), 6);
        assert_eq!(compute_merkle_root(aux_hash, &a.0, 17), a.1);
    }

    #[test]
    fn test_coinbase_data_marker() {
        let root = Buf32::from([8; 32]);
        let with = AuxPowBuilder::build_coinbase_data(true, root, 3, 11);
        let without = AuxPowBuilder::build_coinbase_data(false, root, 3, 11);

        assert_eq!(&with[..4], &MERGED_MINING_HEADER);
        assert_eq!(&with[4..], &without[..]);
        assert_eq!(&without[32..36], &8u32.to_le_bytes());
    }

    #[test]
    #[should_panic(expected = "can't be committed")]
    fn test_coinbase_data_height_too_large() {
        AuxPowBuilder::build_coinbase_data(true, Buf32::zero(), 32, 0);
    }

    #[test]
    fn test_parent_block_with_more_txs() {
        let mut header = genesis_block(Network::Regtest).header;
        version::set_auxpow(&mut header, true);
        let hash = Buf32::from(header.block_hash());
        let data = AuxPowBuilder::build_coinbase_data(true, hash, 0, 0);

        let mut builder = AuxPowBuilder::new(1, 0);
        builder.set_coinbase_script(ScriptBuf::from_bytes(data));
        for i in 1..=4u8 {
            let mut tx = coinbase_tx(ScriptBuf::from_bytes(vec![i]));
            tx.input[0].previous_output = OutPoint::new(Txid::from_byte_array([i; 32]), 0);
            builder.add_parent_tx(tx);
        }
        let auxpow = builder.build();

        // Five transactions, so the coinbase sits three levels deep.
        let proof = auxpow.coinbase_tx();
        assert_eq!(proof.branch().len(), 3);
        assert_eq!(
            proof.compute_root(),
            Some(Buf32::from(auxpow.parent_block().merkle_root))
        );
        assert_ne!(
            Buf32::from(auxpow.parent_block().merkle_root),
            Buf32::from(proof.tx().compute_txid())
        );

        let params = ConsensusParams::default();
        assert_eq!(auxpow.check(&hash, params.auxpow_chain_id(), &params), Ok(()));
    }
}
