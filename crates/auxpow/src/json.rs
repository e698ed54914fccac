//! Human readable view of an auxpow, as printed by the tooling.

use auxchain_primitives::Buf32;
use bitcoin::{block::Header, consensus::serialize};
use serde::{Deserialize, Serialize};

use crate::auxpow::AuxPow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentBlockJson {
    pub hash: String,
    pub version: i32,
    pub previousblockhash: String,
    pub merkleroot: String,
    pub time: u32,
    pub bits: String,
    pub nonce: u32,
}

impl From<&Header> for ParentBlockJson {
    fn from(header: &Header) -> Self {
        Self {
            hash: header.block_hash().to_string(),
            version: header.version.to_consensus(),
            previousblockhash: header.prev_blockhash.to_string(),
            merkleroot: header.merkle_root.to_string(),
            time: header.time,
            bits: format!("{:08x}", header.bits.to_consensus()),
            nonce: header.nonce,
        }
    }
}

/// Hashes are in the usual reversed display order, the coinbase is raw hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxPowJson {
    pub tx: String,
    pub txid: String,
    pub blockhash: String,
    pub merklebranch: Vec<String>,
    pub index: i32,
    pub chainmerklebranch: Vec<String>,
    pub chainindex: i32,
    pub parentblock: ParentBlockJson,
}

fn branch_hex(branch: &[Buf32]) -> Vec<String> {
    branch.iter().map(|h| hex::encode(h.reversed().0)).collect()
}

impl From<&AuxPow> for AuxPowJson {
    fn from(auxpow: &AuxPow) -> Self {
        let proof = auxpow.coinbase_tx();
        Self {
            tx: hex::encode(serialize(proof.tx())),
            txid: proof.tx().compute_txid().to_string(),
            blockhash: proof.block_hash().to_string(),
            merklebranch: branch_hex(proof.branch()),
            index: proof.index(),
            chainmerklebranch: branch_hex(auxpow.chain_merkle_branch()),
            chainindex: auxpow.chain_index(),
            parentblock: auxpow.parent_block().into(),
        }
    }
}
