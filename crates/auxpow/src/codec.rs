//! Wire format of an auxpow.
//!
//! In order: coinbase tx, block hash, coinbase branch, coinbase index, chain
//! branch, chain index, parent header. Branches are compact-size prefixed lists of
//! 32-byte hashes, indices are signed 32-bit little endian. The same bytes are used
//! on the network and when persisting headers.

use std::io;

use auxchain_primitives::Buf32;
use bitcoin::{
    BlockHash, Transaction, TxMerkleNode,
    block::Header,
    consensus::{Decodable, Encodable, deserialize_partial, encode, serialize},
    io::{self as bitcoin_io, Read, Write},
};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize, de::Error as _};

use crate::{
    auxpow::{AuxPow, MerkleTxProof},
    errors::FormatError,
};

fn encode_branch<W: Write + ?Sized>(
    branch: &[Buf32],
    writer: &mut W,
) -> Result<usize, bitcoin_io::Error> {
    let nodes: Vec<TxMerkleNode> = branch.iter().copied().map(Into::into).collect();
    nodes.consensus_encode(writer)
}

fn decode_branch<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<Buf32>, encode::Error> {
    let nodes = Vec::<TxMerkleNode>::consensus_decode_from_finite_reader(reader)?;
    Ok(nodes.into_iter().map(Into::into).collect())
}

impl Encodable for MerkleTxProof {
    fn consensus_encode<W: Write + ?Sized>(
        &self,
        writer: &mut W,
    ) -> Result<usize, bitcoin_io::Error> {
        let mut len = self.tx().consensus_encode(writer)?;
        len += self.block_hash().consensus_encode(writer)?;
        len += encode_branch(self.branch(), writer)?;
        len += self.index().consensus_encode(writer)?;
        Ok(len)
    }
}

impl Decodable for MerkleTxProof {
    fn consensus_decode_from_finite_reader<R: Read + ?Sized>(
        reader: &mut R,
    ) -> Result<Self, encode::Error> {
        let tx = Transaction::consensus_decode_from_finite_reader(reader)?;
        let block_hash = BlockHash::consensus_decode_from_finite_reader(reader)?;
        let branch = decode_branch(reader)?;
        let index = i32::consensus_decode_from_finite_reader(reader)?;
        Ok(Self::new(tx, block_hash, branch, index))
    }
}

impl Encodable for AuxPow {
    fn consensus_encode<W: Write + ?Sized>(
        &self,
        writer: &mut W,
    ) -> Result<usize, bitcoin_io::Error> {
        let mut len = self.coinbase_tx().consensus_encode(writer)?;
        len += encode_branch(self.chain_merkle_branch(), writer)?;
        len += self.chain_index().consensus_encode(writer)?;
        len += self.parent_block().consensus_encode(writer)?;
        Ok(len)
    }
}

impl Decodable for AuxPow {
    fn consensus_decode_from_finite_reader<R: Read + ?Sized>(
        reader: &mut R,
    ) -> Result<Self, encode::Error> {
        let coinbase_tx = MerkleTxProof::consensus_decode_from_finite_reader(reader)?;
        let chain_merkle_branch = decode_branch(reader)?;
        let chain_index = i32::consensus_decode_from_finite_reader(reader)?;
        let parent_block = Header::consensus_decode_from_finite_reader(reader)?;
        Ok(Self::new(
            coinbase_tx,
            chain_merkle_branch,
            chain_index,
            parent_block,
        ))
    }
}

impl AuxPow {
    /// Decodes an auxpow, rejecting any bytes left over.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let (auxpow, consumed) = deserialize_partial::<AuxPow>(bytes)?;
        if consumed != bytes.len() {
            return Err(FormatError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(auxpow)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serialize(self)
    }
}

// Borsh is used for the persisted header index, it just wraps the wire bytes.
impl BorshSerialize for AuxPow {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.to_bytes(), writer)
    }
}

impl BorshDeserialize for AuxPow {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let bytes = Vec::<u8>::deserialize_reader(reader)?;
        AuxPow::from_bytes(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl Serialize for AuxPow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for AuxPow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = <String as Deserialize>::deserialize(deserializer)?;
        let bytes = hex::decode(&hex_str).map_err(D::Error::custom)?;
        AuxPow::from_bytes(&bytes).map_err(D::Error::custom)
    }
}
