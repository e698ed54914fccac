//! Merge-mining commitment embedded in a parent coinbase script.
//!
//! Layout after the marker: the chain merkle root (32 bytes, reversed with respect
//! to the raw digest), the chain merkle tree size (u32 LE) and the nonce (u32 LE)
//! that seeds [`expected_index`](crate::expected_index).

use auxchain_primitives::{Buf32, HASH_SIZE};

use crate::errors::CommitmentError;

/// Marker preceding the merge-mining commitment in the coinbase script.
pub const MERGED_MINING_HEADER: [u8; 4] = [0xfa, 0xbe, b'm', b'm'];

/// Bytes that must follow the marker: root, tree size, nonce.
pub const COMMITMENT_PAYLOAD_LEN: usize = HASH_SIZE + 4 + 4;

/// A commitment to a chain merkle root, parsed from a coinbase script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergeMiningCommitment {
    /// Chain merkle root, in raw digest order.
    pub root: Buf32,

    /// Declared number of leaves of the chain merkle tree.
    pub size: u32,

    /// Nonce used to derive the expected slot of each chain.
    pub nonce: u32,
}

impl MergeMiningCommitment {
    pub fn new(root: Buf32, size: u32, nonce: u32) -> Self {
        Self { root, size, nonce }
    }

    /// Encodes the commitment the way it's embedded in a coinbase script, marker
    /// included.
    pub fn to_script_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(MERGED_MINING_HEADER.len() + COMMITMENT_PAYLOAD_LEN);
        data.extend_from_slice(&MERGED_MINING_HEADER);
        data.extend_from_slice(&self.encode_payload());
        data
    }

    /// Encodes root, size and nonce without the marker.
    pub fn encode_payload(&self) -> [u8; COMMITMENT_PAYLOAD_LEN] {
        let mut buf = [0u8; COMMITMENT_PAYLOAD_LEN];
        buf[..HASH_SIZE].copy_from_slice(self.root.reversed().as_slice());
        buf[HASH_SIZE..36].copy_from_slice(&self.size.to_le_bytes());
        buf[36..].copy_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    fn decode_payload(payload: &[u8; COMMITMENT_PAYLOAD_LEN]) -> Self {
        let mut root = [0u8; HASH_SIZE];
        root.copy_from_slice(&payload[..HASH_SIZE]);
        let mut size = [0u8; 4];
        size.copy_from_slice(&payload[HASH_SIZE..36]);
        let mut nonce = [0u8; 4];
        nonce.copy_from_slice(&payload[36..]);

        Self {
            root: Buf32::from(root).reversed(),
            size: u32::from_le_bytes(size),
            nonce: u32::from_le_bytes(nonce),
        }
    }
}

/// Returns the offsets of every (possibly overlapping) occurrence of `needle`.
fn find_all<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(pos, _)| pos)
}

/// Extracts the merge-mining commitment from a coinbase input script.
///
/// The marker must appear exactly once and be followed by at least
/// [`COMMITMENT_PAYLOAD_LEN`] bytes. Nothing else about the script is checked;
/// whether the commitment agrees with the rest of the auxpow is up to the caller.
pub fn extract_commitment(script: &[u8]) -> Result<MergeMiningCommitment, CommitmentError> {
    let mut occurrences = find_all(script, &MERGED_MINING_HEADER);
    let pos = occurrences.next().ok_or(CommitmentError::MarkerMissing)?;
    if occurrences.next().is_some() {
        return Err(CommitmentError::MarkerDuplicated);
    }

    let rest = &script[pos + MERGED_MINING_HEADER.len()..];
    let payload: &[u8; COMMITMENT_PAYLOAD_LEN] = rest
        .get(..COMMITMENT_PAYLOAD_LEN)
        .and_then(|p| p.try_into().ok())
        .ok_or(CommitmentError::Truncated {
            remaining: rest.len(),
        })?;

    Ok(MergeMiningCommitment::decode_payload(payload))
}
