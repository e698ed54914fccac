//! Hashing primitives.

use bitcoin::{block::Header, consensus::Encodable};
use sha2::{Digest, Sha256};

use crate::Buf32;

/// Bitcoin's double SHA-256.
pub fn sha256d(buf: &[u8]) -> Buf32 {
    let first = Sha256::digest(buf);
    Buf32::new(Sha256::digest(first).into())
}

/// Returns the block hash.
///
/// Equivalent to [`block_hash`](Header::block_hash) but internally uses
/// [RustCrypto's SHA-2 crate](https://github.com/RustCrypto/hashes/tree/master/sha2),
/// the same primitive the merkle code hashes with.
pub fn compute_block_hash(header: &Header) -> Buf32 {
    let mut buf = [0u8; Header::SIZE];
    let mut writer = &mut buf[..];
    header
        .consensus_encode(&mut writer)
        .expect("engines don't error");
    sha256d(&buf)
}
