//! Merge-mining flags carried in a block header's version.
//!
//! - bits 0-7: base version
//! - bit 8: the header is followed by an auxpow
//! - bits 16 and up: chain id

use bitcoin::block::{Header, Version};

/// Version flag marking a header that carries an auxpow.
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// Multiplier for the chain id stored in the version.
pub const VERSION_CHAIN_START: i32 = 1 << 16;

/// Chain id a header version is tagged with.
pub fn chain_id(version: i32) -> i32 {
    version >> 16
}

/// Version with the auxpow flag and chain id stripped.
pub fn base_version(version: i32) -> i32 {
    version % VERSION_AUXPOW
}

pub fn is_auxpow(version: i32) -> bool {
    version & VERSION_AUXPOW != 0
}

/// Sets or clears the auxpow flag on a header.
///
/// This changes the header hash, so it has to happen before building the auxpow
/// that commits to it.
pub fn set_auxpow(header: &mut Header, auxpow: bool) {
    let version = header.version.to_consensus();
    let version = if auxpow {
        version | VERSION_AUXPOW
    } else {
        version & !VERSION_AUXPOW
    };
    header.version = Version::from_consensus(version);
}

/// Replaces the chain id of a header, keeping the lower 16 bits.
pub fn set_chain_id(header: &mut Header, chain_id: i32) {
    let low = header.version.to_consensus() % VERSION_CHAIN_START;
    header.version = Version::from_consensus(low | chain_id.wrapping_mul(VERSION_CHAIN_START));
}

#[cfg(test)]
mod tests {
    use bitcoin::{Network, blockdata::constants::genesis_block};

    use super::*;

    #[test]
    fn test_version_fields() {
        let version = 1829 * VERSION_CHAIN_START | VERSION_AUXPOW | 4;
        assert_eq!(chain_id(version), 1829);
        assert_eq!(base_version(version), 4);
        assert!(is_auxpow(version));
        assert!(!is_auxpow(4));
    }

    #[test]
    fn test_set_flags() {
        let mut header = genesis_block(Network::Regtest).header;
        let hash = header.block_hash();

        set_chain_id(&mut header, 1829);
        set_auxpow(&mut header, true);
        let version = header.version.to_consensus();
        assert_eq!(chain_id(version), 1829);
        assert!(is_auxpow(version));
        assert_eq!(base_version(version), 1);
        assert_ne!(header.block_hash(), hash);

        set_auxpow(&mut header, false);
        assert!(!is_auxpow(header.version.to_consensus()));
        assert_eq!(chain_id(header.version.to_consensus()), 1829);
    }
}
