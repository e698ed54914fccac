//! Collection of small data types shared by the auxchain crates.

#[macro_use]
mod macros;

pub mod buf;
pub mod hash;

pub use buf::Buf32;
pub use hash::{compute_block_hash, sha256d};

/// The size (in bytes) of a hash such as a [`Txid`](bitcoin::Txid).
pub const HASH_SIZE: usize = 32;
