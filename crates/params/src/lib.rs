//! Consensus parameters consumed by auxpow validation.
//!
//! Per-network differences are plain data: a [`Network`] selects a row of the
//! constant table in [`ConsensusParams::for_network`].

mod consensus;
mod network;

pub use consensus::*;
pub use network::*;
