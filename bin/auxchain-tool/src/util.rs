//! Parsing and output helpers shared by the subcommands.

use std::str::FromStr;

use anyhow::{Context, ensure};
use auxchain_primitives::Buf32;
use bitcoin::{BlockHash, block::Header, consensus::deserialize};
use serde::Serialize;

/// Decodes hex input, tolerating surrounding whitespace and a `0x` prefix.
pub(crate) fn parse_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).context("invalid hex")
}

/// Parses a block hash given in the usual (reversed) display order.
pub(crate) fn parse_block_hash(s: &str) -> anyhow::Result<Buf32> {
    let hash = BlockHash::from_str(s.trim()).context("invalid block hash")?;
    Ok(hash.into())
}

pub(crate) fn parse_header(s: &str) -> anyhow::Result<Header> {
    let bytes = parse_hex(s)?;
    ensure!(
        bytes.len() == Header::SIZE,
        "header must be {} bytes, got {}",
        Header::SIZE,
        bytes.len()
    );
    deserialize(&bytes).context("invalid header")
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
