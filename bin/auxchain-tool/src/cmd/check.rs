//! `check` subcommand: validates an auxpow against an auxiliary block hash.

use anyhow::bail;
use auxchain_auxpow::{AuxPow, AuxPowError};
use auxchain_params::{ConsensusParams, Network};
use auxchain_primitives::Buf32;
use bitcoin::BlockHash;
use serde::Serialize;
use tracing::*;

use crate::{
    args::{CmdContext, SubcCheck},
    util::{parse_block_hash, parse_hex, print_json},
};

#[derive(Debug, Serialize)]
struct CheckReport {
    network: Network,
    chain_id: i32,
    aux_hash: String,
    parent_hash: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn check_report(
    auxpow: &AuxPow,
    aux_hash: &Buf32,
    chain_id: i32,
    params: &ConsensusParams,
) -> (CheckReport, Result<(), AuxPowError>) {
    let res = auxpow.check(aux_hash, chain_id, params);
    let report = CheckReport {
        network: params.network(),
        chain_id,
        aux_hash: BlockHash::from(*aux_hash).to_string(),
        parent_hash: auxpow.parent_block_id().to_string(),
        valid: res.is_ok(),
        error: res.as_ref().err().map(ToString::to_string),
    };
    (report, res)
}

/// Executes the `check` subcommand.
///
/// Prints the result either way, and fails if the auxpow was rejected.
pub(super) fn exec(cmd: SubcCheck, ctx: &CmdContext) -> anyhow::Result<()> {
    let auxpow = AuxPow::from_bytes(&parse_hex(&cmd.auxpow)?)?;
    let aux_hash = parse_block_hash(&cmd.aux_hash)?;
    let chain_id = cmd.chain_id.unwrap_or(ctx.params.auxpow_chain_id());
    debug!(network = %ctx.network, %chain_id, "checking auxpow");

    let (report, res) = check_report(&auxpow, &aux_hash, chain_id, &ctx.params);
    print_json(&report)?;

    if let Err(e) = res {
        bail!("auxpow rejected: {e}");
    }
    Ok(())
}
