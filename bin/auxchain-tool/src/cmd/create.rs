//! `create` subcommand: builds a minimal auxpow for a header.

use auxchain_auxpow::{AuxPowJson, create_auxpow, version};
use bitcoin::consensus::serialize;
use serde::Serialize;

use crate::{
    args::{CmdContext, SubcCreate},
    util::{parse_header, print_json},
};

#[derive(Debug, Serialize)]
struct CreateOutput {
    /// The header with the auxpow flag and chain id set.
    header: String,
    hash: String,
    auxpow: String,
    decoded: AuxPowJson,
}

/// Executes the `create` subcommand.
///
/// The header is tagged with the chain id and flagged as merge-mined before the
/// auxpow is built, since both change the hash it commits to.
pub(super) fn exec(cmd: SubcCreate, ctx: &CmdContext) -> anyhow::Result<()> {
    let mut header = parse_header(&cmd.header)?;
    version::set_chain_id(
        &mut header,
        cmd.chain_id.unwrap_or(ctx.params.auxpow_chain_id()),
    );
    version::set_auxpow(&mut header, true);

    let auxpow = create_auxpow(&header);
    print_json(&CreateOutput {
        header: hex::encode(serialize(&header)),
        hash: header.block_hash().to_string(),
        auxpow: hex::encode(auxpow.to_bytes()),
        decoded: AuxPowJson::from(&auxpow),
    })
}
