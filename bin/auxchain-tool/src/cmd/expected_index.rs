//! `expected-index` subcommand.

use auxchain_auxpow::expected_index;

use crate::args::{CmdContext, SubcExpectedIndex};

pub(super) fn exec(cmd: SubcExpectedIndex, ctx: &CmdContext) -> anyhow::Result<()> {
    let chain_id = cmd.chain_id.unwrap_or(ctx.params.auxpow_chain_id());
    println!("{}", expected_index(cmd.nonce, chain_id, cmd.height));
    Ok(())
}
