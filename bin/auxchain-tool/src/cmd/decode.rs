//! `decode` subcommand: prints a serialized auxpow as JSON.

use auxchain_auxpow::{AuxPow, AuxPowJson};

use crate::{
    args::{CmdContext, SubcDecode},
    util::{parse_hex, print_json},
};

pub(super) fn exec(cmd: SubcDecode, _ctx: &CmdContext) -> anyhow::Result<()> {
    let bytes = parse_hex(&cmd.auxpow)?;
    let auxpow = AuxPow::from_bytes(&bytes)?;
    print_json(&AuxPowJson::from(&auxpow))
}
