//! Subcommand implementations.

mod check;
mod create;
mod decode;
mod expected_index;

use crate::args::{CmdContext, Subcommand};

pub(crate) fn exec_subc(cmd: Subcommand, ctx: &CmdContext) -> anyhow::Result<()> {
    match cmd {
        Subcommand::Decode(subc) => decode::exec(subc, ctx),
        Subcommand::Check(subc) => check::exec(subc, ctx),
        Subcommand::Create(subc) => create::exec(subc, ctx),
        Subcommand::ExpectedIndex(subc) => expected_index::exec(subc, ctx),
    }
}
