//! Command line tool for inspecting, checking and creating auxpows.

use std::process;

mod args;
mod cmd;
mod util;

use args::resolve_context_and_subcommand;
use cmd::exec_subc;

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        let (ctx, subc) = resolve_context_and_subcommand(args)?;
        exec_subc(subc, &ctx)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
