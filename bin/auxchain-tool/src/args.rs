//! Command line arguments for the `auxchain-tool` binary.

use std::{env, path::PathBuf};

use anyhow::Context;
use argh::FromArgs;
use auxchain_common::logging::{self, FileLoggingConfig, LoggerConfig};
use auxchain_config::{Config, NETWORK_ENV_VAR};
use auxchain_params::{ConsensusParams, Network};
use tracing::Level;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(
        option,
        description = "network name [mainnet, testnet, regtest]",
        short = 'n'
    )]
    pub(crate) network: Option<Network>,

    #[argh(option, description = "path to a TOML config file", short = 'c')]
    pub(crate) config: Option<PathBuf>,

    #[argh(switch, description = "log at debug level", short = 'v')]
    pub(crate) verbose: bool,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Decode(SubcDecode),
    Check(SubcCheck),
    Create(SubcCreate),
    ExpectedIndex(SubcExpectedIndex),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "decode",
    description = "decodes a serialized auxpow and prints it as JSON"
)]
pub(crate) struct SubcDecode {
    #[argh(positional, description = "auxpow bytes as hex")]
    pub(crate) auxpow: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "check",
    description = "checks an auxpow against an auxiliary block hash"
)]
pub(crate) struct SubcCheck {
    #[argh(positional, description = "auxpow bytes as hex")]
    pub(crate) auxpow: String,

    #[argh(positional, description = "auxiliary block hash (display order)")]
    pub(crate) aux_hash: String,

    #[argh(option, description = "chain id (default from network params)")]
    pub(crate) chain_id: Option<i32>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "create",
    description = "marks a header as merge-mined and creates a minimal auxpow for it"
)]
pub(crate) struct SubcCreate {
    #[argh(positional, description = "80 byte block header as hex")]
    pub(crate) header: String,

    #[argh(
        option,
        description = "chain id to tag the header with (default from network params)"
    )]
    pub(crate) chain_id: Option<i32>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "expected-index",
    description = "computes the chain merkle tree slot for a chain"
)]
pub(crate) struct SubcExpectedIndex {
    #[argh(option, description = "nonce from the coinbase commitment")]
    pub(crate) nonce: u32,

    #[argh(option, description = "chain id (default from network params)")]
    pub(crate) chain_id: Option<i32>,

    #[argh(option, description = "height of the chain merkle tree")]
    pub(crate) height: u32,
}

#[derive(Debug)]
pub(crate) struct CmdContext {
    /// The network the params were taken from.
    pub(crate) network: Network,

    /// Consensus params with config overrides applied.
    pub(crate) params: ConsensusParams,
}

/// Resolves the command context and subcommand from the parsed command line arguments.
///
/// Also initializes logging from the config.
pub(crate) fn resolve_context_and_subcommand(
    args: Args,
) -> anyhow::Result<(CmdContext, Subcommand)> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    init_logging(&config, args.verbose);

    let env_network = env::var(NETWORK_ENV_VAR).ok();
    let network = config
        .resolve_network(args.network, env_network.as_deref())
        .with_context(|| format!("resolve network (check {NETWORK_ENV_VAR})"))?;

    let ctx = CmdContext {
        network,
        params: config.consensus_params_for(network),
    };

    Ok((ctx, args.subc))
}

fn init_logging(config: &Config, verbose: bool) {
    let service_name = match &config.logging.service_label {
        Some(label) => format!("auxchain-tool%{label}"),
        None => "auxchain-tool".to_owned(),
    };

    let mut logger_config = LoggerConfig::new(service_name)
        .with_service_version(env!("CARGO_PKG_VERSION").to_owned())
        .with_json_logging(config.logging.json_format);

    if verbose {
        logger_config = logger_config.with_default_level(Level::DEBUG);
    }

    if let Some(log_dir) = &config.logging.log_dir {
        let prefix = config
            .logging
            .log_file_prefix
            .clone()
            .unwrap_or_else(|| "auxchain-tool".to_owned());
        logger_config = logger_config.with_file_logging(
            FileLoggingConfig::new(log_dir.clone(), prefix)
                .with_json_format(config.logging.json_format),
        );
    }

    logging::init(logger_config);
}
