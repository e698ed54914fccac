use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use auxchain_params::{ConsensusParams, Network};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Environment variable consulted for the network when no flag is given.
pub const NETWORK_ENV_VAR: &str = "AUXCHAIN_NETWORK";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json_format: bool,
}

/// Overrides of the per-network auxpow parameters.
///
/// Anything left unset keeps the network's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxPowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_chain_id: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chain_merkle_branch: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: Network,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub auxpow: AuxPowConfig,
}

impl Config {
    /// Reads the config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    /// Picks the network, preferring an explicit flag, then the value of
    /// [`NETWORK_ENV_VAR`], then the config file.
    pub fn resolve_network(
        &self,
        flag: Option<Network>,
        env_value: Option<&str>,
    ) -> Result<Network, ConfigError> {
        if let Some(network) = flag {
            return Ok(network);
        }
        match env_value {
            Some(value) => Ok(value.parse()?),
            None => Ok(self.network),
        }
    }

    /// Consensus params for `network` with the `[auxpow]` overrides applied.
    pub fn consensus_params_for(&self, network: Network) -> ConsensusParams {
        let mut params = ConsensusParams::for_network(network);
        if let Some(chain_id) = self.auxpow.chain_id {
            params = params.with_auxpow_chain_id(chain_id);
        }
        if let Some(strict) = self.auxpow.strict_chain_id {
            params = params.with_strict_chain_id(strict);
        }
        if let Some(max) = self.auxpow.max_chain_merkle_branch {
            params = params.with_max_chain_merkle_branch(max);
        }
        params
    }

    pub fn consensus_params(&self) -> ConsensusParams {
        self.consensus_params_for(self.network)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use auxchain_params::{AUXPOW_CHAIN_ID, MAX_CHAIN_MERKLE_BRANCH};

    use super::*;

    #[test]
    fn test_config_load() {
        let config_string = r#"
            network = "testnet"

            [logging]
            service_label = "dev"
            log_dir = "/var/log/auxchain"
            json_format = true

            [auxpow]
            chain_id = 7
            max_chain_merkle_branch = 12
        "#;

        let config = config_string.parse::<Config>();
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );
        let config = config.unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.logging.service_label.as_deref(), Some("dev"));
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/var/log/auxchain"))
        );
        assert!(config.logging.json_format);

        let params = config.consensus_params();
        assert_eq!(params.network(), Network::Testnet);
        assert_eq!(params.auxpow_chain_id(), 7);
        // Not overridden, keeps the network value.
        assert!(params.strict_chain_id());
        assert_eq!(params.max_chain_merkle_branch(), 12);
    }

    #[test]
    fn test_empty_config() {
        let config = "".parse::<Config>().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.network, Network::Regtest);
        assert!(!config.logging.json_format);

        let params = config.consensus_params();
        assert_eq!(params, ConsensusParams::for_network(Network::Regtest));
        assert_eq!(params.auxpow_chain_id(), AUXPOW_CHAIN_ID);
        assert_eq!(params.max_chain_merkle_branch(), MAX_CHAIN_MERKLE_BRANCH);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            "network = \"signet\"".parse::<Config>(),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            "[auxpow]\nchain_id = \"x\"".parse::<Config>(),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"mainnet\"\n[auxpow]\nstrict_chain_id = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert!(!config.consensus_params().strict_chain_id());

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io { path, .. }) if path == missing
        ));
    }

    #[test]
    fn test_resolve_network() {
        let config = Config {
            network: Network::Testnet,
            ..Default::default()
        };

        assert_eq!(
            config
                .resolve_network(Some(Network::Mainnet), Some("regtest"))
                .unwrap(),
            Network::Mainnet
        );
        assert_eq!(
            config.resolve_network(None, Some("regtest")).unwrap(),
            Network::Regtest
        );
        assert_eq!(config.resolve_network(None, None).unwrap(), Network::Testnet);
        assert!(matches!(
            config.resolve_network(None, Some("signet")),
            Err(ConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config {
            network: Network::Mainnet,
            logging: LoggingConfig {
                json_format: true,
                ..Default::default()
            },
            auxpow: AuxPowConfig {
                chain_id: Some(99),
                ..Default::default()
            },
        };
        let s = toml::to_string(&config).unwrap();
        assert_eq!(s.parse::<Config>().unwrap(), config);
    }
}
