use std::{io, path::PathBuf};

use auxchain_params::UnknownNetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownNetwork(#[from] UnknownNetworkError),
}
