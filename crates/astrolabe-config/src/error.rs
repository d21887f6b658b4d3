//! Errors of the configuration layer.

use std::path::PathBuf;

/// Failure to locate, read, parse or write the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform exposes no per-user configuration directory.
    #[error("no configuration directory on this platform")]
    NoConfigDir,

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
