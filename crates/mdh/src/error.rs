//! CLI error types.

use std::path::PathBuf;

use mdh_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fixture file {}: {source}", path.display())]
    Fixtures {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{failed} of {total} cases failed")]
    CheckFailed { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
