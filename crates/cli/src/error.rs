//! Errors reported by the command line.

use std::path::PathBuf;

use schemac_core::GenerateError;

/// Anything that stops a command; printed to stderr with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Generation itself failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// `schemac.toml` did not parse.
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The IR document did not parse.
    #[error("invalid IR document: {0}")]
    Json(#[from] serde_json::Error),
}
