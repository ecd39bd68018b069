//! Errors that abort a generation run.

use std::path::PathBuf;

use schemac_ir::DanglingReference;

/// Result alias defaulting to [`GenerateError`].
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Every way a run can fail.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Plugin dependencies form a loop.
    #[error("circular plugin dependency: {}", plugins.join(" -> "))]
    PluginCycle {
        /// The loop, starting and ending with the same plugin.
        plugins: Vec<String>,
    },

    /// A `$ref` points at nothing.
    #[error(transparent)]
    DanglingReference(#[from] DanglingReference),

    /// No built-in plugin has this name.
    #[error("unknown plugin `{name}` (available: {available})")]
    UnknownPlugin {
        /// Requested name.
        name: String,
        /// Comma-separated built-in names.
        available: String,
    },

    /// The same plugin appears twice in one run.
    #[error("plugin `{name}` is configured more than once")]
    DuplicatePlugin {
        /// Repeated name.
        name: String,
    },

    /// Invalid user configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed plugin configuration JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
