//! Error types surfaced to the caller
//!
//! Only configuration problems can fail. Everything the simulation does at
//! runtime is total over its inputs, and late timers are swallowed.

use std::path::PathBuf;

/// Reasons `Game::start` refuses to begin a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("at least one production line must be selected")]
    NoLanesSelected,
}

/// Failures loading a settings or tuning file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
