//! Application error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::app::LifecycleState;
use crate::config::ConfigError;
use crate::hook::HookError;

/// Errors surfaced by the application lifecycle and its commands.
#[derive(Error, Debug)]
pub enum AppError {
    /// The data directory could not be created. Fatal during bootstrap.
    #[error("failed to create data directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A hook whose outcome the caller treats as fatal reported a failure.
    #[error("hook `{hook}` failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("invalid listen address `{0}`")]
    InvalidAddress(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid lifecycle state: expected {expected:?}, found {actual:?}")]
    InvalidState {
        expected: LifecycleState,
        actual: LifecycleState,
    },
}
