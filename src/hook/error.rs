//! Hook handler failures.

use thiserror::Error;

/// Failure reported by a single hook handler.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Build a failure from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        HookError::Message(message.into())
    }

    /// Wrap any error type as a handler failure.
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HookError::Source(Box::new(error))
    }
}
