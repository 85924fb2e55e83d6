//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Dev mode raises the default level to debug, including tower_http
//! - `RUST_LOG` always wins over the built-in defaults
//! - Installing twice is not an error: the first subscriber stays

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for the given mode.
pub fn default_directives(is_dev: bool) -> &'static str {
    if is_dev {
        "maple=debug,tower_http=debug"
    } else {
        "maple=info"
    }
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(is_dev: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(is_dev).into());

    match tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Logger already initialized");
            false
        }
    }
}
