//! Maple application scaffold.
//!
//! Boots a process, runs lifecycle hooks and serves HTTP until a shutdown
//! signal arrives.
//!
//! ```rust,no_run
//! use axum::routing::get;
//! use maple::{App, Config};
//!
//! # async fn run() -> Result<(), maple::AppError> {
//! let app = App::new(Config::default());
//!
//! app.hooks()
//!     .on_start(|e| {
//!         tracing::info!(data_dir = %e.data_dir.display(), "started");
//!         Ok(())
//!     })
//!     .on_before_serve(|e| {
//!         e.route("/hello", get(|| async { "hi" }));
//!         Ok(())
//!     });
//!
//! let shutdown_app = app.clone();
//! app.execute(move |token| {
//!     maple::http::serve(shutdown_app, Default::default(), false, token)
//! })
//! .await
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hook;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use app::{App, LifecycleState};
pub use config::{Config, ServeConfig};
pub use error::AppError;
pub use hook::{Handler, Hook, HookError};
pub use hooks::{Hooks, PendingServer, ServeEvent, StartEvent, TerminateEvent};
pub use lifecycle::ShutdownReason;
