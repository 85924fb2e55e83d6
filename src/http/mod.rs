//! HTTP serve command.
//!
//! # Data Flow
//! ```text
//! ServeConfig + domains
//!     → server.rs (base router, pending server settings)
//!     → on_before_serve hook (handlers add routes / change settings)
//!     → layers: timeout, cors.rs, trace
//!     → bind TcpListener → serve until cancelled
//! ```

pub mod cors;
pub mod server;

pub use server::{base_router, serve};
