//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Ensure data dir → Initialize logger → fire on_start
//!
//! Race (shutdown.rs):
//!     signal task ──┐
//!                   ├─→ ShutdownRace (capacity 1) → first outcome wins
//!     command task ─┘
//!
//! Teardown:
//!     cancel command token → stop signal listener → join loser (bounded) → fire on_terminate
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → signal task completes
//! ```
//!
//! # Design Decisions
//! - Fail fast: any bootstrap error is fatal, nothing downstream runs
//! - Exactly one outcome is consumed from the race; the loser is cancelled,
//!   not observed
//! - Shutdown has timeout: a loser that ignores cancellation is aborted

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{RaceEntrant, RaceOutcome, ShutdownRace, ShutdownReason};
pub use signals::shutdown_signal;
