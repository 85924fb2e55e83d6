//! Shutdown race between the OS signal listener and the running command.

use std::fmt;

use tokio::sync::mpsc;

use crate::error::AppError;

/// What one side of the race reports when it finishes.
#[derive(Debug)]
pub enum RaceOutcome {
    /// An interrupt or termination signal arrived.
    Signal,
    /// The command returned on its own.
    Command(Result<(), AppError>),
    /// A racing task went away without reporting (panicked or was aborted).
    Abandoned(&'static str),
}

/// Why the application stopped running, as seen by `on_terminate` handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    Signal,
    CommandFinished,
    CommandFailed(String),
}

impl From<RaceOutcome> for ShutdownReason {
    fn from(outcome: RaceOutcome) -> Self {
        match outcome {
            RaceOutcome::Signal => ShutdownReason::Signal,
            RaceOutcome::Command(Ok(())) => ShutdownReason::CommandFinished,
            RaceOutcome::Command(Err(e)) => ShutdownReason::CommandFailed(e.to_string()),
            RaceOutcome::Abandoned(task) => {
                ShutdownReason::CommandFailed(format!("{task} task exited without reporting"))
            }
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Signal => write!(f, "signal received"),
            ShutdownReason::CommandFinished => write!(f, "command finished"),
            ShutdownReason::CommandFailed(e) => write!(f, "command failed: {}", e),
        }
    }
}

/// Single-slot completion signal shared by the racing tasks.
///
/// Only the first outcome is ever consumed. Consuming it drops the receiver,
/// so a late finisher never blocks on a full slot.
pub struct ShutdownRace {
    tx: mpsc::Sender<RaceOutcome>,
    rx: mpsc::Receiver<RaceOutcome>,
}

impl ShutdownRace {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self { tx, rx }
    }

    /// Hand out a sender for one of the racing tasks. `task` names it in
    /// the outcome reported if it is dropped without finishing.
    pub fn entrant(&self, task: &'static str) -> RaceEntrant {
        RaceEntrant {
            task,
            tx: Some(self.tx.clone()),
        }
    }

    /// Wait for the first outcome.
    ///
    /// Returns `None` if every entrant was dropped without finishing (e.g. all
    /// racing tasks panicked).
    pub async fn winner(self) -> Option<RaceOutcome> {
        let Self { tx, mut rx } = self;
        drop(tx);
        rx.recv().await
    }
}

impl Default for ShutdownRace {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half held by a racing task.
///
/// Dropping it without calling [`RaceEntrant::finish`] (e.g. while the task
/// unwinds from a panic) reports [`RaceOutcome::Abandoned`].
pub struct RaceEntrant {
    task: &'static str,
    tx: Option<mpsc::Sender<RaceOutcome>>,
}

impl RaceEntrant {
    /// Report completion. A no-op once the race has been decided.
    pub async fn finish(mut self, outcome: RaceOutcome) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(outcome).await;
        }
    }
}

impl Drop for RaceEntrant {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            // Fails when the slot is taken or the race is over; both are fine.
            let _ = tx.try_send(RaceOutcome::Abandoned(self.task));
        }
    }
}
