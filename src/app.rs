//! Application lifecycle orchestration.
//!
//! ```text
//! Created ──bootstrap()──▶ Bootstrapped ──execute()──▶ Running ──race decided──▶ Exited
//! ```

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cli::Command;
use crate::config::Config;
use crate::error::AppError;
use crate::hooks::{Hooks, StartEvent, TerminateEvent};
use crate::http;
use crate::lifecycle::{self, startup, RaceOutcome, ShutdownRace, ShutdownReason};
use crate::observability::logging;

/// Where an [`App`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Bootstrapped,
    Running,
    Exited,
}

/// A Maple application instance.
///
/// Cheap to clone; clones share hooks, configuration and state.
#[derive(Clone)]
pub struct App {
    inner: Arc<AppInner>,
}

struct AppInner {
    config: Config,
    hooks: Hooks,
    state: Mutex<LifecycleState>,
}

impl App {
    /// Create an application from an explicit configuration.
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(AppInner {
                config,
                hooks: Hooks::new(),
                state: Mutex::new(LifecycleState::Created),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.config.data_dir
    }

    pub fn is_dev(&self) -> bool {
        self.inner.config.is_dev
    }

    /// The hook registration surface. Register everything before `execute`.
    pub fn hooks(&self) -> &Hooks {
        &self.inner.hooks
    }

    pub fn state(&self) -> LifecycleState {
        *self.lock_state()
    }

    fn set_state(&self, state: LifecycleState) {
        *self.lock_state() = state;
    }

    fn lock_state(&self) -> MutexGuard<'_, LifecycleState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ensure the data directory exists and install the logger.
    ///
    /// Safe to call more than once before the app starts running.
    pub fn bootstrap(&self) -> Result<(), AppError> {
        let mut state = self.lock_state();
        self.bootstrap_locked(&mut state, LifecycleState::Bootstrapped)
    }

    // Check, bootstrap and move to `next` while the caller holds the state lock,
    // so two callers cannot both leave `Created`/`Bootstrapped`.
    fn bootstrap_locked(
        &self,
        state: &mut LifecycleState,
        next: LifecycleState,
    ) -> Result<(), AppError> {
        match *state {
            LifecycleState::Created | LifecycleState::Bootstrapped => {}
            actual => {
                return Err(AppError::InvalidState {
                    expected: LifecycleState::Bootstrapped,
                    actual,
                })
            }
        }

        startup::ensure_data_dir(self.data_dir())?;
        logging::init(self.is_dev());

        *state = next;
        tracing::info!(
            data_dir = %self.data_dir().display(),
            dev = self.is_dev(),
            "Application bootstrapped"
        );
        Ok(())
    }

    /// Run a parsed CLI command to completion or until a shutdown signal.
    pub async fn start(&self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Serve(args) => {
                let app = self.clone();
                let serve_config = self.config().serve.clone();
                let has_domains = !args.domains.is_empty();
                self.execute(move |shutdown| http::serve(app, serve_config, has_domains, shutdown))
                    .await
            }
        }
    }

    /// Bootstrap, fire `on_start`, then race `command` against an OS shutdown signal.
    ///
    /// The app is `Running` from the moment bootstrap succeeds, so `on_start`
    /// handlers already observe that state and a concurrent `execute` on a
    /// clone is rejected.
    ///
    /// Returns `Ok(())` once either side finishes, regardless of which one won
    /// or whether the command failed. `on_terminate` handlers receive the
    /// actual [`ShutdownReason`].
    pub async fn execute<F, Fut>(&self, command: F) -> Result<(), AppError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        self.execute_until(command, lifecycle::shutdown_signal()).await
    }

    /// Like [`App::execute`], with a caller-provided shutdown signal.
    pub async fn execute_until<F, Fut, S>(&self, command: F, signal: S) -> Result<(), AppError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
        S: Future<Output = ()> + Send + 'static,
    {
        {
            let mut state = self.lock_state();
            self.bootstrap_locked(&mut state, LifecycleState::Running)?;
        }

        self.hooks().fire_on_start(&mut StartEvent {
            data_dir: self.data_dir().to_path_buf(),
            is_dev: self.is_dev(),
        });

        let race = ShutdownRace::new();
        let token = CancellationToken::new();

        let entrant = race.entrant("signal");
        let mut signal_task = tokio::spawn(async move {
            signal.await;
            entrant.finish(RaceOutcome::Signal).await;
        });

        let entrant = race.entrant("command");
        let command = command(token.clone());
        let mut command_task = tokio::spawn(async move {
            let result = command.await;
            entrant.finish(RaceOutcome::Command(result)).await;
        });

        let reason = match race.winner().await {
            Some(outcome) => ShutdownReason::from(outcome),
            None => ShutdownReason::CommandFailed("command task ended without reporting".into()),
        };

        match &reason {
            ShutdownReason::CommandFailed(e) => tracing::error!(error = %e, "Command failed"),
            reason => tracing::info!(%reason, "Shutting down"),
        }

        token.cancel();
        signal_task.abort();
        let _ = (&mut signal_task).await;

        let grace = Duration::from_secs(self.config().shutdown_timeout_secs);
        match tokio::time::timeout(grace, &mut command_task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_panic() => tracing::error!(error = %e, "Command task panicked"),
            Ok(Err(_)) => {}
            Err(_) => {
                tracing::warn!(timeout = ?grace, "Command did not stop in time, aborting");
                command_task.abort();
            }
        }

        self.hooks().fire_on_terminate(&mut TerminateEvent { reason });
        self.set_state(LifecycleState::Exited);

        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .finish()
    }
}
