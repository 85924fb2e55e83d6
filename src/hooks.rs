//! Named lifecycle hooks exposed by [`App`].
//!
//! Each lifecycle moment owns one [`Hook`] with its own event type:
//!
//! - `on_start`: the app has bootstrapped and is about to run its command
//! - `on_before_serve`: the HTTP router exists but nothing is bound yet
//! - `on_terminate`: the shutdown race has been decided

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use axum::routing::MethodRouter;
use axum::Router;

use crate::app::App;
use crate::error::AppError;
use crate::hook::{Handler, Hook, HookError};
use crate::lifecycle::ShutdownReason;

/// Payload of the `on_start` hook.
#[derive(Debug, Clone)]
pub struct StartEvent {
    pub data_dir: PathBuf,
    pub is_dev: bool,
}

/// Server settings that may still change before the listener binds.
#[derive(Debug, Clone)]
pub struct PendingServer {
    /// Address the listener will bind.
    pub addr: String,
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

/// Payload of the `on_before_serve` hook.
///
/// Handlers may add routes or change the pending server settings. Layers
/// (CORS, timeout, tracing) are applied after the hook, so routes added here
/// are covered by them.
pub struct ServeEvent {
    pub app: App,
    pub router: Router,
    pub server: PendingServer,
}

impl ServeEvent {
    /// Add a route to the pending router.
    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.router = std::mem::take(&mut self.router).route(path, method_router);
        self
    }

    /// Merge another router into the pending router.
    pub fn merge(&mut self, other: Router) -> &mut Self {
        self.router = std::mem::take(&mut self.router).merge(other);
        self
    }
}

/// Payload of the `on_terminate` hook.
#[derive(Debug, Clone)]
pub struct TerminateEvent {
    pub reason: ShutdownReason,
}

/// The registration surface of an [`App`].
pub struct Hooks {
    // Serializes registrations across every hook.
    registration: Mutex<()>,
    on_start: Hook<StartEvent>,
    on_before_serve: Hook<ServeEvent>,
    on_terminate: Hook<TerminateEvent>,
}

impl Hooks {
    pub fn new() -> Self {
        Self {
            registration: Mutex::new(()),
            on_start: Hook::new("on_start"),
            on_before_serve: Hook::new("on_before_serve"),
            on_terminate: Hook::new("on_terminate"),
        }
    }

    fn register(&self, f: impl FnOnce()) -> &Self {
        let _guard = self.registration.lock().unwrap_or_else(|e| e.into_inner());
        f();
        self
    }

    /// Register a handler run after bootstrap, before the command starts.
    ///
    /// Failures are logged; the remaining handlers still run and startup continues.
    pub fn on_start<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut StartEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_start.append(handler))
    }

    /// Register several `on_start` handlers, in order.
    pub fn on_start_all<I>(&self, handlers: I) -> &Self
    where
        I: IntoIterator<Item = Handler<StartEvent>>,
    {
        self.register(|| self.on_start.append_all(handlers))
    }

    /// Register an `on_start` handler in front of all current ones.
    pub fn prepend_on_start<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut StartEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_start.prepend(handler))
    }

    /// Register a handler run before the HTTP listener binds.
    ///
    /// A failure here aborts the serve command.
    pub fn on_before_serve<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut ServeEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_before_serve.append(handler))
    }

    pub fn on_before_serve_all<I>(&self, handlers: I) -> &Self
    where
        I: IntoIterator<Item = Handler<ServeEvent>>,
    {
        self.register(|| self.on_before_serve.append_all(handlers))
    }

    pub fn prepend_on_before_serve<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut ServeEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_before_serve.prepend(handler))
    }

    /// Register a handler run once the app stops running.
    pub fn on_terminate<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut TerminateEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_terminate.append(handler))
    }

    pub fn on_terminate_all<I>(&self, handlers: I) -> &Self
    where
        I: IntoIterator<Item = Handler<TerminateEvent>>,
    {
        self.register(|| self.on_terminate.append_all(handlers))
    }

    pub fn prepend_on_terminate<F>(&self, handler: F) -> &Self
    where
        F: Fn(&mut TerminateEvent) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.register(|| self.on_terminate.prepend(handler))
    }

    pub(crate) fn fire_on_start(&self, event: &mut StartEvent) {
        if let Err(e) = self.on_start.trigger(event) {
            tracing::warn!(error = %e, "on_start finished with failures");
        }
    }

    pub(crate) fn fire_on_before_serve(&self, event: &mut ServeEvent) -> Result<(), AppError> {
        self.on_before_serve
            .trigger(event)
            .map_err(|source| AppError::Hook {
                hook: self.on_before_serve.name(),
                source,
            })
    }

    pub(crate) fn fire_on_terminate(&self, event: &mut TerminateEvent) {
        if let Err(e) = self.on_terminate.trigger(event) {
            tracing::warn!(error = %e, "on_terminate finished with failures");
        }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}
