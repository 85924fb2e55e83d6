//! Generic ordered event hooks.
//!
//! # Data Flow
//! ```text
//! registration (setup):
//!     prepend → [ most recent prepend ... first prepend | first append ... last append ] ← append
//!
//! dispatch (trigger):
//!     snapshot handlers under read lock → call each in order → first failure returned
//! ```
//!
//! # Design Decisions
//! - Handlers are stored closures, not trait objects implemented by callers
//! - Every handler runs exactly once per trigger, even after a failure
//! - The lock covers only mutation and the snapshot, never handler execution

mod error;

pub use error::HookError;

use std::fmt;
use std::sync::{Arc, RwLock};

/// A registered hook callback.
pub type Handler<T> = Arc<dyn Fn(&mut T) -> Result<(), HookError> + Send + Sync>;

/// Ordered collection of handlers for a single event kind.
pub struct Hook<T> {
    name: &'static str,
    handlers: RwLock<Vec<Handler<T>>>,
}

impl<T> Hook<T> {
    /// Create an empty hook. `name` is only used in log output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a handler at the tail of the dispatch order.
    pub fn append<F>(&self, handler: F)
    where
        F: Fn(&mut T) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.append_all([Arc::new(handler) as Handler<T>]);
    }

    /// Register several handlers at the tail, keeping their relative order.
    pub fn append_all<I>(&self, handlers: I)
    where
        I: IntoIterator<Item = Handler<T>>,
    {
        let mut guard = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        guard.extend(handlers);
    }

    /// Register a handler in front of every handler registered so far.
    pub fn prepend<F>(&self, handler: F)
    where
        F: Fn(&mut T) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.prepend_all([Arc::new(handler) as Handler<T>]);
    }

    /// Register several handlers at the head, keeping their relative order.
    ///
    /// A later prepend call still lands in front of this whole group.
    pub fn prepend_all<I>(&self, handlers: I)
    where
        I: IntoIterator<Item = Handler<T>>,
    {
        let incoming: Vec<Handler<T>> = handlers.into_iter().collect();
        if incoming.is_empty() {
            return;
        }
        let mut guard = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        guard.splice(0..0, incoming);
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every handler in dispatch order with `event`.
    ///
    /// Failures are logged and do not stop the remaining handlers. The first
    /// failure (if any) is returned so the caller can decide whether it is fatal.
    pub fn trigger(&self, event: &mut T) -> Result<(), HookError> {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let mut first_error = None;
        for (index, handler) in snapshot.iter().enumerate() {
            if let Err(e) = handler(event) {
                tracing::error!(hook = self.name, handler = index, error = %e, "Hook handler failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<String>>, label: &'static str) -> impl Fn(&mut i32) -> Result<(), HookError> {
        let log = log.clone();
        move |_| {
            log.lock().unwrap().push_str(label);
            Ok(())
        }
    }

    #[test]
    fn test_append_and_prepend_order() {
        let hook: Hook<i32> = Hook::new("test");
        assert_eq!(hook.len(), 0);

        let log = Arc::new(Mutex::new(String::new()));
        hook.append(recorder(&log, "f1"));
        hook.append(recorder(&log, "f2"));
        hook.prepend(recorder(&log, "f3"));
        hook.prepend(recorder(&log, "f4"));

        hook.trigger(&mut 1).unwrap();

        assert_eq!(hook.len(), 4);
        assert_eq!(*log.lock().unwrap(), "f4f3f1f2");
    }

    #[test]
    fn test_grouped_registration_keeps_call_order() {
        let hook: Hook<i32> = Hook::new("test");
        let log = Arc::new(Mutex::new(String::new()));

        hook.append_all([
            Arc::new(recorder(&log, "a1")) as Handler<i32>,
            Arc::new(recorder(&log, "a2")) as Handler<i32>,
        ]);
        hook.prepend_all([
            Arc::new(recorder(&log, "p1")) as Handler<i32>,
            Arc::new(recorder(&log, "p2")) as Handler<i32>,
        ]);
        hook.prepend_all([
            Arc::new(recorder(&log, "q1")) as Handler<i32>,
            Arc::new(recorder(&log, "q2")) as Handler<i32>,
        ]);

        hook.trigger(&mut 0).unwrap();
        assert_eq!(*log.lock().unwrap(), "q1q2p1p2a1a2");
    }

    #[test]
    fn test_empty_registration_is_noop() {
        let hook: Hook<i32> = Hook::new("test");
        let log = Arc::new(Mutex::new(String::new()));
        hook.append(recorder(&log, "f1"));

        hook.append_all(Vec::new());
        hook.prepend_all(Vec::new());

        assert_eq!(hook.len(), 1);
        hook.trigger(&mut 0).unwrap();
        assert_eq!(*log.lock().unwrap(), "f1");
    }

    #[test]
    fn test_trigger_runs_all_handlers_despite_failures() {
        let hook: Hook<i32> = Hook::new("test");
        let calls = Arc::new(AtomicUsize::new(0));

        for i in 0..5 {
            let calls = calls.clone();
            hook.append(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                if i % 2 == 0 {
                    Err(HookError::msg(format!("handler {i} failed")))
                } else {
                    Ok(())
                }
            });
        }

        let err = hook.trigger(&mut 0).unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(err.to_string(), "handler 0 failed");

        // A second trigger calls everything again.
        let _ = hook.trigger(&mut 0);
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_handlers_can_mutate_event() {
        let hook: Hook<Vec<&'static str>> = Hook::new("test");
        hook.append(|v| {
            v.push("appended");
            Ok(())
        });
        hook.prepend(|v| {
            v.push("prepended");
            Ok(())
        });

        let mut event = Vec::new();
        hook.trigger(&mut event).unwrap();
        assert_eq!(event, vec!["prepended", "appended"]);
    }

    #[test]
    fn test_trigger_on_empty_hook() {
        let hook: Hook<()> = Hook::new("empty");
        assert!(hook.is_empty());
        assert!(hook.trigger(&mut ()).is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_append() {
        let hook: Arc<Hook<Mutex<Vec<usize>>>> = Arc::new(Hook::new("concurrent"));

        let mut tasks = Vec::new();
        for id in 0..100 {
            let hook = hook.clone();
            tasks.push(tokio::spawn(async move {
                hook.append(move |seen: &mut Mutex<Vec<usize>>| {
                    seen.get_mut().unwrap().push(id);
                    Ok(())
                });
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(hook.len(), 100);

        let mut seen = Mutex::new(Vec::new());
        hook.trigger(&mut seen).unwrap();
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 100);
        let unique: HashSet<usize> = seen.into_iter().collect();
        assert_eq!(unique, (0..100).collect());
    }
}
