use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    append_shutdown_log, append_window_log,
    backend_process::{BackendProcess, SupervisedProcess},
    exit_cleanup::{stop_backend_on_exit, ExitCleanupOutcome},
    exit_state::{LifecyclePhase, LifecycleStateMachine},
    supervisor::ShellEvent,
};

/// State shared between window callbacks, the run loop and the supervisor task.
#[derive(Debug)]
pub(crate) struct ShellState<P = BackendProcess> {
    events: UnboundedSender<ShellEvent>,
    backend: Mutex<Option<P>>,
    lifecycle: Mutex<LifecycleStateMachine>,
}

fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(error) => {
            append_shutdown_log(&format!("{what} lock poisoned: {error}"));
            error.into_inner()
        }
    }
}

impl<P: SupervisedProcess> ShellState<P> {
    pub(crate) fn new(events: UnboundedSender<ShellEvent>) -> Self {
        Self {
            events,
            backend: Mutex::new(None),
            lifecycle: Mutex::new(LifecycleStateMachine::default()),
        }
    }

    pub(crate) fn events(&self) -> UnboundedSender<ShellEvent> {
        self.events.clone()
    }

    pub(crate) fn notify(&self, event: ShellEvent) {
        if let Err(error) = self.events.send(event) {
            append_window_log(&format!(
                "supervisor is gone, dropping event {:?}",
                error.0
            ));
        }
    }

    pub(crate) fn phase(&self) -> LifecyclePhase {
        lock_or_recover(&self.lifecycle, "lifecycle").phase()
    }

    pub(crate) fn begin_running(&self) -> bool {
        lock_or_recover(&self.lifecycle, "lifecycle").begin_running()
    }

    pub(crate) fn is_terminating(&self) -> bool {
        lock_or_recover(&self.lifecycle, "lifecycle").is_terminating()
    }

    /// Keeps the handle for shutdown. A backend that finishes spawning after
    /// shutdown began is stopped right away.
    ///
    /// The phase is read while the backend lock is held. Shutdown enters
    /// `Terminating` before it takes that lock, so either it sees the stored
    /// handle or this call sees `Terminating`.
    pub(crate) fn store_backend(&self, process: P) {
        let mut backend = lock_or_recover(&self.backend, "backend process");
        *backend = Some(process);
        if self.is_terminating() {
            append_shutdown_log("backend spawned during shutdown");
            stop_backend_on_exit(backend.as_ref());
        }
    }

    /// Enters `Terminating` and signals the backend. Only the first call
    /// does anything; later calls return `None`.
    pub(crate) fn shutdown_backend(&self) -> Option<ExitCleanupOutcome> {
        if !lock_or_recover(&self.lifecycle, "lifecycle").begin_terminating() {
            return None;
        }
        let backend = lock_or_recover(&self.backend, "backend process");
        Some(stop_backend_on_exit(backend.as_ref()))
    }
}
