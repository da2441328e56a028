use crate::{append_shutdown_log, backend_process::SupervisedProcess};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitCleanupOutcome {
    NoBackend,
    AlreadyExited,
    Signaled,
    SignalFailed,
}

/// Sends the single termination signal the backend gets on shutdown.
pub(crate) fn stop_backend_on_exit<P>(process: Option<&P>) -> ExitCleanupOutcome
where
    P: SupervisedProcess + ?Sized,
{
    let Some(process) = process else {
        append_shutdown_log("no backend process to stop");
        return ExitCleanupOutcome::NoBackend;
    };
    if !process.is_running() {
        append_shutdown_log("backend process already exited");
        return ExitCleanupOutcome::AlreadyExited;
    }

    append_shutdown_log("Killing backend process.");
    match process.terminate() {
        Ok(()) => ExitCleanupOutcome::Signaled,
        Err(error) => {
            append_shutdown_log(&format!("failed to stop backend process: {error}"));
            ExitCleanupOutcome::SignalFailed
        }
    }
}
