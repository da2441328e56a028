//! Backend startup supervision.
//!
//! Every input (output lines, process exit, spawn failure, the startup timer
//! and the loading document's ready signal) arrives as a [`ShellEvent`] on one
//! channel and is handled by one task, so the readiness flags are only ever
//! touched from [`Supervisor::handle_event`].

use std::time::Duration;

use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    append_backend_log,
    backend_output::{classify_backend_line, OutputStream},
    backend_process::BackendProcess,
    error::ShellError,
    launch_plan::{ensure_executable, LaunchPlan},
    presentation::PresentationController,
    readiness::{BackendOutcome, ReadinessState},
    shell_locale::ShellTexts,
    status::{ShellWindow, StatusEvent},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellEvent {
    Output { stream: OutputStream, line: String },
    Exited { code: Option<i32> },
    SpawnFailed { command: Vec<String>, reason: String },
    StartupTimedOut,
    LoadingDocumentReady,
}

pub(crate) struct Supervisor<W> {
    presentation: PresentationController<W>,
    texts: ShellTexts,
    startup_timeout: Duration,
    events: UnboundedSender<ShellEvent>,
    startup_timer: Option<JoinHandle<()>>,
}

impl<W: ShellWindow> Supervisor<W> {
    pub(crate) fn new(
        window: W,
        texts: ShellTexts,
        startup_timeout: Duration,
        events: UnboundedSender<ShellEvent>,
    ) -> Self {
        Self {
            presentation: PresentationController::new(window),
            texts,
            startup_timeout,
            events,
            startup_timer: None,
        }
    }

    pub(crate) fn readiness(&self) -> &ReadinessState {
        self.presentation.readiness()
    }

    pub(crate) fn window(&self) -> &W {
        self.presentation.window()
    }

    /// Spawns the backend once and arms the startup timer.
    ///
    /// A spawn failure is handled right away and yields `None`; there is no retry.
    pub(crate) fn start(&mut self, plan: &LaunchPlan) -> Option<BackendProcess> {
        if let Some(path) = &plan.ensure_executable {
            match ensure_executable(path) {
                Ok(()) => append_backend_log(&format!(
                    "Made backend executable: {}",
                    path.display()
                )),
                Err(error) => append_backend_log(&format!(
                    "Error setting backend executable permissions: {error}"
                )),
            }
        }

        append_backend_log(&format!(
            "Attempting to start backend with path: {}",
            plan.cmd
        ));
        if !plan.args.is_empty() {
            append_backend_log(&format!("With arguments: {}", plan.args.join(" ")));
        }

        match BackendProcess::spawn(plan, self.events.clone()) {
            Ok(process) => {
                self.arm_startup_timer();
                Some(process)
            }
            Err(error) => {
                let (command, reason) = match error {
                    ShellError::SpawnFailure { command, reason } => (command, reason),
                    other => (plan.debug_command(), other.to_string()),
                };
                self.handle_event(ShellEvent::SpawnFailed { command, reason });
                None
            }
        }
    }

    pub(crate) fn arm_startup_timer(&mut self) {
        self.cancel_startup_timer();
        let events = self.events.clone();
        let after = self.startup_timeout;
        self.startup_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = events.send(ShellEvent::StartupTimedOut);
        }));
    }

    fn cancel_startup_timer(&mut self) {
        if let Some(timer) = self.startup_timer.take() {
            timer.abort();
        }
    }

    pub(crate) fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Output { stream, line } => self.on_output(stream, &line),
            ShellEvent::Exited { code } => {
                append_backend_log(&format!(
                    "Backend process exited with code {}",
                    crate::error::format_exit_code(code)
                ));
                self.on_backend_failed(
                    ShellError::UnexpectedExit { code },
                    self.texts.backend_exited(code),
                );
            }
            ShellEvent::SpawnFailed { command, reason } => {
                let message = self.texts.backend_spawn_failed(&reason);
                self.on_backend_failed(ShellError::SpawnFailure { command, reason }, message);
            }
            ShellEvent::StartupTimedOut => self.on_startup_timeout(),
            ShellEvent::LoadingDocumentReady => self.presentation.on_loading_document_ready(),
        }
    }

    fn on_output(&mut self, stream: OutputStream, line: &str) {
        append_backend_log(&format!("Backend {}: {}", stream.as_str(), line));

        let class = classify_backend_line(line);
        if class.progress {
            self.presentation.broadcast(&StatusEvent::loading(line));
        }
        if class.server_running {
            self.on_server_running();
        }
    }

    fn on_server_running(&mut self) {
        self.cancel_startup_timer();
        if let Err(rejected) = self
            .presentation
            .readiness_mut()
            .backend
            .transition(BackendOutcome::Ready)
        {
            append_backend_log(&format!("server running line ignored: {rejected}"));
            return;
        }

        append_backend_log("Backend has started successfully.");
        self.presentation.broadcast(&StatusEvent::ready(&self.texts));
        self.presentation.evaluate();
    }

    fn on_startup_timeout(&mut self) {
        self.startup_timer = None;
        if let Err(rejected) = self
            .presentation
            .readiness_mut()
            .backend
            .transition(BackendOutcome::TimedOut)
        {
            append_backend_log(&format!("stale startup timer ignored: {rejected}"));
            return;
        }

        let error = ShellError::StartupTimeout {
            after: self.startup_timeout,
        };
        append_backend_log(&format!("{error}. Proceeding with UI load."));
        self.presentation.broadcast(&StatusEvent::timeout(&self.texts));
        self.presentation.evaluate();
    }

    /// Exit and spawn failure share this path. A pending startup becomes
    /// `Failed` and the main document is never loaded for it. After a timeout
    /// the failure is still reported but the outcome stays `TimedOut`; after
    /// the marker it is only logged.
    fn on_backend_failed(&mut self, error: ShellError, message: String) {
        self.cancel_startup_timer();
        if let Err(rejected) = self
            .presentation
            .readiness_mut()
            .backend
            .transition(BackendOutcome::Failed)
        {
            append_backend_log(&format!("{error} after startup settled ({rejected})"));
            if self.readiness().backend == BackendOutcome::TimedOut {
                self.presentation.broadcast(&StatusEvent::error(message));
            }
            return;
        }

        append_backend_log(&format!("Backend startup failed: {error}"));
        self.presentation.broadcast(&StatusEvent::error(message));
    }
}

impl<W> Drop for Supervisor<W> {
    fn drop(&mut self) {
        if let Some(timer) = self.startup_timer.take() {
            timer.abort();
        }
    }
}

/// Handles events for the rest of the run. The supervisor keeps a sender for
/// its timer, so this only returns once the runtime shuts down.
pub(crate) async fn run_event_loop<W: ShellWindow>(
    mut supervisor: Supervisor<W>,
    mut events: UnboundedReceiver<ShellEvent>,
) {
    while let Some(event) = events.recv().await {
        supervisor.handle_event(event);
    }
}
