use tauri::{AppHandle, Manager};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    backend_config, launch_plan, main_window::TauriShellWindow, shell_locale,
    supervisor::{run_event_loop, ShellEvent, Supervisor},
    ShellState, DEFAULT_SHELL_LOCALE,
};

pub(crate) fn spawn_startup_task<F>(
    app_handle: AppHandle,
    events_rx: UnboundedReceiver<ShellEvent>,
    log: F,
) where
    F: Fn(&str) + Send + 'static,
{
    tauri::async_runtime::spawn(async move {
        let mode = backend_config::resolve_startup_mode();
        log(&format!("Running in {} mode.", mode.as_str()));

        let resource_root = match app_handle.path().resource_dir() {
            Ok(path) => Some(path),
            Err(error) => {
                log(&format!("failed to resolve resource directory: {error}"));
                None
            }
        };
        let shell_texts =
            shell_locale::shell_texts_for_locale(shell_locale::resolve_shell_locale(
                DEFAULT_SHELL_LOCALE,
            ));
        let state = app_handle.state::<ShellState>();
        let mut supervisor = Supervisor::new(
            TauriShellWindow::new(app_handle.clone()),
            shell_texts,
            backend_config::resolve_startup_timeout(),
            state.events(),
        );

        match launch_plan::resolve_launch_plan(mode, resource_root.as_deref()) {
            Ok(plan) => {
                if let Some(process) = supervisor.start(&plan) {
                    state.store_backend(process);
                }
            }
            Err(error) => {
                log(&format!("failed to resolve backend launch plan: {error}"));
                supervisor.handle_event(ShellEvent::SpawnFailed {
                    command: Vec::new(),
                    reason: error.to_string(),
                });
            }
        }

        run_event_loop(supervisor, events_rx).await;
    });
}
