use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, ShellState};

/// macOS keeps an app alive with no windows open.
pub(crate) fn keep_alive_without_windows() -> bool {
    cfg!(target_os = "macos")
}

pub(crate) fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>, api: &ExitRequestApi) {
    if code.is_none() && keep_alive_without_windows() {
        append_shutdown_log("last window closed, staying alive in the background");
        api.prevent_exit();
        return;
    }

    append_shutdown_log(&format!("exit requested with code {code:?}"));
    stop_backend(app_handle);
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    stop_backend(app_handle);
    append_shutdown_log("desktop process exiting");
}

fn stop_backend(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };
    if let Some(outcome) = state.shutdown_backend() {
        append_shutdown_log(&format!("backend cleanup finished: {outcome:?}"));
    }
}
