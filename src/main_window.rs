use tauri::{AppHandle, Emitter, Manager, WebviewWindow};

use crate::{
    error::ShellError,
    presentation::ShellDocument,
    status::{ShellWindow, StatusEvent},
    BACKEND_STATUS_EVENT, MAIN_WINDOW_LABEL,
};

pub(crate) fn get_main_window(app_handle: &AppHandle) -> Option<WebviewWindow> {
    app_handle.get_webview_window(MAIN_WINDOW_LABEL)
}

fn eval_in_main_window(app_handle: &AppHandle, script: &str) -> Result<(), ShellError> {
    let window = get_main_window(app_handle)
        .ok_or_else(|| ShellError::Window("main window is unavailable".to_string()))?;
    window
        .eval(script)
        .map_err(|error| ShellError::Window(format!("failed to run script in main window: {error}")))
}

/// Replaces the current document; the target resolves relative to it.
pub(crate) fn navigate_main_window(app_handle: &AppHandle, target: &str) -> Result<(), ShellError> {
    let target = serde_json::to_string(target)
        .map_err(|error| ShellError::Window(format!("failed to encode navigation target: {error}")))?;
    eval_in_main_window(app_handle, &format!("window.location.replace({target});"))
}

pub(crate) fn reload_main_window(app_handle: &AppHandle) -> Result<(), ShellError> {
    eval_in_main_window(app_handle, "window.location.reload();")
}

pub(crate) fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = get_main_window(app_handle) else {
        log("show_main_window skipped: main window not found");
        return;
    };
    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub(crate) fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = get_main_window(app_handle) else {
        log("hide_main_window skipped: main window not found");
        return;
    };
    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
    }
}

/// The supervisor's view of the main webview window.
pub(crate) struct TauriShellWindow {
    app_handle: AppHandle,
}

impl TauriShellWindow {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl ShellWindow for TauriShellWindow {
    fn load_document(&self, document: ShellDocument) -> Result<(), ShellError> {
        navigate_main_window(&self.app_handle, document.file_name())
    }

    fn emit_status(&self, event: &StatusEvent) -> Result<(), ShellError> {
        if get_main_window(&self.app_handle).is_none() {
            return Ok(());
        }
        self.app_handle
            .emit_to(MAIN_WINDOW_LABEL, BACKEND_STATUS_EVENT, event)
            .map_err(|error| ShellError::Window(format!("failed to emit backend status: {error}")))
    }
}
