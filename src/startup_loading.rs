use tauri::{Manager, Webview};
use url::Url;

use crate::{
    append_window_log, presentation, supervisor::ShellEvent, window_actions, ShellState,
};

/// Shows the hidden window once the loading document has painted, then tells
/// the supervisor the frontend side is ready.
pub(crate) fn handle_page_load_finished(webview: &Webview, url: &Url) {
    append_window_log(&format!("page-load finished: {url}"));
    if !presentation::signals_frontend_ready(webview.window().label(), url) {
        return;
    }

    let app_handle = webview.app_handle();
    window_actions::show_main_window(app_handle, append_window_log);
    app_handle
        .state::<ShellState>()
        .notify(ShellEvent::LoadingDocumentReady);
}
