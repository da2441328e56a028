use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    append_startup_log, append_window_log, backend_process::BackendProcess, exit_events, logging,
    menu_handler, menu_setup, runtime_paths, startup_loading, startup_task, window_actions,
    ShellState, MAIN_WINDOW_LABEL,
};

pub fn run() {
    let log_path = runtime_paths::resolve_log_path();
    logging::install_log_sink(log_path.clone());
    append_startup_log("desktop process starting");
    append_startup_log(&format!("desktop log path: {}", log_path.display()));

    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();

    tauri::Builder::default()
        .manage(ShellState::<BackendProcess>::new(events_tx))
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref())
        })
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::CloseRequested { api, .. } = event {
                let app_handle = window.app_handle();
                let state = app_handle.state::<ShellState>();
                if state.is_terminating() || !exit_events::keep_alive_without_windows() {
                    return;
                }

                api.prevent_close();
                window_actions::hide_main_window(app_handle, append_window_log);
            }
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_window_log(&format!("page-load started: {}", payload.url()));
            }
            PageLoadEvent::Finished => {
                startup_loading::handle_page_load_finished(webview, payload.url());
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            if let Err(error) = menu_setup::setup_app_menu(&app_handle) {
                append_startup_log(&format!("failed to initialize app menu: {error}"));
            }

            startup_task::spawn_startup_task(app_handle.clone(), events_rx, append_startup_log);
            app_handle.state::<ShellState>().begin_running();
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                append_window_log("app reactivated, showing main window");
                window_actions::show_main_window(app_handle, append_window_log);
            }
            _ => {}
        });
}
