use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log, append_window_log, menu_actions, window_actions, ShellState,
};

pub(crate) fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match menu_actions::action_from_menu_id(menu_id) {
        Some(menu_actions::AppMenuAction::Reload) => {
            window_actions::reload_main_window(app_handle, append_window_log)
        }
        Some(menu_actions::AppMenuAction::ToggleDevtools) => {
            #[cfg(debug_assertions)]
            window_actions::toggle_main_window_devtools(app_handle, append_window_log);
        }
        Some(menu_actions::AppMenuAction::Quit) => {
            let state = app_handle.state::<ShellState>();
            state.shutdown_backend();
            append_shutdown_log("menu quit requested, exiting desktop process");
            app_handle.exit(0);
        }
        None => {}
    }
}
