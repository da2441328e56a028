use tauri::{
    menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Wry,
};

use crate::{menu_actions, shell_locale, DEFAULT_SHELL_LOCALE};

pub(crate) fn setup_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE);
    let shell_texts = shell_locale::shell_texts_for_locale(locale);

    let reload_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_RELOAD,
        shell_texts.menu_reload,
        true,
        Some("CmdOrCtrl+R"),
    )
    .map_err(|error| format!("Failed to create reload menu item: {error}"))?;
    #[cfg(debug_assertions)]
    let devtools_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_TOGGLE_DEVTOOLS,
        shell_texts.menu_toggle_devtools,
        true,
        Some("CmdOrCtrl+Shift+I"),
    )
    .map_err(|error| format!("Failed to create devtools menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create separator menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_QUIT,
        shell_texts.menu_quit,
        true,
        Some("CmdOrCtrl+Q"),
    )
    .map_err(|error| format!("Failed to create quit menu item: {error}"))?;

    let mut items: Vec<&dyn IsMenuItem<Wry>> = vec![&reload_item];
    #[cfg(debug_assertions)]
    items.push(&devtools_item);
    items.push(&separator);
    items.push(&quit_item);

    let app_submenu = Submenu::with_items(app_handle, shell_texts.menu_app, true, &items)
        .map_err(|error| format!("Failed to build app submenu: {error}"))?;
    let menu = Menu::with_items(app_handle, &[&app_submenu])
        .map_err(|error| format!("Failed to build app menu: {error}"))?;
    app_handle
        .set_menu(menu)
        .map_err(|error| format!("Failed to install app menu: {error}"))?;
    Ok(())
}
