pub(crate) const MENU_RELOAD: &str = "app_reload";
pub(crate) const MENU_TOGGLE_DEVTOOLS: &str = "app_toggle_devtools";
pub(crate) const MENU_QUIT: &str = "app_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppMenuAction {
    Reload,
    ToggleDevtools,
    Quit,
}

pub(crate) fn action_from_menu_id(menu_id: &str) -> Option<AppMenuAction> {
    match menu_id {
        MENU_RELOAD => Some(AppMenuAction::Reload),
        MENU_TOGGLE_DEVTOOLS => Some(AppMenuAction::ToggleDevtools),
        MENU_QUIT => Some(AppMenuAction::Quit),
        _ => None,
    }
}
