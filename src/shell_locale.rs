use std::env;

use crate::error::format_exit_code;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ShellTexts {
    pub(crate) backend_ready: &'static str,
    pub(crate) backend_timeout: &'static str,
    pub(crate) backend_exited_prefix: &'static str,
    pub(crate) backend_spawn_failed_prefix: &'static str,
    pub(crate) menu_app: &'static str,
    pub(crate) menu_reload: &'static str,
    pub(crate) menu_toggle_devtools: &'static str,
    pub(crate) menu_quit: &'static str,
}

impl ShellTexts {
    pub(crate) fn backend_exited(&self, code: Option<i32>) -> String {
        format!("{}{})", self.backend_exited_prefix, format_exit_code(code))
    }

    pub(crate) fn backend_spawn_failed(&self, reason: &str) -> String {
        format!("{}{}", self.backend_spawn_failed_prefix, reason)
    }
}

pub(crate) fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    if locale == "en-US" {
        return ShellTexts {
            backend_ready: "Backend service is ready",
            backend_timeout: "Backend startup timed out, some features may be unavailable",
            backend_exited_prefix: "Backend service exited (code: ",
            backend_spawn_failed_prefix: "Failed to start backend service: ",
            menu_app: "App",
            menu_reload: "Reload",
            menu_toggle_devtools: "Toggle Developer Tools",
            menu_quit: "Quit",
        };
    }

    ShellTexts {
        backend_ready: "后端服务已就绪",
        backend_timeout: "后端服务启动超时，部分功能可能无法使用",
        backend_exited_prefix: "后端服务已退出 (代码: ",
        backend_spawn_failed_prefix: "后端服务启动失败: ",
        menu_app: "应用",
        menu_reload: "重新加载",
        menu_toggle_devtools: "开发者工具",
        menu_quit: "退出",
    }
}

pub(crate) fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    for env_key in [crate::LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Ok(value) = env::var(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "zh-CN" {
        return Some("zh-CN");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("zh") {
        return Some("zh-CN");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_texts_for_locale_returns_english_copy() {
        let texts = shell_texts_for_locale("en-US");
        assert_eq!(texts.backend_ready, "Backend service is ready");
        assert_eq!(texts.menu_quit, "Quit");
    }

    #[test]
    fn shell_texts_for_locale_falls_back_to_zh_cn_copy() {
        let texts = shell_texts_for_locale("fr-FR");
        assert_eq!(texts.backend_ready, "后端服务已就绪");
        assert_eq!(texts.menu_quit, "退出");
    }

    #[test]
    fn backend_exited_message_carries_exit_code() {
        let texts = shell_texts_for_locale("zh-CN");
        assert_eq!(texts.backend_exited(Some(1)), "后端服务已退出 (代码: 1)");
        assert_eq!(
            shell_texts_for_locale("en-US").backend_exited(None),
            "Backend service exited (code: null)"
        );
    }

    #[test]
    fn normalize_shell_locale_accepts_language_prefixes() {
        assert_eq!(normalize_shell_locale("EN_us.UTF-8"), Some("en-US"));
        assert_eq!(normalize_shell_locale("zh_TW"), Some("zh-CN"));
        assert_eq!(normalize_shell_locale("fr-FR"), None);
        assert_eq!(normalize_shell_locale("   "), None);
    }
}
