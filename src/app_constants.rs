use std::time::Duration;

pub(crate) const APP_IDENTIFIER: &str = "com.aktools.desktop";
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const BACKEND_STATUS_EVENT: &str = "backend-loading-status";
pub(crate) const LOG_FILE_NAME: &str = "app-log.log";
pub(crate) const DEFAULT_SHELL_LOCALE: &str = "zh-CN";

pub(crate) const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 30_000;
pub(crate) const DEFAULT_PYTHON_INTERPRETER: &str = "python3";
pub(crate) const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub(crate) const BACKEND_CMD_ENV: &str = "AKTOOLS_BACKEND_CMD";
pub(crate) const BACKEND_CWD_ENV: &str = "AKTOOLS_BACKEND_CWD";
pub(crate) const BACKEND_ENTRY_ENV: &str = "AKTOOLS_BACKEND_ENTRY";
pub(crate) const BACKEND_TIMEOUT_ENV: &str = "AKTOOLS_BACKEND_TIMEOUT_MS";
pub(crate) const PYTHON_ENV: &str = "AKTOOLS_PYTHON";
pub(crate) const STARTUP_MODE_ENV: &str = "AKTOOLS_DESKTOP_MODE";
pub(crate) const LOCALE_ENV: &str = "AKTOOLS_DESKTOP_LOCALE";
pub(crate) const LOG_PATH_ENV: &str = "AKTOOLS_DESKTOP_LOG_PATH";

#[cfg(target_os = "windows")]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x0800_0000;
