use std::{env, time::Duration};

use crate::{DEFAULT_STARTUP_TIMEOUT_MS, STARTUP_MODE_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartupMode {
    Development,
    Packaged,
}

impl StartupMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Packaged => "packaged",
        }
    }
}

pub(crate) fn parse_startup_mode(raw: &str) -> Option<StartupMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dev" | "development" => Some(StartupMode::Development),
        "packaged" | "release" | "prod" | "production" => Some(StartupMode::Packaged),
        _ => None,
    }
}

/// Debug builds run the backend from source, release builds run the bundled executable.
pub(crate) fn resolve_startup_mode() -> StartupMode {
    env::var(STARTUP_MODE_ENV)
        .ok()
        .and_then(|value| parse_startup_mode(&value))
        .unwrap_or(if cfg!(debug_assertions) {
            StartupMode::Development
        } else {
            StartupMode::Packaged
        })
}

pub(crate) fn parse_startup_timeout(raw: Option<&str>) -> Duration {
    let timeout_ms = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_STARTUP_TIMEOUT_MS);
    Duration::from_millis(timeout_ms)
}

pub(crate) fn resolve_startup_timeout() -> Duration {
    parse_startup_timeout(env::var(crate::BACKEND_TIMEOUT_ENV).ok().as_deref())
}
