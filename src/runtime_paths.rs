use std::{env, path::PathBuf};

use crate::{APP_IDENTIFIER, LOG_FILE_NAME, LOG_PATH_ENV};

pub(crate) fn default_app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_IDENTIFIER))
}

pub(crate) fn resolve_log_path() -> PathBuf {
    if let Some(path) = env::var(LOG_PATH_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return PathBuf::from(path);
    }

    default_app_data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(LOG_FILE_NAME)
}

/// Root of the source checkout, where `backend/run.py` lives during development.
pub(crate) fn workspace_root_dir() -> PathBuf {
    let candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    candidate.canonicalize().unwrap_or(candidate)
}
