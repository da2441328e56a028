use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Failures the shell reports while supervising the backend.
///
/// None of these stop the shell itself; they end up in the log and, where the
/// user should know, in the loading view's status line.
#[derive(Debug, Error)]
pub(crate) enum ShellError {
    #[error("failed to start backend process {command:?}: {reason}")]
    SpawnFailure {
        command: Vec<String>,
        reason: String,
    },

    #[error("failed to mark backend executable {}: {reason}", path.display())]
    PermissionSetup { path: PathBuf, reason: String },

    #[error("backend did not report readiness within {}ms", after.as_millis())]
    StartupTimeout { after: Duration },

    #[error("backend process exited with code {}", format_exit_code(*code))]
    UnexpectedExit { code: Option<i32> },

    #[error("invalid backend command override: {0}")]
    InvalidCommand(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("failed to signal backend process: {0}")]
    Signal(#[from] std::io::Error),
}

pub(crate) fn format_exit_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_exit_renders_missing_code_as_null() {
        let error = ShellError::UnexpectedExit { code: None };
        assert_eq!(error.to_string(), "backend process exited with code null");
    }

    #[test]
    fn startup_timeout_renders_milliseconds() {
        let error = ShellError::StartupTimeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(
            error.to_string(),
            "backend did not report readiness within 30000ms"
        );
    }
}
