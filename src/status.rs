use serde::Serialize;

use crate::{append_window_log, error::ShellError, shell_locale::ShellTexts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StatusKind {
    Loading,
    Ready,
    Timeout,
    Error,
}

/// Startup progress pushed to the loading view. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StatusEvent {
    pub(crate) status: StatusKind,
    pub(crate) message: String,
}

impl StatusEvent {
    pub(crate) fn loading(message: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Loading,
            message: message.into(),
        }
    }

    pub(crate) fn ready(texts: &ShellTexts) -> Self {
        Self {
            status: StatusKind::Ready,
            message: texts.backend_ready.to_string(),
        }
    }

    pub(crate) fn timeout(texts: &ShellTexts) -> Self {
        Self {
            status: StatusKind::Timeout,
            message: texts.backend_timeout.to_string(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Where status events and documents go. The desktop build implements this
/// for the main webview window.
pub(crate) trait ShellWindow {
    fn load_document(&self, document: crate::presentation::ShellDocument)
        -> Result<(), ShellError>;

    /// Fire-and-forget. Implementations must not queue for later delivery.
    fn emit_status(&self, event: &StatusEvent) -> Result<(), ShellError>;
}

pub(crate) fn broadcast_status<W: ShellWindow + ?Sized>(window: &W, event: &StatusEvent) {
    if let Err(error) = window.emit_status(event) {
        append_window_log(&format!(
            "failed to deliver backend status {:?}: {error}",
            event.status
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell_locale::shell_texts_for_locale;

    #[test]
    fn status_event_serializes_to_loading_view_shape() {
        let event = StatusEvent::timeout(&shell_texts_for_locale("en-US"));
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "status": "timeout",
                "message": "Backend startup timed out, some features may be unavailable",
            })
        );
    }

    #[test]
    fn status_kinds_serialize_lowercase() {
        for (kind, expected) in [
            (StatusKind::Loading, "\"loading\""),
            (StatusKind::Ready, "\"ready\""),
            (StatusKind::Timeout, "\"timeout\""),
            (StatusKind::Error, "\"error\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).expect("serialize"), expected);
        }
    }
}
