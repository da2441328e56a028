use url::Url;

use crate::{
    append_window_log,
    readiness::ReadinessState,
    status::{broadcast_status, ShellWindow, StatusEvent},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellDocument {
    Loading,
    Main,
}

impl ShellDocument {
    pub(crate) fn file_name(self) -> &'static str {
        match self {
            Self::Loading => "loading.html",
            Self::Main => "index.html",
        }
    }
}

pub(crate) fn is_loading_document(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| last == ShellDocument::Loading.file_name())
}

/// The frontend-ready signal: the loading document finished in the main window.
/// Later loads of the main document do not count.
pub(crate) fn signals_frontend_ready(window_label: &str, url: &Url) -> bool {
    window_label == crate::MAIN_WINDOW_LABEL && is_loading_document(url)
}

/// Owns the window and the readiness flags.
///
/// Every flag change ends in [`PresentationController::evaluate`], so checking
/// both flags and loading the main document happen as one step on the event
/// loop. If the backend fails before it is ready, the loading document stays
/// up for good; its status line carries the error.
pub(crate) struct PresentationController<W> {
    window: W,
    readiness: ReadinessState,
}

impl<W: ShellWindow> PresentationController<W> {
    pub(crate) fn new(window: W) -> Self {
        Self {
            window,
            readiness: ReadinessState::default(),
        }
    }

    pub(crate) fn window(&self) -> &W {
        &self.window
    }

    pub(crate) fn readiness(&self) -> &ReadinessState {
        &self.readiness
    }

    pub(crate) fn readiness_mut(&mut self) -> &mut ReadinessState {
        &mut self.readiness
    }

    pub(crate) fn broadcast(&self, event: &StatusEvent) {
        broadcast_status(&self.window, event);
    }

    pub(crate) fn on_loading_document_ready(&mut self) {
        if self.readiness.mark_frontend_ready() {
            append_window_log("Loading screen finished loading.");
        } else {
            append_window_log("Loading screen finished loading again.");
        }
        self.evaluate();
    }

    /// Loads the main document if both sides are ready. Returns whether it did.
    pub(crate) fn evaluate(&mut self) -> bool {
        if !self.readiness.take_presentation() {
            if !self.readiness.presented() {
                append_window_log(&format!(
                    "Deferring main application load: backend_ready={} frontend_ready={}",
                    self.readiness.backend_ready(),
                    self.readiness.frontend_ready()
                ));
            }
            return false;
        }

        append_window_log("Loading main application content.");
        if let Err(error) = self.window.load_document(ShellDocument::Main) {
            append_window_log(&format!("failed to load main application: {error}"));
        }
        true
    }
}
