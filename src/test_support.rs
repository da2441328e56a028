use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::{
    backend_process::SupervisedProcess,
    error::ShellError,
    presentation::ShellDocument,
    status::{ShellWindow, StatusEvent, StatusKind},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingWindow {
    documents: Arc<Mutex<Vec<ShellDocument>>>,
    statuses: Arc<Mutex<Vec<StatusEvent>>>,
}

impl RecordingWindow {
    pub(crate) fn documents(&self) -> Vec<ShellDocument> {
        self.documents.lock().unwrap().clone()
    }

    pub(crate) fn statuses(&self) -> Vec<StatusEvent> {
        self.statuses.lock().unwrap().clone()
    }

    pub(crate) fn status_kinds(&self) -> Vec<StatusKind> {
        self.statuses().iter().map(|event| event.status).collect()
    }
}

impl ShellWindow for RecordingWindow {
    fn load_document(&self, document: ShellDocument) -> Result<(), ShellError> {
        self.documents.lock().unwrap().push(document);
        Ok(())
    }

    fn emit_status(&self, event: &StatusEvent) -> Result<(), ShellError> {
        self.statuses.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct RecordingProcess {
    running: AtomicBool,
    fail_terminate: bool,
    terminate_calls: AtomicUsize,
}

impl RecordingProcess {
    pub(crate) fn running() -> Self {
        Self {
            running: AtomicBool::new(true),
            fail_terminate: false,
            terminate_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn exited() -> Self {
        let process = Self::running();
        process.running.store(false, Ordering::SeqCst);
        process
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_terminate: true,
            ..Self::running()
        }
    }

    pub(crate) fn terminate_calls(&self) -> usize {
        self.terminate_calls.load(Ordering::SeqCst)
    }
}

impl SupervisedProcess for RecordingProcess {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn terminate(&self) -> Result<(), ShellError> {
        self.terminate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_terminate {
            return Err(ShellError::Signal(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            )));
        }
        Ok(())
    }
}
