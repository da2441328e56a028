use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use chrono::{DateTime, SecondsFormat, Utc};

static LOG_SINK: OnceLock<LogSink> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogCategory {
    Startup,
    Backend,
    Window,
    Shutdown,
}

impl LogCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Backend => "backend",
            Self::Window => "window",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Append-only log file. Every record is also mirrored to stderr.
#[derive(Debug)]
pub(crate) struct LogSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LogSink {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub(crate) fn append(&self, category: LogCategory, message: &str) -> Result<(), String> {
        let line = format_log_line(Utc::now(), &categorized_message(category, message));

        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(error) => error.into_inner(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create log directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| format!("Failed to open log {}: {}", self.path.display(), error))?;
        file.write_all(line.as_bytes())
            .map_err(|error| format!("Failed to write log {}: {}", self.path.display(), error))
    }
}

pub(crate) fn format_log_line(timestamp: DateTime<Utc>, message: &str) -> String {
    format!(
        "{} - {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        message
    )
}

fn categorized_message(category: LogCategory, message: &str) -> String {
    format!("[{}] {}", category.as_str(), message)
}

/// Installs the process-wide sink. Only the first call wins.
pub(crate) fn install_log_sink(path: PathBuf) -> bool {
    LOG_SINK.set(LogSink::new(path)).is_ok()
}

pub(crate) fn append_log(category: LogCategory, message: &str) {
    eprintln!("{}", categorized_message(category, message));

    let Some(sink) = LOG_SINK.get() else {
        return;
    };
    if let Err(error) = sink.append(category, message) {
        eprintln!("[logging] {error}");
    }
}

pub(crate) fn append_startup_log(message: &str) {
    append_log(LogCategory::Startup, message);
}

pub(crate) fn append_backend_log(message: &str) {
    append_log(LogCategory::Backend, message);
}

pub(crate) fn append_window_log(message: &str) {
    append_log(LogCategory::Window, message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_log(LogCategory::Shutdown, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_log_line_uses_iso_timestamp_and_separator() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap();
        assert_eq!(
            format_log_line(timestamp, "Backend STDOUT: hello"),
            "2024-03-09T08:30:00.000Z - Backend STDOUT: hello\n"
        );
    }

    #[test]
    fn append_creates_parent_directories_and_appends_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("app-log.log");
        let sink = LogSink::new(path.clone());

        sink.append(LogCategory::Startup, "first").expect("first write");
        sink.append(LogCategory::Backend, "second").expect("second write");

        let content = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - [startup] first"));
        assert!(lines[1].ends_with(" - [backend] second"));
    }

    #[test]
    fn append_never_truncates_existing_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("app-log.log");
        fs::write(&path, "earlier run\n").expect("seed log");

        LogSink::new(path.clone())
            .append(LogCategory::Shutdown, "bye")
            .expect("write");

        let content = fs::read_to_string(&path).expect("read log");
        assert!(content.starts_with("earlier run\n"));
        assert!(content.trim_end().ends_with("[shutdown] bye"));
    }

    #[test]
    fn append_reports_unwritable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = LogSink::new(dir.path().to_path_buf());
        assert!(sink.append(LogCategory::Window, "cannot open a directory").is_err());
    }
}
