use std::{
    process::Stdio,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{Child, Command},
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
};

use crate::{
    append_backend_log,
    backend_output::{split_output_lines, OutputStream},
    error::ShellError,
    launch_plan::LaunchPlan,
    supervisor::ShellEvent,
    OUTPUT_DRAIN_TIMEOUT,
};

/// What shutdown needs from the supervised child.
pub(crate) trait SupervisedProcess {
    fn is_running(&self) -> bool;

    /// Sends a single termination request. Does not wait for the exit.
    fn terminate(&self) -> Result<(), ShellError>;
}

/// Handle to the spawned backend.
///
/// The `Child` itself lives in a wait task that reports `ShellEvent::Exited`
/// once output is drained. This handle keeps only the pid and an exited flag.
#[derive(Debug)]
pub(crate) struct BackendProcess {
    pid: Option<u32>,
    exited: Arc<AtomicBool>,
}

impl BackendProcess {
    pub(crate) fn spawn(plan: &LaunchPlan, events: UnboundedSender<ShellEvent>) -> Result<Self, ShellError> {
        let mut command = Command::new(&plan.cmd);
        command
            .args(&plan.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("PYTHONUNBUFFERED", "1")
            .env(
                "PYTHONUTF8",
                std::env::var("PYTHONUTF8").unwrap_or_else(|_| "1".to_string()),
            )
            .env(
                "PYTHONIOENCODING",
                std::env::var("PYTHONIOENCODING").unwrap_or_else(|_| "utf-8".to_string()),
            )
            .kill_on_drop(true);
        if let Some(cwd) = &plan.cwd {
            command.current_dir(cwd);
        }
        #[cfg(target_os = "windows")]
        command.creation_flags(crate::CREATE_NO_WINDOW);

        let mut child = command.spawn().map_err(|error| ShellError::SpawnFailure {
            command: plan.debug_command(),
            reason: error.to_string(),
        })?;

        let pid = child.id();
        append_backend_log(&format!("Backend process started with pid {pid:?}"));

        let stdout_task = child
            .stdout
            .take()
            .map(|stdout| tokio::spawn(forward_output(stdout, OutputStream::Stdout, events.clone())));
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(forward_output(stderr, OutputStream::Stderr, events.clone())));

        let exited = Arc::new(AtomicBool::new(false));
        tokio::spawn(wait_for_exit(
            child,
            [stdout_task, stderr_task],
            events,
            Arc::clone(&exited),
        ));

        Ok(Self { pid, exited })
    }
}

impl SupervisedProcess for BackendProcess {
    fn is_running(&self) -> bool {
        !self.exited.load(Ordering::Acquire)
    }

    fn terminate(&self) -> Result<(), ShellError> {
        if !self.is_running() {
            return Ok(());
        }
        let Some(pid) = self.pid else {
            return Ok(());
        };
        send_termination_signal(pid)
    }
}

/// Reads one stream until EOF, one event per line. Invalid UTF-8 is replaced, not fatal.
async fn forward_output<R>(reader: R, stream: OutputStream, events: UnboundedSender<ShellEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer).await {
            Ok(0) => break,
            Ok(_) => {
                let chunk = String::from_utf8_lossy(&buffer);
                for line in split_output_lines(&chunk) {
                    if events
                        .send(ShellEvent::Output {
                            stream,
                            line: line.to_string(),
                        })
                        .is_err()
                    {
                        return;
                    }
                }
            }
            Err(error) => {
                append_backend_log(&format!(
                    "failed to read backend {}: {error}",
                    stream.as_str()
                ));
                break;
            }
        }
    }
}

async fn wait_for_exit(
    mut child: Child,
    readers: [Option<JoinHandle<()>>; 2],
    events: UnboundedSender<ShellEvent>,
    exited: Arc<AtomicBool>,
) {
    let code = match child.wait().await {
        Ok(status) => status.code(),
        Err(error) => {
            append_backend_log(&format!("failed to wait for backend process: {error}"));
            None
        }
    };
    exited.store(true, Ordering::Release);

    // Lines printed right before exit must be handled before the exit itself.
    let drained = tokio::time::timeout(OUTPUT_DRAIN_TIMEOUT, async {
        for reader in readers.into_iter().flatten() {
            let _ = reader.await;
        }
    })
    .await;
    if drained.is_err() {
        append_backend_log("backend output still open after exit; not waiting any longer");
    }

    let _ = events.send(ShellEvent::Exited { code });
}

#[cfg(unix)]
fn send_termination_signal(pid: u32) -> Result<(), ShellError> {
    let pid = libc::pid_t::try_from(pid).map_err(|_| {
        ShellError::Signal(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("pid {pid} out of range"),
        ))
    })?;
    // SAFETY: kill(2) takes plain integers and has no memory-safety preconditions.
    let result = unsafe { libc::kill(pid, libc::SIGTERM) };
    if result == 0 {
        Ok(())
    } else {
        Err(ShellError::Signal(std::io::Error::last_os_error()))
    }
}

#[cfg(target_os = "windows")]
fn send_termination_signal(pid: u32) -> Result<(), ShellError> {
    use std::os::windows::process::CommandExt;

    std::process::Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/t", "/f"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .creation_flags(crate::CREATE_NO_WINDOW)
        .spawn()
        .map(|_| ())
        .map_err(ShellError::Signal)
}

#[cfg(not(any(unix, target_os = "windows")))]
fn send_termination_signal(_pid: u32) -> Result<(), ShellError> {
    Err(ShellError::Signal(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "terminating processes is not supported on this platform",
    )))
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;

    fn shell_plan(script: &str) -> LaunchPlan {
        LaunchPlan {
            cmd: "/bin/sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            cwd: None,
            ensure_executable: None,
        }
    }

    async fn collect_until_exit(rx: &mut mpsc::UnboundedReceiver<ShellEvent>) -> Vec<ShellEvent> {
        let mut seen = Vec::new();
        while let Some(event) = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("backend events within 10s")
        {
            let done = matches!(event, ShellEvent::Exited { .. });
            seen.push(event);
            if done {
                break;
            }
        }
        seen
    }

    #[tokio::test]
    async fn spawn_forwards_both_streams_before_exit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let process = BackendProcess::spawn(
            &shell_plan("echo 'out line'; echo 'err line' 1>&2; exit 3"),
            tx,
        )
        .expect("spawn sh");

        let events = collect_until_exit(&mut rx).await;

        assert!(events.contains(&ShellEvent::Output {
            stream: OutputStream::Stdout,
            line: "out line".to_string(),
        }));
        assert!(events.contains(&ShellEvent::Output {
            stream: OutputStream::Stderr,
            line: "err line".to_string(),
        }));
        assert_eq!(events.last(), Some(&ShellEvent::Exited { code: Some(3) }));
        assert!(!process.is_running());
        assert!(process.terminate().is_ok());
    }

    #[tokio::test]
    async fn spawn_reports_missing_executable() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let plan = LaunchPlan {
            cmd: "/definitely/not/a/backend".to_string(),
            args: Vec::new(),
            cwd: None,
            ensure_executable: None,
        };

        let error = BackendProcess::spawn(&plan, tx).unwrap_err();
        match error {
            ShellError::SpawnFailure { command, .. } => {
                assert_eq!(command, vec!["/definitely/not/a/backend".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn terminate_signals_running_process() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let process = BackendProcess::spawn(&shell_plan("sleep 30"), tx).expect("spawn sh");
        assert!(process.is_running());

        process.terminate().expect("send SIGTERM");
        let events = collect_until_exit(&mut rx).await;

        assert_eq!(events.last(), Some(&ShellEvent::Exited { code: None }));
        assert!(!process.is_running());
    }
}
