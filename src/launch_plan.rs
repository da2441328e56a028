use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    backend_config::StartupMode, error::ShellError, runtime_paths, BACKEND_CMD_ENV,
    BACKEND_CWD_ENV, BACKEND_ENTRY_ENV, DEFAULT_PYTHON_INTERPRETER, PYTHON_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
    /// Set for bundled executables that lose their mode bits on some platforms.
    pub(crate) ensure_executable: Option<PathBuf>,
}

impl LaunchPlan {
    pub(crate) fn debug_command(&self) -> Vec<String> {
        let mut parts = vec![self.cmd.clone()];
        parts.extend(self.args.clone());
        parts
    }
}

pub(crate) fn packaged_executable_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "run.exe"
    } else {
        "run"
    }
}

pub(crate) fn custom_launch_plan(custom_cmd: &str) -> Result<LaunchPlan, ShellError> {
    let mut pieces = shlex::split(custom_cmd)
        .ok_or_else(|| ShellError::InvalidCommand(custom_cmd.to_string()))?;
    if pieces.is_empty() {
        return Err(ShellError::InvalidCommand(
            "command override is empty".to_string(),
        ));
    }

    let cmd = pieces.remove(0);
    Ok(LaunchPlan {
        cmd,
        args: pieces,
        cwd: None,
        ensure_executable: None,
    })
}

/// The child runs in the entry script's directory, not the shell's working
/// directory.
pub(crate) fn dev_launch_plan(interpreter: &str, entry_script: &Path) -> LaunchPlan {
    LaunchPlan {
        cmd: interpreter.to_string(),
        args: vec![entry_script.to_string_lossy().to_string()],
        cwd: entry_script.parent().map(Path::to_path_buf),
        ensure_executable: None,
    }
}

pub(crate) fn packaged_launch_plan(resource_root: &Path) -> LaunchPlan {
    let backend_dir = resource_root.join("backend");
    let executable = backend_dir.join(packaged_executable_name());
    LaunchPlan {
        cmd: executable.to_string_lossy().to_string(),
        args: Vec::new(),
        cwd: Some(backend_dir),
        ensure_executable: (!cfg!(target_os = "windows")).then(|| executable.clone()),
    }
}

/// Picks the command for this run: an explicit override, otherwise by mode.
pub(crate) fn resolve_launch_plan(
    mode: StartupMode,
    resource_root: Option<&Path>,
) -> Result<LaunchPlan, ShellError> {
    let mut plan = if let Some(custom_cmd) = non_empty_env(BACKEND_CMD_ENV) {
        custom_launch_plan(&custom_cmd)?
    } else {
        match mode {
            StartupMode::Development => {
                let interpreter = non_empty_env(PYTHON_ENV)
                    .unwrap_or_else(|| DEFAULT_PYTHON_INTERPRETER.to_string());
                let entry_script = non_empty_env(BACKEND_ENTRY_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| {
                        runtime_paths::workspace_root_dir()
                            .join("backend")
                            .join("run.py")
                    });
                dev_launch_plan(&interpreter, &entry_script)
            }
            StartupMode::Packaged => {
                let resource_root = resource_root.ok_or_else(|| ShellError::SpawnFailure {
                    command: vec![packaged_executable_name().to_string()],
                    reason: "resource directory is unavailable".to_string(),
                })?;
                packaged_launch_plan(resource_root)
            }
        }
    };

    if let Some(cwd) = non_empty_env(BACKEND_CWD_ENV) {
        plan.cwd = Some(PathBuf::from(cwd));
    }
    Ok(plan)
}

/// Sets mode 0755 on unix. Callers treat a failure as non-fatal.
pub(crate) fn ensure_executable(path: &Path) -> Result<(), ShellError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(
            |error| ShellError::PermissionSetup {
                path: path.to_path_buf(),
                reason: error.to_string(),
            },
        )
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
