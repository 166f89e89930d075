//! Shell command execution.

use crate::error::{EnvCheckError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Shell program to run the command line with (None = platform default).
    pub shell: Option<String>,
}

/// Execute a command line through a shell, capturing stdout and stderr.
///
/// A non-zero exit is reported through [`CommandResult::success`], not as an
/// error; only a failure to spawn the shell is an error.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = options.shell.clone().unwrap_or_else(default_shell);
    let flag = shell_flag(&shell);

    tracing::debug!("Running `{} {} {}`", shell, flag, command);

    let mut cmd = Command::new(&shell);
    cmd.arg(flag);
    cmd.arg(command);

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", shell, e);
        EnvCheckError::CommandFailed {
            command: format!("{} {} {}", shell, flag, command),
            message: e.to_string(),
        }
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "Command exited with {:?} after {:?}",
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Platform default shell. Activation scripts need bash on Unix.
pub fn default_shell() -> String {
    if cfg!(target_os = "windows") {
        "cmd".to_string()
    } else {
        "bash".to_string()
    }
}

/// Get the flag to pass a command line to the shell.
fn shell_flag(shell: &str) -> &'static str {
    let name = std::path::Path::new(shell)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match name.as_str() {
        "cmd" => "/C",
        "powershell" | "pwsh" => "-Command",
        _ => "-c",
    }
}

/// Quote a single argument for a POSIX shell command line.
///
/// Plain words pass through unchanged; anything else is single-quoted.
pub fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+%,".contains(c));
    if plain || cfg!(target_os = "windows") {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
