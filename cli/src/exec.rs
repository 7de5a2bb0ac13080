//! Subprocess execution behind an injectable [`Executor`] trait.
use anyhow::{Context as _, Result};
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::ExternalToolError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs external programs.
///
/// Resources, tasks and commands take a `&dyn Executor` so tests can swap in
/// a scripted implementation instead of touching `brew`, `flatpak` and
/// friends on the host.
pub trait Executor: std::fmt::Debug + Send + Sync {
    /// Run a command with captured output. Fails if it exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with captured output in `dir`. Fails if it exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with captured output, returning the result even when it
    /// exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command attached to the user's terminal (inherited stdio) with
    /// extra environment variables, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits non-zero.
    fn run_interactive(&self, program: &str, args: &[&str], env: &[(&str, &str)]) -> Result<()>;

    /// Run a command with `input` written to its stdin and stdout/stderr
    /// inherited.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned, stdin cannot be
    /// written, or the program exits non-zero.
    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<()>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

/// Execute a command and return the result, bailing on non-zero exit.
fn execute_checked(mut cmd: Command, program: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {program}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        return Err(ExternalToolError::CommandFailed {
            program: program.to_string(),
            code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(result)
}

/// Map an inherited-stdio exit status to a result.
fn check_status(status: std::process::ExitStatus, program: &str) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(ExternalToolError::CommandFailed {
            program: program.to_string(),
            code: status.code().unwrap_or(-1),
            stderr: String::new(),
        }
        .into())
    }
}

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        execute_checked(cmd, program)
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(dir);
        execute_checked(cmd, program)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn run_interactive(&self, program: &str, args: &[&str], env: &[(&str, &str)]) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (k, v) in env {
            cmd.env(k, v);
        }
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        check_status(status, program)
    }

    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to execute: {program}"))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .with_context(|| format!("writing stdin of {program}"))?;
        }
        let status = child
            .wait()
            .with_context(|| format!("waiting for {program}"))?;
        check_status(status, program)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn run_echo() {
        let result = SystemExecutor.run("echo", &["hello"]).unwrap();
        assert!(result.success, "echo command should succeed");
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn run_failure_is_command_failed() {
        let err = SystemExecutor.run("false", &[]).unwrap_err();
        let typed = err
            .downcast_ref::<ExternalToolError>()
            .expect("typed error");
        assert!(
            matches!(typed, ExternalToolError::CommandFailed { program, .. } if program == "false")
        );
    }

    #[cfg(unix)]
    #[test]
    fn run_unchecked_failure() {
        let result = SystemExecutor.run_unchecked("false", &[]).unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
    }

    #[cfg(unix)]
    #[test]
    fn run_in_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemExecutor.run_in(dir.path(), "pwd", &[]).unwrap();
        assert!(result.success);
    }

    #[cfg(unix)]
    #[test]
    fn run_with_stdin_feeds_input() {
        SystemExecutor
            .run_with_stdin("cat", &[], "piped\n")
            .expect("cat should accept stdin");
    }

    #[test]
    fn which_missing_program() {
        assert!(
            !SystemExecutor.which("this-program-does-not-exist-12345"),
            "non-existent program should not be found"
        );
    }
}
