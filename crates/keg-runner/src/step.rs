//! Shell command execution wrappers.
//!
//! Provides a thin wrapper around subprocess invocation so that the rest of
//! the codebase does not need to deal with `std::process::Command` directly.
//! Steps run through the platform shell (`sh -c`, `cmd /C` on Windows), so
//! formulas can use pipes, redirects, and `$VAR` expansion.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running a formula step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The shell could not be spawned.
    #[error("failed to spawn shell for `{command}`: {source}")]
    Spawn {
        /// The step command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The step exited with a non-zero status.
    #[error("`{command}` failed (exit code {code:?}): {stderr}")]
    Failed {
        /// The step command line.
        command: String,
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The trimmed content of stderr.
        stderr: String,
    },
}

/// A specialized `Result` type for step execution.
pub type Result<T> = std::result::Result<T, StepError>;

/// Captured output of a successful step.
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// Trimmed stdout.
    pub stdout: String,
    /// Trimmed stderr (build tools often log progress here).
    pub stderr: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run one step command line through the shell.
///
/// The step runs with `cwd` as its working directory and `envs` added to the
/// inherited environment. Returns the captured output on success.
///
/// # Errors
///
/// Returns [`StepError::Spawn`] if the shell cannot be started, or
/// [`StepError::Failed`] if the step exits with a non-zero status.
pub fn run_step(command: &str, cwd: &Path, envs: &[(String, String)]) -> Result<StepOutput> {
    let (shell, flag) = SHELL;
    debug!(%command, cwd = %cwd.display(), "running step");

    let output = Command::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(cwd)
        .envs(envs.iter().map(|(k, v)| (k, v)))
        .output()
        .map_err(|e| StepError::Spawn {
            command: command.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(StepError::Failed {
            command: command.to_string(),
            code: output.status.code(),
            stderr,
        });
    }

    Ok(StepOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_stdout() {
        let out = run_step("echo hello", Path::new("."), &[]).unwrap();
        assert_eq!(out.stdout, "hello");
    }

    #[test]
    fn nonzero_exit_is_failed() {
        let err = run_step("exit 3", Path::new("."), &[]).unwrap_err();
        match err {
            StepError::Failed { command, code, .. } => {
                assert_eq!(command, "exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failure_carries_stderr() {
        let err = run_step("echo broken >&2; exit 1", Path::new("."), &[]).unwrap_err();
        match err {
            StepError::Failed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn env_vars_reach_the_step() {
        let envs = vec![("KEG_NAME".to_string(), "acltool".to_string())];
        run_step("test \"$KEG_NAME\" = acltool", Path::new("."), &envs).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_given_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), b"").unwrap();
        run_step("test -f marker", dir.path(), &[]).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn shell_features_work() {
        let out = run_step("printf 'a\\nb\\n' | wc -l", Path::new("."), &[]).unwrap();
        assert_eq!(out.stdout.trim(), "2");
    }
}
