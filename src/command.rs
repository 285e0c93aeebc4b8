//! External command execution
//!
//! This module provides:
//! - A `CommandRunner` seam so helper tools can be faked in tests
//! - `SystemCommandRunner`, which looks programs up on `PATH` and runs them
//!   under a timeout

use async_trait::async_trait;
use std::env;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Default time a helper command may run (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status 0
    pub success: bool,
    /// Standard output
    pub stdout: Vec<u8>,
    /// Standard error
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Create a successful output with the given stdout
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Create a failed output with the given stderr
    pub fn failure(stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Standard error as lossy UTF-8, trimmed
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Trait for locating and running external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Returns true if `program` can be found on `PATH`
    fn which(&self, program: &str) -> bool;

    /// Run `program` with `args` and capture its output
    ///
    /// A command that runs too long fails with `io::ErrorKind::TimedOut`.
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Default runner that executes real commands
#[derive(Debug)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Create a runner with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a runner that kills commands running longer than `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    fn which(&self, program: &str) -> bool {
        let Some(paths) = env::var_os("PATH") else {
            return false;
        };
        env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(program);
            if is_executable(&candidate) {
                return true;
            }
            cfg!(windows) && is_executable(&candidate.with_extension("exe"))
        })
    }

    async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let child = Command::new(program).args(args).kill_on_drop(true).output();
        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("{} did not finish within {:?}", program, self.timeout),
                )
            })??;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
