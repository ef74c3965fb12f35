use crate::rewrite::ProxyCommand;
use crate::{Error, Result};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Status reported when a child exits without a code and no signal is known.
const UNKNOWN_STATUS: i32 = 1;

/// Offset the POSIX shell adds to a terminating signal number.
#[cfg(unix)]
const SIGNAL_STATUS_BASE: i32 = 128;

/// Runs a proxy command to completion and reports its exit code.
pub trait Executor {
    fn run(&mut self, command: &ProxyCommand) -> Result<i32>;
}

/// Hands the command line to the host command interpreter.
///
/// Stdio is inherited, so compiler diagnostics and preprocessor output pass
/// straight through. There is no timeout.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    flag: String,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            flag: flag.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl Default for ShellExecutor {
    #[cfg(not(windows))]
    fn default() -> Self {
        Self::new("sh", "-c")
    }

    #[cfg(windows)]
    fn default() -> Self {
        Self::new("cmd", "/C")
    }
}

impl Executor for ShellExecutor {
    fn run(&mut self, command: &ProxyCommand) -> Result<i32> {
        info!(command = %command, "delegating to host compiler");

        let status = Command::new(&self.shell)
            .arg(&self.flag)
            .arg(command.as_os_str())
            .status()
            .map_err(|source| Error::Spawn {
                program: self.shell.clone(),
                source,
            })?;

        let code = exit_code(status);
        debug!(code, "host compiler finished");
        Ok(code)
    }
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn run(&mut self, command: &ProxyCommand) -> Result<i32> {
        (**self).run(command)
    }
}

/// Maps a child status to the code this process should exit with.
///
/// A child killed by a signal is reported the way a POSIX shell reports it,
/// as `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_STATUS_BASE + signal;
        }
    }

    UNKNOWN_STATUS
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn test_exit_code_passthrough() {
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(1 << 8)), 1);
        assert_eq!(exit_code(ExitStatus::from_raw(42 << 8)), 42);
    }

    #[test]
    fn test_exit_code_from_signal() {
        // raw wait status 9 = killed by SIGKILL
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 137);
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let mut executor = ShellExecutor::new("/nonexistent/cctrap-shell", "-c");
        let command = crate::rewrite::rewrite(["true"], "", &|_: &std::ffi::OsStr| false).command;

        match executor.run(&command) {
            Err(Error::Spawn { program, .. }) => assert_eq!(program, "/nonexistent/cctrap-shell"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
