//! Process runner adapter using std::process.

use std::io;
use std::process::{Command, Stdio};

use clusterval_core::application::ports::{ProcessOutput, ProcessRunner};
use tracing::{debug, instrument};

/// Production process runner: spawns the program and waits for it.
///
/// stdin is closed so a tool that prompts (ssh asking for a password,
/// ipmitool asking for credentials) fails instead of hanging.
#[derive(Debug, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Create a new system process runner.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for SystemProcessRunner {
    // Arguments are not recorded: they may carry credentials.
    #[instrument(skip(self, args))]
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        let out = ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(status = ?out.status, "Process finished");
        Ok(out)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_status_and_stdout() {
        let out = SystemProcessRunner::new()
            .run("sh", &["-c".into(), "echo hello; exit 3".into()])
            .unwrap();
        assert_eq!(out.status, Some(3));
        assert_eq!(out.stdout.trim(), "hello");
        assert!(!out.success());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = SystemProcessRunner::new()
            .run("clusterval-no-such-program", &[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
