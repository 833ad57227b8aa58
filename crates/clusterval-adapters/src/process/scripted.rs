//! Scripted process runner for testing.

use std::{
    collections::HashMap,
    io,
    sync::{Arc, PoisonError, RwLock},
};

use clusterval_core::application::ports::{ProcessOutput, ProcessRunner};

/// In-memory process runner that replays canned outputs.
///
/// Responses are keyed by the full command line (`program arg1 arg2`).
/// Unscripted commands fail as if the program were not installed. Every
/// invocation is recorded so tests can assert on what was (not) run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProcessRunner {
    inner: Arc<RwLock<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    responses: HashMap<String, ProcessOutput>,
    calls: Vec<String>,
}

impl ScriptedProcessRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `command_line` to return `output`.
    pub fn respond(&self, command_line: &str, output: ProcessOutput) -> &Self {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.responses.insert(command_line.to_owned(), output);
        self
    }

    /// Script `command_line` to exit 0 with `stdout`.
    pub fn succeed(&self, command_line: &str, stdout: &str) -> &Self {
        self.respond(
            command_line,
            ProcessOutput {
                status: Some(0),
                stdout: stdout.to_owned(),
                stderr: String::new(),
            },
        )
    }

    /// Script `command_line` to exit with `status`.
    pub fn fail(&self, command_line: &str, status: i32) -> &Self {
        self.respond(
            command_line,
            ProcessOutput {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.calls.clone()
    }
}

impl ProcessRunner for ScriptedProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        let command_line = std::iter::once(program)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let mut inner = self
            .inner
            .write()
            .map_err(|_| io::Error::other("scripted runner lock poisoned"))?;
        inner.calls.push(command_line.clone());

        inner.responses.get(&command_line).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no scripted response for `{command_line}`"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_and_records() {
        let runner = ScriptedProcessRunner::new();
        runner.succeed("crm_node -l", "1 n1 member\n");

        let out = runner.run("crm_node", &["-l".into()]).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "1 n1 member\n");
        assert_eq!(runner.calls(), vec!["crm_node -l"]);
    }

    #[test]
    fn unscripted_command_is_not_found() {
        let runner = ScriptedProcessRunner::new();
        let err = runner.run("salt", &["n1".into()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(runner.calls(), vec!["salt n1"]);
    }
}
