//! Remote command invocation.

/// How to run a command on another node.
///
/// Validators only build the argument vector; running it is the job of a
/// [`ProcessRunner`](crate::application::ports::ProcessRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteShell {
    program: String,
    options: Vec<String>,
}

impl RemoteShell {
    pub fn new(program: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments that run `command` on `node`: `<options> <node> <command...>`.
    pub fn args_for(&self, node: &str, command: &[&str]) -> Vec<String> {
        self.options
            .iter()
            .cloned()
            .chain(std::iter::once(node.to_owned()))
            .chain(command.iter().map(|s| (*s).to_owned()))
            .collect()
    }
}
