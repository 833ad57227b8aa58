//! Per-invocation facts threaded to the formatters.

use std::ffi::OsString;
use std::path::Path;

const DEFAULT_PROG: &str = "clusterval";

/// What the user typed to start us, as far as output is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    prog_name: String,
}

impl InvocationContext {
    pub fn new(prog_name: impl Into<String>) -> Self {
        Self {
            prog_name: prog_name.into(),
        }
    }

    /// Derive the program name from `argv[0]`, keeping only the file name.
    pub fn from_argv(argv: &[OsString]) -> Self {
        let prog_name = argv
            .first()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PROG.to_owned());
        Self { prog_name }
    }

    pub fn prog_name(&self) -> &str {
        &self.prog_name
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(DEFAULT_PROG)
    }
}
