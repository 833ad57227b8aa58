//! Salt minion validations.
//!
//! Usage: `salt minions <node1> <node2> <...>`

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{Validator, distinct, ensure_args, unsupported};
use crate::{
    application::ports::ProcessRunner,
    error::{ErrorCode, ValidationError, ValidationResult},
};

pub struct SaltValidator {
    runner: Arc<dyn ProcessRunner>,
}

impl SaltValidator {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Every node's minion answers `test.ping`.
    #[instrument(skip_all, fields(count = nodes.len()))]
    pub fn validate_minions(&self, nodes: &[String]) -> ValidationResult<()> {
        let silent: Vec<&str> = distinct(nodes)
            .into_iter()
            .filter(|node| !self.minion_responds(node))
            .collect();

        if !silent.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::HostUnreachable,
                format!("Salt minion(s) not responding: {}", silent.join(", ")),
            ));
        }

        info!("All salt minions responded");
        Ok(())
    }

    fn minion_responds(&self, node: &str) -> bool {
        let args = vec![node.to_owned(), "test.ping".to_owned()];
        match self.runner.run("salt", &args) {
            Ok(out) => {
                debug!(node, status = ?out.status, "salt test.ping finished");
                out.success() && out.stdout.contains("True")
            }
            Err(e) => {
                debug!(node, error = %e, "salt could not be started");
                false
            }
        }
    }
}

impl Validator for SaltValidator {
    fn subtypes(&self) -> &'static [&'static str] {
        &["minions"]
    }

    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()> {
        ensure_args(v_type, args, "<node1> <node2> <...>")?;

        match v_type {
            "minions" => self.validate_minions(args),
            other => Err(unsupported(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockProcessRunner, ProcessOutput};
    use std::io;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn responding_minions_pass() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|program, args| program == "salt" && args[1] == "test.ping")
            .times(2)
            .returning(|_, args| {
                Ok(ProcessOutput {
                    status: Some(0),
                    stdout: format!("{}:\n    True\n", args[0]),
                    stderr: String::new(),
                })
            });

        let v = SaltValidator::new(Arc::new(runner));
        assert!(v.validate("minions", &strings(&["srvnode-1", "srvnode-2"])).is_ok());
    }

    #[test]
    fn silent_and_missing_minions_accumulate() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_, args| match args[0].as_str() {
            "up" => Ok(ProcessOutput {
                status: Some(0),
                stdout: "up:\n    True\n".into(),
                stderr: String::new(),
            }),
            "silent" => Ok(ProcessOutput {
                status: Some(1),
                stdout: "Minion did not return. [No response]".into(),
                stderr: String::new(),
            }),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "salt: not found")),
        });

        let err = SaltValidator::new(Arc::new(runner))
            .validate("minions", &strings(&["silent", "up", "gone"]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::HostUnreachable);
        assert_eq!(err.message(), "Salt minion(s) not responding: silent, gone");
    }

    #[test]
    fn preconditions_run_before_salt() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(0);
        let v = SaltValidator::new(Arc::new(runner));

        assert_eq!(
            v.validate("minions", &[]).unwrap_err().code(),
            ErrorCode::InvalidArgument
        );
        assert!(v
            .validate("grains", &strings(&["n1"]))
            .unwrap_err()
            .message()
            .contains("grains"));
    }
}
