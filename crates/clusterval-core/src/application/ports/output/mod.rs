//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits describe every external system a validator talks to.
//! The `clusterval-adapters` crate provides implementations.

use std::io;

use crate::domain::{ClusterNode, StonithResource};
use crate::error::ValidationResult;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// `exit status N`, or `terminated by signal` when there is no code.
    pub fn status_text(&self) -> String {
        match self.status {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".into(),
        }
    }
}

/// Port for running external programs.
///
/// Implemented by:
/// - `clusterval_adapters::process::SystemProcessRunner` (production)
/// - `clusterval_adapters::process::ScriptedProcessRunner` (testing)
///
/// `Err` means the program could not be started at all; a program that ran
/// and failed is an `Ok` with a non-zero status.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput>;
}

/// Port for single-shot liveness checks (one ICMP echo).
///
/// Probes are best-effort: anything other than a reply within the
/// configured bound counts as unreachable.
#[cfg_attr(test, mockall::automock)]
pub trait ReachabilityProbe: Send + Sync {
    fn is_reachable(&self, address: &str) -> bool;
}

/// Port for TCP service endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceProbe: Send + Sync {
    /// Open and immediately drop one connection to `host:port`.
    fn connect(&self, host: &str, port: u16) -> io::Result<()>;
}

/// Port for querying the pacemaker cluster manager.
#[cfg_attr(test, mockall::automock)]
pub trait ClusterManager: Send + Sync {
    /// All nodes known to the membership layer.
    fn nodes(&self) -> ValidationResult<Vec<ClusterNode>>;

    /// All configured fencing resources.
    fn stonith_resources(&self) -> ValidationResult<Vec<StonithResource>>;
}
