//! Storage validations.
//!
//! Usage: `storage luns <node1> <node2> <...>`

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{Validator, distinct, ensure_args, unsupported};
use crate::{
    application::ports::ProcessRunner,
    domain::RemoteShell,
    error::{ErrorCode, ValidationError, ValidationResult},
};

pub struct StorageValidator {
    runner: Arc<dyn ProcessRunner>,
    shell: RemoteShell,
}

impl StorageValidator {
    pub fn new(runner: Arc<dyn ProcessRunner>, shell: RemoteShell) -> Self {
        Self { runner, shell }
    }

    /// Every node sees at least one SCSI disk.
    #[instrument(skip_all, fields(count = nodes.len()))]
    pub fn validate_luns(&self, nodes: &[String]) -> ValidationResult<()> {
        let failures: Vec<String> = distinct(nodes)
            .into_iter()
            .filter_map(|node| match self.disk_count(node) {
                Ok(0) => Some(format!("{node} (no disks listed)")),
                Ok(n) => {
                    debug!(node, disks = n, "LUNs visible");
                    None
                }
                Err(reason) => Some(format!("{node} ({reason})")),
            })
            .collect();

        if !failures.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::NoData,
                format!("No storage LUNs visible on node(s): {}", failures.join(", ")),
            ));
        }

        info!("Storage LUNs visible on all nodes");
        Ok(())
    }

    fn disk_count(&self, node: &str) -> Result<usize, String> {
        let args = self.shell.args_for(node, &["lsscsi"]);
        let out = self
            .runner
            .run(self.shell.program(), &args)
            .map_err(|e| format!("cannot run lsscsi: {e}"))?;
        if !out.success() {
            return Err(format!("lsscsi failed with {}", out.status_text()));
        }
        Ok(count_disks(&out.stdout))
    }
}

/// Count `disk` rows in `lsscsi` output (`[H:C:T:L]  <type>  ...`).
fn count_disks(stdout: &str) -> usize {
    stdout
        .lines()
        .filter(|line| line.split_whitespace().nth(1) == Some("disk"))
        .count()
}

impl Validator for StorageValidator {
    fn subtypes(&self) -> &'static [&'static str] {
        &["luns"]
    }

    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()> {
        ensure_args(v_type, args, "<node1> <node2> <...>")?;

        match v_type {
            "luns" => self.validate_luns(args),
            other => Err(unsupported(other)),
        }
    }
}
