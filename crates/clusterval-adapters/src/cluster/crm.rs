//! Pacemaker cluster manager adapter backed by the crm command-line tools.
//!
//! | Query                 | Command                                                  |
//! |-----------------------|----------------------------------------------------------|
//! | nodes                 | `crm_node -l`                                            |
//! | fencing devices       | `stonith_admin --list-registered`                        |
//! | device target         | `crm_resource --resource <id> --get-parameter pcmk_host_list` |
//! | device running state  | `crm_resource --resource <id> --locate`                  |

use std::sync::Arc;

use clusterval_core::{
    application::ports::{ClusterManager, ProcessOutput, ProcessRunner},
    domain::{ClusterNode, NodeState, StonithResource},
    error::{ErrorCode, ValidationError, ValidationResult},
};
use tracing::{debug, instrument};

pub struct CrmClusterManager {
    runner: Arc<dyn ProcessRunner>,
}

impl CrmClusterManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Run a tool whose failure makes the query impossible.
    fn query(&self, program: &str, args: &[&str]) -> ValidationResult<ProcessOutput> {
        let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
        let command = format!("{program} {}", args.join(" "));

        let out = self.runner.run(program, &args).map_err(|e| {
            ValidationError::new(ErrorCode::Io, format!("Cannot run `{command}`")).with_source(e)
        })?;

        if !out.success() {
            return Err(ValidationError::new(
                ErrorCode::Io,
                format!(
                    "`{command}` failed with {}: {}",
                    out.status_text(),
                    out.stderr.trim()
                ),
            ));
        }
        Ok(out)
    }

    fn host_list(&self, id: &str) -> Option<String> {
        let args: Vec<String> = ["--resource", id, "--get-parameter", "pcmk_host_list"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        let out = self.runner.run("crm_resource", &args).ok()?;
        let value = out.stdout.trim();
        (out.success() && !value.is_empty()).then(|| value.to_owned())
    }

    fn is_running(&self, id: &str) -> bool {
        let args: Vec<String> = ["--resource", id, "--locate"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        match self.runner.run("crm_resource", &args) {
            Ok(out) => out.success() && parse_locate(&out.stdout, &out.stderr),
            Err(e) => {
                debug!(id, error = %e, "crm_resource --locate could not be started");
                false
            }
        }
    }
}

impl ClusterManager for CrmClusterManager {
    #[instrument(skip(self))]
    fn nodes(&self) -> ValidationResult<Vec<ClusterNode>> {
        let out = self.query("crm_node", &["-l"])?;
        Ok(parse_node_list(&out.stdout))
    }

    #[instrument(skip(self))]
    fn stonith_resources(&self) -> ValidationResult<Vec<StonithResource>> {
        let out = self.query("stonith_admin", &["--list-registered"])?;

        let resources: Vec<StonithResource> = parse_device_list(&out.stdout)
            .into_iter()
            .map(|id| StonithResource {
                target: self.host_list(id),
                running: self.is_running(id),
                id: id.to_owned(),
            })
            .collect();

        debug!(count = resources.len(), "Fencing devices found");
        Ok(resources)
    }
}

/// `crm_node -l` prints `<id> <name> <state>` per line.
fn parse_node_list(stdout: &str) -> Vec<ClusterNode> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _id = cols.next()?;
            let name = cols.next()?;
            let state = cols.next().map_or(NodeState::Other("unknown".into()), NodeState::parse);
            Some(ClusterNode::new(name, state))
        })
        .collect()
}

/// Device ids, one per line, followed by a `N fence device(s) found` footer.
fn parse_device_list(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with("found"))
        .collect()
}

fn parse_locate(stdout: &str, stderr: &str) -> bool {
    let text = format!("{stdout}\n{stderr}");
    text.contains("is running on") && !text.contains("NOT running")
}
