//! Pacemaker cluster validations.
//!
//! Unlike the uniform validators these checks take no arguments; the CLI
//! maps each `pacemaker <subcommand>` straight onto one of the `check_*`
//! methods below.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::ports::ClusterManager,
    domain::{ClusterNode, NodeState, StonithResource},
    error::{ErrorCode, ValidationError, ValidationResult},
};

/// Number of fencing devices a two-node cluster must carry.
pub const EXPECTED_STONITH_COUNT: usize = 2;

pub struct PacemakerValidator {
    cluster: Arc<dyn ClusterManager>,
}

impl PacemakerValidator {
    pub fn new(cluster: Arc<dyn ClusterManager>) -> Self {
        Self { cluster }
    }

    /// Basic sanity: the cluster has nodes and all of them are members.
    #[instrument(skip_all)]
    pub fn check_corosync(&self) -> ValidationResult<()> {
        let nodes = self.cluster.nodes()?;
        ensure_configured(&nodes)?;
        info!(nodes = nodes.len(), "Cluster membership healthy");
        Ok(())
    }

    /// Fencing is configured, covers every node, and is running.
    ///
    /// Sub-checks run in order and the first failure ends the check.
    #[instrument(skip_all)]
    pub fn check_stonith(&self) -> ValidationResult<()> {
        let resources = self.cluster.stonith_resources()?;
        ensure_two_stonith_only(&resources)?;

        let nodes = self.cluster.nodes()?;
        ensure_stonith_for_all_nodes(&nodes, &resources)?;

        ensure_all_stonith_running(&resources)?;

        info!("STONITH configured and running");
        Ok(())
    }
}

pub fn ensure_configured(nodes: &[ClusterNode]) -> ValidationResult<()> {
    if nodes.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::NoData,
            "Pacemaker cluster has no configured nodes",
        ));
    }

    let absent: Vec<String> = nodes
        .iter()
        .filter(|n| n.state != NodeState::Member)
        .map(|n| format!("{} ({})", n.name, n.state))
        .collect();
    if !absent.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::HostUnreachable,
            format!("Node(s) not cluster members: {}", absent.join(", ")),
        ));
    }
    Ok(())
}

pub fn ensure_two_stonith_only(resources: &[StonithResource]) -> ValidationResult<()> {
    if resources.len() != EXPECTED_STONITH_COUNT {
        return Err(ValidationError::new(
            ErrorCode::NoData,
            format!(
                "Expected {EXPECTED_STONITH_COUNT} STONITH resources, found {}",
                resources.len()
            ),
        ));
    }
    Ok(())
}

pub fn ensure_stonith_for_all_nodes(
    nodes: &[ClusterNode],
    resources: &[StonithResource],
) -> ValidationResult<()> {
    let unfenced: Vec<&str> = nodes
        .iter()
        .map(|n| n.name.as_str())
        .filter(|name| !resources.iter().any(|r| r.fences(name)))
        .collect();

    if !unfenced.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::NoData,
            format!("No STONITH resource for node(s): {}", unfenced.join(", ")),
        ));
    }
    Ok(())
}

pub fn ensure_all_stonith_running(resources: &[StonithResource]) -> ValidationResult<()> {
    let stopped: Vec<&str> = resources
        .iter()
        .filter(|r| !r.running)
        .map(|r| r.id.as_str())
        .collect();

    if !stopped.is_empty() {
        return Err(ValidationError::new(
            ErrorCode::NotRunning,
            format!("STONITH resource(s) not running: {}", stopped.join(", ")),
        ));
    }
    Ok(())
}
