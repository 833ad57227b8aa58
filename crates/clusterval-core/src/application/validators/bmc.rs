//! BMC (baseboard management controller) validations.
//!
//! Usage:
//! - `bmc accessible <node1> <node2> <...>`
//! - `bmc stonith <node> <bmc_ip> <bmc_user> <bmc_passwd>`

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{Validator, distinct, ensure_args, unsupported};
use crate::{
    application::ports::{ProcessRunner, ReachabilityProbe},
    domain::{Ipv4Literal, RemoteShell},
    error::{ErrorCode, ValidationError, ValidationResult},
};

const IPMITOOL: &str = "ipmitool";

pub struct BmcValidator {
    runner: Arc<dyn ProcessRunner>,
    probe: Arc<dyn ReachabilityProbe>,
    shell: RemoteShell,
}

impl BmcValidator {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        probe: Arc<dyn ReachabilityProbe>,
        shell: RemoteShell,
    ) -> Self {
        Self {
            runner,
            probe,
            shell,
        }
    }

    /// Every node's BMC reports an address and that address answers.
    #[instrument(skip_all, fields(count = nodes.len()))]
    pub fn validate_bmc_accessible(&self, nodes: &[String]) -> ValidationResult<()> {
        let failures: Vec<String> = distinct(nodes)
            .into_iter()
            .filter_map(|node| {
                self.check_node_bmc(node)
                    .err()
                    .map(|reason| format!("{node} ({reason})"))
            })
            .collect();

        if !failures.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::HostUnreachable,
                format!("BMC not accessible for node(s): {}", failures.join(", ")),
            ));
        }

        info!("All BMCs accessible");
        Ok(())
    }

    /// The node's BMC accepts IPMI-over-LAN logins with the given credentials.
    #[instrument(skip(self, password))]
    pub fn validate_bmc_stonith(
        &self,
        node: &str,
        bmc_ip: &str,
        user: &str,
        password: &str,
    ) -> ValidationResult<()> {
        let ip: Ipv4Literal = bmc_ip.parse()?;

        let args: Vec<String> = [
            "-I",
            "lanplus",
            "-H",
            ip.as_str(),
            "-U",
            user,
            "-P",
            password,
            "chassis",
            "status",
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

        let refused = || {
            ValidationError::new(
                ErrorCode::ConnectionRefused,
                format!("BMC login failed for node {node} at {ip}"),
            )
        };

        let output = self
            .runner
            .run(IPMITOOL, &args)
            .map_err(|e| refused().with_source(e))?;

        if !output.success() {
            warn!(status = ?output.status, stderr = %output.stderr.trim(), "ipmitool failed");
            return Err(refused());
        }

        info!("BMC credentials accepted");
        Ok(())
    }

    fn check_node_bmc(&self, node: &str) -> Result<(), String> {
        let args = self.shell.args_for(node, &[IPMITOOL, "lan", "print"]);
        let output = self
            .runner
            .run(self.shell.program(), &args)
            .map_err(|e| format!("cannot run {IPMITOOL}: {e}"))?;

        if !output.success() {
            return Err(format!("{IPMITOOL} failed with {}", output.status_text()));
        }

        let raw = parse_lan_ip(&output.stdout).ok_or("no BMC IP address reported")?;
        let ip: Ipv4Literal = raw
            .parse()
            .map_err(|_| format!("invalid BMC IP address '{raw}'"))?;
        if ip.octets() == [0, 0, 0, 0] {
            return Err("BMC IP address not configured".into());
        }

        debug!(node, bmc_ip = %ip, "Probing BMC");
        if self.probe.is_reachable(ip.as_str()) {
            Ok(())
        } else {
            Err(format!("BMC {ip} unreachable"))
        }
    }
}

/// Pull the value of the `IP Address` line out of `ipmitool lan print`.
fn parse_lan_ip(stdout: &str) -> Option<&str> {
    stdout.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "IP Address").then(|| value.trim())
    })
}

impl Validator for BmcValidator {
    fn subtypes(&self) -> &'static [&'static str] {
        &["accessible", "stonith"]
    }

    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()> {
        let expected = match v_type {
            "stonith" => "<node> <bmc_ip> <bmc_user> <bmc_passwd>",
            _ => "<node1> <node2> <...>",
        };
        ensure_args(v_type, args, expected)?;

        match v_type {
            "accessible" => self.validate_bmc_accessible(args),
            "stonith" => match args {
                [node, ip, user, password] => self.validate_bmc_stonith(node, ip, user, password),
                _ => Err(ValidationError::invalid_argument(format!(
                    "Invalid parameters for 'stonith': expected {expected}"
                ))),
            },
            other => Err(unsupported(other)),
        }
    }
}
