//! ICMP reachability through the system `ping` binary.

use std::sync::Arc;

use clusterval_core::application::ports::{ProcessRunner, ReachabilityProbe};
use tracing::debug;

/// Sends exactly one echo request and waits at most `timeout_secs`.
pub struct PingProbe {
    runner: Arc<dyn ProcessRunner>,
    program: String,
    timeout_secs: u64,
}

impl PingProbe {
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            runner,
            program: program.into(),
            // `ping -W 0` means "wait forever" on iputils.
            timeout_secs: timeout_secs.max(1),
        }
    }

    fn args(&self, address: &str) -> Vec<String> {
        vec![
            "-c".into(),
            "1".into(),
            "-W".into(),
            self.timeout_secs.to_string(),
            address.into(),
        ]
    }
}

impl ReachabilityProbe for PingProbe {
    fn is_reachable(&self, address: &str) -> bool {
        match self.runner.run(&self.program, &self.args(address)) {
            Ok(out) => out.success(),
            Err(e) => {
                debug!(address, error = %e, "ping could not be started");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ScriptedProcessRunner;

    #[test]
    fn one_bounded_echo_per_address() {
        let runner = ScriptedProcessRunner::new();
        runner.succeed("ping -c 1 -W 1 10.0.0.1", "1 packets transmitted, 1 received");
        runner.fail("ping -c 1 -W 1 10.0.0.2", 1);

        let probe = PingProbe::new(Arc::new(runner.clone()), "ping", 1);
        assert!(probe.is_reachable("10.0.0.1"));
        assert!(!probe.is_reachable("10.0.0.2"));
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn missing_ping_binary_means_unreachable() {
        let runner = ScriptedProcessRunner::new();
        let probe = PingProbe::new(Arc::new(runner), "ping", 1);
        assert!(!probe.is_reachable("10.0.0.1"));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let runner = ScriptedProcessRunner::new();
        runner.succeed("ping -c 1 -W 1 127.0.0.1", "");
        let probe = PingProbe::new(Arc::new(runner), "ping", 0);
        assert!(probe.is_reachable("127.0.0.1"));
    }
}
