//! Network validations.
//!
//! Usage: `network connectivity <ip1> <ip2> <...>`

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{Validator, distinct, ensure_args, unsupported};
use crate::{
    application::ports::ReachabilityProbe,
    domain::Ipv4Literal,
    error::{ErrorCode, ValidationError, ValidationResult},
};

pub struct NetworkValidator {
    probe: Arc<dyn ReachabilityProbe>,
}

impl NetworkValidator {
    pub fn new(probe: Arc<dyn ReachabilityProbe>) -> Self {
        Self { probe }
    }

    /// Check that every address is well formed, then that each one answers.
    ///
    /// The first malformed address aborts the request before any probe is
    /// sent. Unreachable addresses are collected and reported together.
    #[instrument(skip_all, fields(count = ips.len()))]
    pub fn validate_ip_connectivity(&self, ips: &[String]) -> ValidationResult<()> {
        for ip in ips {
            ip.parse::<Ipv4Literal>()?;
        }

        let unreachable: Vec<&str> = distinct(ips)
            .into_iter()
            .filter(|ip| {
                let up = self.probe.is_reachable(ip);
                debug!(ip, up, "Probed address");
                !up
            })
            .collect();

        if !unreachable.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::ConnectionRefused,
                format!("Ping failed for IP(s): {}", unreachable.join(", ")),
            ));
        }

        info!("All addresses reachable");
        Ok(())
    }
}

impl Validator for NetworkValidator {
    fn subtypes(&self) -> &'static [&'static str] {
        &["connectivity"]
    }

    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()> {
        ensure_args(v_type, args, "<ip1> <ip2> <...>")?;

        match v_type {
            "connectivity" => self.validate_ip_connectivity(args),
            other => Err(unsupported(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockReachabilityProbe;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn validator(probe: MockReachabilityProbe) -> NetworkValidator {
        NetworkValidator::new(Arc::new(probe))
    }

    #[test]
    fn all_reachable_passes() {
        let mut probe = MockReachabilityProbe::new();
        probe.expect_is_reachable().times(2).return_const(true);

        let v = validator(probe);
        assert!(v.validate("connectivity", &strings(&["10.0.0.1", "10.0.0.2"])).is_ok());
    }

    #[test]
    fn empty_args_fail_before_probing() {
        let mut probe = MockReachabilityProbe::new();
        probe.expect_is_reachable().times(0);

        let err = validator(probe).validate("connectivity", &[]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("Insufficient parameters"));
    }

    #[test]
    fn unknown_subtype_is_rejected() {
        let mut probe = MockReachabilityProbe::new();
        probe.expect_is_reachable().times(0);

        let err = validator(probe)
            .validate("latency", &strings(&["10.0.0.1"]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("latency"));
    }

    #[test]
    fn first_malformed_address_is_reported_without_probing() {
        let mut probe = MockReachabilityProbe::new();
        probe.expect_is_reachable().times(0);

        let err = validator(probe)
            .validate(
                "connectivity",
                &strings(&["10.0.0.1", "10.0.0.01", "999.1.1.1"]),
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("10.0.0.01"));
        assert!(!err.message().contains("999.1.1.1"));
    }

    #[test]
    fn unreachable_subset_is_listed() {
        let mut probe = MockReachabilityProbe::new();
        probe
            .expect_is_reachable()
            .returning(|ip| !matches!(ip, "10.0.0.2" | "10.0.0.4"));

        let err = validator(probe)
            .validate(
                "connectivity",
                &strings(&["10.0.0.4", "10.0.0.1", "10.0.0.2", "10.0.0.3"]),
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConnectionRefused);
        assert_eq!(err.message(), "Ping failed for IP(s): 10.0.0.4, 10.0.0.2");
    }

    #[test]
    fn duplicates_are_probed_and_reported_once() {
        let mut probe = MockReachabilityProbe::new();
        probe
            .expect_is_reachable()
            .withf(|ip| ip == "10.0.0.9")
            .times(1)
            .return_const(false);

        let err = validator(probe)
            .validate("connectivity", &strings(&["10.0.0.9", "10.0.0.9"]))
            .unwrap_err();
        assert_eq!(err.message(), "Ping failed for IP(s): 10.0.0.9");
    }
}
