//! Validators - one per uniform-shape domain, plus pacemaker.
//!
//! Every uniform validator implements [`Validator`]. Preconditions are
//! checked in the same order everywhere: arguments present, then subtype
//! recognised, and only then any external call.
//!
//! Failure policy shared by all domains:
//! - bad arguments short-circuit at the first offender;
//! - probes over independent targets accumulate every failure;
//! - ordered, dependent sub-checks stop at the first failing one.

pub mod bmc;
pub mod network;
pub mod pacemaker;
pub mod salt;
pub mod service;
pub mod storage;

pub use bmc::BmcValidator;
pub use network::NetworkValidator;
pub use pacemaker::PacemakerValidator;
pub use salt::SaltValidator;
pub use service::ServiceValidator;
pub use storage::StorageValidator;

use crate::error::{ValidationError, ValidationResult};

/// The uniform validation contract: `(v_type, args) -> ok | error`.
pub trait Validator: Send + Sync {
    /// Subtypes this validator recognises, e.g. `["connectivity"]`.
    fn subtypes(&self) -> &'static [&'static str];

    /// Run the checks for `v_type` against `args`.
    fn validate(&self, v_type: &str, args: &[String]) -> ValidationResult<()>;
}

/// Reject an empty argument list, naming what was expected.
pub(crate) fn ensure_args(v_type: &str, args: &[String], expected: &str) -> ValidationResult<()> {
    if args.is_empty() {
        return Err(ValidationError::invalid_argument(format!(
            "Insufficient parameters for '{v_type}': expected {expected}"
        )));
    }
    Ok(())
}

pub(crate) fn unsupported(v_type: &str) -> ValidationError {
    ValidationError::invalid_argument(format!("Action parameter {v_type} not supported"))
}

/// Drop repeated entries, keeping first-seen order.
pub(crate) fn distinct(items: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item.as_str()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn ensure_args_names_expectation() {
        let err = ensure_args("connectivity", &[], "<ip1> <ip2> <...>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("<ip1>"));
    }

    #[test]
    fn unsupported_names_subtype() {
        let err = unsupported("latency");
        assert!(err.message().contains("latency"));
    }

    #[test]
    fn distinct_keeps_order() {
        let items: Vec<String> = ["b", "a", "b", "c", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(distinct(&items), vec!["b", "a", "c"]);
    }
}
