//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by validators, implemented by infrastructure
//!   - `ProcessRunner`: run a program and capture its output
//!   - `ReachabilityProbe`: one bounded ICMP echo
//!   - `ServiceProbe`: one TCP connect
//!   - `ClusterManager`: pacemaker membership and fencing state
//!
//! - **Driving (Input) Ports**: the [`Validator`](crate::application::Validator)
//!   contract, called by the CLI command layer

pub mod output;

pub use output::{ClusterManager, ProcessOutput, ProcessRunner, ReachabilityProbe, ServiceProbe};

#[cfg(test)]
pub use output::{MockClusterManager, MockProcessRunner, MockReachabilityProbe, MockServiceProbe};
