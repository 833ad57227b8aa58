//! Application layer for clusterval.
//!
//! This layer contains:
//! - **Validators**: one per domain, the checks themselves
//! - **Ports**: Interface definitions (traits) for external probes
//!
//! Validators decide pass/fail; they never talk to the outside world
//! except through a port.

pub mod ports;
pub mod validators;

// Re-export the validation contract and validators
pub use validators::{
    BmcValidator, NetworkValidator, PacemakerValidator, SaltValidator, ServiceValidator,
    StorageValidator, Validator,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ClusterManager, ProcessOutput, ProcessRunner, ReachabilityProbe, ServiceProbe};
