//! clusterval Core - validation contract, probe ports and domain validators
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          clusterval-cli (CLI)           │
//! │   (registry, factory, entry point)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls Validator::validate
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │              Validators                 │
//! │  (Network, Service, Bmc, Salt, Storage, │
//! │   Pacemaker)                            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ProcessRunner, ReachabilityProbe,      │
//! │  ServiceProbe, ClusterManager)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   clusterval-adapters (Infrastructure)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clusterval_core::application::{NetworkValidator, ReachabilityProbe, Validator};
//!
//! struct AlwaysUp;
//! impl ReachabilityProbe for AlwaysUp {
//!     fn is_reachable(&self, _address: &str) -> bool { true }
//! }
//!
//! let v = NetworkValidator::new(Arc::new(AlwaysUp));
//! v.validate("connectivity", &["10.0.0.1".to_string()]).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BmcValidator, NetworkValidator, PacemakerValidator, SaltValidator, ServiceValidator,
        StorageValidator, Validator,
        ports::{ClusterManager, ProcessOutput, ProcessRunner, ReachabilityProbe, ServiceProbe},
    };
    pub use crate::domain::{ClusterNode, Ipv4Literal, NodeState, RemoteShell, StonithResource};
    pub use crate::error::{ErrorCategory, ErrorCode, ValidationError, ValidationResult};
}

