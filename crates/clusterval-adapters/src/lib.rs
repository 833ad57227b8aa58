//! Infrastructure adapters for clusterval.
//!
//! This crate implements the ports defined in `clusterval-core::application::ports`.
//! It contains all process spawning and socket I/O.

pub mod cluster;
pub mod probe;
pub mod process;

// Re-export commonly used adapters
pub use cluster::CrmClusterManager;
pub use probe::{PingProbe, TcpServiceProbe};
pub use process::{ScriptedProcessRunner, SystemProcessRunner};
