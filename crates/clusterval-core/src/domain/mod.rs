//! Domain layer: pure value types shared by validators and adapters.
//!
//! Nothing in here performs I/O.

pub mod address;
pub mod cluster;
pub mod remote;

pub use address::Ipv4Literal;
pub use cluster::{ClusterNode, NodeState, StonithResource};
pub use remote::RemoteShell;
