//! Cluster manager adapters.

mod crm;

pub use crm::CrmClusterManager;
