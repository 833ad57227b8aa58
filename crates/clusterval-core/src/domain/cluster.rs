//! Pacemaker cluster state as seen by the validators.

use std::fmt;

/// A node known to the cluster membership layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNode {
    pub name: String,
    pub state: NodeState,
}

impl ClusterNode {
    pub fn new(name: impl Into<String>, state: NodeState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}

/// Membership state reported by `crm_node -l`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    Member,
    Lost,
    Other(String),
}

impl NodeState {
    pub fn parse(s: &str) -> Self {
        match s {
            "member" => Self::Member,
            "lost" => Self::Lost,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => f.write_str("member"),
            Self::Lost => f.write_str("lost"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// A fencing (STONITH) resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StonithResource {
    pub id: String,
    /// Raw `pcmk_host_list` value, if configured.
    pub target: Option<String>,
    pub running: bool,
}

impl StonithResource {
    pub fn new(id: impl Into<String>, target: Option<&str>, running: bool) -> Self {
        Self {
            id: id.into(),
            target: target.map(str::to_owned),
            running,
        }
    }

    /// `pcmk_host_list` may hold several hosts separated by spaces or commas.
    pub fn fences(&self, node: &str) -> bool {
        self.target
            .as_deref()
            .is_some_and(|hosts| hosts.split([' ', ',']).any(|h| h == node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_matches_any_listed_host() {
        let r = StonithResource::new("st", Some("srvnode-1,srvnode-2"), true);
        assert!(r.fences("srvnode-2"));
        assert!(!r.fences("srvnode"));
        assert!(!StonithResource::new("st", None, true).fences("srvnode-1"));
    }

    #[test]
    fn node_state_parse() {
        assert_eq!(NodeState::parse("member"), NodeState::Member);
        assert_eq!(NodeState::parse("lost"), NodeState::Lost);
        assert_eq!(NodeState::parse("pending").to_string(), "pending");
    }
}
