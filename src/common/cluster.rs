use std::fmt;

use serde::{Deserialize, Serialize};

/// Reachability of a single cluster member. The same value type is used for
/// the address this node announces and for the addresses decoded from other
/// nodes' announcements, so peers compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}

impl NodeAddress {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One node's decoded announcement record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAnnouncement {
    pub published_at_ms: i64, // milliseconds since UNIX_EPOCH
    pub cluster_id: String,
    pub address: NodeAddress,
}
