use serde::{Deserialize, Serialize};

/// Network identity of a single cluster member.
///
/// The `dead` flag records the local heartbeat observation for this peer. It
/// is owned exclusively by the monitoring node, skipped during serialization,
/// and defaults to `false` (alive) when a node is deserialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    #[serde(rename = "FQDN")]
    pub fqdn: String,

    #[serde(rename = "Port")]
    pub port: u16,

    #[serde(skip)]
    pub dead: bool,
}

impl NodeInfo {
    pub fn new(fqdn: impl Into<String>, port: u16) -> Self {
        Self {
            fqdn: fqdn.into(),
            port,
            dead: false,
        }
    }

    /// Deserializes a node identity from its JSON wire form.
    pub fn from_bytes(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// True if both values name the same node: exact `(FQDN, Port)` equality.
    /// The `dead` flag does not participate in identity.
    pub fn same_node(&self, other: &NodeInfo) -> bool {
        self.fqdn == other.fqdn && self.port == other.port
    }

    /// The `host:port` form used for addressing and logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.fqdn, self.port)
    }
}

/// The membership list for one discovery group.
///
/// An ordered sequence of nodes with no two entries sharing the same
/// `(FQDN, Port)` pair. The group token is not part of the register; it is
/// purely the store key under which the serialized register lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Register {
    #[serde(default)]
    pub nodes: Vec<NodeInfo>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the register. No-op if a node with the same
    /// `(FQDN, Port)` pair is already present.
    pub fn add_node(&mut self, node: NodeInfo) {
        if self.contains(&node) {
            return;
        }

        self.nodes.push(node);
    }

    fn contains(&self, node: &NodeInfo) -> bool {
        self.nodes.iter().any(|n| n.same_node(node))
    }

    /// Deserializes a register from its JSON wire form. A semantically empty
    /// object (`{}`) yields a register with no nodes.
    pub fn from_bytes(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// Serializes the register to its JSON wire form.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
