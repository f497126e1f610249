//! Node Network Protocol
//!
//! Endpoint paths shared by the node HTTP surface, the heartbeat monitor,
//! and the discovery client. Payloads on all of these endpoints are the
//! JSON identity shape of [`crate::registry::types::NodeInfo`].

/// Endpoint a node exposes for heartbeat probes from its peers.
pub const ENDPOINT_HEARTBEAT: &str = "/heartbeat";

/// Endpoint prefix for the replication placeholder.
pub const ENDPOINT_REPLICATE: &str = "/replicate";

/// Discovery service suffix that mints a fresh group token.
pub const ENDPOINT_NEW_TOKEN: &str = "/new";

/// Discovery service suffix that registers a node into a group.
pub const ENDPOINT_REGISTER: &str = "/register";
