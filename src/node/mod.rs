//! Node Module
//!
//! Everything a cluster member runs besides the discovery service itself.
//!
//! ## Core Mechanisms
//! - **Bootstrap**: `DiscoveryClient` obtains a group token (or reuses a
//!   supplied one), registers the node's own identity, and parses the
//!   returned register as the initial cluster view. Any failure here is
//!   fatal to node startup.
//! - **Liveness**: `HeartbeatMonitor` probes every known peer on a fixed
//!   period and records reachability locally. Liveness is observed
//!   unilaterally by the prober and never gossiped.
//! - **HTTP surface**: The heartbeat endpoint acknowledges probes with the
//!   responder's own identity; the replicate endpoint is a placeholder
//!   acknowledgment.

pub mod client;
pub mod handlers;
pub mod monitor;
pub mod protocol;
