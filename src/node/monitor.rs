use std::time::Duration;

use super::protocol::ENDPOINT_HEARTBEAT;
use crate::registry::types::{NodeInfo, Register};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Background liveness monitor a node runs against its cluster view.
///
/// Peers carry two states, alive (the initial assumption) and dead; a failed
/// probe flips a peer to dead, a later successful probe flips it back. Peers
/// are never removed from the view, no matter how long they stay dead.
///
/// The monitor owns its register exclusively. The `dead` flags it writes are
/// local observations, invisible to every other task and never serialized.
///
/// The monitor recognizes itself in the peer list by exact `(FQDN, Port)`
/// equality against its configured identity, so the configured hostname must
/// match the one the node registered with.
pub struct HeartbeatMonitor {
    identity: NodeInfo,
    cluster: Register,
    http: reqwest::Client,
}

impl HeartbeatMonitor {
    pub fn new(identity: NodeInfo, cluster: Register) -> Self {
        Self {
            identity,
            cluster,
            http: reqwest::Client::new(),
        }
    }

    /// Consumes the monitor into a background task that probes the cluster
    /// on a fixed period, indefinitely. There is no cancellation; the loop
    /// runs until process exit.
    pub fn start(mut self) {
        tracing::info!(
            "Starting heartbeat monitor for {} ({} peer(s))",
            self.identity.address(),
            self.cluster.nodes.len().saturating_sub(1)
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);

            loop {
                interval.tick().await;
                self.run_cycle().await;
            }
        });
    }

    /// One full probe cycle: visit every peer except self, sequentially, and
    /// record the outcome. The peer list is snapshotted up front so one cycle
    /// observes a single consistent view.
    ///
    /// Probes are sequential, so a cycle's wall-clock duration is the sum of
    /// the individual probe latencies, each bounded by the probe timeout.
    pub async fn run_cycle(&mut self) {
        let peers: Vec<NodeInfo> = self
            .cluster
            .nodes
            .iter()
            .filter(|peer| !peer.same_node(&self.identity))
            .cloned()
            .collect();

        for peer in peers {
            let alive = self.probe(&peer).await;
            self.record(&peer, alive);
        }
    }

    /// Sends one heartbeat to the peer. Success is any 2xx response; a
    /// transport error or non-success status counts as a failed probe. There
    /// is no retry within a cycle.
    async fn probe(&self, peer: &NodeInfo) -> bool {
        let url = format!("http://{}{}", peer.address(), ENDPOINT_HEARTBEAT);

        let response = self
            .http
            .post(&url)
            .json(&self.identity)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.bytes().await {
                    Ok(payload) => {
                        tracing::debug!(
                            "Heartbeat ack from {}: {}",
                            peer.address(),
                            String::from_utf8_lossy(&payload)
                        );
                    }
                    Err(e) => {
                        tracing::debug!("Heartbeat ack body from {} lost: {}", peer.address(), e);
                    }
                }
                true
            }
            Ok(response) => {
                tracing::warn!(
                    "Heartbeat to {} answered {}",
                    peer.address(),
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::warn!("Heartbeat to {} failed: {}", peer.address(), e);
                false
            }
        }
    }

    fn record(&mut self, peer: &NodeInfo, alive: bool) {
        let entry = self
            .cluster
            .nodes
            .iter_mut()
            .find(|node| node.same_node(peer));

        if let Some(entry) = entry {
            if entry.dead && alive {
                tracing::info!("Peer {} is reachable again", entry.address());
            } else if !entry.dead && !alive {
                tracing::info!("Peer {} marked dead", entry.address());
            }

            entry.dead = !alive;
        }
    }

    /// The recorded `dead` flag for a peer, if it is part of the view.
    pub fn peer_status(&self, fqdn: &str, port: u16) -> Option<bool> {
        self.cluster
            .nodes
            .iter()
            .find(|node| node.fqdn == fqdn && node.port == port)
            .map(|node| node.dead)
    }
}
