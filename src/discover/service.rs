use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use uuid::Uuid;

use super::error::DiscoveryError;
use crate::registry::types::{NodeInfo, Register};
use crate::storage::memory::ShardedStore;

/// Serialized form of a register with no nodes, stored when a group is
/// created.
const EMPTY_REGISTER: &[u8] = b"{\"nodes\":[]}";

/// The discovery group protocol on top of the sharded store.
///
/// The store is an injected dependency; the service holds no process-global
/// state. Registrations to the same token are serialized through a per-token
/// mutex so the fetch-mutate-store sequence cannot lose a concurrent
/// addition. Lock entries are kept for the process lifetime, matching the
/// groups themselves, which are never deleted.
pub struct DiscoveryService {
    store: Arc<ShardedStore>,
    token_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DiscoveryService {
    pub fn new(store: Arc<ShardedStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            token_locks: DashMap::new(),
        })
    }

    /// Creates a new discovery group: generates a random 128-bit token,
    /// persists an empty register under it, and returns the token.
    pub fn create_group(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.store.put(&token, EMPTY_REGISTER.to_vec());

        tracing::info!("Created discovery group {}", token);

        token
    }

    /// Returns the raw serialized register stored under the token, if any.
    pub fn fetch_group(&self, token: &str) -> Option<Vec<u8>> {
        self.store.get(token)
    }

    /// Folds a node registration into the group's register.
    ///
    /// Looks up the group, deserializes the stored register and the identity
    /// payload, adds the node (de-duplicating), and persists the updated
    /// register under the same token. Returns the updated serialized
    /// register.
    pub fn register_node(&self, token: &str, payload: &[u8]) -> Result<Vec<u8>, DiscoveryError> {
        let lock = self
            .token_locks
            .entry(token.to_string())
            .or_default()
            .clone();
        let _guard = lock.lock().expect("token lock poisoned");

        let stored = self
            .store
            .get(token)
            .ok_or(DiscoveryError::GroupNotFound)?;

        let mut register =
            Register::from_bytes(&stored).map_err(DiscoveryError::MalformedRegister)?;

        let node = NodeInfo::from_bytes(payload).map_err(DiscoveryError::MalformedNodeInfo)?;

        tracing::debug!("Registering node {} in group {}", node.address(), token);

        register.add_node(node);

        let updated = register
            .to_bytes()
            .map_err(DiscoveryError::Serialization)?;
        self.store.put(token, updated.clone());

        Ok(updated)
    }

    /// Serializes the full store as a JSON object mapping every token to its
    /// raw register. Not a point-in-time snapshot; see
    /// [`ShardedStore::dump`].
    pub fn dump(&self) -> serde_json::Result<Vec<u8>> {
        self.store.dump()
    }
}
