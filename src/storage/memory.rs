use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::value::RawValue;

/// Number of independent partitions in the store.
pub const SHARD_COUNT: usize = 32;

type Shard = RwLock<HashMap<String, Vec<u8>>>;

/// A sharded in-memory key-value store.
///
/// Keys are arbitrary strings, values are raw bytes. Every operation locks
/// exactly one shard for the duration of a single map access; no lock is ever
/// held across I/O.
pub struct ShardedStore {
    shards: Vec<Shard>,
}

impl ShardedStore {
    pub fn new() -> Self {
        let mut shards = Vec::with_capacity(SHARD_COUNT);
        for _ in 0..SHARD_COUNT {
            shards.push(RwLock::new(HashMap::new()));
        }
        Self { shards }
    }

    /// Shard a key routes to. Deterministic for the process lifetime: FNV-1
    /// (32 bit) over the key bytes, modulo the shard count.
    pub fn shard_index(key: &str) -> usize {
        (fnv1_32(key.as_bytes()) as usize) % SHARD_COUNT
    }

    fn shard(&self, key: &str) -> &Shard {
        &self.shards[Self::shard_index(key)]
    }

    /// Stores the value under the given key, overwriting any previous value.
    pub fn put(&self, key: &str, value: Vec<u8>) {
        let mut entries = self.shard(key).write().expect("shard lock poisoned");
        entries.insert(key.to_string(), value);
    }

    /// Returns a copy of the value stored under the given key.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.shard(key).read().expect("shard lock poisoned");
        entries.get(key).cloned()
    }

    /// Returns true if the given key exists.
    pub fn has(&self, key: &str) -> bool {
        let entries = self.shard(key).read().expect("shard lock poisoned");
        entries.contains_key(key)
    }

    /// Removes the entry under the given key, returning the prior value.
    pub fn delete(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.shard(key).write().expect("shard lock poisoned");
        entries.remove(key)
    }

    /// Serializes the full store as a pretty-printed JSON object mapping every
    /// key to its raw stored value.
    ///
    /// Shard locks are acquired and released one at a time, so the result is
    /// NOT a point-in-time snapshot across shards: entries written or removed
    /// while the dump is in progress may be inconsistently included. Fails
    /// only if a stored value is not itself valid JSON.
    pub fn dump(&self) -> serde_json::Result<Vec<u8>> {
        let mut entries: BTreeMap<String, Box<RawValue>> = BTreeMap::new();

        for shard in &self.shards {
            let shard_entries = shard.read().expect("shard lock poisoned");
            for (key, value) in shard_entries.iter() {
                let raw: Box<RawValue> = serde_json::from_slice(value)?;
                entries.insert(key.clone(), raw);
            }
        }

        serde_json::to_vec_pretty(&entries)
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

/// FNV-1 hash, 32 bit. Fixed parameters keep key routing stable across calls,
/// unlike the std `RandomState` hasher.
fn fnv1_32(data: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let mut hash = OFFSET_BASIS;
    for &byte in data {
        hash = hash.wrapping_mul(PRIME);
        hash ^= u32::from(byte);
    }
    hash
}
