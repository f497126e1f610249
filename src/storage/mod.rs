//! Sharded Storage Module
//!
//! Implements a concurrency-safe in-memory key-value store.
//!
//! ## Core Concepts
//! - **Sharding**: Keys are routed to a fixed number of partitions (shards)
//!   by a deterministic hash, so the same key always lands on the same shard
//!   for the lifetime of the process.
//! - **Locking**: Each shard carries its own read/write lock. Throughput
//!   scales with the number of independent shards instead of contending on a
//!   single global lock.
//! - **Ownership**: The store owns the stored bytes exclusively; callers only
//!   ever see copies handed out by `get` and `delete`.

pub mod memory;
