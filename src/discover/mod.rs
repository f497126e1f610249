//! Discovery Group Module
//!
//! The operations a discovery service exposes on top of the sharded store.
//!
//! ## Core Mechanisms
//! - **Group creation**: A fresh group gets a random 128-bit token and an
//!   empty register persisted under it.
//! - **Registration**: Registering a node is a read-modify-write of the
//!   stored register. Mutations to the same token are serialized through a
//!   per-token lock so concurrent registrations cannot lose updates.
//! - **HTTP surface**: Thin axum handlers translate the protocol results and
//!   the error taxonomy into status codes; the service itself is transport
//!   agnostic.

pub mod error;
pub mod handlers;
pub mod service;

#[cfg(test)]
mod tests;
