//! Cluster Register Module
//!
//! The membership data model for one discovery group.
//!
//! ## Core Concepts
//! - **Identity**: Two `NodeInfo` entries describe the same node iff their
//!   `(FQDN, Port)` pairs are equal. The `dead` flag is local observation
//!   state and never part of the identity or the wire format.
//! - **De-duplication**: `Register::add_node` is idempotent; insertion order
//!   is preserved for entries that survive de-duplication.
//! - **Wire format**: Canonical JSON. A register serializes as an object with
//!   a single `nodes` field holding the ordered node list.

pub mod types;
