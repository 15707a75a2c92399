//! The incremental snapshot/diff/patch protocol.
//!
//! Everything in this module composes around one contract —
//! [`TrackedState`]: `track_start`, `save`, `save_full`, `load` —
//! implemented at all three levels of the tree.
//!
//! # Core Types
//!
//! - [`StateBag`] - Flat key→value store with per-key dirty tracking
//! - [`StateNode`] / [`NodeCore`] - A node owning one bag and any nested collections
//! - [`TrackedCollection`] - Ordered node sequence with a structural-dirty flag
//! - [`NodeRegistry`] - Tag→factory table for polymorphic reconstruction
//! - [`Snapshot`] / [`Value`] - The serialized change records and their leaves
//!
//! # Dependency order
//!
//! Leaves first: bag → node → collection → collections-of-collections
//! (nesting is recursive, so a node kind may own collections of further
//! nodes to arbitrary depth).

pub mod bag;
pub mod collection;
pub mod errors;
pub mod node;
pub mod snapshot;
pub mod traits;
pub mod value;

pub use bag::StateBag;
pub use collection::{NodeRegistry, TrackedCollection};
pub use errors::StateError;
pub use node::{NodeCore, StateNode, load_parts, save_parts};
pub use snapshot::{Snapshot, StructuralItem};
pub use traits::TrackedState;
pub use value::Value;
