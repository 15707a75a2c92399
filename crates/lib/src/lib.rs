//!
//! Viewstate: incremental snapshot/diff/patch persistence for server-side
//! component state.
//!
//! A server-side UI framework rebuilds its component objects from scratch on
//! every request — no object graph survives between requests. This crate
//! captures, between producing a response and receiving the next request,
//! the components' *runtime-mutated* state (as opposed to their
//! declaration-time initial state) and replays it onto freshly constructed
//! objects.
//!
//! ## Core Concepts
//!
//! * **State bags (`state::StateBag`)**: flat key→value stores with per-key
//!   dirty tracking — the leaf unit of state for one component instance.
//! * **Nodes (`state::StateNode`)**: entries owning one bag and zero or more
//!   nested collections, composed recursively.
//! * **Collections (`state::TrackedCollection`)**: ordered node sequences
//!   with a structural-dirty flag distinct from any single node's dirtiness.
//!   Membership changes force a full **structural** snapshot; otherwise a
//!   **sparse** per-index diff carries only the nodes that changed.
//! * **Snapshots (`state::Snapshot`)**: the serialized change records,
//!   encodable into an opaque payload for the transport collaborator.
//!
//! All three levels implement the same contract (`state::TrackedState`):
//! `track_start` once after declarative population, `save` at response end,
//! `load` on the next request's freshly rebuilt tree before tracking starts
//! again.
//!
//! ## Example
//!
//! ```
//! use viewstate::{
//!     Result,
//!     state::{
//!         NodeCore, Snapshot, StateNode, TrackedCollection, TrackedState, load_parts,
//!         save_parts,
//!     },
//! };
//!
//! // One concrete node kind: a flat item carrying a label.
//! struct Item {
//!     core: NodeCore,
//! }
//!
//! impl Item {
//!     fn labeled(label: &str) -> Self {
//!         let mut item = Item { core: NodeCore::new() };
//!         item.core.bag_mut().set("label", label);
//!         item
//!     }
//! }
//!
//! impl TrackedState for Item {
//!     fn track_start(&mut self) {
//!         self.core.bag_mut().track_start();
//!     }
//!
//!     fn save(&self) -> Option<Snapshot> {
//!         save_parts(vec![self.core.bag().save()])
//!     }
//!
//!     fn save_full(&self) -> Option<Snapshot> {
//!         save_parts(vec![self.core.bag().save_full()])
//!     }
//!
//!     fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
//!         let parts = load_parts(snapshot, 1)?;
//!         if let Some(slice) = &parts[0] {
//!             self.core.bag_mut().load(slice)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl StateNode for Item {
//!     fn kind(&self) -> &'static str {
//!         "item"
//!     }
//!     fn core(&self) -> &NodeCore {
//!         &self.core
//!     }
//!     fn core_mut(&mut self) -> &mut NodeCore {
//!         &mut self.core
//!     }
//! }
//!
//! // The declarative source both requests rebuild from.
//! fn populate() -> TrackedCollection<Item> {
//!     let mut items = TrackedCollection::of("item", || Item::labeled(""));
//!     items.push(Item::labeled("A"));
//!     items.push(Item::labeled("B"));
//!     items
//! }
//!
//! fn main() -> Result<()> {
//!     // Response N: populate, track, mutate, save.
//!     let mut items = populate();
//!     items.track_start();
//!     items.get_mut(1).unwrap().core_mut().bag_mut().set("label", "B2");
//!     let payload = items.save().unwrap().encode()?;
//!
//!     // Request N+1: rebuild from the declarative source, replay the payload.
//!     let mut items = populate();
//!     items.load(&Snapshot::decode(&payload)?)?;
//!     items.track_start();
//!     assert_eq!(items.get(1).unwrap().core().bag().get_text("label", ""), "B2");
//!     Ok(())
//! }
//! ```

pub mod state;

/// Re-export the core protocol types for easier access.
pub use state::{
    NodeCore, NodeRegistry, Snapshot, StateBag, StateNode, TrackedCollection, TrackedState, Value,
};

/// Result type used throughout the viewstate library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the viewstate library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured protocol errors from the state module
    #[error(transparent)]
    State(state::StateError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::State(_) => "state",
        }
    }

    /// Check if this error is payload serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Check if this error is a structured protocol error.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::State(_))
    }

    /// Check if this error indicates a snapshot/collection shape disagreement.
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            Error::State(err) => err.is_shape_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is related to polymorphic kind resolution.
    pub fn is_kind_error(&self) -> bool {
        match self {
            Error::State(err) => err.is_kind_error(),
            _ => false,
        }
    }

    /// Check if this error indicates the wrong snapshot variant for a receiver.
    pub fn is_snapshot_kind_error(&self) -> bool {
        match self {
            Error::State(err) => err.is_snapshot_kind_error(),
            _ => false,
        }
    }

    /// Check if this error indicates an out-of-bounds collection access.
    pub fn is_out_of_bounds(&self) -> bool {
        match self {
            Error::State(err) => err.is_out_of_bounds(),
            _ => false,
        }
    }
}
