//! Node kinds: the entries stored inside tracked collections.
//!
//! A node owns one [`StateBag`] and zero or more nested
//! [`TrackedCollection`](super::TrackedCollection)s. Concrete kinds embed a
//! [`NodeCore`] for the shared bookkeeping (bag, ordinal index, owner
//! back-reference) and implement [`TrackedState`](super::TrackedState) by
//! composing their parts with [`save_parts`]/[`load_parts`] — see the
//! crate-level example.

use uuid::Uuid;

use super::{bag::StateBag, errors::StateError, snapshot::Snapshot, traits::TrackedState};
use crate::Result;

/// Shared per-node state, embedded by every concrete node kind.
///
/// The index is owned and assigned by the containing collection, never by
/// the node itself; it always reflects the node's current position because
/// the collection renumbers siblings on every structural change. The owner
/// reference is non-owning and for lookup only — it never appears in
/// snapshots, so the serialized form stays a strict tree.
#[derive(Debug, Clone, Default)]
pub struct NodeCore {
    bag: StateBag,
    index: usize,
    owner: Option<Uuid>,
}

impl NodeCore {
    /// Creates a detached core with an empty, untracked bag
    pub fn new() -> Self {
        Self::default()
    }

    /// The node's leaf state container
    pub fn bag(&self) -> &StateBag {
        &self.bag
    }

    /// Mutable access to the node's leaf state container
    pub fn bag_mut(&mut self) -> &mut StateBag {
        &mut self.bag
    }

    /// The node's current position in its owning collection.
    ///
    /// Meaningless while detached.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Identity of the owning collection, if attached
    pub fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_owner(&mut self, owner: Option<Uuid>) {
        self.owner = owner;
    }
}

/// A node that can live inside a [`TrackedCollection`](super::TrackedCollection).
///
/// Implementors supply their embedded [`NodeCore`] and a stable kind tag;
/// the persistence behavior itself comes from the [`TrackedState`] supertrait,
/// which concrete kinds implement over their fixed tuple of parts.
pub trait StateNode: TrackedState {
    /// Stable tag identifying this node kind.
    ///
    /// Recorded in structural snapshots when the owning collection's
    /// registry is polymorphic, and used to pick the factory on load. Must
    /// match the tag the kind is registered under.
    fn kind(&self) -> &'static str;

    /// The shared per-node state
    fn core(&self) -> &NodeCore;

    /// Mutable access to the shared per-node state
    fn core_mut(&mut self) -> &mut NodeCore;

    /// The node's current position in its owning collection
    fn index(&self) -> usize {
        self.core().index()
    }

    /// Identity of the owning collection, if attached
    fn owner(&self) -> Option<Uuid> {
        self.core().owner()
    }
}

/// Composes a node's part slices into its tuple snapshot.
///
/// Returns `None` when every slice is absent, which is exactly the "nothing
/// dirty anywhere below this node" case. The slice order is the node kind's
/// fixed arity contract: bag first, then each owned collection, identical
/// between save and load.
pub fn save_parts(parts: Vec<Option<Snapshot>>) -> Option<Snapshot> {
    if parts.iter().all(Option::is_none) {
        None
    } else {
        Some(Snapshot::Parts(parts))
    }
}

/// Splits a node tuple snapshot back into its part slices.
///
/// Fails when the snapshot is not a tuple or its arity disagrees with
/// `expected` — a fatal shape error, since slices are positional.
pub fn load_parts(snapshot: &Snapshot, expected: usize) -> Result<&[Option<Snapshot>]> {
    let Snapshot::Parts(parts) = snapshot else {
        return Err(StateError::SnapshotKind {
            expected: "parts",
            found: snapshot.kind_name(),
        }
        .into());
    };
    if parts.len() != expected {
        return Err(StateError::ArityMismatch {
            expected,
            found: parts.len(),
        }
        .into());
    }
    Ok(parts)
}
