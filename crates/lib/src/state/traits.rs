//! The shared save/load contract implemented at every level of the tree.

use super::snapshot::Snapshot;
use crate::Result;

/// The persistence contract shared by bags, nodes, and collections.
///
/// All three levels of the tree implement the same operations, which is
/// what lets the protocol compose to arbitrary depth: a node's `save` calls
/// its bag's and collections' `save`, a collection's `save` calls its nodes',
/// and so on.
///
/// The contract follows the round-trip lifecycle:
///
/// 1. Construct the tree from the declarative source (untracked).
/// 2. [`load`](TrackedState::load) the previous response's snapshot, if any.
/// 3. [`track_start`](TrackedState::track_start) once; application code
///    mutates freely from here on.
/// 4. [`save`](TrackedState::save) at response end; the resulting snapshot is
///    handed to the transport collaborator and the tree is discarded.
pub trait TrackedState {
    /// Begins change tracking on this value and, recursively, on everything
    /// it owns. One-way per round trip; there is no `track_stop`.
    fn track_start(&mut self);

    /// Serializes everything mutated since [`track_start`](Self::track_start).
    ///
    /// Returns `None` when nothing changed, at whatever level of the tree
    /// this is — an unchanged subtree costs nothing in the payload.
    fn save(&self) -> Option<Snapshot>;

    /// Serializes this value's complete current state, dirty or not.
    ///
    /// Used by collections for their structural snapshots: once membership
    /// changed, positional correspondence with the prior client-visible
    /// state is gone, so every surviving node must be resent in full — its
    /// declaration-time values included, because the reconstructing side
    /// starts each node from the kind's empty factory default.
    ///
    /// Returns `None` only when there is genuinely nothing to represent
    /// (an empty bag); a collection always returns its full membership.
    fn save_full(&self) -> Option<Snapshot>;

    /// Replays a snapshot produced by [`save`](Self::save) on a prior,
    /// identically shaped tree.
    ///
    /// Must run before [`track_start`](Self::track_start), so reconstruction
    /// itself is never recorded as a change. Fails fatally when the snapshot
    /// does not fit this receiver; no partial application is attempted.
    fn load(&mut self, snapshot: &Snapshot) -> Result<()>;
}
