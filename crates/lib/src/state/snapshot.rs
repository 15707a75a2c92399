//! Serialized change records produced by `save` and consumed by `load`.
//!
//! A [`Snapshot`] carries exactly the information needed to reconstruct a
//! change on a freshly built tree, and nothing else. The enum is recursive:
//! a collection snapshot contains node snapshots, which contain bag and
//! nested-collection snapshots, to arbitrary depth.

use std::collections::BTreeMap;

use super::value::Value;
use crate::Result;

/// One serialized change record.
///
/// Which variant appears where is fixed by the tree shape:
///
/// - [`Snapshot::Bag`] — the dirty keys of one state bag with their current
///   values, as produced by a bag's save.
/// - [`Snapshot::Parts`] — a node's fixed-arity ordered tuple of slices
///   (bag first, then each owned collection). Absent slices mean "nothing
///   changed there".
/// - [`Snapshot::Structural`] — full membership of a collection whose
///   sequence itself was mutated after tracking began. Every node is
///   represented, even unchanged ones, because position/identity itself is
///   new information.
/// - [`Snapshot::Sparse`] — per-index diffs for a collection whose
///   membership is unchanged; untouched nodes are omitted entirely.
///
/// The keys of a bag snapshot are stored in a `BTreeMap` so a given change
/// always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Snapshot {
    /// Dirty keys of one state bag, with their current values
    Bag(BTreeMap<String, Value>),
    /// A node's fixed-arity tuple of slices, one per tracked part
    Parts(Vec<Option<Snapshot>>),
    /// Full membership of a structurally mutated collection, in order
    Structural(Vec<StructuralItem>),
    /// Per-index diffs for a membership-stable collection
    Sparse(Vec<(usize, Snapshot)>),
}

/// One node of a [`Snapshot::Structural`] record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructuralItem {
    /// Kind tag for polymorphic reconstruction.
    ///
    /// Present only when the owning collection's registry has more than one
    /// kind; monomorphic collections reconstruct via the registry default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// The node's own save, absent when the node had nothing dirty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Snapshot>,
}

impl Snapshot {
    /// Returns the variant name as a string, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Snapshot::Bag(_) => "bag",
            Snapshot::Parts(_) => "parts",
            Snapshot::Structural(_) => "structural",
            Snapshot::Sparse(_) => "sparse",
        }
    }

    /// Serializes this snapshot into the opaque payload handed to the
    /// transport collaborator.
    ///
    /// The payload format is an implementation detail; callers only round
    /// it through [`Snapshot::decode`]. Integrity protection and signing
    /// belong to the transport layer.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reconstructs a snapshot from an opaque payload produced by
    /// [`Snapshot::encode`].
    pub fn decode(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
