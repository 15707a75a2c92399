//! Error types for the state persistence protocol.
//!
//! Reconstruction either fully succeeds or is abandoned wholesale: every
//! variant here is fatal for the snapshot being applied, since skipping a
//! slice would misalign everything after it.

use thiserror::Error;

/// Structured error types for snapshot save/load and collection operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError {
    /// A sparse snapshot addressed an index beyond the freshly populated
    /// collection. The collection no longer has the shape the snapshot was
    /// taken against.
    #[error("sparse snapshot index {index} out of range for collection of {len} nodes")]
    ShapeMismatch { index: usize, len: usize },

    /// A node snapshot's slice count disagrees with the node kind's fixed arity.
    #[error("snapshot arity mismatch: node expects {expected} slices, snapshot carries {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// A structural snapshot named a kind tag with no registered factory.
    #[error("unknown node kind tag: {tag}")]
    UnknownKind { tag: String },

    /// The same kind tag was registered twice in one registry.
    #[error("node kind tag already registered: {tag}")]
    DuplicateKind { tag: String },

    /// A structural snapshot needs the registry's default kind, but the
    /// registry has no kinds at all.
    #[error("node registry has no registered kinds")]
    EmptyRegistry,

    /// A snapshot variant was applied to the wrong receiver, e.g. a bag
    /// snapshot handed to a collection.
    #[error("snapshot kind mismatch: expected {expected}, found {found}")]
    SnapshotKind {
        expected: &'static str,
        found: &'static str,
    },

    /// A collection mutator was called with an index outside the sequence.
    #[error("index {index} out of bounds for collection of {len} nodes")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl StateError {
    /// Check if this error indicates a snapshot/collection shape disagreement.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            StateError::ShapeMismatch { .. } | StateError::ArityMismatch { .. }
        )
    }

    /// Check if this error is related to polymorphic kind resolution.
    pub fn is_kind_error(&self) -> bool {
        matches!(
            self,
            StateError::UnknownKind { .. }
                | StateError::DuplicateKind { .. }
                | StateError::EmptyRegistry
        )
    }

    /// Check if this error indicates the wrong snapshot variant for a receiver.
    pub fn is_snapshot_kind_error(&self) -> bool {
        matches!(self, StateError::SnapshotKind { .. })
    }

    /// Check if this error indicates an out-of-bounds collection access.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, StateError::IndexOutOfBounds { .. })
    }

    /// Get the offending kind tag if this is a kind-related error.
    pub fn tag(&self) -> Option<&str> {
        match self {
            StateError::UnknownKind { tag } | StateError::DuplicateKind { tag } => Some(tag),
            _ => None,
        }
    }
}

// Conversion from StateError to the main Error type
impl From<StateError> for crate::Error {
    fn from(err: StateError) -> Self {
        crate::Error::State(err)
    }
}
