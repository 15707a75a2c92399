//! Ordered node sequences with structural dirty tracking.

use std::fmt;

use tracing::{trace, warn};
use uuid::Uuid;

use super::{
    errors::StateError,
    node::StateNode,
    snapshot::{Snapshot, StructuralItem},
    traits::TrackedState,
};
use crate::Result;

/// Maps stable kind tags to zero-argument node factories.
///
/// A collection reconstructs its nodes from a structural snapshot through
/// its registry: the recorded tag picks the factory, or the first registered
/// kind when no tag was recorded. A registry with more than one kind is
/// *polymorphic* — only then do structural snapshots carry tags at all.
pub struct NodeRegistry<T> {
    factories: Vec<(&'static str, fn() -> T)>,
}

impl<T> NodeRegistry<T> {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Creates a registry with a single kind, the common monomorphic case
    pub fn of(tag: &'static str, factory: fn() -> T) -> Self {
        Self {
            factories: vec![(tag, factory)],
        }
    }

    /// Registers a kind under a stable tag.
    ///
    /// The first registered kind becomes the default used when a structural
    /// snapshot carries no tag. Registering a tag twice is an error.
    pub fn register(&mut self, tag: &'static str, factory: fn() -> T) -> Result<()> {
        if self.factories.iter().any(|(t, _)| *t == tag) {
            return Err(StateError::DuplicateKind {
                tag: tag.to_string(),
            }
            .into());
        }
        self.factories.push((tag, factory));
        Ok(())
    }

    /// Returns the number of registered kinds
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no kinds are registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns true when more than one kind is registered
    pub fn is_polymorphic(&self) -> bool {
        self.factories.len() > 1
    }

    /// Returns true if the tag has a registered factory
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.iter().any(|(t, _)| *t == tag)
    }

    /// Constructs a fresh node of the tagged kind, or of the default kind
    /// when no tag was recorded
    pub fn construct(&self, tag: Option<&str>) -> Result<T> {
        match tag {
            Some(tag) => self
                .factories
                .iter()
                .find(|(t, _)| *t == tag)
                .map(|(_, factory)| factory())
                .ok_or_else(|| {
                    StateError::UnknownKind {
                        tag: tag.to_string(),
                    }
                    .into()
                }),
            None => self
                .factories
                .first()
                .map(|(_, factory)| factory())
                .ok_or_else(|| StateError::EmptyRegistry.into()),
        }
    }
}

impl<T> Default for NodeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NodeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            factories: self.factories.clone(),
        }
    }
}

impl<T> fmt::Debug for NodeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.factories.iter().map(|(tag, _)| tag))
            .finish()
    }
}

/// An ordered sequence of nodes with a structural-dirty flag independent of
/// any single node's dirtiness.
///
/// Two one-way-per-round-trip flags drive the save encoding:
///
/// - `tracking` — set once by [`track_start`](TrackedState::track_start);
/// - `structurally_dirty` — set the instant a structural mutation (push,
///   insert, remove, clear) happens while tracking, never reset within the
///   same round trip.
///
/// A structurally dirty collection saves its **full membership** (cost
/// O(N)): once the sequence itself changed, positional correspondence with
/// the prior client-visible state can no longer be trusted incrementally.
/// A membership-stable collection saves a **sparse per-index diff** (cost
/// O(changed)): untouched nodes cost nothing.
///
/// Initial population through the same mutators is free of charge as long as
/// it happens before `track_start`, which is the declarative-population
/// contract.
pub struct TrackedCollection<T: StateNode> {
    /// Identity backing the nodes' owner back-references. Never serialized.
    id: Uuid,
    registry: NodeRegistry<T>,
    nodes: Vec<T>,
    tracking: bool,
    structurally_dirty: bool,
}

impl<T: StateNode> TrackedCollection<T> {
    /// Creates an empty collection reconstructing through `registry`
    pub fn new(registry: NodeRegistry<T>) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            nodes: Vec::new(),
            tracking: false,
            structurally_dirty: false,
        }
    }

    /// Creates an empty collection of a single node kind
    pub fn of(tag: &'static str, factory: fn() -> T) -> Self {
        Self::new(NodeRegistry::of(tag, factory))
    }

    /// Identity of this collection, as seen in its nodes' owner references
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The registry used for polymorphic reconstruction
    pub fn registry(&self) -> &NodeRegistry<T> {
        &self.registry
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the collection holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true once [`track_start`](TrackedState::track_start) has run
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Returns true if the sequence was mutated after tracking began
    pub fn is_structurally_dirty(&self) -> bool {
        self.structurally_dirty
    }

    /// Gets a node by position
    pub fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)
    }

    /// Gets a mutable node by position
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.nodes.get_mut(index)
    }

    /// Iterates over the nodes in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Iterates mutably over the nodes in order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.nodes.iter_mut()
    }

    /// Appends a node, returning its assigned index
    pub fn push(&mut self, node: T) -> usize {
        let index = self.nodes.len();
        self.attach(index, node);
        index
    }

    /// Inserts a node at `index`, shifting and renumbering every node at or
    /// after the insertion point
    pub fn insert(&mut self, index: usize, node: T) -> Result<()> {
        if index > self.nodes.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            }
            .into());
        }
        self.attach(index, node);
        Ok(())
    }

    /// Removes and returns the node at `index`, detaching its owner
    /// reference and renumbering every node after the removal point
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.nodes.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            }
            .into());
        }
        let mut node = self.nodes.remove(index);
        node.core_mut().set_owner(None);
        self.renumber(index);
        if self.tracking {
            self.structurally_dirty = true;
        }
        Ok(node)
    }

    /// Removes every node, detaching all owner references
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.core_mut().set_owner(None);
        }
        self.nodes.clear();
        if self.tracking {
            self.structurally_dirty = true;
        }
    }

    fn attach(&mut self, index: usize, mut node: T) {
        node.core_mut().set_owner(Some(self.id));
        self.nodes.insert(index, node);
        self.renumber(index);
        if self.tracking {
            self.structurally_dirty = true;
            // A node added mid-flight must track from now on so its own
            // mutations make it into the structural snapshot.
            self.nodes[index].track_start();
        }
    }

    fn renumber(&mut self, from: usize) {
        for (index, node) in self.nodes.iter_mut().enumerate().skip(from) {
            node.core_mut().set_index(index);
        }
    }

    fn full_items(&self) -> Vec<StructuralItem> {
        let tagged = self.registry.is_polymorphic();
        self.nodes
            .iter()
            .map(|node| StructuralItem {
                tag: tagged.then(|| node.kind().to_string()),
                state: node.save_full(),
            })
            .collect()
    }
}

impl<T: StateNode> TrackedState for TrackedCollection<T> {
    fn track_start(&mut self) {
        self.tracking = true;
        for node in &mut self.nodes {
            node.track_start();
        }
    }

    fn save(&self) -> Option<Snapshot> {
        if self.structurally_dirty {
            // Membership changed: every node is resent in full, even clean
            // ones, because position/identity itself is new information and
            // the loading side reconstructs each node from its factory
            // default.
            let items = self.full_items();
            trace!(nodes = items.len(), "saving structural snapshot");
            return Some(Snapshot::Structural(items));
        }

        let changed: Vec<(usize, Snapshot)> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.save().map(|slice| (index, slice)))
            .collect();
        if changed.is_empty() {
            None
        } else {
            trace!(
                changed = changed.len(),
                total = self.nodes.len(),
                "saving sparse snapshot"
            );
            Some(Snapshot::Sparse(changed))
        }
    }

    fn save_full(&self) -> Option<Snapshot> {
        // Always structural, even when empty: an empty membership is still
        // state the loading side must apply.
        Some(Snapshot::Structural(self.full_items()))
    }

    fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        match snapshot {
            Snapshot::Structural(items) => {
                trace!(nodes = items.len(), "restoring structural snapshot");
                self.clear();
                for item in items {
                    let node = self.registry.construct(item.tag.as_deref())?;
                    let index = self.push(node);
                    if let Some(state) = &item.state {
                        self.nodes[index].load(state)?;
                    }
                }
                Ok(())
            }
            Snapshot::Sparse(entries) => {
                let len = self.nodes.len();
                for (index, slice) in entries {
                    let Some(node) = self.nodes.get_mut(*index) else {
                        // Skipping would misalign every later index, so a
                        // shape disagreement abandons the whole load.
                        warn!(
                            index = *index,
                            len, "sparse snapshot does not fit collection shape"
                        );
                        return Err(StateError::ShapeMismatch { index: *index, len }.into());
                    };
                    node.load(slice)?;
                }
                Ok(())
            }
            other => Err(StateError::SnapshotKind {
                expected: "structural or sparse",
                found: other.kind_name(),
            }
            .into()),
        }
    }
}

impl<T: StateNode> fmt::Debug for TrackedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedCollection")
            .field("id", &self.id)
            .field("len", &self.nodes.len())
            .field("tracking", &self.tracking)
            .field("structurally_dirty", &self.structurally_dirty)
            .finish()
    }
}
