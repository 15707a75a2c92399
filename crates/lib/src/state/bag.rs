//! Flat key→value store with per-key dirty tracking.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{errors::StateError, snapshot::Snapshot, traits::TrackedState, value::Value};
use crate::Result;

/// The leaf state container: a flat `String → Value` map that remembers
/// which keys were written after tracking began.
///
/// One bag is the root unit of state for one component instance. Reads are
/// side-effect free; writes mark the key dirty once tracking is active —
/// unconditionally, even when the new value equals the old one, since
/// callers may rely on the forced resend.
///
/// # Examples
///
/// ```
/// # use viewstate::state::{StateBag, TrackedState};
/// let mut bag = StateBag::new();
/// bag.set("label", "Home");       // declaration time, untracked
/// bag.track_start();
///
/// assert!(bag.save().is_none());  // nothing dirty yet
///
/// bag.set("label", "Start");
/// let snapshot = bag.save().unwrap();
///
/// // Next request: a freshly declared bag, replayed.
/// let mut bag = StateBag::new();
/// bag.set("label", "Home");
/// bag.load(&snapshot).unwrap();
/// assert_eq!(bag.get_text("label", ""), "Start");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateBag {
    values: HashMap<String, Value>,
    dirty: HashSet<String>,
    tracking: bool,
}

impl StateBag {
    /// Creates a new empty bag, not yet tracking
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys in the bag
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the bag holds no keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if the bag contains the given key
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.values.contains_key(key.as_ref())
    }

    /// Returns true once [`track_start`](TrackedState::track_start) has run
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Returns true if the key was written after tracking began
    pub fn is_dirty(&self, key: impl AsRef<str>) -> bool {
        self.dirty.contains(key.as_ref())
    }

    /// Gets a value by key. Pure read, no side effect.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
        self.values.get(key.as_ref())
    }

    /// Gets a boolean by key, falling back to `default` on a missing key or
    /// a non-boolean value
    pub fn get_bool(&self, key: impl AsRef<str>, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    /// Gets an integer by key, falling back to `default`
    pub fn get_int(&self, key: impl AsRef<str>, default: i64) -> i64 {
        self.get(key).and_then(|v| v.as_int()).unwrap_or(default)
    }

    /// Gets a text value by key, falling back to `default`
    pub fn get_text<'a>(&'a self, key: impl AsRef<str>, default: &'a str) -> &'a str {
        self.get(key).and_then(|v| v.as_text()).unwrap_or(default)
    }

    /// Stores a value under the key, returning the previous value if any.
    ///
    /// When tracking is active the key is marked dirty unconditionally; no
    /// equality check is made against the old value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if self.tracking {
            self.dirty.insert(key.clone());
        }
        self.values.insert(key, value.into())
    }

    /// Iterates over all keys and values, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys written since tracking began
    pub fn dirty_keys(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }
}

impl TrackedState for StateBag {
    fn track_start(&mut self) {
        // Does not touch the dirty set: loads and declarative writes that
        // happened before this point stay invisible to save().
        self.tracking = true;
    }

    fn save(&self) -> Option<Snapshot> {
        if !self.tracking || self.dirty.is_empty() {
            return None;
        }
        let entries: BTreeMap<String, Value> = self
            .dirty
            .iter()
            .filter_map(|key| self.values.get(key).map(|v| (key.clone(), v.clone())))
            .collect();
        Some(Snapshot::Bag(entries))
    }

    fn save_full(&self) -> Option<Snapshot> {
        if self.values.is_empty() {
            return None;
        }
        let entries: BTreeMap<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Some(Snapshot::Bag(entries))
    }

    fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        let Snapshot::Bag(entries) = snapshot else {
            return Err(StateError::SnapshotKind {
                expected: "bag",
                found: snapshot.kind_name(),
            }
            .into());
        };
        // Merge: matching keys are overwritten, all others left untouched.
        for (key, value) in entries {
            self.values.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
