//! Shared fixtures: the concrete node kinds the tests persist.
//!
//! Three kinds cover the shapes the protocol must handle:
//! - [`Item`] — flat, monomorphic (a list item with a label)
//! - [`TreeNode`] — recursive (a node owning a collection of further nodes)
//! - [`MenuEntry`] — polymorphic (two kinds behind one registry)

use viewstate::{
    Result,
    state::{
        NodeCore, NodeRegistry, Snapshot, StateNode, TrackedCollection, TrackedState, load_parts,
        save_parts,
    },
};

// ==========================
// Item: flat, monomorphic
// ==========================

pub struct Item {
    core: NodeCore,
}

impl Item {
    pub fn new() -> Self {
        Self {
            core: NodeCore::new(),
        }
    }

    pub fn labeled(label: &str) -> Self {
        let mut item = Self::new();
        item.core.bag_mut().set("label", label);
        item
    }

    pub fn label(&self) -> &str {
        self.core.bag().get_text("label", "")
    }

    pub fn set_label(&mut self, label: &str) {
        self.core.bag_mut().set("label", label);
    }
}

impl TrackedState for Item {
    fn track_start(&mut self) {
        self.core.bag_mut().track_start();
    }

    fn save(&self) -> Option<Snapshot> {
        save_parts(vec![self.core.bag().save()])
    }

    fn save_full(&self) -> Option<Snapshot> {
        save_parts(vec![self.core.bag().save_full()])
    }

    fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        let parts = load_parts(snapshot, 1)?;
        if let Some(slice) = &parts[0] {
            self.core.bag_mut().load(slice)?;
        }
        Ok(())
    }
}

impl StateNode for Item {
    fn kind(&self) -> &'static str {
        "item"
    }

    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

/// A declaratively populated item collection
pub fn items(labels: &[&str]) -> TrackedCollection<Item> {
    let mut collection = TrackedCollection::of("item", Item::new);
    for label in labels {
        collection.push(Item::labeled(label));
    }
    collection
}

pub fn item_labels(collection: &TrackedCollection<Item>) -> Vec<String> {
    collection.iter().map(|item| item.label().to_string()).collect()
}

// ==========================
// TreeNode: recursive
// ==========================

pub struct TreeNode {
    core: NodeCore,
    pub children: TrackedCollection<TreeNode>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self {
            core: NodeCore::new(),
            children: TrackedCollection::of("node", TreeNode::new),
        }
    }

    pub fn labeled(label: &str) -> Self {
        let mut node = Self::new();
        node.core.bag_mut().set("label", label);
        node
    }

    pub fn label(&self) -> &str {
        self.core.bag().get_text("label", "")
    }

    pub fn set_label(&mut self, label: &str) {
        self.core.bag_mut().set("label", label);
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.core.bag_mut().set("expanded", expanded);
    }

    pub fn is_expanded(&self) -> bool {
        self.core.bag().get_bool("expanded", false)
    }
}

impl TrackedState for TreeNode {
    fn track_start(&mut self) {
        self.core.bag_mut().track_start();
        self.children.track_start();
    }

    fn save(&self) -> Option<Snapshot> {
        save_parts(vec![self.core.bag().save(), self.children.save()])
    }

    fn save_full(&self) -> Option<Snapshot> {
        save_parts(vec![self.core.bag().save_full(), self.children.save_full()])
    }

    fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        let parts = load_parts(snapshot, 2)?;
        if let Some(slice) = &parts[0] {
            self.core.bag_mut().load(slice)?;
        }
        if let Some(slice) = &parts[1] {
            self.children.load(slice)?;
        }
        Ok(())
    }
}

impl StateNode for TreeNode {
    fn kind(&self) -> &'static str {
        "node"
    }

    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

/// A root-level tree collection
pub fn tree() -> TrackedCollection<TreeNode> {
    TrackedCollection::of("node", TreeNode::new)
}

// ==========================
// MenuEntry: polymorphic
// ==========================

pub enum MenuEntry {
    /// Plain text entry
    Label(NodeCore),
    /// Entry carrying a target url alongside its text
    Link(NodeCore),
}

impl MenuEntry {
    pub fn new_label() -> Self {
        MenuEntry::Label(NodeCore::new())
    }

    pub fn new_link() -> Self {
        MenuEntry::Link(NodeCore::new())
    }

    pub fn label(text: &str) -> Self {
        let mut entry = Self::new_label();
        entry.core_mut().bag_mut().set("text", text);
        entry
    }

    pub fn link(text: &str, url: &str) -> Self {
        let mut entry = Self::new_link();
        entry.core_mut().bag_mut().set("text", text);
        entry.core_mut().bag_mut().set("url", url);
        entry
    }

    pub fn text(&self) -> &str {
        self.core().bag().get_text("text", "")
    }

    pub fn url(&self) -> Option<&str> {
        self.core().bag().get("url").and_then(|v| v.as_text())
    }
}

impl TrackedState for MenuEntry {
    fn track_start(&mut self) {
        self.core_mut().bag_mut().track_start();
    }

    fn save(&self) -> Option<Snapshot> {
        save_parts(vec![self.core().bag().save()])
    }

    fn save_full(&self) -> Option<Snapshot> {
        save_parts(vec![self.core().bag().save_full()])
    }

    fn load(&mut self, snapshot: &Snapshot) -> Result<()> {
        let parts = load_parts(snapshot, 1)?;
        if let Some(slice) = &parts[0] {
            self.core_mut().bag_mut().load(slice)?;
        }
        Ok(())
    }
}

impl StateNode for MenuEntry {
    fn kind(&self) -> &'static str {
        match self {
            MenuEntry::Label(_) => "label",
            MenuEntry::Link(_) => "link",
        }
    }

    fn core(&self) -> &NodeCore {
        match self {
            MenuEntry::Label(core) | MenuEntry::Link(core) => core,
        }
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        match self {
            MenuEntry::Label(core) | MenuEntry::Link(core) => core,
        }
    }
}

/// An empty menu collection with both kinds registered
pub fn menu() -> TrackedCollection<MenuEntry> {
    let mut registry = NodeRegistry::new();
    registry.register("label", MenuEntry::new_label).unwrap();
    registry.register("link", MenuEntry::new_link).unwrap();
    TrackedCollection::new(registry)
}
