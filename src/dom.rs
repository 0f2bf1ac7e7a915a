//! Retained element tree.
//!
//! The engine is headless: instead of a browser DOM it renders into this
//! small arena of nodes (tag, classes, text, box style, children). A host
//! embedding mirrors the tree to its real output surface; tests inspect it
//! directly. Node handles are plain indices; operations on a freed handle
//! are no-ops rather than errors.

use crate::types::PxBox;

/// Tag used for plain text nodes.
pub const TEXT_TAG: &str = "#text";

/// Handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// CSS-like positioning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Absolute,
}

/// Box style written by the view layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeStyle {
    pub position: Position,
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub z_index: Option<i32>,
    /// Inset 0 on all four edges (overrides top/left when set).
    pub pinned: bool,
    /// Whether the node receives pointer events.
    pub pointer_events: bool,
}

impl NodeStyle {
    fn new() -> Self {
        Self {
            pointer_events: true,
            ..Self::default()
        }
    }
}

/// A single retained node.
#[derive(Debug)]
pub struct Node {
    pub tag: String,
    pub text: String,
    pub style: NodeStyle,
    classes: Vec<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    alive: bool,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            text: String::new(),
            style: NodeStyle::new(),
            classes: Vec::new(),
            children: Vec::new(),
            parent: None,
            alive: true,
        }
    }

    /// Whether this is a plain text node.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Child handles in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Class list as assigned.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The node arena. Freed slots are recycled.
pub struct Dom {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

impl Dom {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = Node::new(tag);
        if let Some(slot) = self.free.pop() {
            if let Some(entry) = self.nodes.get_mut(slot) {
                *entry = node;
                return NodeId(slot);
            }
        }
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let id = self.create_element(TEXT_TAG);
        self.set_text(id, text);
        id
    }

    /// Borrow a node. Returns `None` for freed handles.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| n.alive)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|n| n.alive)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Detach a node from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(Node::parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    /// Detach and free a node and its entire subtree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node_mut(current) else {
                continue;
            };
            node.alive = false;
            stack.extend(std::mem::take(&mut node.children));
            self.free.push(current.0);
        }
    }

    /// Free every child subtree of `parent`.
    pub fn remove_children(&mut self, parent: NodeId) {
        let children = self
            .node(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
    }

    /// Detach every child of `parent`, keeping them alive.
    pub fn detach_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children = self
            .node(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in &children {
            self.detach(*child);
        }
        children
    }

    /// Number of children of `parent`.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |n| n.children.len())
    }

    /// First child of `parent`, if any.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.children.first().copied())
    }

    /// Set a node's own text content.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_mut(id) {
            if n.text != text {
                text.clone_into(&mut n.text);
            }
        }
    }

    /// Concatenated text of the node and its subtree, in document order.
    #[must_use]
    pub fn deep_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push_str(&node.text);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Replace the class list.
    pub fn set_classes(&mut self, id: NodeId, classes: Vec<String>) {
        if let Some(n) = self.node_mut(id) {
            n.classes = classes;
        }
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            if !n.has_class(class) {
                n.classes.push(class.to_owned());
            }
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Whether the node carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    /// Mutate a node's style in place.
    pub fn update_style(&mut self, id: NodeId, f: impl FnOnce(&mut NodeStyle)) {
        if let Some(n) = self.node_mut(id) {
            f(&mut n.style);
        }
    }

    /// Write an absolute pixel box into the node's style.
    pub fn set_bounds(&mut self, id: NodeId, bounds: PxBox) {
        self.update_style(id, |style| {
            style.position = Position::Absolute;
            style.top = Some(bounds.top);
            style.left = Some(bounds.left);
            style.width = Some(bounds.width);
            style.height = Some(bounds.height);
        });
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
