//! Document arena: the host page tree that search walks and mutates.
//!
//! Nodes live in a generational arena owned by `Document`. A `NodeId` is a
//! non-owning handle; freeing a slot bumps its generation, so a handle that
//! outlived its node is detected as stale instead of aliasing whatever was
//! allocated in the slot afterwards. Structural edits live in `tree`,
//! traversal in `walk`, and serialization in `serialize`.

mod serialize;
#[cfg(test)]
mod tests;
mod tree;
mod walk;

use std::fmt;

pub use walk::{Descendants, TextLeaves};

/// Handle to a node in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Element tag, attributes, and class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes other than `class`, in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Class list, in insertion order, without duplicates.
    pub classes: Vec<String>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
        }
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root. Exactly one per `Document`.
    Document,
    Element(ElementData),
    /// A text-bearing leaf.
    Text(String),
}

/// A node and its structural links.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node may hold children.
    fn is_container(&self) -> bool {
        !matches!(self.kind, NodeKind::Text(_))
    }
}

/// Errors from structural operations on a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} is stale or belongs to another document")]
    StaleNode(NodeId),
    #[error("node {0} cannot hold children")]
    NotAContainer(NodeId),
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("node {0} already has a parent")]
    AlreadyAttached(NodeId),
    #[error("node {0} is not connected to the document")]
    Disconnected(NodeId),
    #[error("inserting {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The host page tree.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    /// Indices of vacant slots, reused before the arena grows.
    free: Vec<u32>,
    root: NodeId,
    /// Number of occupied slots.
    live: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its root node.
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            live: 0,
        };
        doc.root = doc.alloc(NodeKind::Document);
        doc
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element if there is one, otherwise the root.
    pub fn body(&self) -> NodeId {
        self.find_element(self.root, "body").unwrap_or(self.root)
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Look up a node, returning `None` for stale handles.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::StaleNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DomError::StaleNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.live += 1;
        let node = Some(Node::new(kind));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Vacate a slot. The caller has already unlinked the node.
    fn free_slot(&mut self, id: NodeId) {
        if let Some(slot) = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
        {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                self.live -= 1;
            }
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_owned()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id`; empty for stale handles and text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Lowercase tag name, if `id` is a live element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Element(el) => Some(el.tag.as_str()),
            _ => None,
        }
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    /// Set an attribute. `class` replaces the class list.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        let name = name.to_ascii_lowercase();
        if name == "class" {
            el.classes.clear();
            for class in value.split_ascii_whitespace() {
                if !el.classes.iter().any(|c| c == class) {
                    el.classes.push(class.to_owned());
                }
            }
            return Ok(());
        }
        match el.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => value.clone_into(v),
            None => el.attrs.push((name, value.to_owned())),
        }
        Ok(())
    }

    /// Attribute value. `class` is reported as the space-joined class list.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        let NodeKind::Element(el) = &self.get(id)?.kind else {
            return None;
        };
        if name.eq_ignore_ascii_case("class") {
            return (!el.classes.is_empty()).then(|| el.classes.join(" "));
        }
        el.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element(el)) => el.classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let el = self.element_mut(id)?;
        if el.classes.iter().any(|c| c == class) {
            return Ok(false);
        }
        el.classes.push(class.to_owned());
        Ok(true)
    }

    /// Remove a class. Returns `false` if it was absent.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let el = self.element_mut(id)?;
        let before = el.classes.len();
        el.classes.retain(|c| c != class);
        Ok(el.classes.len() != before)
    }

    /// First element named `tag` under `from` (inclusive), in document order.
    pub fn find_element(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&id| self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Elements under `from` (inclusive) carrying `class`, in document order.
    pub fn elements_with_class(&self, from: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&id| self.has_class(id, class))
            .collect()
    }
}
