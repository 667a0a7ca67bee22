//! Structural edits: attach, splice, detach, clone, release, normalize.

use super::{Document, DomError, NodeId, NodeKind};

impl Document {
    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Replace the child `old` of `parent` with `new`, in place.
    pub fn replace_with_nodes(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: &[NodeId],
    ) -> Result<(), DomError> {
        self.replace_range(parent, &[old], new)
    }

    /// Replace a contiguous run of children of `parent` with `new`.
    ///
    /// `old` must name consecutive children of `parent` in order, and every
    /// node in `new` must be detached. Either the whole splice happens or
    /// nothing changes.
    pub fn replace_range(
        &mut self,
        parent: NodeId,
        old: &[NodeId],
        new: &[NodeId],
    ) -> Result<(), DomError> {
        let Some(&first) = old.first() else {
            return Ok(());
        };
        let node = self.node(parent)?;
        let start = node
            .children
            .iter()
            .position(|&c| c == first)
            .ok_or(DomError::NotAChild {
                parent,
                child: first,
            })?;
        for (offset, &child) in old.iter().enumerate() {
            if node.children.get(start + offset) != Some(&child) {
                return Err(DomError::NotAChild { parent, child });
            }
        }
        for &child in new {
            self.check_insertable(parent, child)?;
        }

        self.node_mut(parent)?
            .children
            .splice(start..start + old.len(), new.iter().copied());
        for &child in old {
            self.node_mut(child)?.parent = None;
        }
        for &child in new {
            self.node_mut(child)?.parent = Some(parent);
        }
        Ok(())
    }

    /// Unlink `id` from its parent. Detaching a detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Free a detached subtree. Every handle into it becomes stale.
    pub fn release(&mut self, id: NodeId) -> Result<(), DomError> {
        let node = self.node(id)?;
        if node.parent.is_some() || id == self.root {
            return Err(DomError::AlreadyAttached(id));
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend_from_slice(self.children(current));
            self.free_slot(current);
        }
        Ok(())
    }

    /// Shallow copy of `id`: same kind and attributes, no parent, no children.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let kind = match &self.node(id)?.kind {
            NodeKind::Document => return Err(DomError::NotAnElement(id)),
            kind => kind.clone(),
        };
        Ok(self.alloc(kind))
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.get(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Merge adjacent text nodes and drop empty ones throughout the subtree
    /// rooted at `id`. Nodes merged away are released.
    pub fn normalize(&mut self, id: NodeId) -> Result<(), DomError> {
        self.node(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let children = std::mem::take(&mut self.node_mut(current)?.children);
            let mut kept = Vec::with_capacity(children.len());
            let mut dropped = Vec::new();
            let mut run: Option<NodeId> = None;

            for child in children {
                let Some(text) = self.text(child) else {
                    run = None;
                    kept.push(child);
                    stack.push(child);
                    continue;
                };
                if text.is_empty() {
                    dropped.push(child);
                    continue;
                }
                match run {
                    Some(head) => {
                        let tail = self.take_text(child)?;
                        if let NodeKind::Text(head_text) = &mut self.node_mut(head)?.kind {
                            head_text.push_str(&tail);
                        }
                        dropped.push(child);
                    }
                    None => {
                        run = Some(child);
                        kept.push(child);
                    }
                }
            }

            self.node_mut(current)?.children = kept;
            for child in dropped {
                self.node_mut(child)?.parent = None;
                self.free_slot(child);
            }
        }
        Ok(())
    }

    fn take_text(&mut self, id: NodeId) -> Result<String, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(text) => Ok(std::mem::take(text)),
            _ => Err(DomError::NotAContainer(id)),
        }
    }

    /// `child` may be placed under `parent`: both live, `parent` holds
    /// children, `child` is detached and not an ancestor of `parent`.
    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::NotAContainer(parent));
        }
        if self.node(child)?.parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        if child == self.root || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }
}
