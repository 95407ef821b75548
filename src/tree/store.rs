//! Arena-backed mock scene tree.
//!
//! Nodes are addressed by [`NodeKey`]; the recorder maps caller handles onto keys
//! before calling in here. A node record stays in the arena while either its
//! caller handle is live, it is attached to a parent, or it is the root. Once none
//! of those hold the record is dropped and its children are detached, which may
//! drop them in turn.

use crate::foundation::error::{MockError, MockResult};
use crate::foundation::ids::{Handle, NodeKey};
use crate::handle::slots::Slots;
use crate::tree::node::Node;
use crate::tree::registry::NodeRegistry;

/// Where [`NodeStore::insert_relative`] places the child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Before,
    After,
}

/// Tree of recorded nodes plus the element-id registry.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Slots<Node>,
    root: Option<NodeKey>,
    registry: NodeRegistry,
}

impl NodeStore {
    /// Empty store with no root.
    pub fn new() -> Self {
        Self {
            nodes: Slots::new(),
            root: None,
            registry: NodeRegistry::new(),
        }
    }

    pub(crate) fn create(&mut self, node_id: i32, kind: String, flags: u32, is_root: bool) -> NodeKey {
        let key = NodeKey(self.nodes.insert(Node::new(node_id, kind, flags)));
        if is_root && let Some(prev) = self.root.replace(key) {
            tracing::warn!(?prev, new = ?key, "replacing tree root");
            self.collect(prev);
        }
        key
    }

    /// Node record behind `key`.
    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key.0)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key.0)
    }

    /// Current root, if one was created and not replaced.
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Number of node records held, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node records are held.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Number of live element-id registrations.
    pub fn registered_ids(&self) -> usize {
        self.registry.len()
    }

    /// Iterates all node records in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter().map(|(k, n)| (NodeKey(k), n))
    }

    pub(crate) fn set_handle(&mut self, key: NodeKey, handle: Option<Handle>) {
        if let Some(n) = self.get_mut(key) {
            n.handle = handle;
        }
    }

    fn both_live(&self, parent: NodeKey, child: NodeKey) -> bool {
        self.nodes.contains(parent.0) && self.nodes.contains(child.0)
    }

    fn ensure_attachable(&self, parent: NodeKey, child: NodeKey) -> MockResult<()> {
        if parent == child {
            return Err(MockError::structural("node cannot be its own child"));
        }
        let mut cur = self.get(parent).and_then(Node::parent);
        while let Some(k) = cur {
            if k == child {
                return Err(MockError::structural(
                    "attaching a node under its own descendant would create a cycle",
                ));
            }
            cur = self.get(k).and_then(Node::parent);
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeKey) {
        let Some(parent) = self.get(child).and_then(Node::parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
    }

    // `index` must already be validated against the parent's children.
    fn attach_at(&mut self, parent: NodeKey, child: NodeKey, index: usize) {
        if let Some(p) = self.get_mut(parent) {
            p.children.insert(index, child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn child_position(&self, parent: NodeKey, child: NodeKey) -> Option<usize> {
        self.get(parent)?.children.iter().position(|&c| c == child)
    }

    /// Appends `child` to `parent`, moving it out of any previous parent.
    pub(crate) fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> MockResult<()> {
        if !self.both_live(parent, child) {
            tracing::debug!(?parent, ?child, "add_child on dead node");
            return Ok(());
        }
        self.ensure_attachable(parent, child)?;
        self.detach(child);
        let end = self.get(parent).map_or(0, |p| p.children.len());
        self.attach_at(parent, child, end);
        Ok(())
    }

    /// Removes `child` from `parent`; returns whether it was there.
    pub(crate) fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        let Some(pos) = self.child_position(parent, child) else {
            tracing::debug!(?parent, ?child, "remove_child: not a child");
            return false;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.remove(pos);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
        self.collect(child);
        true
    }

    /// Splices `child` next to `sibling` inside `parent`.
    ///
    /// Fails without touching the tree when `sibling` is not currently one of
    /// `parent`'s children.
    pub(crate) fn insert_relative(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        sibling: NodeKey,
        placement: Placement,
    ) -> MockResult<()> {
        if !self.both_live(parent, child) {
            tracing::debug!(?parent, ?child, "insert on dead node");
            return Ok(());
        }
        self.ensure_attachable(parent, child)?;
        if sibling == child {
            return Err(MockError::structural(
                "node cannot be inserted relative to itself",
            ));
        }
        let Some(mut pos) = self.child_position(parent, sibling) else {
            return Err(MockError::structural("sibling not found"));
        };
        if self
            .child_position(parent, child)
            .is_some_and(|c| c < pos)
        {
            pos -= 1;
        }

        self.detach(child);
        let at = match placement {
            Placement::Before => pos,
            Placement::After => pos + 1,
        };
        self.attach_at(parent, child, at);
        Ok(())
    }

    /// Splices `child` at `index` inside `parent`.
    ///
    /// The valid range is `0..=len`, where `len` excludes `child` itself if it is
    /// already one of `parent`'s children.
    pub(crate) fn insert_at(&mut self, parent: NodeKey, child: NodeKey, index: i32) -> MockResult<()> {
        if !self.both_live(parent, child) {
            tracing::debug!(?parent, ?child, "insert_at on dead node");
            return Ok(());
        }
        self.ensure_attachable(parent, child)?;

        let mut len = self.get(parent).map_or(0, |p| p.children.len());
        if self.get(child).and_then(Node::parent) == Some(parent) {
            len -= 1;
        }
        let at = usize::try_from(index)
            .ok()
            .filter(|&i| i <= len)
            .ok_or_else(|| {
                MockError::structural(format!("insert index {index} out of range 0..={len}"))
            })?;

        self.detach(child);
        self.attach_at(parent, child, at);
        Ok(())
    }

    /// Marks `key` disposed and drops its element-id registration.
    ///
    /// Children are left alone; each must be disposed by its own call.
    pub(crate) fn dispose(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.get_mut(key.0) else {
            return false;
        };
        node.disposed = true;
        if let Some(id) = node.element_id.as_deref() {
            self.registry.unregister(id, key);
        }
        true
    }

    /// Sets or clears the external element id of `key`.
    pub(crate) fn set_element_id(&mut self, key: NodeKey, id: Option<&str>) {
        let Some(node) = self.nodes.get_mut(key.0) else {
            return;
        };
        let old = std::mem::replace(&mut node.element_id, id.map(str::to_owned));
        let disposed = node.disposed;
        if let Some(old) = old.as_deref() {
            self.registry.unregister(old, key);
        }
        if let Some(id) = id
            && !disposed
            && let Some(prev) = self.registry.register(id, key)
        {
            tracing::debug!(id, ?prev, new = ?key, "element id moved to another node");
        }
    }

    /// Node registered under `id`.
    pub fn find_by_element_id(&self, id: &str) -> Option<NodeKey> {
        self.registry.get(id)
    }

    /// Called when `released`, a handle boxing `key`, is finalized.
    ///
    /// Only the node's own handle gives up ownership; releasing another handle
    /// that happens to box the same key leaves the node alone.
    pub(crate) fn handle_released(&mut self, key: NodeKey, released: Handle) {
        match self.get(key) {
            Some(n) if n.handle == Some(released) => {}
            Some(_) => {
                tracing::debug!(?key, ?released, "released handle does not own node");
                return;
            }
            None => return,
        }
        self.set_handle(key, None);
        self.collect(key);
    }

    // Drops every record reachable from `key` that is no longer owned.
    fn collect(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            let Some(n) = self.get(k) else {
                continue;
            };
            if n.handle.is_some() || n.parent.is_some() || self.root == Some(k) {
                continue;
            }
            let Some(node) = self.nodes.remove(k.0) else {
                continue;
            };
            if let Some(id) = node.element_id.as_deref() {
                self.registry.unregister(id, k);
            }
            for c in node.children {
                if let Some(child) = self.get_mut(c) {
                    child.parent = None;
                }
                stack.push(c);
            }
            tracing::trace!(key = ?k, "dropped node record");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/store.rs"]
mod tests;
