use std::any::Any;
use std::fmt;

use crate::capture::snapshot::StructureSnapshot;
use crate::foundation::error::{MockError, MockResult};
use crate::foundation::ids::{Handle, NodeKey};
use crate::handle::table::HandleTable;
use crate::recorder::kinds::{KindResolver, KindTable};
use crate::schema::attributes::AttributeSchema;
use crate::schema::shape::Shape;
use crate::schema::value::{Value, decode_payload};
use crate::tree::node::Node;
use crate::tree::store::{NodeStore, Placement};

/// Construction options for a [`Recorder`].
pub struct RecorderOpts {
    /// Resolves wire kind ids to kind names.
    pub kinds: Box<dyn KindResolver>,
    /// Kind name that marks a node as the tree root.
    pub root_kind: String,
    /// Shapes used by [`Recorder::set_attribute`].
    pub schema: AttributeSchema,
}

impl Default for RecorderOpts {
    fn default() -> Self {
        Self {
            kinds: Box::new(KindTable::builtin()),
            root_kind: "Root".to_owned(),
            schema: AttributeSchema::default(),
        }
    }
}

impl fmt::Debug for RecorderOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecorderOpts")
            .field("root_kind", &self.root_kind)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Recording session: owns the handle table, the node tree and the kind lookup.
///
/// Every boundary call of the mocked native interface is a method here. Handles
/// that do not resolve are soft misses; structural and decode failures are
/// returned as errors and leave the recorded state untouched.
pub struct Recorder {
    pub(crate) handles: HandleTable,
    pub(crate) nodes: NodeStore,
    kinds: Box<dyn KindResolver>,
    root_kind: String,
    schema: AttributeSchema,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RecorderOpts::default())
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("handles", &self.handles)
            .field("nodes", &self.nodes.len())
            .field("root_kind", &self.root_kind)
            .finish_non_exhaustive()
    }
}

impl Recorder {
    /// Fresh session with only the reserved handles allocated.
    pub fn new(opts: RecorderOpts) -> Self {
        Self {
            handles: HandleTable::new(),
            nodes: NodeStore::new(),
            kinds: opts.kinds,
            root_kind: opts.root_kind,
            schema: opts.schema,
        }
    }

    /// Session using `kinds` and default options otherwise.
    pub fn with_kinds(kinds: impl KindResolver + 'static) -> Self {
        Self::new(RecorderOpts {
            kinds: Box::new(kinds),
            ..RecorderOpts::default()
        })
    }

    /// Read-only view of the handle table.
    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    /// Read-only view of the node tree.
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Attribute schema used by [`set_attribute`](Self::set_attribute).
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Boxes an arbitrary object behind a new handle.
    pub fn allocate<T: Any>(&mut self, object: T) -> Handle {
        self.handles.allocate(object)
    }

    /// Object behind `handle`, if live and of type `T`.
    pub fn resolve<T: Any>(&self, handle: Handle) -> Option<&T> {
        self.handles.resolve(handle)
    }

    fn key(&self, handle: Handle) -> Option<NodeKey> {
        self.handles.resolve::<NodeKey>(handle).copied()
    }

    fn node_pair(&self, parent: Handle, child: Handle) -> Option<(NodeKey, NodeKey)> {
        let pair = self.key(parent).zip(self.key(child));
        if pair.is_none() {
            tracing::debug!(?parent, ?child, "node handle did not resolve");
        }
        pair
    }

    /// Node record behind `handle`.
    pub fn node(&self, handle: Handle) -> Option<&Node> {
        self.key(handle).and_then(|k| self.nodes.get(k))
    }

    /// Creates a node and returns its handle.
    ///
    /// A node whose kind resolves to the root kind becomes the tree root.
    pub fn create_node(&mut self, kind_id: i32, node_id: i32, flags: u32) -> Handle {
        let kind = self.kinds.kind_name(kind_id).unwrap_or_else(|| {
            tracing::debug!(kind_id, "unknown kind id");
            format!("Unknown({kind_id})")
        });
        let is_root = kind == self.root_kind;
        let key = self.nodes.create(node_id, kind, flags, is_root);
        let handle = self.handles.allocate(key);
        self.nodes.set_handle(key, Some(handle));
        handle
    }

    /// Appends `child` to `parent`.
    pub fn add_child(&mut self, parent: Handle, child: Handle) -> MockResult<()> {
        let Some((p, c)) = self.node_pair(parent, child) else {
            return Ok(());
        };
        self.nodes.add_child(p, c)
    }

    /// Removes `child` from `parent` if it is there.
    pub fn remove_child(&mut self, parent: Handle, child: Handle) {
        if let Some((p, c)) = self.node_pair(parent, child) {
            self.nodes.remove_child(p, c);
        }
    }

    /// Splices `child` right after `sibling`, or appends when `sibling` is null.
    pub fn insert_after(&mut self, parent: Handle, child: Handle, sibling: Handle) -> MockResult<()> {
        self.insert_relative(parent, child, sibling, Placement::After)
    }

    /// Splices `child` right before `sibling`, or appends when `sibling` is null.
    pub fn insert_before(&mut self, parent: Handle, child: Handle, sibling: Handle) -> MockResult<()> {
        self.insert_relative(parent, child, sibling, Placement::Before)
    }

    fn insert_relative(
        &mut self,
        parent: Handle,
        child: Handle,
        sibling: Handle,
        placement: Placement,
    ) -> MockResult<()> {
        if sibling.is_null() {
            return self.add_child(parent, child);
        }
        let Some((p, c)) = self.node_pair(parent, child) else {
            return Ok(());
        };
        let Some(s) = self.key(sibling) else {
            return Err(MockError::structural("sibling not found"));
        };
        self.nodes.insert_relative(p, c, s, placement)
    }

    /// Splices `child` at `index` among `parent`'s children.
    pub fn insert_at(&mut self, parent: Handle, child: Handle, index: i32) -> MockResult<()> {
        let Some((p, c)) = self.node_pair(parent, child) else {
            return Ok(());
        };
        self.nodes.insert_at(p, c, index)
    }

    /// Drops the node's element-id registration. Children are not touched.
    pub fn dispose_node(&mut self, node: Handle) {
        match self.key(node) {
            Some(k) => {
                self.nodes.dispose(k);
            }
            None => tracing::debug!(?node, "dispose of unknown node"),
        }
    }

    /// Sets or clears the node's external element id.
    pub fn set_element_id(&mut self, node: Handle, id: Option<&str>) {
        if let Some(k) = self.key(node) {
            self.nodes.set_element_id(k, id);
        }
    }

    /// Live handle of the node registered under `id`, or [`Handle::NULL`].
    pub fn find_by_element_id(&self, id: &str) -> Handle {
        self.nodes
            .find_by_element_id(id)
            .and_then(|k| self.nodes.get(k))
            .and_then(|n| n.handle)
            .unwrap_or(Handle::NULL)
    }

    /// Handles of the node's children; finalized children show as null.
    pub fn children(&self, node: Handle) -> Vec<Handle> {
        let Some(n) = self.node(node) else {
            return Vec::new();
        };
        n.children()
            .iter()
            .map(|&c| {
                self.nodes
                    .get(c)
                    .and_then(|n| n.handle)
                    .unwrap_or(Handle::NULL)
            })
            .collect()
    }

    /// Handle of the node's parent, or [`Handle::NULL`].
    pub fn parent(&self, node: Handle) -> Handle {
        self.node(node)
            .and_then(Node::parent)
            .and_then(|p| self.nodes.get(p))
            .and_then(|p| p.handle)
            .unwrap_or(Handle::NULL)
    }

    /// Decodes `bytes` as `shape` and stores the value under `name` on the node.
    ///
    /// The whole payload must be consumed. On a decode error the node keeps its
    /// previous value.
    #[tracing::instrument(skip(self, shape, bytes), fields(len = bytes.len()))]
    pub fn apply_attribute(
        &mut self,
        node: Handle,
        name: &str,
        shape: &Shape,
        bytes: &[u8],
    ) -> MockResult<()> {
        let Some(key) = self.key(node) else {
            tracing::debug!("attribute on unknown node");
            return Ok(());
        };
        let value = decode_payload(bytes, shape)?;
        if let Some(n) = self.nodes.get_mut(key) {
            n.attributes.insert(name.to_owned(), value);
        }
        Ok(())
    }

    /// Like [`apply_attribute`](Self::apply_attribute) with the shape looked up in
    /// the session's [`AttributeSchema`] by the node's kind.
    pub fn set_attribute(&mut self, node: Handle, name: &str, bytes: &[u8]) -> MockResult<()> {
        let Some(n) = self.node(node) else {
            tracing::debug!(?node, name, "attribute on unknown node");
            return Ok(());
        };
        let Some(shape) = self.schema.lookup(n.kind(), name).cloned() else {
            return Err(MockError::validation(format!(
                "no attribute '{name}' for kind '{}'",
                n.kind()
            )));
        };
        self.apply_attribute(node, name, &shape, bytes)
    }

    /// Last value stored under `name` on the node.
    pub fn attribute(&self, node: Handle, name: &str) -> Option<&Value> {
        self.node(node).and_then(|n| n.attribute(name))
    }

    /// Snapshot of the tree as a value.
    pub fn snapshot(&self) -> MockResult<StructureSnapshot> {
        StructureSnapshot::capture(&self.nodes)
    }

    /// Serializes the tree and returns a handle to the JSON string.
    ///
    /// Read it back with [`string_length`](Self::string_length) and
    /// [`string_data`](Self::string_data), then release it.
    #[tracing::instrument(skip(self))]
    pub fn capture_structure(&mut self) -> MockResult<Handle> {
        let snapshot = self.snapshot()?;
        let json = snapshot.to_json_string()?;
        tracing::debug!(
            elements = snapshot.element_count(),
            bytes = json.len(),
            "captured structure"
        );
        Ok(self.handles.allocate(json))
    }

    /// Handle of the release finalizer.
    pub fn finalizer(&self) -> Handle {
        self.handles.finalizer()
    }

    /// Runs `finalizer` on `target`, updating node ownership when `target` was a
    /// node handle.
    pub fn invoke_finalizer(&mut self, finalizer: Handle, target: Handle) {
        let Some(released) = self.handles.invoke_finalizer(finalizer, target) else {
            return;
        };
        if let Ok(key) = released.downcast::<NodeKey>() {
            self.nodes.handle_released(*key, target);
        }
    }

    /// Releases `target` through the release finalizer.
    pub fn release(&mut self, target: Handle) {
        self.invoke_finalizer(Handle::FINALIZER, target);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recorder/session.rs"]
mod tests;
