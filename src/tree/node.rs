use std::collections::BTreeMap;

use crate::foundation::ids::{Handle, NodeKey};
use crate::schema::value::Value;

/// Recorded stand-in for one native UI component instance.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) node_id: i32,
    pub(crate) kind: String,
    pub(crate) flags: u32,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) element_id: Option<String>,
    pub(crate) attributes: BTreeMap<String, Value>,
    // Live handle the caller holds for this node; `None` once finalized.
    pub(crate) handle: Option<Handle>,
    pub(crate) disposed: bool,
}

impl Node {
    pub(crate) fn new(node_id: i32, kind: String, flags: u32) -> Self {
        Self {
            node_id,
            kind,
            flags,
            children: Vec::new(),
            parent: None,
            element_id: None,
            attributes: BTreeMap::new(),
            handle: None,
            disposed: false,
        }
    }

    /// Structural id passed at construction.
    pub fn node_id(&self) -> i32 {
        self.node_id
    }

    /// Kind name resolved at construction.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Construction flags, recorded verbatim.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// External element id, if one was set.
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    /// Child keys in order.
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Parent key, if attached.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Decoded attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All decoded attributes, sorted by name.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Whether `disposeNode` has been called on this node.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
