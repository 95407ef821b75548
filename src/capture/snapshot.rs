use serde::{Deserialize, Serialize};

use crate::foundation::error::{MockError, MockResult};
use crate::foundation::ids::NodeKey;
use crate::tree::store::NodeStore;

/// Deepest chain of elements [`StructureSnapshot::capture`] will walk.
///
/// Capture and serialization recurse once per level, so deeper trees are
/// rejected with a structural error instead of exhausting the stack.
pub const MAX_CAPTURE_DEPTH: usize = 512;

/// Portable copy of the recorded tree, as returned by `captureStructure`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSnapshot {
    /// Root element, or `None` when no root has been created.
    pub root_element: Option<ElementSnapshot>,
}

/// One node in a [`StructureSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Structural id passed at construction.
    pub node_id: i32,
    /// Kind name.
    pub kind: String,
    /// Children in order.
    pub children: Vec<ElementSnapshot>,
    /// External element id.
    pub element_id: Option<String>,
}

impl StructureSnapshot {
    /// Walks `store` from its root.
    ///
    /// Fails when the tree is deeper than [`MAX_CAPTURE_DEPTH`].
    pub fn capture(store: &NodeStore) -> MockResult<Self> {
        let root_element = match store.root() {
            Some(k) => element(store, k, 1)?,
            None => None,
        };
        Ok(Self { root_element })
    }

    /// Compact JSON form, stable for identical trees.
    pub fn to_json_string(&self) -> MockResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON snapshot. serde_json's default nesting limit applies.
    pub fn from_json_str(s: &str) -> MockResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Number of elements in the snapshot.
    pub fn element_count(&self) -> usize {
        fn count(e: &ElementSnapshot) -> usize {
            1 + e.children.iter().map(count).sum::<usize>()
        }
        self.root_element.as_ref().map_or(0, count)
    }
}

fn element(store: &NodeStore, key: NodeKey, depth: usize) -> MockResult<Option<ElementSnapshot>> {
    if depth > MAX_CAPTURE_DEPTH {
        return Err(MockError::structural(format!(
            "tree deeper than {MAX_CAPTURE_DEPTH} levels cannot be captured"
        )));
    }
    let Some(node) = store.get(key) else {
        return Ok(None);
    };
    let mut children = Vec::with_capacity(node.children().len());
    for &c in node.children() {
        if let Some(e) = element(store, c, depth + 1)? {
            children.push(e);
        }
    }
    Ok(Some(ElementSnapshot {
        node_id: node.node_id(),
        kind: node.kind().to_owned(),
        children,
        element_id: node.element_id().map(str::to_owned),
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/capture/snapshot.rs"]
mod tests;
