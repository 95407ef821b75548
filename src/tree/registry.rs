use std::collections::HashMap;

use crate::foundation::ids::NodeKey;

/// Side index from external element id to node. Lookup only, never ownership.
#[derive(Debug, Default)]
pub(crate) struct NodeRegistry {
    by_id: HashMap<String, NodeKey>,
}

impl NodeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Points `id` at `key`, returning the node that previously held it.
    pub(crate) fn register(&mut self, id: &str, key: NodeKey) -> Option<NodeKey> {
        self.by_id.insert(id.to_owned(), key).filter(|prev| *prev != key)
    }

    /// Drops `id` if it still points at `key`.
    pub(crate) fn unregister(&mut self, id: &str, key: NodeKey) -> bool {
        if self.by_id.get(id) == Some(&key) {
            self.by_id.remove(id);
            return true;
        }
        false
    }

    pub(crate) fn get(&self, id: &str) -> Option<NodeKey> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}
