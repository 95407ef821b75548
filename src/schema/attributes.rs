use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MockError, MockResult};
use crate::schema::shape::Shape;

/// Attribute setter table: attribute name to payload shape, per node kind.
///
/// Lookups try the kind-specific table first and fall back to `common`, which
/// holds attributes every kind accepts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    /// Attributes shared by all kinds.
    #[serde(default)]
    pub common: BTreeMap<String, Shape>,
    /// Kind name to its own attributes.
    #[serde(default)]
    pub kinds: BTreeMap<String, BTreeMap<String, Shape>>,
}

impl AttributeSchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema from JSON and validates every shape.
    pub fn from_json(s: &str) -> MockResult<Self> {
        let schema: Self = serde_json::from_str(s)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Adds an attribute accepted by every kind.
    pub fn with_common(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.common.insert(name.into(), shape);
        self
    }

    /// Adds an attribute accepted by `kind` only.
    pub fn with_kind_attr(
        mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        shape: Shape,
    ) -> Self {
        self.kinds
            .entry(kind.into())
            .or_default()
            .insert(name.into(), shape);
        self
    }

    /// Shape for `name` on a node of `kind`.
    pub fn lookup(&self, kind: &str, name: &str) -> Option<&Shape> {
        self.kinds
            .get(kind)
            .and_then(|attrs| attrs.get(name))
            .or_else(|| self.common.get(name))
    }

    /// Validates every shape in the table.
    pub fn validate(&self) -> MockResult<()> {
        let all = self
            .common
            .iter()
            .map(|(n, s)| ("*", n, s))
            .chain(self.kinds.iter().flat_map(|(k, attrs)| {
                attrs.iter().map(move |(n, s)| (k.as_str(), n, s))
            }));
        for (kind, name, shape) in all {
            if name.trim().is_empty() {
                return Err(MockError::validation(format!(
                    "attribute name for kind '{kind}' must be non-empty"
                )));
            }
            shape.validate().map_err(|e| {
                MockError::validation(format!("attribute '{kind}.{name}': {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/attributes.rs"]
mod tests;
