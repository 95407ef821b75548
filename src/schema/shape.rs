use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MockError, MockResult};

/// Wire layout of one attribute payload.
///
/// Shapes are plain data (loadable from JSON) so that attribute setters never need
/// to be written by hand: a setter is an attribute name plus a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One signed byte.
    Int8,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// One-byte boolean.
    Boolean,
    /// Length-prefixed string.
    String,
    /// Tagged int32/float32 number.
    Number,
    /// Runtime-type tag, then the inner shape unless absent.
    Optional(Box<Shape>),
    /// `int32` count, then that many inner values.
    Array(Box<Shape>),
    /// Fixed sequence of named fields.
    Record(Vec<Field>),
    /// Selector byte choosing one branch.
    Union(Vec<Shape>),
}

/// Named record field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in decoded records.
    pub name: String,
    /// Field layout.
    pub shape: Shape,
}

impl Field {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

impl Shape {
    /// Wraps `inner` in [`Shape::Optional`].
    pub fn optional(inner: Shape) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Wraps `inner` in [`Shape::Array`].
    pub fn array(inner: Shape) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Checks that every union is selectable with one byte and every record has at
    /// least one field, with unique, non-empty names.
    pub fn validate(&self) -> MockResult<()> {
        match self {
            Self::Int8
            | Self::Int32
            | Self::Int64
            | Self::Float32
            | Self::Boolean
            | Self::String
            | Self::Number => Ok(()),
            Self::Optional(inner) | Self::Array(inner) => inner.validate(),
            Self::Record(fields) => {
                if fields.is_empty() {
                    return Err(MockError::validation("record must have at least one field"));
                }
                let mut seen = BTreeSet::new();
                for f in fields {
                    if f.name.trim().is_empty() {
                        return Err(MockError::validation("record field name must be non-empty"));
                    }
                    if !seen.insert(f.name.as_str()) {
                        return Err(MockError::validation(format!(
                            "duplicate record field '{}'",
                            f.name
                        )));
                    }
                    f.shape.validate()?;
                }
                Ok(())
            }
            Self::Union(branches) => {
                if branches.is_empty() || branches.len() > i8::MAX as usize + 1 {
                    return Err(MockError::validation(format!(
                        "union must have 1..=128 branches, got {}",
                        branches.len()
                    )));
                }
                branches.iter().try_for_each(Shape::validate)
            }
        }
    }
}
