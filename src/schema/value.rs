use crate::foundation::error::MockResult;
use crate::schema::shape::Shape;
use crate::wire::deserializer::Deserializer;

/// Decoded attribute payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Optional field that was not present on the wire.
    Absent,
    /// Any numeric payload that fits an `f64` exactly.
    Number(f64),
    /// 64-bit integer payload.
    BigInt(i64),
    /// UTF-8 text.
    String(String),
    /// Boolean flag.
    Boolean(bool),
    /// Record fields in schema order.
    Record(Vec<(String, Value)>),
    /// Homogeneous array.
    Array(Vec<Value>),
    /// Branch of a tagged union.
    Variant {
        /// Zero-based branch index read from the wire.
        selector: u8,
        /// Payload of the chosen branch.
        value: Box<Value>,
    },
}

impl Value {
    /// Whether this is [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Field lookup on a record value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// String payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// JSON rendering used by snapshots of attribute state and the CLI.
    ///
    /// Absent maps to `null`, records to objects and variants to
    /// `{"selector": n, "value": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{Map, Value as J};
        match self {
            Self::Absent => J::Null,
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(J::Null, J::Number),
            Self::BigInt(n) => J::from(*n),
            Self::String(s) => J::String(s.clone()),
            Self::Boolean(b) => J::Bool(*b),
            Self::Record(fields) => {
                let mut out = Map::new();
                for (name, v) in fields {
                    out.insert(name.clone(), v.to_json());
                }
                J::Object(out)
            }
            Self::Array(items) => J::Array(items.iter().map(Value::to_json).collect()),
            Self::Variant { selector, value } => {
                let mut out = Map::new();
                out.insert("selector".to_owned(), J::from(*selector));
                out.insert("value".to_owned(), value.to_json());
                J::Object(out)
            }
        }
    }
}

/// Decodes one value of `shape` at the cursor.
pub fn read_value(d: &mut Deserializer<'_>, shape: &Shape) -> MockResult<Value> {
    Ok(match shape {
        Shape::Int8 => Value::Number(f64::from(d.read_i8()?)),
        Shape::Int32 => Value::Number(f64::from(d.read_i32()?)),
        Shape::Int64 => Value::BigInt(d.read_i64()?),
        Shape::Float32 => Value::Number(f64::from(d.read_f32()?)),
        Shape::Boolean => Value::Boolean(d.read_bool()?),
        Shape::String => Value::String(d.read_string()?),
        Shape::Number => Value::Number(d.read_number()?),
        Shape::Optional(inner) => d
            .read_optional(|d| read_value(d, inner))?
            .unwrap_or(Value::Absent),
        Shape::Array(inner) => Value::Array(d.read_array(|d| read_value(d, inner))?),
        Shape::Record(fields) => {
            let mut out = Vec::with_capacity(fields.len());
            for f in fields {
                out.push((f.name.clone(), read_value(d, &f.shape)?));
            }
            Value::Record(out)
        }
        Shape::Union(branches) => d.read_union(branches.len(), |d, selector| {
            let value = read_value(d, &branches[selector as usize])?;
            Ok(Value::Variant {
                selector,
                value: Box::new(value),
            })
        })?,
    })
}

/// Decodes a whole payload holding exactly one value of `shape`.
pub fn decode_payload(bytes: &[u8], shape: &Shape) -> MockResult<Value> {
    let mut d = Deserializer::new(bytes);
    let v = read_value(&mut d, shape)?;
    d.finish()?;
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/schema/value.rs"]
mod tests;
