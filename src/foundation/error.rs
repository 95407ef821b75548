/// Convenience result type used across mockui.
pub type MockResult<T> = Result<T, MockError>;

/// Top-level error taxonomy for recorder calls.
///
/// Soft misses (stale handles, absent children) never show up here; they are
/// absorbed where they are detected and only logged.
#[derive(thiserror::Error, Debug)]
pub enum MockError {
    /// Invalid caller-provided data (schemas, scripts, kind tables).
    #[error("validation error: {0}")]
    Validation(String),

    /// A tree mutation referenced a sibling or position that does not exist.
    #[error("structural error: {0}")]
    Structural(String),

    /// A wire payload could not be decoded.
    #[error("decode error at byte {offset}: {message}")]
    Decode {
        /// Cursor position where decoding stopped.
        offset: usize,
        /// Human-readable reason.
        message: String,
    },

    /// A string could not be copied out across the boundary.
    #[error("marshal error: {0}")]
    Marshal(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockError {
    /// Build a [`MockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MockError::Structural`] value.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    /// Build a [`MockError::Decode`] value.
    pub fn decode(offset: usize, msg: impl Into<String>) -> Self {
        Self::Decode {
            offset,
            message: msg.into(),
        }
    }

    /// Build a [`MockError::Marshal`] value.
    pub fn marshal(msg: impl Into<String>) -> Self {
        Self::Marshal(msg.into())
    }

    /// Build a [`MockError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error came from the decode protocol.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Whether this error came from a tree mutation.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
