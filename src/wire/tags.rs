/// Runtime-type tag written in front of optional and dynamically typed values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum RuntimeType {
    /// Tag value the encoder never emits on purpose.
    Unexpected = -1,
    /// Numeric payload.
    Number = 1,
    /// String payload.
    String = 2,
    /// Record payload.
    Object = 3,
    /// Boolean payload.
    Boolean = 4,
    /// Absent optional; nothing follows.
    Undefined = 5,
    /// 64-bit integer payload.
    BigInt = 6,
    /// Callback resource payload.
    Function = 7,
    /// Symbol payload.
    Symbol = 8,
    /// Handle to a peer object.
    Materialized = 9,
}

impl RuntimeType {
    /// Maps a wire byte to its tag, if it names one.
    pub fn from_i8(raw: i8) -> Option<Self> {
        Some(match raw {
            -1 => Self::Unexpected,
            1 => Self::Number,
            2 => Self::String,
            3 => Self::Object,
            4 => Self::Boolean,
            5 => Self::Undefined,
            6 => Self::BigInt,
            7 => Self::Function,
            8 => Self::Symbol,
            9 => Self::Materialized,
            _ => return None,
        })
    }

    /// Wire byte for this tag.
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Value tags that prefix a tagged number.
pub(crate) mod number_tag {
    pub(crate) const INT32: u8 = 102;
    pub(crate) const FLOAT32: u8 = 103;
}
