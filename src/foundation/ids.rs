use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque integer standing in for a native pointer.
///
/// The low 32 bits select a slot in the [`HandleTable`](crate::HandleTable), the
/// high 32 bits carry the slot's generation so a released handle never resolves
/// to whatever object later reuses its slot. The reserved slots never change
/// generation, so [`Handle::NULL`] and [`Handle::FINALIZER`] are exactly `0` and `1`
/// on the wire.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
    /// "No value".
    pub const NULL: Handle = Handle(0);
    /// Slot holding the release finalizer.
    pub const FINALIZER: Handle = Handle(1);

    pub(crate) const fn from_parts(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Reinterpret a raw wire integer as a handle.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw wire integer.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Whether this is [`Handle::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Handle(null)");
        }
        write!(f, "Handle({}@gen{})", self.index(), self.generation())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key into a [`Slots`](crate::handle::slots::Slots) arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SlotKey {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl fmt::Debug for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotKey({}@gen{})", self.idx, self.generation)
    }
}

impl From<SlotKey> for Handle {
    fn from(key: SlotKey) -> Self {
        Handle::from_parts(key.idx, key.generation)
    }
}

impl From<Handle> for SlotKey {
    fn from(h: Handle) -> Self {
        SlotKey {
            idx: h.index(),
            generation: h.generation(),
        }
    }
}

/// Arena key of a node record inside the [`NodeStore`](crate::NodeStore).
///
/// Node handles box one of these; two handles refer to the same node exactly
/// when they resolve to equal keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) SlotKey);
