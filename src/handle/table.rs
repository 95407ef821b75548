use std::any::Any;
use std::fmt;

use crate::foundation::ids::{Handle, SlotKey};
use crate::handle::slots::Slots;

/// Marker object stored at [`Handle::FINALIZER`].
///
/// Invoking it through [`HandleTable::invoke_finalizer`] releases the target handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseFinalizer;

/// Opaque integer-to-object indirection emulating native pointers.
///
/// Slot 0 is permanently empty and slot 1 permanently holds [`ReleaseFinalizer`].
/// Every other slot is handed out by [`allocate`](Self::allocate) and returned by
/// [`release`](Self::release). All lookups fail soft.
pub struct HandleTable {
    slots: Slots<Box<dyn Any>>,
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("live", &self.live_count())
            .field("slots", &self.slots.capacity())
            .finish()
    }
}

impl HandleTable {
    /// Creates a table holding only the reserved entries.
    pub fn new() -> Self {
        let mut slots: Slots<Box<dyn Any>> = Slots::with_reserved(1);
        let key = slots.insert(Box::new(ReleaseFinalizer));
        debug_assert_eq!(Handle::from(key), Handle::FINALIZER);
        Self { slots }
    }

    /// Boxes `object` into the lowest free slot and returns its handle.
    ///
    /// Never returns [`Handle::NULL`] or [`Handle::FINALIZER`].
    pub fn allocate<T: Any>(&mut self, object: T) -> Handle {
        let h = Handle::from(self.slots.insert(Box::new(object)));
        tracing::trace!(handle = ?h, ty = std::any::type_name::<T>(), "allocate");
        h
    }

    /// Like [`allocate`](Self::allocate) but maps an absent object to [`Handle::NULL`]
    /// without touching the pool.
    pub fn allocate_opt<T: Any>(&mut self, object: Option<T>) -> Handle {
        match object {
            Some(o) => self.allocate(o),
            None => Handle::NULL,
        }
    }

    /// Object behind `handle` if it is live and of type `T`.
    pub fn resolve<T: Any>(&self, handle: Handle) -> Option<&T> {
        if handle.is_null() {
            return None;
        }
        self.slots
            .get(SlotKey::from(handle))
            .and_then(|b| b.downcast_ref::<T>())
    }

    /// Mutable counterpart of [`resolve`](Self::resolve).
    pub fn resolve_mut<T: Any>(&mut self, handle: Handle) -> Option<&mut T> {
        if handle.is_null() {
            return None;
        }
        self.slots
            .get_mut(SlotKey::from(handle))
            .and_then(|b| b.downcast_mut::<T>())
    }

    /// Whether `handle` currently names a live entry.
    pub fn is_live(&self, handle: Handle) -> bool {
        !handle.is_null() && self.slots.contains(SlotKey::from(handle))
    }

    /// Frees the slot behind `handle`, returning the boxed object.
    ///
    /// The reserved slots, stale handles and out-of-range handles are ignored.
    pub fn release(&mut self, handle: Handle) -> Option<Box<dyn Any>> {
        if handle.index() <= Handle::FINALIZER.index() {
            tracing::debug!(handle = ?handle, "ignoring release of reserved handle");
            return None;
        }
        let released = self.slots.remove(SlotKey::from(handle));
        if released.is_none() {
            tracing::debug!(handle = ?handle, "release of dead handle");
        }
        released
    }

    /// Handle of the release finalizer.
    pub fn finalizer(&self) -> Handle {
        Handle::FINALIZER
    }

    /// Runs the finalizer stored at `finalizer` against `target`.
    ///
    /// Returns the released object when `finalizer` names the release finalizer
    /// and `target` was live.
    pub fn invoke_finalizer(&mut self, finalizer: Handle, target: Handle) -> Option<Box<dyn Any>> {
        if self.resolve::<ReleaseFinalizer>(finalizer).is_none() {
            tracing::warn!(finalizer = ?finalizer, "handle is not a finalizer");
            return None;
        }
        self.release(target)
    }

    /// Number of live entries, the finalizer included.
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handle/table.rs"]
mod tests;
