//! Generation-checked slot arena shared by the handle table and the node store.

use std::collections::BTreeSet;

use crate::foundation::ids::SlotKey;

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slots are recycled lowest-index-first; every removal bumps the slot's
/// generation so keys issued before the removal stop resolving.
#[derive(Debug)]
pub(crate) struct Slots<T> {
    entries: Vec<Slot<T>>,
    free: BTreeSet<u32>,
    live: usize,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slots<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: BTreeSet::new(),
            live: 0,
        }
    }

    /// Pushes `n` permanently empty slots that are never handed out.
    pub(crate) fn with_reserved(n: u32) -> Self {
        let mut out = Self::new();
        for _ in 0..n {
            out.entries.push(Slot {
                generation: 0,
                value: None,
            });
        }
        out
    }

    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        self.live += 1;
        if let Some(idx) = self.free.pop_first() {
            let slot = &mut self.entries[idx as usize];
            slot.value = Some(value);
            return SlotKey {
                idx,
                generation: slot.generation,
            };
        }

        let idx = self.entries.len() as u32;
        self.entries.push(Slot {
            generation: 0,
            value: Some(value),
        });
        SlotKey { idx, generation: 0 }
    }

    fn slot(&self, key: SlotKey) -> Option<&Slot<T>> {
        self.entries
            .get(key.idx as usize)
            .filter(|s| s.generation == key.generation)
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        self.slot(key).and_then(|s| s.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.entries
            .get_mut(key.idx as usize)
            .filter(|s| s.generation == key.generation)
            .and_then(|s| s.value.as_mut())
    }

    pub(crate) fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Removes the value behind `key`, returning it. Stale keys are ignored.
    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        let slot = self
            .entries
            .get_mut(key.idx as usize)
            .filter(|s| s.generation == key.generation)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.insert(key.idx);
        self.live -= 1;
        Some(value)
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever created, reserved ones included.
    pub(crate) fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> {
        self.entries.iter().enumerate().filter_map(|(idx, s)| {
            s.value.as_ref().map(|v| {
                (
                    SlotKey {
                        idx: idx as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handle/slots.rs"]
mod tests;
