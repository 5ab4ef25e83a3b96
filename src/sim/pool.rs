//! Fixed-capacity entity pools
//!
//! Slots are allocated once and recycled through their `active` flag. A slot's
//! index is its identity for the lifetime of the pool; nothing is ever moved,
//! grown or freed.

use serde::{Deserialize, Serialize};

/// An entity that can live in a [`Pool`] slot
pub trait Poolable {
    /// Whether the slot currently holds a live entity
    fn is_active(&self) -> bool;

    /// Mark the slot free. Other fields are left stale.
    fn deactivate(&mut self);
}

/// Fixed-capacity sequence of reusable slots.
///
/// Deserializing takes the slot count from the input; `GameState` checks
/// each of its pools against the fixed capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool of `capacity` inactive slots built by `make_slot`
    pub fn new(capacity: usize, make_slot: impl FnMut() -> T) -> Self {
        let mut make_slot = make_slot;
        let slots = (0..capacity).map(|_| make_slot()).collect();
        Self { slots }
    }

    /// Index of the first inactive slot, or `None` when the pool is exhausted.
    ///
    /// The pool does not touch the slot; the caller must activate and fully
    /// initialize it.
    pub fn allocate(&self) -> Option<usize> {
        self.slots.iter().position(|slot| !slot.is_active())
    }

    /// Allocate and hand back the free slot for initialization
    pub fn allocate_mut(&mut self) -> Option<(usize, &mut T)> {
        let index = self.allocate()?;
        Some((index, &mut self.slots[index]))
    }

    /// Fixed number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Apply `f` to every slot, active or not
    pub fn for_each(&mut self, mut f: impl FnMut(usize, &mut T)) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            f(index, slot);
        }
    }

    /// Live slots with their indices, in index order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Live slots with their indices, in index order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Free every slot unconditionally
    pub fn deactivate_all(&mut self) {
        self.slots.iter_mut().for_each(Poolable::deactivate);
    }
}
