//! Slot storage for tree nodes.

use std::ops::{Index, IndexMut};

/// Owns every node of one tree.
///
/// Handles are `u32` slot indices. A handle stays valid until its node is
/// [`release`](Arena::release)d; freed slots are recycled by later
/// [`alloc`](Arena::alloc) calls.
#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<u32>,
    len: usize,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alloc(&mut self, node: N) -> u32 {
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Some(node);
            return idx;
        }
        self.slots.push(Some(node));
        (self.slots.len() - 1) as u32
    }

    /// Takes the node out of its slot. The node must already be unlinked.
    pub fn release(&mut self, idx: u32) -> N {
        let node = self.slots[idx as usize]
            .take()
            .expect("release of a vacant arena slot");
        self.free.push(idx);
        self.len -= 1;
        node
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    fn index(&self, idx: u32) -> &N {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.get_mut(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.release(a), "a");
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(arena[c], "c");
        assert_eq!(arena[b], "b");
    }

    #[test]
    #[should_panic(expected = "vacant arena slot")]
    fn indexing_a_vacant_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.release(a);
        let _value: i32 = arena[a];
    }
}
