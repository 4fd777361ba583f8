//! Node trait definitions.
//!
//! Nodes never own each other. Every "pointer" is an `Option<u32>` handle into
//! the [`Arena`](crate::arena::Arena) that owns all nodes of one tree, so the
//! parent back-link is just another handle and no ownership cycle exists.

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/value node interface used by map-like structures.
pub trait KvNode: Node {
    type Key;
    type Value;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;

    /// Consumes a node that has been released from its arena.
    fn into_entry(self) -> (Self::Key, Self::Value);
}
