//! Arena-backed AVL tree.
//!
//! Nodes are stored in an [`Arena`] owned by the tree and link to each other
//! with `Option<u32>` handles, parent included. Rebalancing rewires handles
//! and never moves a node out of its slot, so a node's handle is stable for
//! as long as its key stays in the tree.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits |
//! [`arena`] | slot storage with a free list |
//! [`bst`] | balance-agnostic traversal, lookup, heights, structural `swap` |
//! [`avl`] | [`AvlNode`], the balancing engine, [`AvlMap`], [`AvlSet`] |
//! [`equal_paths`] | leaf-depth checker for owned binary trees |
//! [`error`] | [`KeyError`], [`AvlError`] |
//!
//! Rebalancing emits `tracing` events at `TRACE` level (`avl.rotate_left`,
//! `avl.insert_fix.double`, `avl.remove_fix.single_level`, ...). The crate
//! never installs a subscriber.

pub mod arena;
pub mod avl;
pub mod bst;
pub mod equal_paths;
pub mod error;
pub mod types;

pub use arena::Arena;
pub use avl::{AvlMap, AvlNode, AvlSet};
pub use equal_paths::{equal_paths, BinaryNode};
pub use error::{AvlError, KeyError};
pub use types::{KvNode, Node};
