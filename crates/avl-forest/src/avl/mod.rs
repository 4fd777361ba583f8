//! AVL tree: balanced node, balancing engine, map and set.

pub mod map;
pub mod set;
pub mod types;
pub mod util;

pub use map::{AvlMap, Iter};
pub use set::AvlSet;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, insert, insert_fix, node_swap, predecessor, print, remove, remove_fix,
    rotate_left, rotate_right,
};
