use thiserror::Error;

/// Strict lookup of a key that is not in the tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("key not found")]
pub struct KeyError;

/// Structural defect reported by [`assert_avl_tree`](crate::avl::assert_avl_tree).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    #[error("root has a parent")]
    RootHasParent,
    #[error("broken parent link at node {node}")]
    BrokenParentLink { node: u32 },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i32, actual: i8 },
    #[error("AVL balance violated at node {node} (bf={bf})")]
    Unbalanced { node: u32, bf: i8 },
    #[error("node order violated at node {node}")]
    OrderViolated { node: u32 },
    #[error("tree holds {reachable} nodes but the arena holds {live}")]
    SizeMismatch { reachable: usize, live: usize },
}
