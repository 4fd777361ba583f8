//! Leaf-depth checker for plain binary trees.

/// Binary tree node owning its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryNode<T> {
    pub key: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    pub fn leaf(key: T) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn new(key: T, left: Option<BinaryNode<T>>, right: Option<BinaryNode<T>>) -> Self {
        Self {
            key,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Whether every leaf under `root` sits at the same depth. An empty tree
/// qualifies.
pub fn equal_paths<T>(root: Option<&BinaryNode<T>>) -> bool {
    fn check<T>(node: Option<&BinaryNode<T>>, depth: usize, leaf_depth: &mut Option<usize>) -> bool {
        let Some(node) = node else {
            return true;
        };
        if node.is_leaf() {
            return *leaf_depth.get_or_insert(depth) == depth;
        }
        check(node.left.as_deref(), depth + 1, leaf_depth)
            && check(node.right.as_deref(), depth + 1, leaf_depth)
    }

    check(root, 0, &mut None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_equal_paths() {
        assert!(equal_paths::<i32>(None));
    }

    #[test]
    fn single_node_has_equal_paths() {
        assert!(equal_paths(Some(&BinaryNode::leaf(1))));
    }

    #[test]
    fn two_leaves_at_depth_one() {
        let root = BinaryNode::new(2, Some(BinaryNode::leaf(1)), Some(BinaryNode::leaf(3)));
        assert!(equal_paths(Some(&root)));
    }

    #[test]
    fn leaves_at_depth_one_and_two() {
        let root = BinaryNode::new(
            2,
            Some(BinaryNode::new(1, Some(BinaryNode::leaf(0)), None)),
            Some(BinaryNode::leaf(3)),
        );
        assert!(!equal_paths(Some(&root)));
    }

    #[test]
    fn one_sided_chain_has_a_single_leaf() {
        let root = BinaryNode::new(
            1,
            None,
            Some(BinaryNode::new(2, None, Some(BinaryNode::leaf(3)))),
        );
        assert!(equal_paths(Some(&root)));
    }
}
