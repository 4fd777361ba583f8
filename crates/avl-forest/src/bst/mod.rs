//! Plain binary-search-tree helpers.
//!
//! Everything here is balance-agnostic: traversal, lookup, heights and the
//! structural [`swap`] primitive work on any [`Node`] stored in an [`Arena`].
//! The AVL engine in [`crate::avl`] builds on these.

pub mod swap;

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::arena::Arena;
use crate::types::{KvNode, Node};

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &Arena<N>, idx: u32) -> Option<u32> {
    arena[idx].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut Arena<N>, idx: u32, v: Option<u32>) {
    arena[idx].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut Arena<N>, idx: u32, v: Option<u32>) {
    arena[idx].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut Arena<N>, idx: u32, v: Option<u32>) {
    arena[idx].set_r(v);
}

/// Points whatever referenced `old` from `parent` at `new` instead. With no
/// parent, `old` was the root and `new` becomes the root.
///
/// Only the downward link is written; the caller sets `new`'s parent.
pub(crate) fn replace_child<N: Node>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    match parent {
        None => *root = new,
        Some(p) if get_l(arena, p) == Some(old) => set_l(arena, p, new),
        Some(p) => set_r(arena, p, new),
    }
}

/// Leftmost node.
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node.
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &Arena<N>, node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
///
/// The rightmost node of the left subtree if there is one, otherwise the
/// nearest ancestor reached from its right side. `None` for the first node.
pub fn prev<N: Node>(arena: &Arena<N>, node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<N, Q>(arena: &Arena<N>, root: Option<u32>, key: &Q) -> Option<u32>
where
    N: KvNode,
    N::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match key.cmp(arena[i].key().borrow()) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
pub fn height<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + size(arena, get_l(arena, i)) + size(arena, get_r(arena, i))
    })
}

/// Whether every node's subtree heights differ by at most one.
///
/// Recomputes heights bottom-up and ignores any stored balance factors.
pub fn is_balanced<N: Node>(arena: &Arena<N>, root: Option<u32>) -> bool {
    fn checked_height<N: Node>(arena: &Arena<N>, node: Option<u32>) -> Option<usize> {
        let Some(i) = node else {
            return Some(0);
        };
        let lh = checked_height(arena, get_l(arena, i))?;
        let rh = checked_height(arena, get_r(arena, i))?;
        (lh.abs_diff(rh) <= 1).then(|| 1 + lh.max(rh))
    }

    checked_height(arena, root).is_some()
}
