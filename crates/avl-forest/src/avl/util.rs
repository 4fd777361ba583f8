//! AVL balancing engine.
//!
//! Balance factors are `height(right) - height(left)`. Insertion repairs the
//! tree with a recursive ascent ([`insert_fix`]); removal with an iterative
//! one ([`remove_fix`]) that stops early once a subtree's height is known to
//! be unchanged.

use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::arena::Arena;
use crate::bst::{self, get_l, get_p, get_r, set_l, set_p, set_r};
use crate::error::AvlError;
use crate::types::{KvNode, Node};

use super::types::AvlNodeLike;

#[inline]
fn bf<N: AvlNodeLike>(arena: &Arena<N>, i: u32) -> i8 {
    arena[i].bf()
}

#[inline]
fn set_bf<N: AvlNodeLike>(arena: &mut Arena<N>, i: u32, v: i8) {
    arena[i].set_bf(v);
}

#[inline]
fn update_bf<N: AvlNodeLike>(arena: &mut Arena<N>, i: u32, diff: i8) -> i8 {
    arena[i].update_bf(diff)
}

/// `-1` if `node` is a left child, `1` if a right child, `0` for the root.
#[inline]
fn side<N: Node>(arena: &Arena<N>, node: u32) -> i8 {
    match get_p(arena, node) {
        None => 0,
        Some(p) if get_l(arena, p) == Some(node) => -1,
        Some(_) => 1,
    }
}

/// Promotes `x.r` into `x`'s place. Balance factors are left to the caller.
///
/// Panics if `x` has no right child.
pub fn rotate_left<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) {
    let y = get_r(arena, x).expect("rotate_left requires a right child");
    let xp = get_p(arena, x);
    let yl = get_l(arena, y);

    set_r(arena, x, yl);
    if let Some(yl) = yl {
        set_p(arena, yl, Some(x));
    }
    set_p(arena, y, xp);
    bst::replace_child(arena, root, xp, x, Some(y));
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    trace!(node = x, pivot = y, "avl.rotate_left");
}

/// Promotes `x.l` into `x`'s place. Balance factors are left to the caller.
///
/// Panics if `x` has no left child.
pub fn rotate_right<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) {
    let y = get_l(arena, x).expect("rotate_right requires a left child");
    let xp = get_p(arena, x);
    let yr = get_r(arena, y);

    set_l(arena, x, yr);
    if let Some(yr) = yr {
        set_p(arena, yr, Some(x));
    }
    set_p(arena, y, xp);
    bst::replace_child(arena, root, xp, x, Some(y));
    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
    trace!(node = x, pivot = y, "avl.rotate_right");
}

/// Lifts the child of `node` on the `heavy` side (`-1` left, `1` right).
#[inline]
fn lift<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, node: u32, heavy: i8) {
    if heavy < 0 {
        rotate_right(arena, root, node);
    } else {
        rotate_left(arena, root, node);
    }
}

/// Final `(middle, top)` balances after a double rotation, given the
/// pre-rotation balance of the node that ends up on top (`pivot_bf`).
///
/// `heavy` is the side the top node leaned to; `middle` is the node that sat
/// between the two.
#[inline]
fn double_rotation_balances(heavy: i8, pivot_bf: i8) -> (i8, i8) {
    if pivot_bf == heavy {
        (0, -heavy)
    } else if pivot_bf == 0 {
        (0, 0)
    } else {
        (heavy, 0)
    }
}

/// Inserts `key`, or overwrites the value stored under it.
///
/// Returns the node handle and the replaced value, if any. An overwrite
/// changes nothing structurally.
pub fn insert<N>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    key: N::Key,
    value: N::Value,
) -> (u32, Option<N::Value>)
where
    N: AvlNodeLike,
    N::Key: Ord,
{
    let Some(mut curr) = *root else {
        let n = arena.alloc(N::leaf(key, value));
        *root = Some(n);
        return (n, None);
    };

    let left = loop {
        let next = match key.cmp(arena[curr].key()) {
            Ordering::Equal => {
                let old = std::mem::replace(arena[curr].value_mut(), value);
                return (curr, Some(old));
            }
            Ordering::Less => get_l(arena, curr).ok_or(true),
            Ordering::Greater => get_r(arena, curr).ok_or(false),
        };
        match next {
            Ok(n) => curr = n,
            Err(left) => break left,
        }
    };

    let n = arena.alloc(N::leaf(key, value));
    set_p(arena, n, Some(curr));
    let pbf = if left {
        set_l(arena, curr, Some(n));
        update_bf(arena, curr, -1)
    } else {
        set_r(arena, curr, Some(n));
        update_bf(arena, curr, 1)
    };

    // A parent that just became level did not grow.
    if pbf != 0 {
        insert_fix(arena, root, Some(curr), n);
    }
    (n, None)
}

/// Propagates a height increase of `parent` (whose taller side holds `child`)
/// toward the root, rotating at the first ancestor that tilts to ±2.
pub fn insert_fix<N: AvlNodeLike>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    parent: Option<u32>,
    child: u32,
) {
    let Some(parent) = parent else {
        return;
    };
    let Some(grandparent) = get_p(arena, parent) else {
        return;
    };

    let heavy = side(arena, parent);
    match update_bf(arena, grandparent, heavy) {
        0 => {}
        -1 | 1 => insert_fix(arena, root, Some(grandparent), parent),
        _ => {
            let child_side = if get_l(arena, parent) == Some(child) { -1 } else { 1 };
            if child_side == heavy {
                lift(arena, root, grandparent, heavy);
                set_bf(arena, parent, 0);
                set_bf(arena, grandparent, 0);
                trace!(node = grandparent, heavy, "avl.insert_fix.single");
            } else {
                lift(arena, root, parent, child_side);
                lift(arena, root, grandparent, heavy);
                let (pbf, gbf) = double_rotation_balances(heavy, bf(arena, child));
                set_bf(arena, parent, pbf);
                set_bf(arena, grandparent, gbf);
                set_bf(arena, child, 0);
                trace!(node = grandparent, heavy, pivot = child, "avl.insert_fix.double");
            }
        }
    }
}

/// Exchanges the positions of `a` and `b`, then their balance factors, so
/// each balance stays with the position it describes.
pub fn node_swap<N: AvlNodeLike>(arena: &mut Arena<N>, root: &mut Option<u32>, a: u32, b: u32) {
    bst::swap(arena, root, a, b);
    let (abf, bbf) = (bf(arena, a), bf(arena, b));
    set_bf(arena, a, bbf);
    set_bf(arena, b, abf);
}

/// In-order predecessor; `None` when `node` holds the smallest key.
pub fn predecessor<N: Node>(arena: &Arena<N>, node: u32) -> Option<u32> {
    bst::prev(arena, node)
}

/// Unlinks `node`, rebalances, and hands the released node back.
///
/// A node with two children first trades places with its in-order
/// predecessor, so the node actually spliced out has at most one child.
pub fn remove<N: AvlNodeLike>(arena: &mut Arena<N>, root: &mut Option<u32>, node: u32) -> N {
    if get_l(arena, node).is_some() && get_r(arena, node).is_some() {
        let pred = predecessor(arena, node).expect("node with a left child has a predecessor");
        node_swap(arena, root, node, pred);
    }

    let parent = get_p(arena, node);
    // Losing height on the left tips the parent right, and vice versa.
    let diff = -side(arena, node);
    let child = get_l(arena, node).or(get_r(arena, node));
    if let Some(c) = child {
        set_p(arena, c, parent);
    }
    bst::replace_child(arena, root, parent, node, child);
    let removed = arena.release(node);
    trace!(node, parent = ?parent, "avl.remove");

    remove_fix(arena, root, parent, diff);
    removed
}

/// Propagates a height decrease toward the root, starting at `node` whose
/// balance shifts by `diff`.
pub fn remove_fix<N: AvlNodeLike>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    mut node: Option<u32>,
    mut diff: i8,
) {
    while let Some(n) = node {
        let nbf = update_bf(arena, n, diff);
        match nbf {
            // Was level; the shorter side shrank but the height did not.
            -1 | 1 => break,
            0 => {
                diff = -side(arena, n);
                node = get_p(arena, n);
            }
            _ => {
                let heavy = nbf.signum();
                let child = if heavy < 0 { get_l(arena, n) } else { get_r(arena, n) };
                let child = child.expect("tilted node has a taller child");
                let cbf = bf(arena, child);

                if cbf != -heavy {
                    lift(arena, root, n, heavy);
                    if cbf == 0 {
                        set_bf(arena, n, heavy);
                        set_bf(arena, child, -heavy);
                        trace!(node = n, heavy, "avl.remove_fix.single_level");
                        break;
                    }
                    set_bf(arena, n, 0);
                    set_bf(arena, child, 0);
                    trace!(node = n, heavy, "avl.remove_fix.single");
                    diff = -side(arena, child);
                    node = get_p(arena, child);
                } else {
                    let grandchild =
                        if heavy < 0 { get_r(arena, child) } else { get_l(arena, child) };
                    let grandchild = grandchild.expect("inner-tilted child has an inner child");
                    let (cbf, nbf) = double_rotation_balances(heavy, bf(arena, grandchild));
                    lift(arena, root, child, -heavy);
                    lift(arena, root, n, heavy);
                    set_bf(arena, child, cbf);
                    set_bf(arena, n, nbf);
                    set_bf(arena, grandchild, 0);
                    trace!(node = n, heavy, pivot = grandchild, "avl.remove_fix.double");
                    diff = -side(arena, grandchild);
                    node = get_p(arena, grandchild);
                }
            }
        }
    }
}

/// Checks parent links, stored balance factors against real heights, the
/// AVL bound, strict key order, and that the arena holds no stray nodes.
pub fn assert_avl_tree<N>(arena: &Arena<N>, root: Option<u32>) -> Result<(), AvlError>
where
    N: AvlNodeLike,
    N::Key: Ord,
{
    let Some(root) = root else {
        return match arena.len() {
            0 => Ok(()),
            live => Err(AvlError::SizeMismatch { reachable: 0, live }),
        };
    };

    if get_p(arena, root).is_some() {
        return Err(AvlError::RootHasParent);
    }

    /// Returns the subtree height.
    fn validate<N: AvlNodeLike>(arena: &Arena<N>, node: u32) -> Result<usize, AvlError> {
        let mut heights = [0usize; 2];
        for (h, c) in heights.iter_mut().zip([get_l(arena, node), get_r(arena, node)]) {
            if let Some(c) = c {
                if get_p(arena, c) != Some(node) {
                    return Err(AvlError::BrokenParentLink { node: c });
                }
                *h = validate(arena, c)?;
            }
        }

        let [lh, rh] = heights;
        let expected = rh as i32 - lh as i32;
        let actual = bf(arena, node);
        if i32::from(actual) != expected {
            return Err(AvlError::BalanceMismatch {
                node,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(AvlError::Unbalanced { node, bf: actual });
        }
        Ok(1 + lh.max(rh))
    }

    validate(arena, root)?;

    let mut reachable = 0;
    let mut prev: Option<u32> = None;
    let mut curr = bst::first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(p) = prev {
            if arena[p].key() >= arena[i].key() {
                return Err(AvlError::OrderViolated { node: i });
            }
        }
        reachable += 1;
        prev = Some(i);
        curr = bst::next(arena, i);
    }

    if reachable != arena.len() {
        return Err(AvlError::SizeMismatch {
            reachable,
            live: arena.len(),
        });
    }
    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<N>(arena: &Arena<N>, node: Option<u32>, tab: &str) -> String
where
    N: AvlNodeLike,
    N::Key: Debug,
    N::Value: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i];
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
