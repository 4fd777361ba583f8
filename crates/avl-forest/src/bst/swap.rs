use crate::arena::Arena;
use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Exchanges the tree positions of `x` and `y`.
///
/// Each node takes over the other's parent and children, and every neighbor
/// is relinked to point at its new occupant. Keys, values and handles stay
/// with their nodes, so the in-order sequence changes unless the caller
/// restores it (for example by removing one of the two right away). Works for
/// adjacent nodes (parent/child) and for siblings.
pub fn swap<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32, y: u32) {
    if x == y {
        return;
    }

    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));

    // After the exchange a link that named one of the pair names the other.
    let flip = |h: Option<u32>| match h {
        Some(h) if h == x => Some(y),
        Some(h) if h == y => Some(x),
        other => other,
    };

    for c in [xl, xr].into_iter().flatten().filter(|&c| c != y) {
        set_p(arena, c, Some(y));
    }
    for c in [yl, yr].into_iter().flatten().filter(|&c| c != x) {
        set_p(arena, c, Some(x));
    }

    match (xp, yp) {
        (Some(p), Some(q)) if p == q => {
            let (l, r) = (get_l(arena, p), get_r(arena, p));
            set_l(arena, p, r);
            set_r(arena, p, l);
        }
        _ => {
            relink_parent(arena, root, xp, x, y);
            relink_parent(arena, root, yp, y, x);
        }
    }

    set_p(arena, x, flip(yp));
    set_l(arena, x, flip(yl));
    set_r(arena, x, flip(yr));
    set_p(arena, y, flip(xp));
    set_l(arena, y, flip(xl));
    set_r(arena, y, flip(xr));
}

/// Repoints `old`'s parent (or the root) at `new`, unless that parent is
/// `new` itself, which the flipped links already cover.
fn relink_parent<N: Node>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: u32,
) {
    match parent {
        None => *root = Some(new),
        Some(p) if p == new => {}
        Some(p) if get_l(arena, p) == Some(old) => set_l(arena, p, Some(new)),
        Some(p) => set_r(arena, p, Some(new)),
    }
}
