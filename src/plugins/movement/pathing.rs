//! One-step lookahead blocking.
//!
//! Answers "would moving one step this way newly overlap something", never
//! "is there an overlap now". Entities react locally each tick; no route is
//! stored.

use crate::common::geometry::{Bounds, MoveBox};

/// Which cardinal directions are free. `up` is towards smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDirections {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl Default for OpenDirections {
    fn default() -> Self {
        Self { up: true, right: true, down: true, left: true }
    }
}

impl OpenDirections {
    /// Is a step with the given sign open on x? Zero is always open.
    pub fn allows_x(&self, direction: f32) -> bool {
        if direction > 0.0 {
            self.right
        } else if direction < 0.0 {
            self.left
        } else {
            true
        }
    }

    /// Is a step with the given sign open on y? Zero is always open.
    pub fn allows_y(&self, direction: f32) -> bool {
        if direction > 0.0 {
            self.down
        } else if direction < 0.0 {
            self.up
        } else {
            true
        }
    }
}

/// Half-open span alignment: `a` starts at-or-before `b` and reaches past its
/// start, or starts inside `b`.
#[inline]
fn spans_align(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> bool {
    (a_start <= b_start && a_end > b_start) || (a_start > b_start && a_start < b_end)
}

/// Compute open directions for `source` (identified by `id`) among `peers`.
///
/// `speed` is the step length; its sign is ignored. Peers with the same id as
/// the source are skipped.
pub fn resolve<K: PartialEq>(
    arena: &MoveBox,
    id: &K,
    source: Bounds,
    peers: &[(K, Bounds)],
    speed: f32,
) -> OpenDirections {
    let step = speed.abs();
    let mut open = OpenDirections::default();

    for (peer_id, peer) in peers {
        if peer_id == id {
            continue;
        }

        let horizontal = spans_align(source.left(), source.right(), peer.left(), peer.right());
        let vertical = spans_align(source.top(), source.bottom(), peer.top(), peer.bottom());

        if vertical && !horizontal {
            if spans_align(source.left() + step, source.right() + step, peer.left(), peer.right()) {
                open.right = false;
            }
            if spans_align(source.left() - step, source.right() - step, peer.left(), peer.right()) {
                open.left = false;
            }
        }

        if horizontal && !vertical {
            if spans_align(source.top() + step, source.bottom() + step, peer.top(), peer.bottom()) {
                open.down = false;
            }
            if spans_align(source.top() - step, source.bottom() - step, peer.top(), peer.bottom()) {
                open.up = false;
            }
        }
    }

    if source.top() - step < arena.min_y {
        open.up = false;
    }
    if source.bottom() + step > arena.max_y {
        open.down = false;
    }
    if source.left() - step < arena.min_x {
        open.left = false;
    }
    if source.right() + step > arena.max_x {
        open.right = false;
    }

    open
}
