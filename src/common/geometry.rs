//! Arena-space geometry.
//!
//! Arena coordinates put the origin at the top-left of the design area with `y`
//! growing downwards. A position is the top-left corner of an entity's bounding
//! box, and the box extends by the entity's `VisualSize`.

use bevy::prelude::*;

/// Current top-left corner of an entity (or action sprite) in arena coordinates.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct ArenaPosition(pub Vec2);

/// Visual bounding size, as reported by whatever draws the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct VisualSize(pub Vec2);

/// Axis-aligned rectangle an entity's bounding box may travel in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl MoveBox {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// The whole design area.
    pub fn field(size: Vec2) -> Self {
        Self::new(0.0, size.x, 0.0, size.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A positioned, sized box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True once the box lies completely outside `field` on either axis.
    pub fn leaves(&self, field: &MoveBox) -> bool {
        self.left() > field.max_x
            || self.right() < field.min_x
            || self.top() > field.max_y
            || self.bottom() < field.min_y
    }
}

/// Axis-aligned overlap test. Boxes that merely touch do not overlap.
pub fn boxes_overlap(a: Bounds, b: Bounds) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Scale a status bar of `bar_width` pixels to `current / full`.
///
/// `current` is clamped to `[0, full]` before scaling and the result is never
/// negative. A non-positive `full` yields an empty bar.
pub fn bar_width(bar_width: f32, current: f32, full: f32) -> f32 {
    if !(full > 0.0) {
        return 0.0;
    }

    let current = current.clamp(0.0, full);
    let width = bar_width / full * current;

    width.max(0.0)
}
