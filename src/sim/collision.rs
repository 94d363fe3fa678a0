//! Circle overlap and playable-area bounds tests
//!
//! Every entity is treated as its bounding circle. These are pure functions;
//! callers decide what an overlap or an exit means.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PlayableArea;

/// Bounding circle of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True iff the circles overlap (touching edges do not count)
#[inline]
pub fn is_colliding(a: Circle, b: Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) < reach * reach
}

/// True once the circle has fully left the area across any one edge
///
/// Partial overlap with an edge is still in bounds.
pub fn is_out_of_bound(c: Circle, area: &PlayableArea) -> bool {
    let left = c.center.x + c.radius < area.left();
    let top = c.center.y + c.radius < area.top();
    let right = c.center.x - c.radius > area.right();
    let bottom = c.center.y - c.radius > area.bottom();
    left || top || right || bottom
}

/// Clamp a circle's center so the whole circle stays inside the area
///
/// Each edge is applied in turn (left, top, right, bottom), so an area smaller
/// than the circle pins it against the right/bottom edges.
pub fn contain(c: Circle, area: &PlayableArea) -> Vec2 {
    let mut pos = c.center;
    let left_bound = area.left() + c.radius;
    let top_bound = area.top() + c.radius;
    let right_bound = area.right() - c.radius;
    let bottom_bound = area.bottom() - c.radius;

    if pos.x < left_bound {
        pos.x = left_bound;
    }
    if pos.y < top_bound {
        pos.y = top_bound;
    }
    if pos.x > right_bound {
        pos.x = right_bound;
    }
    if pos.y > bottom_bound {
        pos.y = bottom_bound;
    }
    pos
}
