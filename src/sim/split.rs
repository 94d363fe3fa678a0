//! Splitter break-up into fragment targets

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Destruction;
use crate::polar_to_cartesian;

pub const MIN_FRAGMENTS: usize = 3;
pub const MAX_FRAGMENTS: usize = 6;

/// Position and velocity of a fragment to add next tick
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Scatter fragments from a lethally destroyed splitter
///
/// Fragments start at the parent's last position, head in random directions
/// and keep roughly the parent's speed (97% to 102%).
pub fn split<R: Rng>(parent: &Destruction, rng: &mut R) -> Vec<Fragment> {
    let count = MIN_FRAGMENTS + (rng.random::<f32>() * 3.0).round() as usize;
    let speed = parent.vel.length();
    let base_theta = parent.vel.y.atan2(parent.vel.x);

    (0..count)
        .map(|_| {
            let theta = base_theta + rng.random::<f32>() * TAU;
            let fragment_speed = speed * (0.97 + rng.random::<f32>() * 0.05);
            Fragment {
                pos: parent.pos,
                vel: polar_to_cartesian(fragment_speed, theta),
            }
        })
        .collect()
}
