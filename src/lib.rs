//! Target Gallery - an arcade shooting gallery driven by an analog sensor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (reticle, targets, spawning, round state)
//! - `platform`: Transport/HTTP boundary glue (sample decoding, data log, routes)
//! - `highscores`: In-memory leaderboard
//! - `settings`: Runtime configuration

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, ScoreEntry};
pub use settings::{RouteLogging, Settings, StaleInput};
pub use sim::InputMode;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal host animation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Round duration in seconds
    pub const TIME_LIMIT_SECS: u32 = 180;

    /// Height of the score bar strip at the top of the viewport
    pub const SCOREBAR_HEIGHT: f32 = 40.0;

    /// Input mapping
    pub const INPUT_DEADZONE: f32 = 0.05;
    pub const INPUT_SENSITIVITY: f32 = 16.0;
    pub const INPUT_DUAL_ZONE_THRESHOLD: f32 = 0.8;

    /// Reticle defaults
    pub const RETICLE_RADIUS: f32 = 20.0;
    pub const RETICLE_POWER: i32 = 1;
    pub const RETICLE_COLOR: u32 = 0xB1EAD0;
    /// Ticks between two registered hits
    pub const SHOOT_COOLDOWN: u32 = 15;

    /// Spawning
    pub const MAX_TARGET_SPEED: f32 = 12.0;
    pub const MIN_SPAWN_COOLDOWN: i32 = 60;
    pub const MAX_SPAWN_COOLDOWN: i32 = 120;

    /// Hit effect lifetime (8 animation frames at 0.4 frames per tick)
    pub const HIT_EFFECT_TICKS: u32 = 20;
}

/// Linear rescale of a point from one viewport extent to another
#[inline]
pub fn rescale(pos: Vec2, old_extent: Vec2, new_extent: Vec2) -> Vec2 {
    Vec2::new(
        pos.x / old_extent.x * new_extent.x,
        pos.y / old_extent.y * new_extent.y,
    )
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
