//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per host animation tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or transport dependencies

pub mod collision;
pub mod input;
pub mod round;
pub mod spawn;
pub mod split;
pub mod state;
pub mod tick;

pub use collision::{Circle, contain, is_colliding, is_out_of_bound};
pub use input::{InputMode, map_input};
pub use round::{RoundClock, RoundConfig, RoundPhase, Scorekeeper, score_label, time_label};
pub use spawn::{SPAWN_TABLE, SpawnPlan, kind_for_roll, plan_spawn, spawn_cooldown};
pub use split::{Fragment, split};
pub use state::{
    Destruction, GameEvent, GameState, HitEffect, PlayableArea, Reticle, Target, TargetKind,
    TargetStep,
};
pub use tick::{TickInput, tick};
