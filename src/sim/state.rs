//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; the tick loop receives it
//! by mutable reference and nothing is kept in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, contain, is_colliding, is_out_of_bound};
use super::input::{InputMode, map_input};
use super::round::{RoundClock, RoundConfig, RoundPhase, Scorekeeper};
use super::spawn::spawn_cooldown;
use crate::consts::*;
use crate::rescale;

/// Viewport rectangle below the score bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayableArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayableArea {
    /// Playable area for a viewport of the given size
    pub fn from_viewport(viewport: Vec2) -> Self {
        Self {
            x: 0.0,
            y: SCOREBAR_HEIGHT,
            width: viewport.x,
            height: (viewport.y - SCOREBAR_HEIGHT).max(0.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Simple,
    Small,
    /// Fragment left behind by a destroyed splitter; never spawned directly
    Split,
    Splitter,
}

impl TargetKind {
    pub fn radius(&self) -> f32 {
        match self {
            TargetKind::Simple => 30.0,
            TargetKind::Small => 15.0,
            TargetKind::Split => 20.0,
            TargetKind::Splitter => 40.0,
        }
    }

    pub fn max_hp(&self) -> i32 {
        match self {
            TargetKind::Simple => 3,
            TargetKind::Small | TargetKind::Split => 2,
            TargetKind::Splitter => 5,
        }
    }

    /// Points awarded when destroyed by the reticle
    pub fn points(&self) -> u64 {
        match self {
            TargetKind::Simple => 3,
            TargetKind::Small | TargetKind::Split => 2,
            TargetKind::Splitter => 5,
        }
    }

    /// Fill color (0xRRGGBB) for the presentation layer
    pub fn color(&self) -> u32 {
        match self {
            TargetKind::Simple => 0x0000FF,
            TargetKind::Small | TargetKind::Split => 0xFFFF00,
            TargetKind::Splitter => 0xFF0000,
        }
    }
}

/// The player's aiming circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left before another hit can register
    pub cooldown: u32,
    /// Damage dealt per registered hit
    pub power: i32,
}

impl Reticle {
    /// Fresh reticle for a round, placed at the viewport center
    pub fn spawn(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::new(viewport.x / 2.0, viewport.y / 2.0 - SCOREBAR_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            radius: RETICLE_RADIUS,
            cooldown: 0,
            power: RETICLE_POWER,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Steer from the latest analog sample, integrate and keep inside the area
    pub fn update(&mut self, axis: Vec2, mode: InputMode, area: &PlayableArea) {
        self.vel = map_input(axis, mode);
        self.pos += self.vel;
        self.pos = contain(self.circle(), area);
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

/// A moving target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: i32,
    /// Set while overlapping the reticle
    pub highlighted: bool,
}

/// Outcome of a single target update
#[derive(Debug, Clone, PartialEq)]
pub enum TargetStep {
    /// Still live, nothing registered
    Live,
    /// Still live; the reticle registered a hit at this position
    Hit(Vec2),
    /// Must be removed from the live set
    Destroyed(Destruction),
}

impl Target {
    pub fn new(id: u32, kind: TargetKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            radius: kind.radius(),
            hp: kind.max_hp(),
            highlighted: false,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Advance one tick against the reticle
    pub fn update(&mut self, reticle: &mut Reticle, area: &PlayableArea) -> TargetStep {
        self.pos += self.vel;

        if self.hp <= 0 || is_out_of_bound(self.circle(), area) {
            return TargetStep::Destroyed(Destruction {
                id: self.id,
                kind: self.kind,
                pos: self.pos,
                vel: self.vel,
                lethal: self.hp <= 0,
            });
        }

        if is_colliding(self.circle(), reticle.circle()) {
            self.highlighted = true;
            if reticle.cooldown == 0 {
                self.hp -= reticle.power;
                reticle.cooldown = SHOOT_COOLDOWN;
                return TargetStep::Hit(reticle.pos);
            }
        } else {
            self.highlighted = false;
        }
        TargetStep::Live
    }
}

/// A target leaving the live set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destruction {
    pub id: u32,
    pub kind: TargetKind,
    /// Last position (fragments spawn here)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Destroyed by damage rather than by leaving the area
    pub lethal: bool,
}

/// Transient hit marker kept so it can follow resizes and be cleared on reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitEffect {
    pub pos: Vec2,
    /// Ticks since the hit
    pub age: u32,
}

/// Events emitted by the simulation for the presentation and transport layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Reticle registered a hit
    Hit { pos: Vec2 },
    TargetSpawned { id: u32, kind: TargetKind },
    TargetDestroyed { id: u32, kind: TargetKind, lethal: bool },
    ScoreChanged { score: u64 },
    /// Whole seconds left; emitted once per second of round time
    TimeLabel { seconds: u32 },
    /// Round clock expired, reported before the reset
    RoundOver { final_score: u64 },
    RoundStarted { round: u32 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: RoundConfig,
    /// Velocity mapping applied to the reticle
    pub input_mode: InputMode,
    /// Viewport size in pixels (score bar included)
    pub viewport: Vec2,
    pub area: PlayableArea,
    pub phase: RoundPhase,
    pub clock: RoundClock,
    pub score: Scorekeeper,
    /// Ticks until the next spawn attempt
    pub spawn_timer: i32,
    pub reticle: Reticle,
    /// Live targets (in spawn order)
    pub targets: Vec<Target>,
    pub effects: Vec<HitEffect>,
    /// Simulation tick counter (across rounds)
    pub time_ticks: u64,
    /// 1-based index of the current round
    pub round: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the default round configuration
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self::with_config(seed, viewport, RoundConfig::default())
    }

    pub fn with_config(seed: u64, viewport: Vec2, config: RoundConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_timer = spawn_cooldown(&mut rng);
        Self {
            seed,
            rng,
            config,
            input_mode: InputMode::default(),
            viewport,
            area: PlayableArea::from_viewport(viewport),
            phase: RoundPhase::Active,
            clock: RoundClock::new(&config),
            score: Scorekeeper::default(),
            spawn_timer,
            reticle: Reticle::spawn(viewport),
            targets: Vec::new(),
            effects: Vec::new(),
            time_ticks: 0,
            round: 1,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a target to the live set, returning its id
    pub fn add_target(&mut self, kind: TargetKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target::new(id, kind, pos, vel));
        id
    }

    /// Clear the field and start a fresh round
    pub fn reset_round(&mut self) {
        self.targets.clear();
        self.effects.clear();
        self.score.reset();
        self.reticle = Reticle::spawn(self.viewport);
        self.clock = RoundClock::new(&self.config);
        self.spawn_timer = spawn_cooldown(&mut self.rng);
        self.phase = RoundPhase::Active;
        self.round += 1;
    }

    /// Resize the viewport, keeping every entity at the same relative position
    pub fn resize(&mut self, viewport: Vec2) {
        let old = self.viewport;
        if old.x <= 0.0 || old.y <= 0.0 {
            log::warn!("Ignoring rescale from degenerate viewport {:?}", old);
        } else {
            self.reticle.pos = rescale(self.reticle.pos, old, viewport);
            for target in &mut self.targets {
                target.pos = rescale(target.pos, old, viewport);
            }
            for effect in &mut self.effects {
                effect.pos = rescale(effect.pos, old, viewport);
            }
        }
        self.viewport = viewport;
        self.area = PlayableArea::from_viewport(viewport);
        log::debug!("Viewport {:?} -> {:?}", old, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlayableArea {
        PlayableArea::from_viewport(Vec2::new(800.0, 640.0))
    }

    #[test]
    fn test_playable_area_excludes_scorebar() {
        let area = area();
        assert_eq!(area.top(), SCOREBAR_HEIGHT);
        assert_eq!(area.bottom(), 640.0);
        assert_eq!(area.left(), 0.0);
        assert_eq!(area.right(), 800.0);
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(TargetKind::Simple.radius(), 30.0);
        assert_eq!(TargetKind::Small.max_hp(), 2);
        assert_eq!(TargetKind::Split.radius(), 20.0);
        assert_eq!(TargetKind::Split.points(), 2);
        assert_eq!(TargetKind::Splitter.points(), 5);
    }

    #[test]
    fn test_reticle_cooldown_floors_at_zero() {
        let mut reticle = Reticle::spawn(Vec2::new(800.0, 640.0));
        reticle.cooldown = 1;
        reticle.update(Vec2::ZERO, InputMode::DualZone, &area());
        assert_eq!(reticle.cooldown, 0);
        reticle.update(Vec2::ZERO, InputMode::DualZone, &area());
        assert_eq!(reticle.cooldown, 0);
    }

    #[test]
    fn test_target_hit_sets_cooldown_and_highlight() {
        let mut reticle = Reticle::spawn(Vec2::new(800.0, 640.0));
        let mut target = Target::new(1, TargetKind::Simple, reticle.pos, Vec2::ZERO);

        let step = target.update(&mut reticle, &area());
        assert_eq!(step, TargetStep::Hit(reticle.pos));
        assert!(target.highlighted);
        assert_eq!(target.hp, 2);
        assert_eq!(reticle.cooldown, SHOOT_COOLDOWN);

        // Still overlapping, but the reticle is cooling down
        let step = target.update(&mut reticle, &area());
        assert_eq!(step, TargetStep::Live);
        assert!(target.highlighted);
        assert_eq!(target.hp, 2);
    }

    #[test]
    fn test_target_unhighlights_when_clear() {
        let mut reticle = Reticle::spawn(Vec2::new(800.0, 640.0));
        let mut target = Target::new(1, TargetKind::Small, Vec2::new(100.0, 100.0), Vec2::ZERO);
        target.highlighted = true;
        assert_eq!(target.update(&mut reticle, &area()), TargetStep::Live);
        assert!(!target.highlighted);
    }

    #[test]
    fn test_out_of_bound_is_not_lethal() {
        let mut reticle = Reticle::spawn(Vec2::new(800.0, 640.0));
        let mut target = Target::new(7, TargetKind::Small, Vec2::new(-14.0, 300.0), Vec2::new(-2.0, 0.0));
        match target.update(&mut reticle, &area()) {
            TargetStep::Destroyed(d) => {
                assert_eq!(d.id, 7);
                assert!(!d.lethal);
            }
            other => panic!("expected destruction, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_hp_is_lethal() {
        let mut reticle = Reticle::spawn(Vec2::new(800.0, 640.0));
        let mut target = Target::new(3, TargetKind::Splitter, Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0));
        target.hp = 0;
        match target.update(&mut reticle, &area()) {
            TargetStep::Destroyed(d) => {
                assert!(d.lethal);
                assert_eq!(d.pos, Vec2::new(401.0, 300.0));
            }
            other => panic!("expected destruction, got {:?}", other),
        }
    }

    #[test]
    fn test_resize_rescales_entities() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.reticle.pos = Vec2::new(200.0, 300.0);
        state.add_target(TargetKind::Simple, Vec2::new(400.0, 150.0), Vec2::ZERO);
        state.effects.push(HitEffect { pos: Vec2::new(80.0, 60.0), age: 0 });

        state.resize(Vec2::new(1600.0, 300.0));

        assert_eq!(state.reticle.pos, Vec2::new(400.0, 150.0));
        assert_eq!(state.targets[0].pos, Vec2::new(800.0, 75.0));
        assert_eq!(state.effects[0].pos, Vec2::new(160.0, 30.0));
        assert_eq!(state.area, PlayableArea::from_viewport(Vec2::new(1600.0, 300.0)));
    }

    #[test]
    fn test_reset_round_clears_field() {
        let mut state = GameState::new(5, Vec2::new(800.0, 600.0));
        state.add_target(TargetKind::Small, Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.effects.push(HitEffect { pos: Vec2::ZERO, age: 3 });
        state.score.award(TargetKind::Simple);
        state.reticle.cooldown = 9;

        state.reset_round();

        assert!(state.targets.is_empty());
        assert!(state.effects.is_empty());
        assert_eq!(state.score.score(), 0);
        assert_eq!(state.reticle.cooldown, 0);
        assert_eq!(state.clock.remaining(), RoundClock::new(&state.config).remaining());
        assert!((MIN_SPAWN_COOLDOWN..=MAX_SPAWN_COOLDOWN).contains(&state.spawn_timer));
        assert_eq!(state.round, 2);
    }
}
