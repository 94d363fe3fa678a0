//! Simulation step
//!
//! One call per host animation callback. Order within a tick: round clock,
//! spawn timer, reticle, targets, then hit effects.

use glam::Vec2;

use super::spawn::{plan_spawn, spawn_cooldown};
use super::split::split;
use super::state::{Destruction, GameEvent, GameState, HitEffect, TargetKind, TargetStep};
use crate::consts::HIT_EFFECT_TICKS;
use crate::sim::RoundPhase;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Latest analog sample, in simulation axes
    pub axis: Vec2,
}

impl TickInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            axis: Vec2::new(x, y),
        }
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.clock.is_expired() {
        state.phase = RoundPhase::Expired;
        let final_score = state.score.score();
        log::info!("Round {} over, final score {}", state.round, final_score);
        events.push(GameEvent::RoundOver { final_score });

        state.reset_round();
        log::debug!("Round {} started", state.round);
        events.push(GameEvent::RoundStarted { round: state.round });
        return events;
    }

    state.time_ticks += 1;

    if let Some(seconds) = state.clock.advance() {
        events.push(GameEvent::TimeLabel { seconds });
    }

    if state.spawn_timer <= 0 {
        match plan_spawn(&state.area, &mut state.rng) {
            Some(plan) => {
                let id = state.add_target(plan.kind, plan.pos, plan.vel);
                log::debug!("Spawned {:?} #{} at {:?} vel {:?}", plan.kind, id, plan.pos, plan.vel);
                events.push(GameEvent::TargetSpawned { id, kind: plan.kind });
            }
            None => log::debug!("Spawn roll selected no target"),
        }
        state.spawn_timer = spawn_cooldown(&mut state.rng);
    } else {
        state.spawn_timer -= 1;
    }

    state.reticle.update(input.axis, state.input_mode, &state.area);

    // Removals are collected during the pass; fragments join after it
    let mut destroyed: Vec<Destruction> = Vec::new();
    {
        let reticle = &mut state.reticle;
        let area = &state.area;
        let effects = &mut state.effects;
        state.targets.retain_mut(|target| match target.update(reticle, area) {
            TargetStep::Live => true,
            TargetStep::Hit(pos) => {
                effects.push(HitEffect { pos, age: 0 });
                events.push(GameEvent::Hit { pos });
                true
            }
            TargetStep::Destroyed(destruction) => {
                destroyed.push(destruction);
                false
            }
        });
    }

    let mut fragments = Vec::new();
    for destruction in &destroyed {
        events.push(GameEvent::TargetDestroyed {
            id: destruction.id,
            kind: destruction.kind,
            lethal: destruction.lethal,
        });
        if let Some(score) = state.score.apply(destruction) {
            events.push(GameEvent::ScoreChanged { score });
        }
        if destruction.lethal && destruction.kind == TargetKind::Splitter {
            fragments.extend(split(destruction, &mut state.rng));
        }
    }
    for fragment in fragments {
        let id = state.add_target(TargetKind::Split, fragment.pos, fragment.vel);
        events.push(GameEvent::TargetSpawned {
            id,
            kind: TargetKind::Split,
        });
    }

    for effect in &mut state.effects {
        effect.age += 1;
    }
    state.effects.retain(|e| e.age < HIT_EFFECT_TICKS);

    events
}
