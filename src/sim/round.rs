//! Round clock and score accounting

use serde::{Deserialize, Serialize};

use super::state::{Destruction, TargetKind};
use crate::consts::{TICK_RATE, TIME_LIMIT_SECS};

/// Round lifecycle. There is no paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Active,
    /// Clock ran out; the field is frozen until the reset completes
    Expired,
}

/// Round timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub time_limit_secs: u32,
    /// Host animation callbacks per second
    pub tick_rate: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: TIME_LIMIT_SECS,
            tick_rate: TICK_RATE,
        }
    }
}

/// Countdown of remaining ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    remaining: i64,
    tick_rate: u32,
}

impl RoundClock {
    pub fn new(config: &RoundConfig) -> Self {
        let tick_rate = config.tick_rate.max(1);
        Self {
            remaining: i64::from(config.time_limit_secs) * i64::from(tick_rate),
            tick_rate,
        }
    }

    #[inline]
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Round is over once the countdown goes negative
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining < 0
    }

    /// Whole seconds left (rounded up)
    pub fn seconds_left(&self) -> u32 {
        let rate = i64::from(self.tick_rate);
        ((self.remaining.max(0) + rate - 1) / rate) as u32
    }

    /// Consume one tick.
    ///
    /// Returns the seconds to show on the time label when a whole second
    /// boundary is crossed.
    pub fn advance(&mut self) -> Option<u32> {
        let rate = i64::from(self.tick_rate);
        let label = (self.remaining >= 0 && self.remaining % rate == 0)
            .then(|| (self.remaining / rate) as u32);
        self.remaining -= 1;
        label
    }

    /// Force the remaining tick count (debug/testing)
    pub fn set_remaining(&mut self, remaining: i64) {
        self.remaining = remaining;
    }
}

/// Running score for the current round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorekeeper {
    score: u64,
}

impl Scorekeeper {
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Award a kind's points
    pub fn award(&mut self, kind: TargetKind) -> u64 {
        self.score += kind.points();
        self.score
    }

    /// Fold a destruction into the score. Returns the new score if it changed.
    pub fn apply(&mut self, destruction: &Destruction) -> Option<u64> {
        destruction.lethal.then(|| self.award(destruction.kind))
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// Score bar time text
pub fn time_label(seconds: u32) -> String {
    format!("TIME : {}", seconds)
}

/// Score bar score text
pub fn score_label(score: u64) -> String {
    format!("SCORE : {}", score)
}
