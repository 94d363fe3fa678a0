//! Sensor samples arriving from the push channel
//!
//! Samples carry `x`, `y`, `z` as strings or numbers. Anything that does not
//! parse becomes 0. The controller is mounted rotated, so the simulation's x/y
//! are the transport's y/x.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::settings::StaleInput;
use crate::sim::TickInput;

/// One decoded sample, in transport axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub x: f32,
    pub y: f32,
    /// Decoded but unused by the simulation
    pub z: f32,
}

impl SensorSample {
    /// Decode a push-channel payload; malformed input yields zeros
    pub fn from_json(payload: &str) -> Self {
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::debug!("Unparsable sample {:?}: {}", payload, e);
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            x: axis_value(value.get("x")),
            y: axis_value(value.get("y")),
            z: axis_value(value.get("z")),
        }
    }

    /// Simulation axes (transport x/y swapped)
    pub fn axis(&self) -> Vec2 {
        Vec2::new(self.y, self.x)
    }
}

fn axis_value(field: Option<&Value>) -> f32 {
    let parsed = match field {
        Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
        Some(Value::String(s)) => parse_leading_float(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse the longest numeric prefix of a string ("0.42g" -> 0.42)
pub fn parse_leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (1..=end).rev().find_map(|len| s[..len].parse::<f32>().ok())
}

/// Single-slot holder for the most recent sample
///
/// Writes overwrite unread samples; the simulation reads once per tick.
#[derive(Debug, Clone, Default)]
pub struct LatestInput {
    sample: SensorSample,
    /// Ticks read since the last write
    age: u32,
    received: u64,
    policy: StaleInput,
}

impl LatestInput {
    pub fn new(policy: StaleInput) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Store a sample the moment it arrives
    pub fn store(&mut self, sample: SensorSample) {
        self.sample = sample;
        self.age = 0;
        self.received += 1;
    }

    /// Number of samples written so far
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn latest(&self) -> SensorSample {
        self.sample
    }

    /// Snapshot for the next simulation tick
    pub fn read_for_tick(&mut self) -> TickInput {
        let age = self.age;
        self.age = self.age.saturating_add(1);
        match self.policy {
            StaleInput::ZeroAfter { ticks } if age >= ticks => {
                if age == ticks {
                    log::debug!("Input stale after {} ticks, centering", ticks);
                }
                TickInput::default()
            }
            _ => TickInput {
                axis: self.sample.axis(),
            },
        }
    }
}
