//! Analog input to reticle velocity mapping
//!
//! The sensor delivers a 2-axis vector with components nominally in [-1, 1].
//! Below the deadzone the reticle stands still; above it one of three response
//! curves turns deflection into a per-tick velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Response curve used to map deflection to velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Per-axis exponential curve (fine control near center)
    Exponential,
    /// Proportional with a fixed 1.125 gain
    Linear,
    /// Proportional, with a 1.25 boost once past the outer zone threshold
    #[default]
    DualZone,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Exponential => "exponential",
            InputMode::Linear => "linear",
            InputMode::DualZone => "dual-zone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exponential" | "exp" => Some(InputMode::Exponential),
            "linear" => Some(InputMode::Linear),
            "dual-zone" | "dual_zone" | "dualzone" => Some(InputMode::DualZone),
            _ => None,
        }
    }
}

/// Map an analog sample to a reticle velocity (units per tick)
pub fn map_input(axis: Vec2, mode: InputMode) -> Vec2 {
    let magnitude = axis.length();
    if magnitude < INPUT_DEADZONE {
        return Vec2::ZERO;
    }

    match mode {
        InputMode::Exponential => {
            let base = (INPUT_SENSITIVITY * 1.5625).ln();
            Vec2::new(exp_axis(axis.x, base), exp_axis(axis.y, base))
        }
        InputMode::Linear => axis * INPUT_SENSITIVITY * 1.125,
        InputMode::DualZone => {
            let zone_factor = if magnitude < INPUT_DUAL_ZONE_THRESHOLD {
                1.0
            } else {
                1.25
            };
            axis * INPUT_SENSITIVITY * zone_factor
        }
    }
}

/// sign(a) * e^(|a| * base), with sign(0) = 0
#[inline]
fn exp_axis(a: f32, base: f32) -> f32 {
    if a == 0.0 {
        return 0.0;
    }
    (a.abs() * base).exp() * a.signum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deadzone_is_stationary() {
        for mode in [InputMode::Exponential, InputMode::Linear, InputMode::DualZone] {
            assert_eq!(map_input(Vec2::new(0.03, 0.03), mode), Vec2::ZERO);
            assert_eq!(map_input(Vec2::ZERO, mode), Vec2::ZERO);
        }
    }

    #[test]
    fn test_dual_zone_inner_and_outer() {
        let inner = map_input(Vec2::new(0.5, 0.0), InputMode::DualZone);
        assert!((inner.x - 8.0).abs() < 1e-5);
        assert_eq!(inner.y, 0.0);

        // Magnitude 1.0 is past the 0.8 threshold -> 1.25 gain
        let outer = map_input(Vec2::new(0.0, -1.0), InputMode::DualZone);
        assert!((outer.y - (-20.0)).abs() < 1e-5);
    }

    #[test]
    fn test_linear_gain() {
        let v = map_input(Vec2::new(1.0, -0.5), InputMode::Linear);
        assert!((v.x - 18.0).abs() < 1e-5);
        assert!((v.y - (-9.0)).abs() < 1e-5);
    }

    #[test]
    fn test_exponential_axes() {
        // Full deflection reaches SENSITIVITY * 1.5625 = 25
        let v = map_input(Vec2::new(1.0, 0.0), InputMode::Exponential);
        assert!((v.x - 25.0).abs() < 1e-3);
        // A zero axis stays zero rather than e^0 = 1
        assert_eq!(v.y, 0.0);

        let v = map_input(Vec2::new(-0.5, 0.5), InputMode::Exponential);
        assert!((v.x - (-5.0)).abs() < 1e-3);
        assert!((v.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_mode_names() {
        for mode in [InputMode::Exponential, InputMode::Linear, InputMode::DualZone] {
            assert_eq!(InputMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(InputMode::from_str("joystick"), None);
    }

    proptest! {
        #[test]
        fn prop_mapping_is_deterministic(x in -1.0f32..1.0, y in -1.0f32..1.0) {
            for mode in [InputMode::Exponential, InputMode::Linear, InputMode::DualZone] {
                let a = map_input(Vec2::new(x, y), mode);
                let b = map_input(Vec2::new(x, y), mode);
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn prop_velocity_follows_axis_sign(x in -1.0f32..1.0, y in -1.0f32..1.0) {
            let v = map_input(Vec2::new(x, y), InputMode::DualZone);
            prop_assert!(v.x * x >= 0.0);
            prop_assert!(v.y * y >= 0.0);
        }
    }
}
