//! Scripted operator input.
//!
//! A match script is a list of timed operator actions. Times are seconds
//! since the start of the teleop period. Each action is held for its
//! duration (at least one control cycle).
//!
//! # File format
//!
//! JSON, one object per input:
//!
//! ```json
//! {
//!   "inputs": [
//!     { "at_s": 11.0, "hold_s": 0.1, "action": "fire" },
//!     { "at_s": 14.0, "hold_s": 2.0, "action": { "drive": { "left_y": -0.8 } } },
//!     { "at_s": 20.0, "hold_s": 0.1, "action": "blocker_up" }
//!   ]
//! }
//! ```
//!
//! Actions: `fire`, `blocker_up`, `blocker_down`, `free`, `pressurize`,
//! `lock_extend`, `lock_retract`, and `drive` with any of `left_y`,
//! `triggers`, `right_x` (missing axes are centered).

use std::path::Path;

use catapult_core::operator::{DriverAxes, ShooterButtons};
use serde::Deserialize;

use crate::error::SimulatorError;

/// Operator action.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Fire,
    BlockerUp,
    BlockerDown,
    Free,
    Pressurize,
    LockExtend,
    LockRetract,
    Drive(DriverAxes),
}

/// One timed action.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptedInput {
    /// Start time (seconds into teleop)
    pub at_s: f32,
    /// Hold duration (seconds)
    pub hold_s: f32,
    pub action: ScriptAction,
}

impl ScriptedInput {
    fn active_at(&self, t_s: f32) -> bool {
        t_s >= self.at_s && t_s < self.at_s + self.hold_s
    }

    /// Reject bad timing and clamp drive axes to -1.0..=1.0.
    fn validated(mut self) -> Result<Self, String> {
        if !self.at_s.is_finite() || self.at_s < 0.0 {
            return Err(format!("invalid time {}", self.at_s));
        }
        if !self.hold_s.is_finite() || self.hold_s <= 0.0 {
            return Err(format!("invalid hold {}", self.hold_s));
        }
        if let ScriptAction::Drive(axes) = &mut self.action {
            for axis in [&mut axes.left_y, &mut axes.triggers, &mut axes.right_x] {
                if !axis.is_finite() {
                    return Err("drive axis out of range".into());
                }
                *axis = axis.clamp(-1.0, 1.0);
            }
        }
        Ok(self)
    }
}

/// Timed operator inputs for the teleop period.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchScript {
    inputs: Vec<ScriptedInput>,
}

impl MatchScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action (builder style).
    pub fn with(mut self, at_s: f32, hold_s: f32, action: ScriptAction) -> Self {
        self.inputs.push(ScriptedInput {
            at_s,
            hold_s,
            action,
        });
        self
    }

    pub fn inputs(&self) -> &[ScriptedInput] {
        &self.inputs
    }

    /// Default teleop routine: fire whenever the launcher should be ready
    /// and shuffle between shots.
    pub fn default_teleop() -> Self {
        let mut script = Self::new();
        // Launcher is Ready 10 s after each re-pressurize, the cycle itself takes 3 s
        let mut t = 11.5;
        while t < 120.0 {
            script = script
                .with(t, 0.1, ScriptAction::Fire)
                .with(
                    t + 4.0,
                    1.0,
                    ScriptAction::Drive(DriverAxes {
                        left_y: -0.6,
                        triggers: 0.0,
                        right_x: 0.0,
                    }),
                )
                .with(
                    t + 6.0,
                    0.5,
                    ScriptAction::Drive(DriverAxes {
                        left_y: 0.0,
                        triggers: 0.0,
                        right_x: 0.5,
                    }),
                );
            t += 14.0;
        }
        script.with(1.0, 0.1, ScriptAction::BlockerUp)
    }

    /// Shooter buttons held at `t_s`.
    pub fn buttons_at(&self, t_s: f32) -> ShooterButtons {
        let mut buttons = ShooterButtons::NONE;
        for input in self.inputs.iter().filter(|i| i.active_at(t_s)) {
            match input.action {
                ScriptAction::Fire => buttons.fire = true,
                ScriptAction::BlockerUp => buttons.blocker_up = true,
                ScriptAction::BlockerDown => buttons.blocker_down = true,
                ScriptAction::Free => buttons.free = true,
                ScriptAction::Pressurize => buttons.pressurize = true,
                ScriptAction::LockExtend => buttons.lock_extend = true,
                ScriptAction::LockRetract => buttons.lock_retract = true,
                ScriptAction::Drive(_) => {}
            }
        }
        buttons
    }

    /// Driver axes at `t_s` (last active drive action wins, else centered).
    pub fn axes_at(&self, t_s: f32) -> DriverAxes {
        self.inputs
            .iter()
            .filter(|i| i.active_at(t_s))
            .filter_map(|i| match i.action {
                ScriptAction::Drive(axes) => Some(axes),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }

    /// Parse a JSON script.
    pub fn from_json(json: &str) -> Result<Self, SimulatorError> {
        let parsed: MatchScript =
            serde_json::from_str(json).map_err(|e| SimulatorError::Script {
                line: e.line(),
                message: e.to_string(),
            })?;

        let inputs = parsed
            .inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                input
                    .validated()
                    .map_err(|message| SimulatorError::ScriptInput { index, message })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { inputs })
    }

    /// Load a JSON script file.
    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_window() {
        let script = MatchScript::new().with(2.0, 0.5, ScriptAction::Fire);
        assert!(!script.buttons_at(1.99).fire);
        assert!(script.buttons_at(2.0).fire);
        assert!(script.buttons_at(2.49).fire);
        assert!(!script.buttons_at(2.5).fire);
    }

    #[test]
    fn test_axes_default_centered() {
        let axes = DriverAxes {
            left_y: -1.0,
            triggers: 0.0,
            right_x: 0.0,
        };
        let script = MatchScript::new().with(0.0, 1.0, ScriptAction::Drive(axes));
        assert_eq!(script.axes_at(0.5), axes);
        assert_eq!(script.axes_at(1.5), DriverAxes::default());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "inputs": [
                { "at_s": 11.0, "hold_s": 0.1, "action": "fire" },
                {
                    "at_s": 14,
                    "hold_s": 2,
                    "action": { "drive": { "left_y": -0.8, "right_x": 0.25 } }
                },
                { "at_s": 20, "hold_s": 0.1, "action": "lock_retract" }
            ]
        }"#;
        let script = MatchScript::from_json(json).unwrap();
        assert_eq!(script.inputs().len(), 3);
        assert_eq!(script.inputs()[0].action, ScriptAction::Fire);
        assert!(script.buttons_at(20.05).lock_retract);

        let axes = script.axes_at(15.0);
        assert_eq!(axes.right_x, 0.25);
        assert_eq!(axes.triggers, 0.0);
    }

    #[test]
    fn test_drive_axes_clamped() {
        let json = r#"{ "inputs": [
            { "at_s": 0, "hold_s": 1, "action": { "drive": { "left_y": -3.0 } } }
        ] }"#;
        let script = MatchScript::from_json(json).unwrap();
        assert_eq!(script.axes_at(0.5).left_y, -1.0);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let json = r#"{
  "inputs": [
    { "at_s": 1, "hold_s": 0.1, "action": "launch" }
  ]
}"#;
        let err = MatchScript::from_json(json).unwrap_err();
        assert!(matches!(err, SimulatorError::Script { line: 3, .. }));
    }

    #[test]
    fn test_invalid_timing_reports_input() {
        let json = r#"{ "inputs": [
            { "at_s": 1, "hold_s": 0.1, "action": "fire" },
            { "at_s": -2, "hold_s": 0.1, "action": "fire" }
        ] }"#;
        let err = MatchScript::from_json(json).unwrap_err();
        assert!(matches!(err, SimulatorError::ScriptInput { index: 1, .. }));
        assert!(err.to_string().contains("invalid time"));

        let json = r#"{ "inputs": [ { "at_s": 1, "hold_s": 0, "action": "free" } ] }"#;
        assert!(MatchScript::from_json(json).is_err());
    }

    #[test]
    fn test_default_teleop_fires_repeatedly() {
        let script = MatchScript::default_teleop();
        let fires = script
            .inputs()
            .iter()
            .filter(|i| i.action == ScriptAction::Fire)
            .count();
        assert!(fires >= 8);
        assert!(script.buttons_at(11.55).fire);
    }
}
