//! Match and robot configuration for SITL runs.

use catapult_core::parameters::{ParameterError, ParameterStore, RobotConfig};

use crate::error::SimulatorError;
use crate::mechanism::DEFAULT_CHARGE_TIME_S;

/// Longest accepted autonomous or teleop period (seconds)
pub const MAX_PERIOD_LENGTH_S: f32 = 3600.0;

/// Time synchronization mode for the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeMode {
    /// Simulation advances one control period per step, as fast as possible.
    #[default]
    Lockstep,
    /// Simulation runs at a scaled rate relative to wall-clock time.
    Scaled { factor: f32 },
}

/// Match timing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Autonomous period length (seconds)
    pub autonomous_s: f32,
    /// Teleop period length (seconds)
    pub teleop_s: f32,
    /// Control period (microseconds)
    pub period_us: u64,
    pub time_mode: TimeMode,
    /// Launcher model charge time (seconds)
    pub charge_time_s: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            autonomous_s: 15.0,
            teleop_s: 120.0,
            period_us: 20_000,
            time_mode: TimeMode::Lockstep,
            charge_time_s: DEFAULT_CHARGE_TIME_S,
        }
    }
}

impl MatchConfig {
    /// Check the configuration is runnable.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        let valid_length = |s: f32| (0.0..=MAX_PERIOD_LENGTH_S).contains(&s);
        if !valid_length(self.autonomous_s) || !valid_length(self.teleop_s) {
            return Err(SimulatorError::InvalidArgument(format!(
                "period lengths must be within 0..={MAX_PERIOD_LENGTH_S} s"
            )));
        }
        if self.period_us == 0 {
            return Err(SimulatorError::InvalidArgument(
                "control period must be > 0".into(),
            ));
        }
        if let TimeMode::Scaled { factor } = self.time_mode {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(SimulatorError::InvalidArgument(format!(
                    "invalid time scale {factor}"
                )));
            }
        }
        Ok(())
    }

    /// Control period in seconds.
    pub fn period_s(&self) -> f32 {
        self.period_us as f32 / 1_000_000.0
    }
}

/// Split a `NAME=VALUE` override.
pub fn parse_override(text: &str) -> Result<(String, String), SimulatorError> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
            Ok((name.trim().to_uppercase(), value.trim().to_string()))
        }
        _ => Err(SimulatorError::InvalidArgument(format!(
            "expected NAME=VALUE, got '{text}'"
        ))),
    }
}

/// Default parameter store with `overrides` applied.
pub fn build_store(overrides: &[(String, String)]) -> Result<ParameterStore, SimulatorError> {
    let mut store = RobotConfig::default_store().map_err(|reason| SimulatorError::Parameter {
        name: "defaults".into(),
        reason,
    })?;

    for (name, value) in overrides {
        match store.set_from_str(name, value) {
            Ok(parsed) => log::info!("Parameter {} = {}", name, parsed),
            Err(ParameterError::Unknown) => {
                return Err(SimulatorError::UnknownParameter(name.clone()));
            }
            Err(reason) => {
                return Err(SimulatorError::Parameter {
                    name: name.clone(),
                    reason,
                });
            }
        }
    }
    Ok(store)
}
