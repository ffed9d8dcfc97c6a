//! Autonomous Parameter Definitions
//!
//! - `AUTO_DRV_TIME` - Forward drive duration (seconds)
//! - `AUTO_DRV_SPD` - Forward drive speed (-1.0 to 1.0)

use super::error::ParameterError;
use super::launcher::MAX_DURATION_S;
use super::storage::{ParamValue, ParameterStore};

/// Autonomous routine tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoParams {
    /// Forward drive duration (seconds)
    pub drive_time_s: f32,
    /// Forward drive speed
    pub drive_speed: f32,
}

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            drive_time_s: 1.2,
            drive_speed: 1.0,
        }
    }
}

impl AutoParams {
    /// Register autonomous parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let d = Self::default();
        store.register("AUTO_DRV_TIME", ParamValue::Float(d.drive_time_s))?;
        store.register("AUTO_DRV_SPD", ParamValue::Float(d.drive_speed))?;
        Ok(())
    }

    /// Load autonomous parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let d = Self::default();
        Self {
            drive_time_s: store
                .get_f32("AUTO_DRV_TIME", d.drive_time_s)
                .clamp(0.0, MAX_DURATION_S),
            drive_speed: store
                .get_f32("AUTO_DRV_SPD", d.drive_speed)
                .clamp(-1.0, 1.0),
        }
    }
}
