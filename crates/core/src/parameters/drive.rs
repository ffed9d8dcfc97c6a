//! Drive Parameter Definitions
//!
//! - `DRV_DEADBAND` - Joystick deadband applied to forward and rotation axes

use super::error::ParameterError;
use super::storage::{ParamValue, ParameterStore};

/// Teleop drive tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    /// Axis deadband (0.0 to 1.0)
    pub deadband: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self { deadband: 0.3 }
    }
}

impl DriveParams {
    /// Register drive parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("DRV_DEADBAND", ParamValue::Float(Self::default().deadband))
    }

    /// Load drive parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            deadband: store
                .get_f32("DRV_DEADBAND", Self::default().deadband)
                .clamp(0.0, 1.0),
        }
    }
}
