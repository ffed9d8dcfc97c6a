//! Launcher Parameter Definitions
//!
//! # Parameters
//!
//! - `LNCH_DELAY` - Pressurization time before the launcher is Ready (seconds)
//! - `LNCH_SETTLE` - Wait after releasing the lock before dropping (seconds)
//! - `LNCH_FALL` - Wait for the arm to fall through before re-locking (seconds)
//! - `LNCH_STEPPED` - Advance the launch sequence per control tick (1) or
//!   run it to completion inside the fire call (0)
//! - `INIT_PRIME` - Autonomous initialization: launch extended before locking (seconds)
//! - `INIT_LOCK` - Initialization: lock extended before pressurizing (seconds)

use super::error::ParameterError;
use super::storage::{ParamValue, ParameterStore};
use crate::launcher::DEFAULT_LAUNCH_DELAY_S;

/// Upper bound for any launcher duration (seconds)
pub const MAX_DURATION_S: f32 = 3600.0;

/// Launcher timing loaded from the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LauncherParams {
    /// Launch delay threshold (seconds)
    pub launch_delay_s: f32,
    /// Release-to-drop wait (seconds)
    pub settle_s: f32,
    /// Drop-to-lock wait (seconds)
    pub fall_s: f32,
    /// Tick-driven launch sequence
    pub stepped: bool,
    /// Autonomous-only prime wait (seconds)
    pub init_prime_s: f32,
    /// Lock-to-pressurize wait during initialization (seconds)
    pub init_lock_s: f32,
}

impl Default for LauncherParams {
    fn default() -> Self {
        Self {
            launch_delay_s: DEFAULT_LAUNCH_DELAY_S,
            settle_s: 1.0,
            fall_s: 2.0,
            stepped: true,
            init_prime_s: 0.5,
            init_lock_s: 1.0,
        }
    }
}

impl LauncherParams {
    /// Register launcher parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let d = Self::default();
        store.register("LNCH_DELAY", ParamValue::Float(d.launch_delay_s))?;
        store.register("LNCH_SETTLE", ParamValue::Float(d.settle_s))?;
        store.register("LNCH_FALL", ParamValue::Float(d.fall_s))?;
        store.register("LNCH_STEPPED", ParamValue::Bool(d.stepped))?;
        store.register("INIT_PRIME", ParamValue::Float(d.init_prime_s))?;
        store.register("INIT_LOCK", ParamValue::Float(d.init_lock_s))?;
        Ok(())
    }

    /// Load launcher parameters from parameter store
    ///
    /// Missing entries fall back to defaults. Durations clamp to
    /// `0..=MAX_DURATION_S`.
    pub fn from_store(store: &ParameterStore) -> Self {
        let d = Self::default();
        let secs = |name: &str, default: f32| {
            store.get_f32(name, default).clamp(0.0, MAX_DURATION_S)
        };

        Self {
            launch_delay_s: secs("LNCH_DELAY", d.launch_delay_s),
            settle_s: secs("LNCH_SETTLE", d.settle_s),
            fall_s: secs("LNCH_FALL", d.fall_s),
            stepped: store.get_bool("LNCH_STEPPED", d.stepped),
            init_prime_s: secs("INIT_PRIME", d.init_prime_s),
            init_lock_s: secs("INIT_LOCK", d.init_lock_s),
        }
    }
}
