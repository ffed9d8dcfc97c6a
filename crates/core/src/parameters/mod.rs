//! Parameter management
//!
//! A small named parameter store plus typed blocks read from it at startup.
//! [`RobotConfig`] bundles every block the robot needs.

pub mod autonomous;
pub mod drive;
pub mod error;
pub mod launcher;
pub mod storage;

pub use autonomous::AutoParams;
pub use drive::DriveParams;
pub use error::ParameterError;
pub use launcher::LauncherParams;
pub use storage::{ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};

/// Complete robot tuning
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RobotConfig {
    /// Launcher timing
    pub launcher: LauncherParams,
    /// Autonomous routine
    pub autonomous: AutoParams,
    /// Teleop drive
    pub drive: DriveParams,
}

impl RobotConfig {
    /// Register every parameter block with its defaults
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        LauncherParams::register_defaults(store)?;
        AutoParams::register_defaults(store)?;
        DriveParams::register_defaults(store)?;
        Ok(())
    }

    /// Store pre-populated with all defaults
    pub fn default_store() -> Result<ParameterStore, ParameterError> {
        let mut store = ParameterStore::new();
        Self::register_defaults(&mut store)?;
        Ok(store)
    }

    /// Load all blocks from the store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            launcher: LauncherParams::from_store(store),
            autonomous: AutoParams::from_store(store),
            drive: DriveParams::from_store(store),
        }
    }
}
