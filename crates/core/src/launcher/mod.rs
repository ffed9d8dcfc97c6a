//! Launcher control
//!
//! The launcher arm is held by a mechanical lock and driven by a launch
//! cylinder. Its operating status is inferred from the two solenoid positions
//! and the time since the launcher was last re-pressurized.
//!
//! # Contents
//!
//! - [`status`]: Six-way status classifier (pure)
//! - [`commands`]: Pressurization-gated commands on the [`Launcher`]
//! - [`sequencer`]: Tick-driven launch ("fire") sequence
//! - [`blocker`]: Blocker gate in front of the launcher
//!
//! # Safety
//!
//! Every guarded command re-classifies immediately before actuating, and all
//! solenoid access goes through the single owning [`Launcher`]. Nothing can
//! change a solenoid between the precondition check and the command.

pub mod blocker;
pub mod commands;
pub mod sequencer;
pub mod status;

pub use blocker::{Blocker, BlockerPosition};
pub use commands::{CommandOutcome, Launcher, LauncherCommand};
pub use sequencer::{LaunchEvent, LaunchPhase, LaunchSequencer};
pub use status::{classify, LauncherStatus, DEFAULT_LAUNCH_DELAY_S};
