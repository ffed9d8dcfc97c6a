//! catapult_core - Pure no_std control logic for the catapult robot
//!
//! This crate contains the launcher and autonomous state machines together
//! with the hardware abstractions they drive. Everything here can be tested
//! on host without a robot attached.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library dependencies outside of tests
//! - **Trait abstractions**: Solenoids, drive, display and time are injected via traits
//! - **Guard-then-act**: Launcher status is recomputed before every guarded actuation
//!
//! # Modules
//!
//! - [`traits`]: Time, delay and stopwatch abstractions
//! - [`pneumatics`]: Double solenoid and compressor abstractions
//! - [`launcher`]: Status classifier, gated commands, blocker and launch sequencer
//! - [`autonomous`]: Time-gated autonomous phase sequencer
//! - [`drive`]: Drive base and indicator abstractions
//! - [`display`]: Driver station status display abstraction
//! - [`operator`]: Operator input mapping (buttons, axes, deadband)
//! - [`parameters`]: Parameter store and tuning blocks
//! - [`robot`]: Robot lifecycle facade (init/periodic entry points)

#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
pub mod logging;

pub mod autonomous;
pub mod display;
pub mod drive;
pub mod launcher;
pub mod operator;
pub mod parameters;
pub mod pneumatics;
pub mod robot;
pub mod traits;
