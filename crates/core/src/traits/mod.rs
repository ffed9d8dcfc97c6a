//! Core traits for platform-agnostic robot control.
//!
//! This module provides the time abstractions that decouple the launcher and
//! autonomous state machines from the hosting runtime's clock.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (SITL clock, hardware timers) live elsewhere

pub mod stopwatch;
pub mod time;

pub use stopwatch::Stopwatch;
pub use time::{seconds_to_ms, seconds_to_us, Clock, Delay, MockTime, TimeSource};
