//! Launch Sequencer
//!
//! Drives the multi-step "fire" operation through the gated [`Launcher`]
//! commands:
//!
//! 1. Re-classify; anything but `Ready` rejects the trigger
//! 2. Release the lock
//! 3. Wait the settle time (`LNCH_SETTLE`)
//! 4. Drop the launch cylinder
//! 5. Wait the fall-through time (`LNCH_FALL`), then show `Down`
//! 6. Lock
//! 7. Pressurize
//! 8. Reset the pressurization timer
//!
//! The sequencer is a tick-driven state machine: [`trigger`](LaunchSequencer::trigger)
//! performs steps 1-2 and arms a deadline, [`update`](LaunchSequencer::update)
//! is called once per control cycle and performs the next steps once the
//! deadline passes. Other periodic work keeps running during the waits.
//! [`fire_blocking`](LaunchSequencer::fire_blocking) runs the same machine to
//! completion with a blocking [`Delay`](crate::traits::Delay).
//!
//! A guarded command that is ignored halts the sequence at that step. The
//! sequence is not retried; the operator has to trigger it again. A running
//! sequence cannot be cancelled.

use super::commands::{CommandOutcome, Launcher, LauncherCommand};
use super::status::LauncherStatus;
use crate::display::StatusDisplay;
use crate::pneumatics::DoubleSolenoid;
use crate::traits::{seconds_to_us, Clock};

/// Current step of the launch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaunchPhase {
    /// No launch in progress
    #[default]
    Idle,
    /// Lock released, waiting for the arm to swing through
    Settling {
        /// Timestamp (us) at which the launch cylinder drops
        until_us: u64,
    },
    /// Launch cylinder dropped, waiting for the arm to fall back
    FallingThrough {
        /// Timestamp (us) at which the arm is re-locked
        until_us: u64,
    },
}

/// Event reported by [`LaunchSequencer::trigger`] and [`LaunchSequencer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaunchEvent {
    /// No launch in progress
    Idle,
    /// Trigger rejected: launcher not ready
    NotReady(LauncherStatus),
    /// Trigger ignored: a launch is already in progress
    Busy,
    /// Lock released, settle timer running
    Started,
    /// Waiting for the current step's deadline
    Waiting,
    /// Launch cylinder dropped, fall-through timer running
    Dropped,
    /// Re-locked, re-pressurizing, timer reset
    Completed,
    /// A guarded command was ignored; the sequence stopped
    Halted {
        /// Command that was ignored
        command: LauncherCommand,
        /// Status observed when it was ignored
        status: LauncherStatus,
    },
}

/// Launch sequencer state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchSequencer {
    phase: LaunchPhase,
    completed: u32,
    halted: u32,
}

impl LaunchSequencer {
    /// Create an idle sequencer.
    pub const fn new() -> Self {
        Self {
            phase: LaunchPhase::Idle,
            completed: 0,
            halted: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    /// Check if a launch is in progress.
    pub fn is_active(&self) -> bool {
        self.phase != LaunchPhase::Idle
    }

    /// Deadline of the current wait, if any.
    pub fn deadline_us(&self) -> Option<u64> {
        match self.phase {
            LaunchPhase::Idle => None,
            LaunchPhase::Settling { until_us } | LaunchPhase::FallingThrough { until_us } => {
                Some(until_us)
            }
        }
    }

    /// Number of launches that ran to completion.
    pub fn completed_count(&self) -> u32 {
        self.completed
    }

    /// Number of launches halted by an ignored command.
    pub fn halted_count(&self) -> u32 {
        self.halted
    }

    /// Drop any launch in progress without actuating
    ///
    /// Used on mode changes; the next mode re-initializes the solenoids.
    pub fn reset(&mut self) {
        if self.is_active() {
            crate::log_warn!("Launch abandoned");
        }
        self.phase = LaunchPhase::Idle;
    }

    /// Start a launch
    ///
    /// Re-classifies first; only a `Ready` launcher is released.
    pub fn trigger<S, P>(&mut self, launcher: &mut Launcher<S, P>, now_us: u64) -> LaunchEvent
    where
        S: DoubleSolenoid,
        P: StatusDisplay,
    {
        if self.is_active() {
            return LaunchEvent::Busy;
        }

        let status = launcher.refresh_display(now_us);
        if status != LauncherStatus::Ready {
            crate::log_debug!("Fire ignored: {}", status.as_str());
            return LaunchEvent::NotReady(status);
        }

        if let Some(halt) = self.run_step(launcher, LauncherCommand::Release, now_us) {
            return halt;
        }

        let until_us = now_us.saturating_add(seconds_to_us(launcher.params().settle_s));
        self.phase = LaunchPhase::Settling { until_us };
        crate::log_info!("Launch started");
        LaunchEvent::Started
    }

    /// Advance the sequence (call once per control cycle)
    pub fn update<S, P>(&mut self, launcher: &mut Launcher<S, P>, now_us: u64) -> LaunchEvent
    where
        S: DoubleSolenoid,
        P: StatusDisplay,
    {
        match self.phase {
            LaunchPhase::Idle => LaunchEvent::Idle,
            LaunchPhase::Settling { until_us } | LaunchPhase::FallingThrough { until_us }
                if now_us < until_us =>
            {
                LaunchEvent::Waiting
            }
            LaunchPhase::Settling { .. } => {
                launcher.refresh_display(now_us);
                if let Some(halt) = self.run_step(launcher, LauncherCommand::Drop, now_us) {
                    return halt;
                }

                let until_us = now_us.saturating_add(seconds_to_us(launcher.params().fall_s));
                self.phase = LaunchPhase::FallingThrough { until_us };
                LaunchEvent::Dropped
            }
            LaunchPhase::FallingThrough { .. } => {
                // The arm has settled by now even if the status line lags behind
                launcher.show_status(LauncherStatus::Down);

                for command in [LauncherCommand::Lock, LauncherCommand::Pressurize] {
                    if let Some(halt) = self.run_step(launcher, command, now_us) {
                        return halt;
                    }
                }

                launcher.reset_pressurization(now_us);
                launcher.refresh_display(now_us);
                self.phase = LaunchPhase::Idle;
                self.completed += 1;
                crate::log_info!("Launch complete, re-pressurizing");
                LaunchEvent::Completed
            }
        }
    }

    /// Run a launch to completion, blocking through the waits
    ///
    /// Returns the final event: `Completed`, `Halted`, `NotReady` or `Busy`.
    pub fn fire_blocking<S, P, C>(
        &mut self,
        launcher: &mut Launcher<S, P>,
        clock: &C,
    ) -> LaunchEvent
    where
        S: DoubleSolenoid,
        P: StatusDisplay,
        C: Clock,
    {
        let event = self.trigger(launcher, clock.now_us());
        if event != LaunchEvent::Started {
            return event;
        }

        loop {
            if let Some(deadline) = self.deadline_us() {
                let remaining_us = deadline.saturating_sub(clock.now_us());
                if remaining_us > 0 {
                    let ms = remaining_us.div_ceil(1000).min(u32::MAX as u64) as u32;
                    clock.delay_ms(ms);
                }
            }

            match self.update(launcher, clock.now_us()) {
                LaunchEvent::Waiting | LaunchEvent::Dropped => continue,
                other => return other,
            }
        }
    }

    /// Execute one guarded step; on an ignored command, stop and report it.
    fn run_step<S, P>(
        &mut self,
        launcher: &mut Launcher<S, P>,
        command: LauncherCommand,
        now_us: u64,
    ) -> Option<LaunchEvent>
    where
        S: DoubleSolenoid,
        P: StatusDisplay,
    {
        match launcher.execute(command, now_us) {
            CommandOutcome::Applied => None,
            CommandOutcome::Ignored { actual, .. } => {
                self.phase = LaunchPhase::Idle;
                self.halted += 1;
                crate::log_info!(
                    "Launch halted at {}: status {}",
                    command.as_str(),
                    actual.as_str()
                );
                Some(LaunchEvent::Halted {
                    command,
                    status: actual,
                })
            }
        }
    }
}
