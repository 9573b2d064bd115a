// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay scheduling state.
//!
//! [`Autoplay`] owns the two timer handles of the carousel and the
//! Running/Paused state they imply:
//!
//! - While `Running`, exactly one recurring advance task is armed. It is
//!   disarmed on every transition to `Paused`.
//! - While `Paused`, at most one one-shot auto-resume task may be
//!   pending. Re-scheduling cancels and replaces it (debounce, not
//!   queue); pointer interaction cancels it outright.
//!
//! Resuming always arms a *fresh* recurring task — no tick-phase
//! continuity with the pre-pause schedule is promised.
//!
//! This module only manages scheduling state; the deck mutations those
//! timers drive live in [`engine`](crate::engine).

use crate::time::{Duration, Timebase};
use crate::timer::{TimerHost, TimerTask, TimerToken};

/// Whether the carousel is currently advancing on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoplayState {
    /// The recurring advance task is armed and firing.
    Running,
    /// Advancing is suspended by user interaction.
    Paused,
}

/// Configuration for the [`Autoplay`] scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Interval between automatic advances while running.
    pub advance_interval: Duration,
    /// Delay before autoplay resumes after a manual selection.
    pub resume_delay: Duration,
}

impl AutoplayConfig {
    /// The reference configuration: advance every 3000 ms, resume 3500 ms
    /// after a manual selection.
    #[must_use]
    pub const fn reference(timebase: Timebase) -> Self {
        Self {
            advance_interval: Duration::from_millis(3_000, timebase),
            resume_delay: Duration::from_millis(3_500, timebase),
        }
    }
}

/// Timer bookkeeping for one carousel.
#[derive(Debug)]
pub struct Autoplay {
    config: AutoplayConfig,
    state: AutoplayState,
    /// The recurring advance handle. `Some` exactly while `Running`.
    tick_token: Option<TimerToken>,
    /// The pending auto-resume handle, if any. Only possible while
    /// `Paused`.
    resume_token: Option<TimerToken>,
}

impl Autoplay {
    /// Starts autoplay: arms the recurring advance task and enters
    /// `Running`.
    #[must_use]
    pub fn start(config: AutoplayConfig, host: &mut dyn TimerHost) -> Self {
        let tick_token = host.arm_periodic(config.advance_interval, TimerTask::AutoAdvance);
        Self {
            config,
            state: AutoplayState::Running,
            tick_token: Some(tick_token),
            resume_token: None,
        }
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Returns the configuration this scheduler was started with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> AutoplayConfig {
        self.config
    }

    /// Returns the pending auto-resume handle, if one is armed.
    #[inline]
    #[must_use]
    pub fn pending_resume(&self) -> Option<TimerToken> {
        self.resume_token
    }

    /// Returns whether `token` is the currently armed advance handle.
    #[inline]
    #[must_use]
    pub fn is_tick(&self, token: TimerToken) -> bool {
        self.tick_token == Some(token)
    }

    /// Returns whether `token` is the currently pending resume handle.
    #[inline]
    #[must_use]
    pub fn is_resume(&self, token: TimerToken) -> bool {
        self.resume_token == Some(token)
    }

    /// Suspends autoplay: disarms the recurring advance task.
    ///
    /// Returns whether this call transitioned `Running` → `Paused`.
    pub fn pause(&mut self, host: &mut dyn TimerHost) -> bool {
        if let Some(token) = self.tick_token.take() {
            host.cancel(token);
        }
        if self.state == AutoplayState::Running {
            self.state = AutoplayState::Paused;
            true
        } else {
            false
        }
    }

    /// Resumes autoplay immediately, cancelling any pending auto-resume.
    ///
    /// Returns whether this call transitioned `Paused` → `Running`. When
    /// already running only the pending resume (if any) is cleared; a
    /// second recurring task is never armed.
    pub fn resume(&mut self, host: &mut dyn TimerHost) -> bool {
        self.clear_resume(host);
        if self.state == AutoplayState::Paused {
            self.arm_tick(host);
            self.state = AutoplayState::Running;
            true
        } else {
            false
        }
    }

    /// Schedules the auto-resume task, replacing any pending one.
    pub fn schedule_resume(&mut self, host: &mut dyn TimerHost) {
        self.clear_resume(host);
        self.resume_token = Some(host.arm_once(self.config.resume_delay, TimerTask::AutoResume));
    }

    /// Cancels the pending auto-resume task, if any.
    pub fn clear_resume(&mut self, host: &mut dyn TimerHost) {
        if let Some(token) = self.resume_token.take() {
            host.cancel(token);
        }
    }

    /// Handles the auto-resume task having fired: drops the spent handle
    /// and re-enters `Running` with a fresh recurring task.
    ///
    /// The caller has already matched the firing's token against
    /// [`is_resume`](Self::is_resume).
    pub fn resume_fired(&mut self, host: &mut dyn TimerHost) {
        // The handle fired; it is not cancelled, just forgotten.
        self.resume_token = None;
        debug_assert_eq!(
            self.state,
            AutoplayState::Paused,
            "a resume can only be pending while paused"
        );
        if self.state == AutoplayState::Paused {
            self.arm_tick(host);
            self.state = AutoplayState::Running;
        }
    }

    /// Cancels every outstanding task. The scheduler is inert afterwards.
    pub fn shutdown(&mut self, host: &mut dyn TimerHost) {
        if let Some(token) = self.tick_token.take() {
            host.cancel(token);
        }
        self.clear_resume(host);
        self.state = AutoplayState::Paused;
    }

    fn arm_tick(&mut self, host: &mut dyn TimerHost) {
        debug_assert!(
            self.tick_token.is_none(),
            "only one recurring advance task may be armed"
        );
        self.tick_token = Some(host.arm_periodic(self.config.advance_interval, TimerTask::AutoAdvance));
    }
}
