// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for cancellable scheduled tasks.
//!
//! Vitrine runs inside someone else's event loop — a browser frame loop, a
//! UI toolkit timer wheel, or the deterministic simulation host used in
//! tests. The engine never sleeps or spawns; it asks its host to schedule
//! work through [`TimerHost`] and reacts when the host delivers a firing
//! back to [`Engine::on_timer`](crate::engine::Engine::on_timer).
//!
//! The host provides the following pieces:
//!
//! - **Scheduling** — [`arm_periodic`](TimerHost::arm_periodic) and
//!   [`arm_once`](TimerHost::arm_once) return a fresh [`TimerToken`] per
//!   call. Recurring tasks keep firing at their interval until cancelled
//!   (the host re-arms, the engine does not); one-shot tasks fire at most
//!   once.
//! - **Cancellation** — [`cancel`](TimerHost::cancel) takes the token and
//!   guarantees no further firing for it. Cancelling an already-fired or
//!   already-cancelled token is a no-op.
//! - **Delivery** — every firing is handed to the engine together with its
//!   token. The engine ignores tokens it no longer holds, so a host that
//!   delivers a firing late (after a cancel raced it) cannot corrupt
//!   scheduling state.
//!
//! Tokens must not be reused within a host's lifetime; a monotonically
//! increasing counter is sufficient.

use core::fmt;

use crate::time::Duration;

/// A handle to an armed timer, returned by the host on arm and required
/// for cancellation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

impl fmt::Debug for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerToken({})", self.0)
    }
}

/// Which scheduled task a timer drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerTask {
    /// The recurring autoplay advance tick.
    AutoAdvance,
    /// The one-shot resume after a manual selection.
    AutoResume,
}

/// The scheduling seam embedding event loops implement.
///
/// Implementations are single-threaded: the engine only calls these from
/// within host-delivered events, so no synchronization is required.
pub trait TimerHost {
    /// Arms a recurring task firing every `interval` until cancelled.
    fn arm_periodic(&mut self, interval: Duration, task: TimerTask) -> TimerToken;

    /// Arms a one-shot task firing once after `delay`.
    fn arm_once(&mut self, delay: Duration, task: TimerTask) -> TimerToken;

    /// Cancels an armed task. No-op for tokens that already fired (for
    /// one-shot tasks) or were already cancelled.
    fn cancel(&mut self, token: TimerToken);
}
