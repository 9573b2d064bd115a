// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine hosts talk to.
//!
//! [`Engine`] owns one [`Deck`] and its [`Autoplay`] scheduling state and
//! exposes the operations an embedding event loop wires up:
//!
//! ```rust,ignore
//! let mut engine = Engine::mount(config, Deck::reference(), &mut host);
//!
//! // timer callback
//! match engine.on_timer(token, &mut host) {
//!     TimerOutcome::Advanced { .. } => presenter.apply(engine.deck(), &styles),
//!     TimerOutcome::Resumed | TimerOutcome::Stale => {}
//! }
//!
//! // input callbacks
//! engine.select_item(ItemIndex(2), &mut host);
//! engine.pointer_enter(&mut host);
//! engine.pointer_leave(&mut host);
//!
//! // teardown
//! engine.dispose(&mut host);
//! ```
//!
//! All mutation is serial: the host event loop delivers one event at a
//! time and every operation runs to completion before the next is
//! observed. Every timer firing carries its [`TimerToken`]; firings whose
//! token the engine no longer holds are answered with
//! [`TimerOutcome::Stale`] and ignored, so a late delivery racing a
//! cancel cannot advance a paused deck or double-resume.
//!
//! Presenters re-read [`deck`](Engine::deck) whenever
//! [`revision`](Engine::revision) changes; the engine never pushes.

use crate::autoplay::{Autoplay, AutoplayConfig, AutoplayState};
use crate::deck::{Deck, ItemIndex};
use crate::timer::{TimerHost, TimerToken};

/// What a timer firing did, for the host to trace or react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The recurring advance task rotated the deck.
    Advanced {
        /// The deck revision after the rotation.
        revision: u64,
    },
    /// The auto-resume task re-entered `Running`.
    Resumed,
    /// The token matched no armed handle (late or foreign delivery);
    /// nothing changed.
    Stale,
}

/// What a selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The card was already front: complete no-op, timers untouched.
    AlreadyFront,
    /// The card was promoted to front and autoplay paused.
    Promoted {
        /// Rotation steps applied to bring the card to front.
        steps: u32,
        /// Whether this call transitioned `Running` → `Paused` (false
        /// when the engine was already paused, e.g. under a hovering
        /// pointer).
        state_changed: bool,
    },
    /// The engine is disposed; nothing changed.
    Ignored,
}

/// One carousel: assignment state plus autoplay scheduling.
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    autoplay: Autoplay,
    revision: u64,
    disposed: bool,
}

impl Engine {
    /// Mounts the engine: takes the starting deck, arms the recurring
    /// advance task, and enters `Running`.
    #[must_use]
    pub fn mount(config: AutoplayConfig, deck: Deck, host: &mut dyn TimerHost) -> Self {
        Self {
            deck,
            autoplay: Autoplay::start(config, host),
            revision: 0,
            disposed: false,
        }
    }

    /// Read-only snapshot of the current assignment.
    #[inline]
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Monotonic counter bumped on every deck mutation. Presenters
    /// re-read the deck when this changes.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current scheduling state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Whether an auto-resume is pending.
    #[inline]
    #[must_use]
    pub fn pending_resume(&self) -> bool {
        self.autoplay.pending_resume().is_some()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Handles a timer firing delivered by the host.
    ///
    /// Dispatches on the token: the armed advance handle rotates the
    /// deck; the pending resume handle re-enters `Running`; anything else
    /// is stale and ignored.
    pub fn on_timer(&mut self, token: TimerToken, host: &mut dyn TimerHost) -> TimerOutcome {
        if self.disposed {
            return TimerOutcome::Stale;
        }
        if self.autoplay.is_tick(token) {
            self.deck.advance();
            self.revision += 1;
            TimerOutcome::Advanced {
                revision: self.revision,
            }
        } else if self.autoplay.is_resume(token) {
            self.autoplay.resume_fired(host);
            TimerOutcome::Resumed
        } else {
            TimerOutcome::Stale
        }
    }

    /// Handles the user selecting a card.
    ///
    /// Selecting the front card is a complete no-op: the assignment is
    /// unchanged and an in-flight pause/resume schedule is left alone.
    /// Otherwise the card is promoted to front, autoplay pauses, and the
    /// auto-resume is (re)scheduled — replacing any pending one.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range for the deck.
    pub fn select_item(&mut self, item: ItemIndex, host: &mut dyn TimerHost) -> SelectOutcome {
        if self.disposed {
            return SelectOutcome::Ignored;
        }
        if self.deck.is_front(item) {
            return SelectOutcome::AlreadyFront;
        }
        let steps = self.deck.promote_to_front(item);
        self.revision += 1;
        let state_changed = self.autoplay.pause(host);
        self.autoplay.schedule_resume(host);
        SelectOutcome::Promoted {
            steps,
            state_changed,
        }
    }

    /// Handles the pointer entering the carousel area: cancels any
    /// pending auto-resume and pauses while the pointer stays inside.
    ///
    /// Returns whether this call transitioned `Running` → `Paused`.
    pub fn pointer_enter(&mut self, host: &mut dyn TimerHost) -> bool {
        if self.disposed {
            return false;
        }
        self.autoplay.clear_resume(host);
        self.autoplay.pause(host)
    }

    /// Handles the pointer leaving the carousel area: resumes
    /// immediately. Takes precedence over a scheduled auto-resume — the
    /// pending timer is cancelled so it cannot fire a second resume.
    ///
    /// Returns whether this call transitioned `Paused` → `Running`.
    pub fn pointer_leave(&mut self, host: &mut dyn TimerHost) -> bool {
        if self.disposed {
            return false;
        }
        self.autoplay.resume(host)
    }

    /// Tears the engine down: cancels both outstanding timers. All later
    /// events are ignored. Idempotent.
    pub fn dispose(&mut self, host: &mut dyn TimerHost) {
        if self.disposed {
            return;
        }
        self.autoplay.shutdown(host);
        self.disposed = true;
    }
}
