// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! host-loop instrumentation calls as scheduling and deck state evolve.
//! All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! The engine itself does not emit events — the host loop does, from the
//! outcomes engine calls return and from its own timer bookkeeping. This
//! keeps the core free of instrumentation state while the full event
//! stream stays reconstructible.

use crate::autoplay::AutoplayState;
use crate::deck::ItemIndex;
use crate::time::HostTime;
use crate::timer::{TimerTask, TimerToken};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What triggered a scheduling state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateChangeCause {
    /// A card was manually selected.
    Select,
    /// The pointer entered the carousel area.
    PointerEnter,
    /// The pointer left the carousel area.
    PointerLeave,
    /// The auto-resume timer fired.
    AutoResume,
}

/// What rotated the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdvanceCause {
    /// The recurring autoplay tick.
    AutoplayTick,
    /// Internal rotation steps of a promote-to-front.
    Promotion,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the host arms a timer on the engine's behalf.
#[derive(Clone, Copy, Debug)]
pub struct TimerArmedEvent {
    /// The handle the host returned.
    pub token: TimerToken,
    /// Which task the timer drives.
    pub task: TimerTask,
    /// When the timer will fire (first, for recurring tasks).
    pub deadline: HostTime,
}

/// Emitted when an armed timer is cancelled before firing.
#[derive(Clone, Copy, Debug)]
pub struct TimerCancelledEvent {
    /// The cancelled handle.
    pub token: TimerToken,
    /// Which task the timer drove.
    pub task: TimerTask,
    /// Host time of the cancellation.
    pub at: HostTime,
}

/// Emitted when the host delivers a timer firing to the engine.
#[derive(Clone, Copy, Debug)]
pub struct TimerFiredEvent {
    /// The fired handle.
    pub token: TimerToken,
    /// Which task fired.
    pub task: TimerTask,
    /// Host time of the delivery.
    pub at: HostTime,
}

/// Emitted after the deck rotated.
#[derive(Clone, Copy, Debug)]
pub struct DeckAdvancedEvent {
    /// What rotated the deck.
    pub cause: AdvanceCause,
    /// The deck revision after the rotation.
    pub revision: u64,
    /// Host time of the rotation.
    pub at: HostTime,
}

/// Emitted after a card was promoted to the front slot.
#[derive(Clone, Copy, Debug)]
pub struct ItemPromotedEvent {
    /// The promoted card.
    pub item: ItemIndex,
    /// Rotation steps the promotion applied.
    pub steps: u32,
    /// Host time of the promotion.
    pub at: HostTime,
}

/// Emitted on every Running/Paused transition.
#[derive(Clone, Copy, Debug)]
pub struct StateChangedEvent {
    /// State before the transition.
    pub from: AutoplayState,
    /// State after the transition.
    pub to: AutoplayState,
    /// What triggered it.
    pub cause: StateChangeCause,
    /// Host time of the transition.
    pub at: HostTime,
}

/// Emitted when the engine is disposed.
#[derive(Clone, Copy, Debug)]
pub struct DisposedEvent {
    /// Host time of the teardown.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the host loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a timer is armed.
    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        _ = e;
    }

    /// Called when an armed timer is cancelled.
    fn on_timer_cancelled(&mut self, e: &TimerCancelledEvent) {
        _ = e;
    }

    /// Called when a timer firing is delivered.
    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        _ = e;
    }

    /// Called after the deck rotated.
    fn on_deck_advanced(&mut self, e: &DeckAdvancedEvent) {
        _ = e;
    }

    /// Called after a card was promoted to front.
    fn on_item_promoted(&mut self, e: &ItemPromotedEvent) {
        _ = e;
    }

    /// Called on every Running/Paused transition.
    fn on_state_changed(&mut self, e: &StateChangedEvent) {
        _ = e;
    }

    /// Called when the engine is disposed.
    fn on_disposed(&mut self, e: &DisposedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TimerArmedEvent`].
    #[inline]
    pub fn timer_armed(&mut self, e: &TimerArmedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_armed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerCancelledEvent`].
    #[inline]
    pub fn timer_cancelled(&mut self, e: &TimerCancelledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_cancelled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerFiredEvent`].
    #[inline]
    pub fn timer_fired(&mut self, e: &TimerFiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_fired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeckAdvancedEvent`].
    #[inline]
    pub fn deck_advanced(&mut self, e: &DeckAdvancedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_deck_advanced(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ItemPromotedEvent`].
    #[inline]
    pub fn item_promoted(&mut self, e: &ItemPromotedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_item_promoted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StateChangedEvent`].
    #[inline]
    pub fn state_changed(&mut self, e: &StateChangedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_state_changed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DisposedEvent`].
    #[inline]
    pub fn disposed(&mut self, e: &DisposedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_disposed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fired() -> TimerFiredEvent {
        TimerFiredEvent {
            token: TimerToken(3),
            task: TimerTask::AutoAdvance,
            at: HostTime(3_000),
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_timer_fired(&sample_fired());
        sink.on_state_changed(&StateChangedEvent {
            from: AutoplayState::Running,
            to: AutoplayState::Paused,
            cause: StateChangeCause::Select,
            at: HostTime(10),
        });
        sink.on_disposed(&DisposedEvent { at: HostTime(20) });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.timer_fired(&sample_fired());
        tracer.deck_advanced(&DeckAdvancedEvent {
            cause: AdvanceCause::AutoplayTick,
            revision: 1,
            at: HostTime(3_000),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            fired: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
                self.fired.push(e.token.0);
            }
        }

        let mut sink = RecordingSink { fired: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.timer_fired(&sample_fired());
        drop(tracer);
        assert_eq!(sink.fired, &[3]);
    }
}
