// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them
//! back as an iterator of [`RecordedEvent`].

use vitrine_core::autoplay::AutoplayState;
use vitrine_core::deck::ItemIndex;
use vitrine_core::time::HostTime;
use vitrine_core::timer::{TimerTask, TimerToken};
use vitrine_core::trace::{
    AdvanceCause, DeckAdvancedEvent, DisposedEvent, ItemPromotedEvent, StateChangeCause,
    StateChangedEvent, TimerArmedEvent, TimerCancelledEvent, TimerFiredEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TIMER_ARMED: u8 = 1;
const TAG_TIMER_CANCELLED: u8 = 2;
const TAG_TIMER_FIRED: u8 = 3;
const TAG_DECK_ADVANCED: u8 = 4;
const TAG_ITEM_PROMOTED: u8 = 5;
const TAG_STATE_CHANGED: u8 = 6;
const TAG_DISPOSED: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_task(&mut self, task: TimerTask) {
        self.write_u8(match task {
            TimerTask::AutoAdvance => 0,
            TimerTask::AutoResume => 1,
        });
    }

    fn write_state(&mut self, state: AutoplayState) {
        self.write_u8(match state {
            AutoplayState::Running => 0,
            AutoplayState::Paused => 1,
        });
    }

    fn write_state_cause(&mut self, cause: StateChangeCause) {
        self.write_u8(match cause {
            StateChangeCause::Select => 0,
            StateChangeCause::PointerEnter => 1,
            StateChangeCause::PointerLeave => 2,
            StateChangeCause::AutoResume => 3,
        });
    }

    fn write_advance_cause(&mut self, cause: AdvanceCause) {
        self.write_u8(match cause {
            AdvanceCause::AutoplayTick => 0,
            AdvanceCause::Promotion => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        self.write_u8(TAG_TIMER_ARMED);
        self.write_u64(e.token.0);
        self.write_task(e.task);
        self.write_u64(e.deadline.ticks());
    }

    fn on_timer_cancelled(&mut self, e: &TimerCancelledEvent) {
        self.write_u8(TAG_TIMER_CANCELLED);
        self.write_u64(e.token.0);
        self.write_task(e.task);
        self.write_u64(e.at.ticks());
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        self.write_u8(TAG_TIMER_FIRED);
        self.write_u64(e.token.0);
        self.write_task(e.task);
        self.write_u64(e.at.ticks());
    }

    fn on_deck_advanced(&mut self, e: &DeckAdvancedEvent) {
        self.write_u8(TAG_DECK_ADVANCED);
        self.write_advance_cause(e.cause);
        self.write_u64(e.revision);
        self.write_u64(e.at.ticks());
    }

    fn on_item_promoted(&mut self, e: &ItemPromotedEvent) {
        self.write_u8(TAG_ITEM_PROMOTED);
        self.write_u32(e.item.0);
        self.write_u32(e.steps);
        self.write_u64(e.at.ticks());
    }

    fn on_state_changed(&mut self, e: &StateChangedEvent) {
        self.write_u8(TAG_STATE_CHANGED);
        self.write_state(e.from);
        self.write_state(e.to);
        self.write_state_cause(e.cause);
        self.write_u64(e.at.ticks());
    }

    fn on_disposed(&mut self, e: &DisposedEvent) {
        self.write_u8(TAG_DISPOSED);
        self.write_u64(e.at.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`TimerArmedEvent`].
    TimerArmed(TimerArmedEvent),
    /// A [`TimerCancelledEvent`].
    TimerCancelled(TimerCancelledEvent),
    /// A [`TimerFiredEvent`].
    TimerFired(TimerFiredEvent),
    /// A [`DeckAdvancedEvent`].
    DeckAdvanced(DeckAdvancedEvent),
    /// An [`ItemPromotedEvent`].
    ItemPromoted(ItemPromotedEvent),
    /// A [`StateChangedEvent`].
    StateChanged(StateChangedEvent),
    /// A [`DisposedEvent`].
    Disposed(DisposedEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_task(&mut self) -> Option<TimerTask> {
        Some(match self.read_u8()? {
            0 => TimerTask::AutoAdvance,
            _ => TimerTask::AutoResume,
        })
    }

    fn read_state(&mut self) -> Option<AutoplayState> {
        Some(match self.read_u8()? {
            0 => AutoplayState::Running,
            _ => AutoplayState::Paused,
        })
    }

    fn read_state_cause(&mut self) -> Option<StateChangeCause> {
        Some(match self.read_u8()? {
            0 => StateChangeCause::Select,
            1 => StateChangeCause::PointerEnter,
            2 => StateChangeCause::PointerLeave,
            _ => StateChangeCause::AutoResume,
        })
    }

    fn read_advance_cause(&mut self) -> Option<AdvanceCause> {
        Some(match self.read_u8()? {
            0 => AdvanceCause::AutoplayTick,
            _ => AdvanceCause::Promotion,
        })
    }

    fn decode_timer_armed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerArmed(TimerArmedEvent {
            token: TimerToken(self.read_u64()?),
            task: self.read_task()?,
            deadline: HostTime(self.read_u64()?),
        }))
    }

    fn decode_timer_cancelled(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerCancelled(TimerCancelledEvent {
            token: TimerToken(self.read_u64()?),
            task: self.read_task()?,
            at: HostTime(self.read_u64()?),
        }))
    }

    fn decode_timer_fired(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerFired(TimerFiredEvent {
            token: TimerToken(self.read_u64()?),
            task: self.read_task()?,
            at: HostTime(self.read_u64()?),
        }))
    }

    fn decode_deck_advanced(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DeckAdvanced(DeckAdvancedEvent {
            cause: self.read_advance_cause()?,
            revision: self.read_u64()?,
            at: HostTime(self.read_u64()?),
        }))
    }

    fn decode_item_promoted(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ItemPromoted(ItemPromotedEvent {
            item: ItemIndex(self.read_u32()?),
            steps: self.read_u32()?,
            at: HostTime(self.read_u64()?),
        }))
    }

    fn decode_state_changed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StateChanged(StateChangedEvent {
            from: self.read_state()?,
            to: self.read_state()?,
            cause: self.read_state_cause()?,
            at: HostTime(self.read_u64()?),
        }))
    }

    fn decode_disposed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Disposed(DisposedEvent {
            at: HostTime(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        match self.read_u8()? {
            TAG_TIMER_ARMED => self.decode_timer_armed(),
            TAG_TIMER_CANCELLED => self.decode_timer_cancelled(),
            TAG_TIMER_FIRED => self.decode_timer_fired(),
            TAG_DECK_ADVANCED => self.decode_deck_advanced(),
            TAG_ITEM_PROMOTED => self.decode_item_promoted(),
            TAG_STATE_CHANGED => self.decode_state_changed(),
            TAG_DISPOSED => self.decode_disposed(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::autoplay::AutoplayConfig;
    use vitrine_core::deck::Deck;
    use vitrine_core::engine::Engine;
    use vitrine_core::time::Timebase;
    use vitrine_core::trace::Tracer;
    use vitrine_sim_harness::{HostEvent, InteractionScript, SimHost};

    use super::*;

    /// Records a scripted run and decodes it back.
    fn recorded_run() -> Vec<RecordedEvent> {
        let mut recorder = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut recorder);
            let mut host = SimHost::new(HostTime(0));
            let mut engine = Engine::mount(
                AutoplayConfig::reference(Timebase::MILLIS),
                Deck::reference(),
                &mut host,
            );
            InteractionScript::new()
                .at(HostTime(4_000), HostEvent::Select(ItemIndex(2)))
                .at(HostTime(12_000), HostEvent::Dispose)
                .run(&mut engine, &mut host, HostTime(13_000), &mut tracer);
        }
        decode(recorder.as_bytes()).collect()
    }

    #[test]
    fn scripted_run_round_trips_through_the_recording() {
        let events = recorded_run();
        assert!(!events.is_empty());

        // One tick before the select (3000), one promotion at 4000, one
        // auto-resume at 7500, then ticks until dispose at 12000.
        let promoted: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::ItemPromoted(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(promoted.len(), 1);
        assert_eq!(promoted[0].item, ItemIndex(2));
        assert_eq!(promoted[0].at, HostTime(4_000));

        let resumes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::StateChanged(s) => Some(*s),
                _ => None,
            })
            .filter(|s| s.cause == StateChangeCause::AutoResume)
            .collect();
        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].at, HostTime(7_500));

        assert!(
            matches!(events.last(), Some(RecordedEvent::Disposed(d)) if d.at == HostTime(12_000)),
            "the recording ends with the disposal"
        );
    }

    #[test]
    fn fired_events_carry_their_armed_tokens() {
        let events = recorded_run();
        let armed: Vec<TimerToken> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::TimerArmed(a) => Some(a.token),
                _ => None,
            })
            .collect();
        for event in &events {
            if let RecordedEvent::TimerFired(f) = event {
                assert!(
                    armed.contains(&f.token),
                    "every fired token must have been armed first"
                );
            }
        }
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut recorder = RecorderSink::new();
        recorder.on_disposed(&DisposedEvent { at: HostTime(42) });
        let bytes = recorder.as_bytes();
        // Cut into the payload: the decoder yields nothing rather than
        // panicking.
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert!(events.is_empty());
    }
}
