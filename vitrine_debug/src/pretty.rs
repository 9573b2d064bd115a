// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).
//! Timestamps are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use vitrine_core::autoplay::AutoplayState;
use vitrine_core::time::{HostTime, Timebase};
use vitrine_core::timer::TimerTask;
use vitrine_core::trace::{
    AdvanceCause, DeckAdvancedEvent, DisposedEvent, ItemPromotedEvent, StateChangeCause,
    StateChangedEvent, TimerArmedEvent, TimerCancelledEvent, TimerFiredEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1_000_000.0
    }
}

fn task_name(task: TimerTask) -> &'static str {
    match task {
        TimerTask::AutoAdvance => "advance",
        TimerTask::AutoResume => "resume",
    }
}

fn state_name(state: AutoplayState) -> &'static str {
    match state {
        AutoplayState::Running => "running",
        AutoplayState::Paused => "paused",
    }
}

fn state_cause_name(cause: StateChangeCause) -> &'static str {
    match cause {
        StateChangeCause::Select => "select",
        StateChangeCause::PointerEnter => "pointer-enter",
        StateChangeCause::PointerLeave => "pointer-leave",
        StateChangeCause::AutoResume => "auto-resume",
    }
}

fn advance_cause_name(cause: AdvanceCause) -> &'static str {
    match cause {
        AdvanceCause::AutoplayTick => "autoplay",
        AdvanceCause::Promotion => "promotion",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        let _ = writeln!(
            self.writer,
            "[timer:armed] token={} task={} deadline={:.1}ms",
            e.token.0,
            task_name(e.task),
            self.host_ms(e.deadline),
        );
    }

    fn on_timer_cancelled(&mut self, e: &TimerCancelledEvent) {
        let _ = writeln!(
            self.writer,
            "[timer:cancelled] token={} task={} at {:.1}ms",
            e.token.0,
            task_name(e.task),
            self.host_ms(e.at),
        );
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        let _ = writeln!(
            self.writer,
            "[timer:fired] token={} task={} at {:.1}ms",
            e.token.0,
            task_name(e.task),
            self.host_ms(e.at),
        );
    }

    fn on_deck_advanced(&mut self, e: &DeckAdvancedEvent) {
        let _ = writeln!(
            self.writer,
            "[deck] rev={} cause={} at {:.1}ms",
            e.revision,
            advance_cause_name(e.cause),
            self.host_ms(e.at),
        );
    }

    fn on_item_promoted(&mut self, e: &ItemPromotedEvent) {
        let _ = writeln!(
            self.writer,
            "[promote] item={} steps={} at {:.1}ms",
            e.item.0,
            e.steps,
            self.host_ms(e.at),
        );
    }

    fn on_state_changed(&mut self, e: &StateChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[state] {}->{} cause={} at {:.1}ms",
            state_name(e.from),
            state_name(e.to),
            state_cause_name(e.cause),
            self.host_ms(e.at),
        );
    }

    fn on_disposed(&mut self, e: &DisposedEvent) {
        let _ = writeln!(self.writer, "[disposed] at {:.1}ms", self.host_ms(e.at));
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::timer::TimerToken;

    use super::*;

    #[test]
    fn pretty_print_fired_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MILLIS);
        sink.on_timer_fired(&TimerFiredEvent {
            token: TimerToken(7),
            task: TimerTask::AutoAdvance,
            at: HostTime(3_000),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[timer:fired]"), "got: {output}");
        assert!(output.contains("token=7"), "got: {output}");
        assert!(output.contains("3000.0ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_state_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MILLIS);
        sink.on_state_changed(&StateChangedEvent {
            from: AutoplayState::Running,
            to: AutoplayState::Paused,
            cause: StateChangeCause::PointerEnter,
            at: HostTime(1_500),
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("running->paused"), "got: {output}");
        assert!(output.contains("cause=pointer-enter"), "got: {output}");
    }
}
