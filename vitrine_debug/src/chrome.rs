// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Paused stretches become begin/end spans; everything else becomes
//! instant events. Timestamps are converted to microseconds using the
//! provided [`Timebase`].
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use vitrine_core::autoplay::AutoplayState;
use vitrine_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable
/// for loading into `chrome://tracing` or
/// [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::TimerArmed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TimerArmed",
                    "cat": "Timer",
                    "ts": ticks_to_us(e.deadline.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "token": e.token.0,
                        "task": format!("{:?}", e.task),
                    }
                }));
            }
            RecordedEvent::TimerCancelled(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TimerCancelled",
                    "cat": "Timer",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "token": e.token.0,
                        "task": format!("{:?}", e.task),
                    }
                }));
            }
            RecordedEvent::TimerFired(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TimerFired",
                    "cat": "Timer",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "token": e.token.0,
                        "task": format!("{:?}", e.task),
                    }
                }));
            }
            RecordedEvent::DeckAdvanced(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DeckAdvanced",
                    "cat": "Deck",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "revision": e.revision,
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::ItemPromoted(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ItemPromoted",
                    "cat": "Deck",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "item": e.item.0,
                        "steps": e.steps,
                    }
                }));
            }
            RecordedEvent::StateChanged(e) => {
                // A Paused stretch renders as a span on the scheduler
                // track.
                let ph = match e.to {
                    AutoplayState::Paused => "B",
                    AutoplayState::Running => "E",
                };
                events.push(json!({
                    "ph": ph,
                    "name": "Paused",
                    "cat": "Scheduler",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::Disposed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Disposed",
                    "cat": "Scheduler",
                    "ts": ticks_to_us(e.at.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::from)?;
    writer.flush()
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> u64 {
    timebase.ticks_to_nanos(ticks) / 1_000
}

#[cfg(test)]
mod tests {
    use vitrine_core::deck::ItemIndex;
    use vitrine_core::time::HostTime;
    use vitrine_core::trace::{
        DisposedEvent, ItemPromotedEvent, StateChangeCause, StateChangedEvent, TraceSink,
    };

    use crate::recorder::RecorderSink;

    use super::*;

    #[test]
    fn export_produces_a_json_event_array() {
        let mut recorder = RecorderSink::new();
        recorder.on_item_promoted(&ItemPromotedEvent {
            item: ItemIndex(2),
            steps: 1,
            at: HostTime(4_000),
        });
        recorder.on_state_changed(&StateChangedEvent {
            from: AutoplayState::Running,
            to: AutoplayState::Paused,
            cause: StateChangeCause::Select,
            at: HostTime(4_000),
        });
        recorder.on_state_changed(&StateChangedEvent {
            from: AutoplayState::Paused,
            to: AutoplayState::Running,
            cause: StateChangeCause::AutoResume,
            at: HostTime(7_500),
        });
        recorder.on_disposed(&DisposedEvent { at: HostTime(9_000) });

        let mut out = Vec::new();
        export(recorder.as_bytes(), Timebase::MILLIS, &mut out).unwrap();

        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0]["name"], "ItemPromoted");
        assert_eq!(parsed[0]["ts"], 4_000_000, "ms ticks become µs timestamps");
        assert_eq!(parsed[1]["ph"], "B", "entering Paused opens a span");
        assert_eq!(parsed[2]["ph"], "E", "resuming closes it");
        assert_eq!(parsed[3]["name"], "Disposed");
    }
}
