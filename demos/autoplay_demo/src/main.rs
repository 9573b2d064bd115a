// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted carousel run that exercises the tracing and diagnostics
//! pipeline.
//!
//! Mounts the reference three-card deck on a simulated host, replays a
//! short interaction (a click on the rearmost card, a second no-op click,
//! a hover), records events to both a
//! [`PrettyPrintSink`](vitrine_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](vitrine_debug::recorder::RecorderSink), then exports
//! a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use vitrine_core::autoplay::AutoplayConfig;
use vitrine_core::deck::{Deck, ItemIndex, Slot};
use vitrine_core::engine::Engine;
use vitrine_core::style::SlotStyles;
use vitrine_core::time::{HostTime, Timebase};
use vitrine_core::trace::{
    DeckAdvancedEvent, DisposedEvent, ItemPromotedEvent, StateChangedEvent, TimerArmedEvent,
    TimerCancelledEvent, TimerFiredEvent, TraceSink, Tracer,
};
use vitrine_debug::chrome;
use vitrine_debug::pretty::PrettyPrintSink;
use vitrine_debug::recorder::RecorderSink;
use vitrine_sim_harness::{HostEvent, InteractionScript, SimHost};

const RUN_UNTIL_MS: u64 = 20_000;
const TRACE_PATH: &str = "autoplay_trace.json";

/// Fans one event stream out to the pretty printer and the recorder.
struct TeeSink {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for TeeSink {
    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        self.pretty.on_timer_armed(e);
        self.recorder.on_timer_armed(e);
    }

    fn on_timer_cancelled(&mut self, e: &TimerCancelledEvent) {
        self.pretty.on_timer_cancelled(e);
        self.recorder.on_timer_cancelled(e);
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        self.pretty.on_timer_fired(e);
        self.recorder.on_timer_fired(e);
    }

    fn on_deck_advanced(&mut self, e: &DeckAdvancedEvent) {
        self.pretty.on_deck_advanced(e);
        self.recorder.on_deck_advanced(e);
    }

    fn on_item_promoted(&mut self, e: &ItemPromotedEvent) {
        self.pretty.on_item_promoted(e);
        self.recorder.on_item_promoted(e);
    }

    fn on_state_changed(&mut self, e: &StateChangedEvent) {
        self.pretty.on_state_changed(e);
        self.recorder.on_state_changed(e);
    }

    fn on_disposed(&mut self, e: &DisposedEvent) {
        self.pretty.on_disposed(e);
        self.recorder.on_disposed(e);
    }
}

fn main() {
    let timebase = Timebase::MILLIS;

    // -- sinks -------------------------------------------------------------
    let mut tee = TeeSink {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout()), timebase),
        recorder: RecorderSink::new(),
    };
    let mut tracer = Tracer::new(&mut tee);

    // -- engine on a simulated host ----------------------------------------
    let mut host = SimHost::new(HostTime(0));
    let mut engine = Engine::mount(
        AutoplayConfig::reference(timebase),
        Deck::reference(),
        &mut host,
    );

    // -- scripted interaction ----------------------------------------------
    // Two autoplay ticks land, the user clicks the rearmost card (then
    // clicks it again, a no-op), hovers over the deck for a while, and
    // finally the page unmounts.
    let report = InteractionScript::new()
        .at(HostTime(6_500), HostEvent::Select(ItemIndex(0)))
        .at(HostTime(6_800), HostEvent::Select(ItemIndex(0)))
        .at(HostTime(12_000), HostEvent::PointerEnter)
        .at(HostTime(14_000), HostEvent::PointerLeave)
        .at(HostTime(19_000), HostEvent::Dispose)
        .run(
            &mut engine,
            &mut host,
            HostTime(RUN_UNTIL_MS),
            &mut tracer,
        );

    drop(tracer);

    println!("---");
    println!("report: {report:?}");
    println!("final assignment:");
    let styles = SlotStyles::reference();
    for (i, slot) in engine.deck().slots().iter().enumerate() {
        let style = styles.style_of(*slot);
        let front = if slot.is_front() { " (front)" } else { "" };
        println!(
            "  card {i}: slot rank {} scale={:.2} opacity={:.2}{front}",
            slot.rank(),
            style.scale,
            style.opacity,
        );
    }
    // Ticks at 3000 and 6000, the promotion at 6500, and the post-hover
    // tick at 17000 leave card 1 in front when the page unmounts.
    assert_eq!(
        engine.deck().slots(),
        &[Slot::MID, Slot::FRONT, Slot::BACK],
        "the scripted run is deterministic"
    );

    // -- chrome trace export ------------------------------------------------
    let file = File::create(TRACE_PATH).expect("failed to create trace file");
    let mut writer = BufWriter::new(file);
    chrome::export(tee.recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to export chrome trace");
    println!("wrote {TRACE_PATH}");
}
