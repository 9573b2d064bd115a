// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic simulation host for vitrine tests and demos.
//!
//! [`SimHost`] implements [`TimerHost`] with a virtual clock and an
//! ordered pending-timer queue: time only moves when
//! [`run_until`](SimHost::run_until) is asked to, and due firings are
//! delivered to the engine in deadline order (FIFO among equal
//! deadlines). Recurring tasks are re-armed host-side before delivery, so
//! a cancellation issued during delivery removes the rescheduled firing
//! too.
//!
//! Every arm, cancel, and delivery is journalled. The journal feeds two
//! consumers: tests assert on it directly (e.g. "exactly one auto-resume
//! was armed"), and [`flush_trace`](SimHost::flush_trace) replays fresh
//! entries into a [`Tracer`] so the full event stream reaches diagnostic
//! sinks.
//!
//! [`InteractionScript`] replays a sorted list of timed host events
//! (selections, pointer crossings, disposal) against an engine while the
//! clock runs, and returns a [`ScriptReport`] of what happened.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use vitrine_core::autoplay::AutoplayState;
use vitrine_core::deck::ItemIndex;
use vitrine_core::engine::{Engine, SelectOutcome, TimerOutcome};
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::timer::{TimerHost, TimerTask, TimerToken};
use vitrine_core::trace::{
    AdvanceCause, DeckAdvancedEvent, DisposedEvent, ItemPromotedEvent, StateChangeCause,
    StateChangedEvent, TimerArmedEvent, TimerCancelledEvent, TimerFiredEvent, Tracer,
};

/// What happened to a timer, as recorded in the host journal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerJournalKind {
    /// The timer was armed.
    Armed,
    /// The timer was cancelled before firing.
    Cancelled,
    /// A firing was delivered to the engine.
    Fired,
}

/// One journalled timer lifecycle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerJournalEntry {
    /// Which lifecycle step this is.
    pub kind: TimerJournalKind,
    /// The timer's handle.
    pub token: TimerToken,
    /// Which task the timer drives.
    pub task: TimerTask,
    /// Virtual time the step happened.
    pub at: HostTime,
    /// For [`Armed`](TimerJournalKind::Armed), the scheduled (first) fire
    /// time; equal to `at` for the other kinds.
    pub deadline: HostTime,
}

struct ArmedTimer {
    token: TimerToken,
    task: TimerTask,
    deadline: HostTime,
    /// Re-arm interval for recurring tasks; `None` for one-shots.
    period: Option<Duration>,
    /// Arm order, for FIFO delivery among equal deadlines.
    seq: u64,
}

/// A virtual-clock [`TimerHost`] delivering due firings deterministically.
pub struct SimHost {
    now: HostTime,
    next_token: u64,
    next_seq: u64,
    armed: Vec<ArmedTimer>,
    journal: Vec<TimerJournalEntry>,
    /// Journal length already replayed into a tracer.
    flushed: usize,
    advances: u64,
    auto_resumes: u64,
    stale_firings: u64,
}

impl SimHost {
    /// Creates a host with its clock at `start`.
    #[must_use]
    pub fn new(start: HostTime) -> Self {
        Self {
            now: start,
            next_token: 1,
            next_seq: 0,
            armed: Vec::new(),
            journal: Vec::new(),
            flushed: 0,
            advances: 0,
            auto_resumes: 0,
            stale_firings: 0,
        }
    }

    /// Current virtual time.
    #[inline]
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// Number of currently armed timers.
    #[inline]
    #[must_use]
    pub fn armed_len(&self) -> usize {
        self.armed.len()
    }

    /// Number of currently armed timers driving the given task.
    #[must_use]
    pub fn armed_count(&self, task: TimerTask) -> usize {
        self.armed.iter().filter(|t| t.task == task).count()
    }

    /// Earliest pending deadline, if any timer is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.armed.iter().map(|t| t.deadline).min()
    }

    /// Recurring advances delivered so far.
    #[inline]
    #[must_use]
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Auto-resume firings delivered so far.
    #[inline]
    #[must_use]
    pub fn auto_resumes(&self) -> u64 {
        self.auto_resumes
    }

    /// Deliveries the engine answered as stale.
    #[inline]
    #[must_use]
    pub fn stale_firings(&self) -> u64 {
        self.stale_firings
    }

    /// The full timer lifecycle journal.
    #[inline]
    #[must_use]
    pub fn journal(&self) -> &[TimerJournalEntry] {
        &self.journal
    }

    /// Replays journal entries not yet seen by a tracer.
    pub fn flush_trace(&mut self, tracer: &mut Tracer<'_>) {
        for entry in &self.journal[self.flushed..] {
            match entry.kind {
                TimerJournalKind::Armed => tracer.timer_armed(&TimerArmedEvent {
                    token: entry.token,
                    task: entry.task,
                    deadline: entry.deadline,
                }),
                TimerJournalKind::Cancelled => tracer.timer_cancelled(&TimerCancelledEvent {
                    token: entry.token,
                    task: entry.task,
                    at: entry.at,
                }),
                TimerJournalKind::Fired => tracer.timer_fired(&TimerFiredEvent {
                    token: entry.token,
                    task: entry.task,
                    at: entry.at,
                }),
            }
        }
        self.flushed = self.journal.len();
    }

    /// Advances the virtual clock to `until`, delivering every due firing
    /// to `engine` in deadline order and tracing the results.
    ///
    /// The deck is checked to still be a permutation after every
    /// delivery.
    ///
    /// # Panics
    ///
    /// Panics if a delivery leaves the deck in a non-bijective state.
    pub fn run_until(&mut self, engine: &mut Engine, until: HostTime, tracer: &mut Tracer<'_>) {
        self.flush_trace(tracer);
        while let Some(idx) = self.next_due(until) {
            let timer = self.armed.remove(idx);
            self.now = timer.deadline;

            // Recurring tasks are rescheduled before delivery so that a
            // cancel issued inside the engine also removes the next firing.
            if let Some(period) = timer.period {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.armed.push(ArmedTimer {
                    token: timer.token,
                    task: timer.task,
                    deadline: timer.deadline + period,
                    period: Some(period),
                    seq,
                });
            }

            self.record(TimerJournalKind::Fired, timer.token, timer.task, self.now);
            match engine.on_timer(timer.token, self) {
                TimerOutcome::Advanced { revision } => {
                    self.advances += 1;
                    self.flush_trace(tracer);
                    tracer.deck_advanced(&DeckAdvancedEvent {
                        cause: AdvanceCause::AutoplayTick,
                        revision,
                        at: self.now,
                    });
                }
                TimerOutcome::Resumed => {
                    self.auto_resumes += 1;
                    self.flush_trace(tracer);
                    tracer.state_changed(&StateChangedEvent {
                        from: AutoplayState::Paused,
                        to: AutoplayState::Running,
                        cause: StateChangeCause::AutoResume,
                        at: self.now,
                    });
                }
                TimerOutcome::Stale => {
                    self.stale_firings += 1;
                    self.flush_trace(tracer);
                }
            }
            assert!(
                engine.deck().is_bijection(),
                "deck must remain a permutation after every delivery"
            );
        }
        if until > self.now {
            self.now = until;
        }
    }

    fn next_due(&self, until: HostTime) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, timer) in self.armed.iter().enumerate() {
            if timer.deadline > until {
                continue;
            }
            best = match best {
                None => Some(i),
                Some(b) => {
                    let held = &self.armed[b];
                    if (timer.deadline, timer.seq) < (held.deadline, held.seq) {
                        Some(i)
                    } else {
                        Some(b)
                    }
                }
            };
        }
        best
    }

    fn record(&mut self, kind: TimerJournalKind, token: TimerToken, task: TimerTask, at: HostTime) {
        self.journal.push(TimerJournalEntry {
            kind,
            token,
            task,
            at,
            deadline: at,
        });
    }

    fn arm(&mut self, delay: Duration, task: TimerTask, period: Option<Duration>) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now + delay;
        self.armed.push(ArmedTimer {
            token,
            task,
            deadline,
            period,
            seq,
        });
        self.journal.push(TimerJournalEntry {
            kind: TimerJournalKind::Armed,
            token,
            task,
            at: self.now,
            deadline,
        });
        token
    }
}

impl TimerHost for SimHost {
    fn arm_periodic(&mut self, interval: Duration, task: TimerTask) -> TimerToken {
        assert!(
            interval.ticks() > 0,
            "a recurring task needs a nonzero interval"
        );
        self.arm(interval, task, Some(interval))
    }

    fn arm_once(&mut self, delay: Duration, task: TimerTask) -> TimerToken {
        self.arm(delay, task, None)
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(idx) = self.armed.iter().position(|t| t.token == token) {
            let timer = self.armed.remove(idx);
            self.record(TimerJournalKind::Cancelled, timer.token, timer.task, self.now);
        }
    }
}

impl core::fmt::Debug for SimHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimHost")
            .field("now", &self.now)
            .field("armed", &self.armed.len())
            .field("advances", &self.advances)
            .field("auto_resumes", &self.auto_resumes)
            .field("stale_firings", &self.stale_firings)
            .finish_non_exhaustive()
    }
}

/// A user-visible interaction to replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// The user selects a card.
    Select(ItemIndex),
    /// The pointer enters the carousel area.
    PointerEnter,
    /// The pointer leaves the carousel area.
    PointerLeave,
    /// The host tears the engine down.
    Dispose,
}

/// One timed interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedEvent {
    /// When the interaction happens. Timers due at the same instant fire
    /// first.
    pub at: HostTime,
    /// The interaction.
    pub event: HostEvent,
}

/// Tallies of one scripted run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Recurring autoplay advances delivered.
    pub advances: u64,
    /// Auto-resume firings delivered.
    pub auto_resumes: u64,
    /// Deliveries the engine answered as stale.
    pub stale_firings: u64,
    /// Selections that promoted a card.
    pub promotions: u64,
    /// Total rotation steps applied by promotions.
    pub promotion_steps: u64,
    /// Selections of the already-front card (complete no-ops).
    pub noop_selections: u64,
    /// `Running` → `Paused` transitions.
    pub pauses: u64,
    /// Immediate (pointer-leave) `Paused` → `Running` transitions.
    pub resumes_immediate: u64,
    /// Disposal events applied.
    pub disposals: u64,
}

/// A sorted sequence of timed interactions to replay against an engine.
#[derive(Clone, Debug, Default)]
pub struct InteractionScript {
    events: Vec<ScriptedEvent>,
}

impl InteractionScript {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an interaction at the given virtual time.
    #[must_use]
    pub fn at(mut self, at: HostTime, event: HostEvent) -> Self {
        self.events.push(ScriptedEvent { at, event });
        self
    }

    /// Replays the script against `engine`, then lets the clock run to
    /// `until`. Events are applied in time order (stable for ties).
    pub fn run(
        mut self,
        engine: &mut Engine,
        host: &mut SimHost,
        until: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> ScriptReport {
        self.events.sort_by_key(|e| e.at);
        let mut report = ScriptReport::default();

        for scripted in &self.events {
            host.run_until(engine, scripted.at, tracer);
            match scripted.event {
                HostEvent::Select(item) => {
                    let outcome = engine.select_item(item, host);
                    host.flush_trace(tracer);
                    match outcome {
                        SelectOutcome::Promoted {
                            steps,
                            state_changed,
                        } => {
                            report.promotions += 1;
                            report.promotion_steps += u64::from(steps);
                            tracer.item_promoted(&ItemPromotedEvent {
                                item,
                                steps,
                                at: host.now(),
                            });
                            if state_changed {
                                report.pauses += 1;
                                tracer.state_changed(&StateChangedEvent {
                                    from: AutoplayState::Running,
                                    to: AutoplayState::Paused,
                                    cause: StateChangeCause::Select,
                                    at: host.now(),
                                });
                            }
                        }
                        SelectOutcome::AlreadyFront => report.noop_selections += 1,
                        SelectOutcome::Ignored => {}
                    }
                }
                HostEvent::PointerEnter => {
                    let paused = engine.pointer_enter(host);
                    host.flush_trace(tracer);
                    if paused {
                        report.pauses += 1;
                        tracer.state_changed(&StateChangedEvent {
                            from: AutoplayState::Running,
                            to: AutoplayState::Paused,
                            cause: StateChangeCause::PointerEnter,
                            at: host.now(),
                        });
                    }
                }
                HostEvent::PointerLeave => {
                    let resumed = engine.pointer_leave(host);
                    host.flush_trace(tracer);
                    if resumed {
                        report.resumes_immediate += 1;
                        tracer.state_changed(&StateChangedEvent {
                            from: AutoplayState::Paused,
                            to: AutoplayState::Running,
                            cause: StateChangeCause::PointerLeave,
                            at: host.now(),
                        });
                    }
                }
                HostEvent::Dispose => {
                    engine.dispose(host);
                    host.flush_trace(tracer);
                    report.disposals += 1;
                    tracer.disposed(&DisposedEvent { at: host.now() });
                }
            }
        }

        host.run_until(engine, until, tracer);
        report.advances = host.advances();
        report.auto_resumes = host.auto_resumes();
        report.stale_firings = host.stale_firings();
        report
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::autoplay::AutoplayConfig;
    use vitrine_core::deck::{Deck, Slot};
    use vitrine_core::time::Timebase;

    use super::*;

    fn mounted(host: &mut SimHost) -> Engine {
        Engine::mount(
            AutoplayConfig::reference(Timebase::MILLIS),
            Deck::reference(),
            host,
        )
    }

    #[test]
    fn autoplay_cadence_follows_the_interval() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        host.run_until(&mut engine, HostTime(10_000), &mut tracer);
        assert_eq!(host.advances(), 3, "ticks at 3000, 6000, 9000");
        assert_eq!(host.now(), HostTime(10_000));
        assert_eq!(engine.revision(), 3);
        // 3 advances of a 3-deck return the starting assignment.
        assert_eq!(engine.deck(), &Deck::reference());
    }

    #[test]
    fn clock_does_not_move_backwards() {
        let mut host = SimHost::new(HostTime(5_000));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();
        host.run_until(&mut engine, HostTime(1_000), &mut tracer);
        assert_eq!(host.now(), HostTime(5_000));
        assert_eq!(host.advances(), 0);
    }

    #[test]
    fn equal_deadlines_fire_in_arm_order() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();
        // Two foreign one-shots at the same instant; the engine answers
        // stale for both, and the journal shows FIFO delivery.
        let first = host.arm_once(Duration(100), TimerTask::AutoResume);
        let second = host.arm_once(Duration(100), TimerTask::AutoResume);
        host.run_until(&mut engine, HostTime(200), &mut tracer);
        assert_eq!(host.stale_firings(), 2);

        let fired: Vec<_> = host
            .journal()
            .iter()
            .filter(|e| e.kind == TimerJournalKind::Fired && e.task == TimerTask::AutoResume)
            .map(|e| e.token)
            .collect();
        assert_eq!(fired, &[first, second]);
    }

    #[test]
    fn debounced_resume_fires_once_from_the_second_schedule() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        let report = InteractionScript::new()
            .at(HostTime(1_000), HostEvent::Select(ItemIndex(1)))
            .at(HostTime(2_000), HostEvent::Select(ItemIndex(2)))
            .run(&mut engine, &mut host, HostTime(12_000), &mut tracer);

        assert_eq!(report.promotions, 2);
        assert_eq!(report.pauses, 1, "the second select found it paused");
        assert_eq!(report.auto_resumes, 1, "running is entered exactly once");

        // Resume at 2000 + 3500 = 5500; fresh ticks at 8500 and 11500.
        assert_eq!(report.advances, 2);
        assert_eq!(engine.state(), AutoplayState::Running);

        let armed_resumes = host
            .journal()
            .iter()
            .filter(|e| e.kind == TimerJournalKind::Armed && e.task == TimerTask::AutoResume)
            .count();
        let cancelled_resumes = host
            .journal()
            .iter()
            .filter(|e| e.kind == TimerJournalKind::Cancelled && e.task == TimerTask::AutoResume)
            .count();
        assert_eq!(armed_resumes, 2);
        assert_eq!(cancelled_resumes, 1, "the first schedule was replaced");
    }

    #[test]
    fn pointer_leave_preempts_the_scheduled_resume() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        let report = InteractionScript::new()
            .at(HostTime(1_000), HostEvent::Select(ItemIndex(1)))
            .at(HostTime(1_500), HostEvent::PointerEnter)
            .at(HostTime(2_000), HostEvent::PointerLeave)
            .run(&mut engine, &mut host, HostTime(6_000), &mut tracer);

        assert_eq!(report.resumes_immediate, 1);
        assert_eq!(report.auto_resumes, 0, "the 4500 resume never fires");
        assert_eq!(report.stale_firings, 0, "cancelled timers do not fire at all");
        // Fresh tick from 2000: one advance at 5000.
        assert_eq!(report.advances, 1);
        assert_eq!(engine.state(), AutoplayState::Running);
    }

    #[test]
    fn hover_pauses_without_scheduling_a_resume() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        let report = InteractionScript::new()
            .at(HostTime(500), HostEvent::PointerEnter)
            .at(HostTime(20_000), HostEvent::PointerLeave)
            .run(&mut engine, &mut host, HostTime(21_000), &mut tracer);

        assert_eq!(report.pauses, 1);
        assert_eq!(report.advances, 0, "nothing advances under the pointer");
        assert_eq!(report.auto_resumes, 0);
        assert_eq!(host.armed_count(TimerTask::AutoResume), 0);
    }

    #[test]
    fn dispose_stops_the_world() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        let report = InteractionScript::new()
            .at(HostTime(4_000), HostEvent::Dispose)
            .run(&mut engine, &mut host, HostTime(30_000), &mut tracer);

        assert_eq!(report.disposals, 1);
        assert_eq!(report.advances, 1, "only the 3000 tick lands");
        assert_eq!(host.armed_len(), 0, "dispose cancelled everything");
        assert!(engine.is_disposed());
    }

    #[test]
    fn worked_example_with_real_timing() {
        let mut host = SimHost::new(HostTime(0));
        let mut engine = mounted(&mut host);
        let mut tracer = Tracer::none();

        // Two autoplay ticks land (3000, 6000), then the user clicks the
        // rearmost card twice.
        let report = InteractionScript::new()
            .at(HostTime(6_500), HostEvent::Select(ItemIndex(0)))
            .at(HostTime(6_800), HostEvent::Select(ItemIndex(0)))
            .run(&mut engine, &mut host, HostTime(7_000), &mut tracer);

        assert_eq!(report.advances, 2);
        assert_eq!(report.promotions, 1);
        assert_eq!(report.noop_selections, 1, "second click is a no-op");
        assert_eq!(
            engine.deck().slots(),
            &[Slot::FRONT, Slot::BACK, Slot::MID]
        );
        assert_eq!(engine.state(), AutoplayState::Paused);
        assert!(engine.pending_resume(), "the original schedule is intact");
        // The untouched resume from 6500 fires at 10000.
        host.run_until(&mut engine, HostTime(10_500), &mut tracer);
        assert_eq!(host.auto_resumes(), 1);
        assert_eq!(engine.state(), AutoplayState::Running);
    }
}
