// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and state machine for the vitrine slot-deck carousel.
//!
//! `vitrine_core` governs which of N display cards occupies which of N
//! ranked visual slots over time: autoplay rotation, click-to-front
//! promotion, and pause/resume scheduling. It is `no_std` compatible (with
//! `alloc`) and contains no platform timers of its own — the embedding
//! event loop supplies them through the [`timer::TimerHost`] seam.
//!
//! # Architecture
//!
//! The crate is organized around an event loop that feeds host timer
//! firings and pointer/selection input into one engine instance:
//!
//! ```text
//!   Host event loop (timers, input)
//!       │
//!       ▼
//!   Engine::on_timer / select_item / pointer_* ──► Deck mutation
//!       │                                              │
//!       │ arm / cancel                                 ▼
//!       ▼                                      revision bump
//!   TimerHost ◄── Autoplay state machine              │
//!                                                      ▼
//!                              Presenter::apply(deck, styles)
//! ```
//!
//! **[`deck`]** — The assignment model: a bijective map from card to
//! ranked slot, mutated only by cyclic advance and promote-to-front.
//!
//! **[`autoplay`]** — Running/Paused scheduling state: one recurring
//! advance task while running, at most one pending auto-resume task,
//! debounced rescheduling.
//!
//! **[`engine`]** — Ties deck and autoplay together behind the interface
//! hosts call; every timer firing is routed through a single
//! token-dispatched entry point.
//!
//! **[`timer`]** — The [`TimerHost`](timer::TimerHost) trait that
//! embedding event loops implement to provide cancellable scheduled tasks.
//!
//! **[`time`]** — Monotonic host time, durations, and timebase conversion.
//!
//! **[`style`]** — The per-slot visual treatment table presenters consume.
//!
//! **[`presenter`]** — The [`Presenter`](presenter::Presenter) trait that
//! rendering adapters implement to mirror deck state into a native scene.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for engine instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod deck;
pub mod engine;
pub mod presenter;
pub mod style;
pub mod time;
pub mod timer;
pub mod trace;
