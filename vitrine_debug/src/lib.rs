// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for vitrine
//! diagnostics.
//!
//! Three consumers of the [`TraceSink`](vitrine_core::trace::TraceSink)
//! event stream:
//!
//! - [`pretty`] — one human-readable line per event, to any writer.
//! - [`recorder`] — compact binary recording with a decode iterator.
//! - [`chrome`] — Chrome Trace Event Format export of a recording, for
//!   `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).

pub mod chrome;
pub mod pretty;
pub mod recorder;
