// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation contract for rendering adapters.
//!
//! Vitrine splits platform-specific work out of the core: the engine owns
//! the assignment and scheduling state, and an adapter owns whatever
//! native scene displays it (DOM nodes, `CALayer`s, a retained-mode UI
//! tree). The adapter provides the following pieces:
//!
//! - **Input routing** — pointer enter/leave and card-selection events
//!   forwarded to [`Engine`](crate::engine::Engine) methods. This is
//!   adapter-specific and not abstracted by a trait because event
//!   plumbing differs fundamentally across hosts.
//!
//! - **Timers** — an implementation of
//!   [`TimerHost`](crate::timer::TimerHost) backed by the host event
//!   loop.
//!
//! - **Presentation** — an implementation of [`Presenter`] that reads the
//!   deck and the slot style table and mirrors them into the native
//!   scene, animating each card towards its slot's treatment.
//!
//! Adapters poll [`Engine::revision`](crate::engine::Engine::revision)
//! after delivering each event and re-apply when it changed; the engine
//! never pushes.

use crate::deck::Deck;
use crate::style::SlotStyles;

/// Mirrors deck state into a native scene.
///
/// Implementations read each card's slot from `deck` and the slot's fixed
/// treatment from `styles`; how the transition is animated (duration,
/// easing) is the adapter's concern.
pub trait Presenter {
    /// Applies the current assignment to the backing scene.
    fn apply(&mut self, deck: &Deck, styles: &SlotStyles);
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::deck::{Deck, ItemIndex, Slot};
    use crate::style::SlotStyles;

    use super::*;

    /// Records the front card of every applied assignment.
    struct RecordingPresenter {
        fronts: Vec<ItemIndex>,
    }

    impl Presenter for RecordingPresenter {
        fn apply(&mut self, deck: &Deck, styles: &SlotStyles) {
            assert_eq!(deck.len(), styles.len(), "table must cover the deck");
            self.fronts.push(deck.item_at(Slot::FRONT));
        }
    }

    #[test]
    fn presenter_reads_deck_through_the_trait() {
        let mut presenter = RecordingPresenter { fronts: Vec::new() };
        let styles = SlotStyles::reference();
        let mut deck = Deck::reference();

        presenter.apply(&deck, &styles);
        deck.advance();
        presenter.apply(&deck, &styles);

        assert_eq!(presenter.fronts, &[ItemIndex(0), ItemIndex(1)]);
    }
}
