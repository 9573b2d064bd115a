// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slot assignment model.
//!
//! A *deck* is a fixed, ordered collection of N display cards shown in N
//! ranked visual slots. At every instant each card occupies exactly one
//! slot and each slot holds exactly one card — the assignment is a
//! permutation of the slot set, and both mutating operations preserve
//! that by construction:
//!
//! - [`advance`](Deck::advance) rotates every card one step along the
//!   fixed cyclic slot order (front → mid → back → front for the
//!   reference three-slot deck).
//! - [`promote_to_front`](Deck::promote_to_front) repeats the same
//!   rotation until a chosen card reaches the front slot, so the
//!   non-target cards keep their relative order and the reshuffle reads
//!   as one physical rotation rather than a swap.
//!
//! Cards are addressed by [`ItemIndex`] (their original position in the
//! collection, immutable for the deck's lifetime) and positions by
//! [`Slot`] rank.

use alloc::vec::Vec;
use core::fmt;

/// Identity of a display card: its original index in the collection.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex(pub u32);

impl fmt::Debug for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemIndex({})", self.0)
    }
}

/// A visual position ranked by prominence.
///
/// Rank 0 is the front (most prominent) slot; larger ranks recede. The
/// reference three-slot deck names rank 1 *mid* and rank 2 *back*.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(pub u32);

impl Slot {
    /// The most prominent slot.
    pub const FRONT: Self = Self(0);
    /// The middle slot of the reference three-slot deck.
    pub const MID: Self = Self(1);
    /// The rearmost slot of the reference three-slot deck.
    pub const BACK: Self = Self(2);

    /// Returns the prominence rank (0 = front).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u32 {
        self.0
    }

    /// Returns whether this is the front slot.
    #[inline]
    #[must_use]
    pub const fn is_front(self) -> bool {
        self.0 == 0
    }

    /// Returns the next slot along the fixed cyclic order
    /// front → mid → … → back → front.
    #[inline]
    #[must_use]
    pub const fn next(self, slot_count: u32) -> Self {
        Self((self.0 + 1) % slot_count)
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// A bijective assignment of cards to ranked slots.
///
/// Stored as a slot array indexed by card, matching how presenters
/// iterate (per card, look up its slot's visual treatment).
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    slots: Vec<Slot>,
}

impl Deck {
    /// Creates a deck of `n` cards with card `i` in slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn new(n: u32) -> Self {
        assert!(n > 0, "a deck needs at least one card");
        let deck = Self {
            slots: (0..n).map(Slot).collect(),
        };
        debug_assert!(deck.is_bijection(), "identity assignment is a bijection");
        deck
    }

    /// Creates a deck from an explicit starting assignment, `slots[i]`
    /// being the slot of card `i`.
    ///
    /// # Panics
    ///
    /// Panics if the assignment is empty or not a bijection onto the slot
    /// set.
    #[must_use]
    pub fn from_slots(slots: &[Slot]) -> Self {
        assert!(!slots.is_empty(), "a deck needs at least one card");
        let deck = Self {
            slots: slots.to_vec(),
        };
        assert!(
            deck.is_bijection(),
            "starting assignment must be a permutation of the slot set"
        );
        deck
    }

    /// The three-card reference deck: card 0 front, card 1 back, card 2
    /// mid.
    #[must_use]
    pub fn reference() -> Self {
        Self::from_slots(&[Slot::FRONT, Slot::BACK, Slot::MID])
    }

    /// Returns the number of cards (equal to the number of slots).
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "constructors take card counts as u32, so the length fits"
    )]
    pub fn len(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Returns whether the deck has no cards. Always false: constructors
    /// reject empty decks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot of the given card.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, item: ItemIndex) -> Slot {
        self.slots[item.0 as usize]
    }

    /// Returns the card occupying the given slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[must_use]
    pub fn item_at(&self, slot: Slot) -> ItemIndex {
        assert!(slot.0 < self.len(), "slot rank out of range");
        let idx = self
            .slots
            .iter()
            .position(|s| *s == slot)
            .expect("every slot is occupied while the assignment is a bijection");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "positions index a Vec whose length fits in u32"
        )]
        let idx = idx as u32;
        ItemIndex(idx)
    }

    /// Returns whether the given card is in the front slot.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range.
    #[inline]
    #[must_use]
    pub fn is_front(&self, item: ItemIndex) -> bool {
        self.slot_of(item).is_front()
    }

    /// Returns the full assignment, `slots()[i]` being the slot of card
    /// `i`.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Rotates every card one step along the cyclic slot order.
    pub fn advance(&mut self) {
        let n = self.len();
        for slot in &mut self.slots {
            *slot = slot.next(n);
        }
        debug_assert!(
            self.is_bijection(),
            "cyclic advance of a permutation is a permutation"
        );
    }

    /// Rotates until the given card occupies the front slot, returning the
    /// number of advance steps applied (0 when the card is already front).
    ///
    /// Each advance decreases the card's cyclic distance to the front by
    /// one, so this terminates in at most N − 1 steps; the loop is bounded
    /// by the slot count regardless.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of range.
    pub fn promote_to_front(&mut self, item: ItemIndex) -> u32 {
        assert!(item.0 < self.len(), "item index out of range");
        let mut steps = 0;
        for _ in 0..self.len() {
            if self.slot_of(item).is_front() {
                break;
            }
            self.advance();
            steps += 1;
        }
        steps
    }

    /// Returns whether the assignment is a permutation of the slot set:
    /// every rank in range and no rank occupied twice.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let n = self.slots.len();
        let mut seen = alloc::vec![false; n];
        for slot in &self.slots {
            let rank = slot.0 as usize;
            if rank >= n || seen[rank] {
                return false;
            }
            seen[rank] = true;
        }
        true
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck").field("slots", &self.slots).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_deck_is_bijective() {
        let deck = Deck::new(3);
        assert!(deck.is_bijection());
        assert_eq!(deck.slot_of(ItemIndex(0)), Slot::FRONT);
        assert_eq!(deck.slot_of(ItemIndex(2)), Slot::BACK);
    }

    #[test]
    fn reference_deck_layout() {
        let deck = Deck::reference();
        assert_eq!(deck.slots(), &[Slot::FRONT, Slot::BACK, Slot::MID]);
        assert_eq!(deck.item_at(Slot::FRONT), ItemIndex(0));
        assert_eq!(deck.item_at(Slot::MID), ItemIndex(2));
        assert_eq!(deck.item_at(Slot::BACK), ItemIndex(1));
    }

    #[test]
    #[should_panic(expected = "permutation")]
    fn duplicate_slots_rejected() {
        let _ = Deck::from_slots(&[Slot::FRONT, Slot::FRONT, Slot::MID]);
    }

    #[test]
    #[should_panic(expected = "at least one card")]
    fn empty_deck_rejected() {
        let _ = Deck::new(0);
    }

    #[test]
    fn advance_rotates_all_cards() {
        let mut deck = Deck::reference();
        deck.advance();
        // front→mid, back→front, mid→back.
        assert_eq!(deck.slots(), &[Slot::MID, Slot::FRONT, Slot::BACK]);
        deck.advance();
        assert_eq!(deck.slots(), &[Slot::BACK, Slot::MID, Slot::FRONT]);
    }

    #[test]
    fn advance_n_times_is_identity() {
        let mut deck = Deck::reference();
        let original = deck.clone();
        for _ in 0..3 {
            deck.advance();
        }
        assert_eq!(deck, original, "three advances of a 3-deck cycle back");
    }

    #[test]
    fn advance_preserves_bijection_for_larger_decks() {
        let mut deck = Deck::new(7);
        for _ in 0..20 {
            deck.advance();
            assert!(deck.is_bijection());
        }
    }

    #[test]
    fn promote_front_card_is_noop() {
        let mut deck = Deck::reference();
        let before = deck.clone();
        let steps = deck.promote_to_front(ItemIndex(0));
        assert_eq!(steps, 0);
        assert_eq!(deck, before);
    }

    #[test]
    fn promote_reaches_front_within_bound() {
        for start in 0..3 {
            for target in 0..3 {
                let mut deck = Deck::reference();
                for _ in 0..start {
                    deck.advance();
                }
                let steps = deck.promote_to_front(ItemIndex(target));
                assert!(steps <= 2, "promote must finish in at most N-1 steps");
                assert!(deck.is_front(ItemIndex(target)));
                assert!(deck.is_bijection());
            }
        }
    }

    #[test]
    fn promote_matches_rotation_not_swap() {
        // From {0:back, 1:mid, 2:front}, promoting card 0 rotates once:
        // the result keeps the others in rotated order, no teleporting.
        let mut deck = Deck::from_slots(&[Slot::BACK, Slot::MID, Slot::FRONT]);
        let steps = deck.promote_to_front(ItemIndex(0));
        assert_eq!(steps, 1);
        assert_eq!(deck.slots(), &[Slot::FRONT, Slot::BACK, Slot::MID]);
    }

    #[test]
    fn single_card_deck_is_always_front() {
        let mut deck = Deck::new(1);
        deck.advance();
        assert!(deck.is_front(ItemIndex(0)));
        assert_eq!(deck.promote_to_front(ItemIndex(0)), 0);
    }

    #[test]
    fn bijection_survives_mixed_operation_sequences() {
        let mut deck = Deck::new(5);
        let script = [1_u32, 4, 0, 3, 3, 2];
        for (i, target) in script.iter().enumerate() {
            if i % 2 == 0 {
                deck.advance();
            }
            deck.promote_to_front(ItemIndex(*target));
            assert!(deck.is_bijection(), "sequence step {i} broke the bijection");
            assert!(deck.is_front(ItemIndex(*target)));
        }
    }
}
