// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slot visual treatment.
//!
//! Each slot rank has a fixed look: a fractional offset from the card
//! anchor, a scale, opacity, stacking order, rotation, brightness, and
//! border opacity. The engine never reads these — they are the data the
//! presentation adapter feeds into its animation layer when a card lands
//! in a slot.
//!
//! [`SlotStyle::affine`] composes the geometric part of a treatment into
//! a single [`kurbo::Affine`] (translate ∘ rotate-about-center ∘
//! scale-about-center), leaving opacity, brightness, and stacking to the
//! adapter's own channels.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Vec2};

use crate::deck::Slot;

/// The fixed visual treatment of one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotStyle {
    /// Horizontal offset as a fraction of the card width.
    pub x_frac: f64,
    /// Vertical offset as a fraction of the card height.
    pub y_frac: f64,
    /// Uniform scale about the card center.
    pub scale: f64,
    /// Card opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stacking order; larger draws on top.
    pub z_index: i32,
    /// Rotation about the card center, in degrees.
    pub rotation_deg: f64,
    /// Brightness filter in `[0, 1]`, 1 being unfiltered.
    pub brightness: f64,
    /// Border opacity in `[0, 1]`.
    pub border_opacity: f64,
}

impl SlotStyle {
    /// Composes the geometric treatment for a card of the given size:
    /// fractional translation, then rotation and scale about the card
    /// center.
    #[must_use]
    pub fn affine(&self, card_width: f64, card_height: f64) -> Affine {
        let center = Point::new(card_width / 2.0, card_height / 2.0);
        Affine::translate(Vec2::new(
            self.x_frac * card_width,
            self.y_frac * card_height,
        )) * Affine::rotate_about(self.rotation_deg.to_radians(), center)
            * Affine::scale_about(self.scale, center)
    }
}

/// Treatment of the front slot in the reference deck: full size, no
/// offset, top of the stack.
pub const FRONT_STYLE: SlotStyle = SlotStyle {
    x_frac: 0.0,
    y_frac: 0.0,
    scale: 1.0,
    opacity: 1.0,
    z_index: 30,
    rotation_deg: 0.0,
    brightness: 1.0,
    border_opacity: 1.0,
};

/// Treatment of the mid slot in the reference deck.
pub const MID_STYLE: SlotStyle = SlotStyle {
    x_frac: 0.076,
    y_frac: 0.055,
    scale: 0.81,
    opacity: 0.70,
    z_index: 20,
    rotation_deg: 5.0,
    brightness: 0.72,
    border_opacity: 0.5,
};

/// Treatment of the back slot in the reference deck.
pub const BACK_STYLE: SlotStyle = SlotStyle {
    x_frac: -0.06,
    y_frac: 0.04,
    scale: 0.66,
    opacity: 0.42,
    z_index: 10,
    rotation_deg: -6.0,
    brightness: 0.48,
    border_opacity: 0.2,
};

/// The per-slot treatment table of one carousel, indexed by slot rank.
#[derive(Clone, PartialEq)]
pub struct SlotStyles {
    styles: Vec<SlotStyle>,
}

impl SlotStyles {
    /// Creates a table from per-rank styles, `styles[r]` being the
    /// treatment of rank `r`.
    ///
    /// # Panics
    ///
    /// Panics if `styles` is empty.
    #[must_use]
    pub fn new(styles: Vec<SlotStyle>) -> Self {
        assert!(!styles.is_empty(), "a style table needs at least one slot");
        Self { styles }
    }

    /// The reference three-slot table (front, mid, back).
    #[must_use]
    pub fn reference() -> Self {
        Self::new(alloc::vec![FRONT_STYLE, MID_STYLE, BACK_STYLE])
    }

    /// Returns the number of slots covered.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "style tables mirror deck sizes, which are u32 card counts"
    )]
    pub fn len(&self) -> u32 {
        self.styles.len() as u32
    }

    /// Returns whether the table is empty. Always false: the constructor
    /// rejects empty tables.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Returns the treatment of the given slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn style_of(&self, slot: Slot) -> &SlotStyle {
        &self.styles[slot.rank() as usize]
    }
}

impl fmt::Debug for SlotStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotStyles")
            .field("styles", &self.styles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_ranks() {
        let styles = SlotStyles::reference();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles.style_of(Slot::FRONT), &FRONT_STYLE);
        assert_eq!(styles.style_of(Slot::MID), &MID_STYLE);
        assert_eq!(styles.style_of(Slot::BACK), &BACK_STYLE);
    }

    #[test]
    fn prominence_decreases_with_rank() {
        let styles = SlotStyles::reference();
        let ranks = [Slot::FRONT, Slot::MID, Slot::BACK];
        for pair in ranks.windows(2) {
            let nearer = styles.style_of(pair[0]);
            let farther = styles.style_of(pair[1]);
            assert!(nearer.scale > farther.scale);
            assert!(nearer.opacity > farther.opacity);
            assert!(nearer.z_index > farther.z_index);
            assert!(nearer.brightness > farther.brightness);
        }
    }

    #[test]
    fn front_affine_is_identity() {
        let a = FRONT_STYLE.affine(540.0, 546.0);
        let p = a * Point::new(123.0, 456.0);
        assert!((p.x - 123.0).abs() < 1e-9);
        assert!((p.y - 456.0).abs() < 1e-9);
    }

    #[test]
    fn affine_fixes_center_up_to_translation() {
        // Rotation and scale are about the card center, so the center
        // only moves by the fractional offset.
        let (w, h) = (540.0, 546.0);
        let a = MID_STYLE.affine(w, h);
        let center = Point::new(w / 2.0, h / 2.0);
        let mapped = a * center;
        assert!((mapped.x - (center.x + MID_STYLE.x_frac * w)).abs() < 1e-9);
        assert!((mapped.y - (center.y + MID_STYLE.y_frac * h)).abs() < 1e-9);
    }

    #[test]
    fn affine_scales_distances_from_center() {
        let (w, h) = (100.0, 100.0);
        let a = BACK_STYLE.affine(w, h);
        let center = a * Point::new(50.0, 50.0);
        let edge = a * Point::new(100.0, 50.0);
        let dist = ((edge.x - center.x).powi(2) + (edge.y - center.y).powi(2)).sqrt();
        assert!(
            (dist - 50.0 * BACK_STYLE.scale).abs() < 1e-9,
            "distances from the center scale by the slot scale"
        );
    }

    #[test]
    #[should_panic(expected = "at least one slot")]
    fn empty_table_rejected() {
        let _ = SlotStyles::new(Vec::new());
    }
}
