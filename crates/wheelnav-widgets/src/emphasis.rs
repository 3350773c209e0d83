#![forbid(unsafe_code)]

//! Distance-based de-emphasis of navigator items.
//!
//! Items are drawn smaller and fainter the farther they sit from the
//! highlight. Both quantities are continuous, non-increasing functions of
//! the distance `|index - highlighted|`; terminals quantize them into a
//! [`Tone`] and a horizontal inset.
//!
//! # Invariants
//!
//! - `scale` is in `[min_scale, 1.0]`, `opacity` in `[min_opacity, 1.0]`
//!   (both floors clamped into `[0, 1]`).
//! - Distance 0 yields `scale == opacity == 1.0`.
//! - Neither value increases with distance.

use wheelnav_core::config::EmphasisConfig;

use crate::buffer::Tone;

/// Visual weight of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub scale: f32,
    pub opacity: f32,
}

impl Emphasis {
    /// Full weight.
    pub const FULL: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Quantize opacity into a tone.
    pub fn tone(self) -> Tone {
        match self.opacity {
            o if o >= 0.95 => Tone::Accent,
            o if o >= 0.6 => Tone::Normal,
            o if o >= 0.35 => Tone::Muted,
            o if o > 0.05 => Tone::Faint,
            _ => Tone::Hidden,
        }
    }

    /// Columns to indent on the left of a `width`-wide row.
    pub fn inset(self, width: u16) -> u16 {
        let shrink = (1.0 - self.scale).clamp(0.0, 1.0);
        let cols = (shrink * f32::from(width) / 2.0).round();
        (cols as u16).min(width / 2)
    }
}

fn falloff(distance: usize, rate: f32, floor: f32) -> f32 {
    let floor = floor.clamp(0.0, 1.0);
    let rate = rate.max(0.0);
    (1.0 - rate * distance as f32).clamp(floor, 1.0)
}

/// Emphasis for an item `distance` positions from the highlight.
pub fn emphasis(distance: usize, config: &EmphasisConfig) -> Emphasis {
    Emphasis {
        scale: falloff(distance, config.scale_falloff, config.min_scale),
        opacity: falloff(distance, config.opacity_falloff, config.min_opacity),
    }
}
