#![forbid(unsafe_code)]

//! The item wheel shared by both shells.
//!
//! Items are laid out one per row, centered on the highlighted item: the
//! highlight sits on the middle row of the area and its neighbours fan out
//! above and below, fading with distance.

use wheelnav_core::Navigator;
use wheelnav_core::config::EmphasisConfig;
use wheelnav_core::geometry::Rect;

use crate::buffer::{Buffer, Tone};
use crate::emphasis::emphasis;

/// Row the highlighted item is drawn on.
fn center_row(area: Rect) -> u16 {
    area.y + area.height.saturating_sub(1) / 2
}

/// Screen row of item `index`, if it fits in `area`.
pub fn item_row(area: Rect, highlighted: usize, index: usize) -> Option<u16> {
    if area.is_empty() {
        return None;
    }
    let row = i64::from(center_row(area)) + index as i64 - highlighted as i64;
    (row >= i64::from(area.y) && row < i64::from(area.bottom())).then_some(row as u16)
}

/// Item drawn on screen row `y`, ignoring rows whose item is invisible.
pub fn item_at(
    area: Rect,
    nav: &Navigator,
    config: &EmphasisConfig,
    x: u16,
    y: u16,
) -> Option<usize> {
    if !area.contains(x, y) {
        return None;
    }
    let highlighted = nav.highlighted() as i64;
    let index = highlighted + i64::from(y) - i64::from(center_row(area));
    let index = usize::try_from(index).ok()?;
    if index >= nav.sections().len() {
        return None;
    }
    let distance = index.abs_diff(nav.highlighted());
    (emphasis(distance, config).tone() != Tone::Hidden).then_some(index)
}

/// Draw every visible item of `nav` into `area`.
///
/// `focused` draws a focus ring (brackets) around that item's label.
pub fn render_items(
    nav: &Navigator,
    config: &EmphasisConfig,
    focused: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
) {
    let highlighted = nav.highlighted();
    let current = nav.current_index();
    for (index, section) in nav.sections().iter().enumerate() {
        let Some(y) = item_row(area, highlighted, index) else {
            continue;
        };
        let weight = emphasis(index.abs_diff(highlighted), config);
        let tone = weight.tone();
        if tone == Tone::Hidden {
            continue;
        }
        let pointer = if index == highlighted { '›' } else { ' ' };
        let marker = if current == Some(index) { '•' } else { ' ' };
        let label = if focused == Some(index) {
            format!("{pointer}{marker}[{}]", section.label)
        } else {
            format!("{pointer}{marker} {}", section.label)
        };
        let inset = weight.inset(area.width);
        buf.set_string(area.x + inset, y, &label, tone, area.width - inset);
    }
}
