#![forbid(unsafe_code)]

//! Terminal presentation shells for the WheelNav navigator.
//!
//! Both shells are thin: they translate terminal events into
//! [`wheelnav_core::Navigator`] inputs and draw the navigator's state into a
//! [`Buffer`]. [`DesktopRail`] is an always-visible side column for wide
//! terminals; [`MobileModal`] is a trigger plus bottom sheet for narrow
//! ones, with a focus trap and page scroll lock while open.

pub mod buffer;
pub mod emphasis;
pub mod focus;
pub mod modal;
pub mod rail;
pub mod wheel;

pub use buffer::{Buffer, Cell, Tone};
pub use modal::{MobileModal, ModalResponse};
pub use rail::{DesktopRail, RailResponse};

use wheelnav_core::geometry::Rect;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}
