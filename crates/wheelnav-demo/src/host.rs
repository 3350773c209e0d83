//! The demo's stand-ins for the host page: its scroll state and its
//! window-level wheel dispatch.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use wheelnav_core::scroll::{ListenerId, Overflow, PageScroll, WheelRouter};

/// Scrollable page body plus the window wheel listener registry.
#[derive(Debug, Default)]
pub struct Host {
    overflow: Cell<Overflow>,
    offset: Cell<usize>,
    listeners: RefCell<BTreeSet<ListenerId>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible page line.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn reset_offset(&self) {
        self.offset.set(0);
    }

    /// Scroll by `rows` within `0..=max`. Refused while the page is locked.
    pub fn scroll_by(&self, rows: isize, max: usize) -> bool {
        if self.overflow.get() == Overflow::Hidden {
            return false;
        }
        let next = self.offset.get().saturating_add_signed(rows).min(max);
        let moved = next != self.offset.get();
        self.offset.set(next);
        moved
    }

    /// Whether any navigator holds the window wheel.
    pub fn wheel_captured(&self) -> bool {
        !self.listeners.borrow().is_empty()
    }
}

impl PageScroll for Host {
    fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    fn set_overflow(&self, overflow: Overflow) {
        self.overflow.set(overflow);
    }
}

impl WheelRouter for Host {
    fn attach(&self, listener: ListenerId) {
        tracing::debug!(?listener, "window wheel listener attached");
        self.listeners.borrow_mut().insert(listener);
    }

    fn detach(&self, listener: ListenerId) {
        tracing::debug!(?listener, "window wheel listener detached");
        self.listeners.borrow_mut().remove(&listener);
    }
}
