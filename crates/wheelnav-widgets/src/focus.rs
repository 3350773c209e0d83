#![forbid(unsafe_code)]

//! Focus trap for modal content.
//!
//! # Invariants
//!
//! 1. While a trap is held, focus only ever lands on one of its members.
//! 2. Tab / Shift+Tab (BackTab) cycle through members in order and wrap.
//! 3. Releasing the trap yields the node focused before it was installed.
//!
//! # Failure Modes
//!
//! - An empty trap refuses every focus request and cycling is a no-op.

use wheelnav_core::engagement::{FocusId, FocusScope};
use wheelnav_core::event::{KeyCode, KeyEvent};

/// Ordered set of focus stops that focus may not leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    order: Vec<FocusId>,
    focused: Option<usize>,
    restore: Option<FocusId>,
}

impl FocusTrap {
    /// Install a trap over `order`, remembering `restore` for release.
    pub fn new(order: Vec<FocusId>, restore: Option<FocusId>) -> Self {
        Self {
            order,
            focused: None,
            restore,
        }
    }

    /// Currently focused member.
    pub fn focused(&self) -> Option<FocusId> {
        self.focused.map(|i| self.order[i])
    }

    pub fn contains(&self, id: FocusId) -> bool {
        self.order.contains(&id)
    }

    pub fn members(&self) -> &[FocusId] {
        &self.order
    }

    /// The members as an engagement scope.
    pub fn scope(&self) -> FocusScope {
        FocusScope::new(self.order.iter().copied())
    }

    /// Move focus to `id`; refused (false) when `id` is outside the trap.
    pub fn focus(&mut self, id: FocusId) -> bool {
        match self.order.iter().position(|m| *m == id) {
            Some(pos) => {
                self.focused = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Focus the next member, wrapping to the first.
    pub fn focus_next(&mut self) -> Option<FocusId> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        self.focused = Some(self.focused.map_or(0, |i| (i + 1) % len));
        self.focused()
    }

    /// Focus the previous member, wrapping to the last.
    pub fn focus_prev(&mut self) -> Option<FocusId> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        self.focused = Some(self.focused.map_or(len - 1, |i| (i + len - 1) % len));
        self.focused()
    }

    /// Handle Tab / BackTab. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        match key.code {
            KeyCode::Tab if key.shift() => self.focus_prev().is_some(),
            KeyCode::Tab => self.focus_next().is_some(),
            KeyCode::BackTab => self.focus_prev().is_some(),
            _ => false,
        }
    }

    /// Tear the trap down, returning the focus target to restore.
    pub fn release(self) -> Option<FocusId> {
        self.restore
    }
}
