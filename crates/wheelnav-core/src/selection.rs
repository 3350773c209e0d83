#![forbid(unsafe_code)]

//! The highlighted-section state machine.
//!
//! [`SelectionEngine`] owns "which section is emphasized right now". While
//! the user scrubs through the list the highlight may differ from the real
//! current location; once the navigator is released it springs back via
//! [`SelectionEngine::sync_to_location`].
//!
//! # Invariants
//!
//! 1. `highlighted < max(len, 1)` after every operation.
//! 2. `step` never wraps; at either end it is a no-op.
//! 3. With an empty index every operation is a no-op and `commit` yields
//!    nothing.
//! 4. A click on a non-highlighted item only previews it. Only a click on
//!    the item that is already highlighted commits.

use crate::section::{Section, SectionId, SectionIndex};

#[cfg(feature = "tracing")]
use crate::logging::debug;
#[cfg(not(feature = "tracing"))]
use crate::debug;

/// Step direction through the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index 0.
    Backward,
    /// Towards the last index.
    Forward,
}

impl Direction {
    /// Direction for a signed delta (positive is forward). `None` for zero.
    #[must_use]
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Forward)
        } else if delta < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }

    /// `+1` or `-1`.
    #[inline]
    #[must_use]
    pub const fn signum(self) -> isize {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Result of clicking an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The item was not highlighted; it is now, and nothing navigates.
    Preview(usize),
    /// The item was already highlighted; navigate to it.
    Commit(Section),
    /// Out of range or empty index.
    Ignored,
}

/// Highlighted-index state machine over one [`SectionIndex`].
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    index: SectionIndex,
    highlighted: usize,
}

impl SelectionEngine {
    /// Create an engine highlighting the first section.
    #[must_use]
    pub fn new(index: SectionIndex) -> Self {
        Self {
            index,
            highlighted: 0,
        }
    }

    /// The highlighted position.
    #[inline]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// The highlighted section, if any.
    pub fn highlighted_section(&self) -> Option<&Section> {
        self.index.get(self.highlighted)
    }

    /// The index driven by this engine.
    #[inline]
    pub fn index(&self) -> &SectionIndex {
        &self.index
    }

    fn last(&self) -> usize {
        self.index.len().saturating_sub(1)
    }

    /// Snap to the section named by `id` unless the navigator is engaged.
    ///
    /// The sentinel (`None`) and unknown ids leave the highlight unchanged.
    /// Returns true if the highlight moved.
    pub fn sync_to_location(&mut self, id: Option<&SectionId>, engaged: bool) -> bool {
        if engaged {
            return false;
        }
        let Some(position) = id.and_then(|id| self.index.position(id)) else {
            return false;
        };
        let moved = position != self.highlighted;
        self.highlighted = position;
        moved
    }

    /// Move one step, clamped. Returns true if the highlight moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        let target = self
            .highlighted
            .saturating_add_signed(direction.signum())
            .min(self.last());
        let moved = target != self.highlighted;
        if moved {
            debug!(from = self.highlighted, to = target, "selection step");
        }
        self.highlighted = target;
        moved
    }

    /// Set the highlight directly, clamped into range.
    pub fn set_highlighted(&mut self, index: usize) -> bool {
        let target = index.min(self.last());
        let moved = target != self.highlighted;
        self.highlighted = target;
        moved
    }

    /// Jump to the first section.
    pub fn jump_first(&mut self) -> bool {
        self.set_highlighted(0)
    }

    /// Jump to the last section.
    pub fn jump_last(&mut self) -> bool {
        self.set_highlighted(self.last())
    }

    /// The section to navigate to, or `None` for an empty index.
    pub fn commit(&self) -> Option<&Section> {
        let section = self.index.get(self.highlighted)?;
        debug!(location = %section.target, "selection commit");
        Some(section)
    }

    /// Preview on first click, commit on matching second click.
    pub fn click(&mut self, index: usize) -> ClickOutcome {
        if index >= self.index.len() {
            return ClickOutcome::Ignored;
        }
        if index == self.highlighted {
            return match self.commit() {
                Some(section) => ClickOutcome::Commit(section.clone()),
                None => ClickOutcome::Ignored,
            };
        }
        self.highlighted = index;
        ClickOutcome::Preview(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(n: usize) -> SelectionEngine {
        let sections = (0..n)
            .map(|i| Section::new(format!("s{i}"), format!("S{i}"), format!("/s{i}")))
            .collect();
        SelectionEngine::new(SectionIndex::new(sections).unwrap())
    }

    #[test]
    fn step_clamps_at_both_ends() {
        let mut e = engine(3);
        assert!(!e.step(Direction::Backward));
        assert_eq!(e.highlighted(), 0);
        assert!(e.step(Direction::Forward));
        assert!(e.step(Direction::Forward));
        assert!(!e.step(Direction::Forward));
        assert_eq!(e.highlighted(), 2);
    }

    #[test]
    fn set_highlighted_clamps() {
        let mut e = engine(3);
        e.set_highlighted(99);
        assert_eq!(e.highlighted(), 2);
        e.jump_first();
        assert_eq!(e.highlighted(), 0);
        e.jump_last();
        assert_eq!(e.highlighted(), 2);
    }

    #[test]
    fn sync_ignored_while_engaged() {
        let mut e = engine(3);
        assert!(!e.sync_to_location(Some(&"s2".into()), true));
        assert_eq!(e.highlighted(), 0);
        assert!(e.sync_to_location(Some(&"s2".into()), false));
        assert_eq!(e.highlighted(), 2);
    }

    #[test]
    fn sync_with_sentinel_or_unknown_keeps_highlight() {
        let mut e = engine(3);
        e.set_highlighted(1);
        assert!(!e.sync_to_location(None, false));
        assert!(!e.sync_to_location(Some(&"missing".into()), false));
        assert_eq!(e.highlighted(), 1);
    }

    #[test]
    fn click_previews_then_commits() {
        let mut e = engine(3);
        assert_eq!(e.click(2), ClickOutcome::Preview(2));
        assert_eq!(e.highlighted(), 2);
        match e.click(2) {
            ClickOutcome::Commit(section) => assert_eq!(section.target, "/s2"),
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn click_on_highlighted_commits_immediately() {
        let mut e = engine(3);
        assert!(matches!(e.click(0), ClickOutcome::Commit(_)));
    }

    #[test]
    fn click_out_of_range_ignored() {
        let mut e = engine(3);
        assert_eq!(e.click(3), ClickOutcome::Ignored);
        assert_eq!(e.highlighted(), 0);
    }

    #[test]
    fn empty_index_is_a_no_op_state() {
        let mut e = engine(0);
        assert!(!e.step(Direction::Forward));
        assert!(!e.step(Direction::Backward));
        assert!(!e.set_highlighted(5));
        assert!(!e.jump_last());
        assert_eq!(e.highlighted(), 0);
        assert!(e.commit().is_none());
        assert_eq!(e.click(0), ClickOutcome::Ignored);
    }

    #[test]
    fn direction_from_delta() {
        assert_eq!(Direction::from_delta(3.0), Some(Direction::Forward));
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(0.0), None);
        assert_eq!(Direction::from_delta(f32::NAN), None);
    }
}
