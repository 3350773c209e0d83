#![forbid(unsafe_code)]

//! Hover / focus-within engagement tracking.
//!
//! A navigator is *engaged* while the pointer hovers it or keyboard focus is
//! anywhere inside it. Engagement decides whether the navigator interprets
//! gestures and whether it may capture the page's scroll wheel.
//!
//! # Invariants
//!
//! 1. `engaged == hovered || focus_within` at all times.
//! 2. Focus moving between two nodes of the same [`FocusScope`] never
//!    releases engagement.
//! 3. Each mutation reports the edge it caused, so the caller can run the
//!    release resync exactly once per true→false transition.

use std::collections::BTreeSet;

#[cfg(feature = "tracing")]
use crate::logging::debug;
#[cfg(not(feature = "tracing"))]
use crate::debug;

/// Identifier of a focusable node.
pub type FocusId = u64;

/// The set of focusable nodes owned by one navigator instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusScope {
    members: BTreeSet<FocusId>,
}

impl FocusScope {
    /// Create a scope from its members.
    pub fn new(members: impl IntoIterator<Item = FocusId>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Add a member.
    pub fn insert(&mut self, id: FocusId) {
        self.members.insert(id);
    }

    /// Whether `id` is inside this scope.
    #[inline]
    pub fn contains(&self, id: FocusId) -> bool {
        self.members.contains(&id)
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the scope has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Edge produced by an engagement mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngagementChange {
    /// false → true.
    Engaged,
    /// true → false.
    Released,
    /// No edge.
    Unchanged,
}

/// Tracks hover and focus-within for one navigator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementTracker {
    hovered: bool,
    focus_within: bool,
}

impl EngagementTracker {
    /// A disengaged tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hovered: false,
            focus_within: false,
        }
    }

    /// Pointer hover or focus within.
    #[inline]
    pub const fn engaged(&self) -> bool {
        self.hovered || self.focus_within
    }

    /// Whether the pointer is over the navigator.
    #[inline]
    pub const fn hovered(&self) -> bool {
        self.hovered
    }

    /// Whether focus is inside the navigator.
    #[inline]
    pub const fn focus_within(&self) -> bool {
        self.focus_within
    }

    fn update(&mut self, apply: impl FnOnce(&mut Self)) -> EngagementChange {
        let before = self.engaged();
        apply(self);
        let change = match (before, self.engaged()) {
            (false, true) => EngagementChange::Engaged,
            (true, false) => EngagementChange::Released,
            _ => EngagementChange::Unchanged,
        };
        if change != EngagementChange::Unchanged {
            debug!(
                ?change,
                hovered = self.hovered,
                focus_within = self.focus_within,
                "engagement edge"
            );
        }
        change
    }

    /// Pointer entered the navigator's region.
    pub fn pointer_enter(&mut self) -> EngagementChange {
        self.update(|t| t.hovered = true)
    }

    /// Pointer left the navigator's region.
    pub fn pointer_leave(&mut self) -> EngagementChange {
        self.update(|t| t.hovered = false)
    }

    /// Some node inside the navigator received focus.
    pub fn focus_capture(&mut self) -> EngagementChange {
        self.update(|t| t.focus_within = true)
    }

    /// A node inside the navigator lost focus to `related_target`.
    ///
    /// Focus only leaves when the newly focused node is outside `scope`;
    /// `None` (focus went nowhere) counts as outside.
    pub fn blur_capture(
        &mut self,
        related_target: Option<FocusId>,
        scope: &FocusScope,
    ) -> EngagementChange {
        if related_target.is_some_and(|id| scope.contains(id)) {
            return EngagementChange::Unchanged;
        }
        self.update(|t| t.focus_within = false)
    }

    /// Drop both hover and focus (Escape, unmount).
    pub fn release_all(&mut self) -> EngagementChange {
        self.update(|t| {
            t.hovered = false;
            t.focus_within = false;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_engages_and_releases() {
        let mut t = EngagementTracker::new();
        assert!(!t.engaged());
        assert_eq!(t.pointer_enter(), EngagementChange::Engaged);
        assert_eq!(t.pointer_enter(), EngagementChange::Unchanged);
        assert_eq!(t.pointer_leave(), EngagementChange::Released);
        assert!(!t.engaged());
    }

    #[test]
    fn focus_keeps_engagement_after_pointer_leaves() {
        let mut t = EngagementTracker::new();
        t.pointer_enter();
        assert_eq!(t.focus_capture(), EngagementChange::Unchanged);
        assert_eq!(t.pointer_leave(), EngagementChange::Unchanged);
        assert!(t.engaged());
    }

    #[test]
    fn blur_to_internal_node_is_not_disengagement() {
        let scope = FocusScope::new([10, 11, 12]);
        let mut t = EngagementTracker::new();
        t.focus_capture();
        assert_eq!(t.blur_capture(Some(11), &scope), EngagementChange::Unchanged);
        assert!(t.focus_within());
    }

    #[test]
    fn blur_to_outside_or_nowhere_releases() {
        let scope = FocusScope::new([10, 11]);
        let mut t = EngagementTracker::new();
        t.focus_capture();
        assert_eq!(t.blur_capture(Some(99), &scope), EngagementChange::Released);

        t.focus_capture();
        assert_eq!(t.blur_capture(None, &scope), EngagementChange::Released);
    }

    #[test]
    fn release_all_clears_both() {
        let mut t = EngagementTracker::new();
        t.pointer_enter();
        t.focus_capture();
        assert_eq!(t.release_all(), EngagementChange::Released);
        assert!(!t.hovered());
        assert!(!t.focus_within());
        assert_eq!(t.release_all(), EngagementChange::Unchanged);
    }

    #[test]
    fn scope_membership() {
        let mut scope = FocusScope::default();
        assert!(scope.is_empty());
        scope.insert(4);
        assert!(scope.contains(4));
        assert!(!scope.contains(5));
        assert_eq!(scope.len(), 1);
    }
}
