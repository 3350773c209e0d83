#![forbid(unsafe_code)]

//! Location → section mapping.
//!
//! [`LocationMapper`] answers "which section is current?" for an arbitrary
//! location string handed over by the host router.
//!
//! # Rules (first match wins)
//!
//! 1. **Exact**: the normalized location equals a section target.
//! 2. **Detail**: the location is nested under a section target by whole
//!    path segments (`/projects/42` is under `/projects`; `/projectsx` is
//!    not). The root target `/` only matches exactly. When several targets
//!    prefix the location, the longest one wins.
//! 3. Otherwise there is no current section (`None`).
//!
//! A host-supplied [`ItemMatcher`] replaces rules 1–2 entirely.
//!
//! # Normalization
//!
//! Query strings and fragments are dropped, trailing slashes trimmed, and an
//! empty location is treated as `/`. Mapping is pure and total.

use std::fmt;
use std::sync::Arc;

use crate::section::{Section, SectionId, SectionIndex};

/// Host predicate deciding whether `section` is current for `location`.
///
/// Receives the raw (un-normalized) location.
pub type ItemMatcher = Arc<dyn Fn(&Section, &str) -> bool + Send + Sync>;

/// Maps locations onto the sections of one [`SectionIndex`].
#[derive(Clone)]
pub struct LocationMapper {
    index: SectionIndex,
    matcher: Option<ItemMatcher>,
}

impl fmt::Debug for LocationMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationMapper")
            .field("sections", &self.index.len())
            .field("custom_matcher", &self.matcher.is_some())
            .finish()
    }
}

impl LocationMapper {
    /// Mapper using the built-in exact / detail rules.
    #[must_use]
    pub fn new(index: SectionIndex) -> Self {
        Self {
            index,
            matcher: None,
        }
    }

    /// Replace the built-in rules with a host predicate.
    #[must_use]
    pub fn with_matcher(mut self, matcher: ItemMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// The index this mapper reads.
    #[inline]
    pub fn index(&self) -> &SectionIndex {
        &self.index
    }

    /// Position of the current section for `location`.
    pub fn current_index(&self, location: &str) -> Option<usize> {
        if let Some(matcher) = &self.matcher {
            return self.index.iter().position(|s| matcher(s, location));
        }

        let location = normalize(location);
        if let Some(exact) = self
            .index
            .iter()
            .position(|s| normalize(&s.target) == location)
        {
            return Some(exact);
        }

        self.index
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let target = normalize(&s.target);
                is_nested_under(location, target).then_some((i, target.len()))
            })
            .max_by_key(|&(_, len)| len)
            .map(|(i, _)| i)
    }

    /// Identifier of the current section for `location`.
    pub fn map_to_section(&self, location: &str) -> Option<SectionId> {
        self.current_index(location)
            .and_then(|i| self.index.get(i))
            .map(|s| s.id.clone())
    }

    /// Whether a navigator should render at all for `location`.
    pub fn is_navigable_location(&self, location: &str) -> bool {
        self.current_index(location).is_some()
    }
}

/// Strip query/fragment and trailing slashes.
pub fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = location[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

fn is_nested_under(location: &str, target: &str) -> bool {
    if target == "/" {
        return false;
    }
    location
        .strip_prefix(target)
        .is_some_and(|rest| rest.starts_with('/'))
}
