#![forbid(unsafe_code)]

//! Sections and the fixed, ordered section index.
//!
//! # Invariants
//!
//! 1. Order is fixed at construction and drives both display order and the
//!    meaning of a `+1` / `-1` step.
//! 2. No two sections share an `id`.
//! 3. No two sections share a `target`.
//! 4. An empty index is valid; every consumer degrades to a no-op.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Stable section identifier, unique within a [`SectionIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(transparent))]
pub struct SectionId(Arc<str>);

impl SectionId {
    /// Create an identifier.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Stable identifier.
    pub id: SectionId,
    /// Human-readable display text.
    pub label: String,
    /// Location path used for matching and for committing navigation.
    pub target: String,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl AsRef<str>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(id),
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Errors raised while building a [`SectionIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionIndexError {
    /// Two sections share an identifier.
    #[error("duplicate section id `{id}` at positions {first} and {second}")]
    DuplicateId {
        id: SectionId,
        first: usize,
        second: usize,
    },

    /// Two sections share a target location.
    #[error("duplicate section target `{target}` at positions {first} and {second}")]
    DuplicateTarget {
        target: String,
        first: usize,
        second: usize,
    },
}

/// The fixed, ordered list of navigable sections.
///
/// Cheap to clone; the sections are shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    sections: Arc<[Section]>,
}

impl SectionIndex {
    /// Build an index, rejecting duplicate ids and targets.
    pub fn new(sections: Vec<Section>) -> Result<Self, SectionIndexError> {
        for (second, section) in sections.iter().enumerate() {
            let earlier = &sections[..second];
            if let Some(first) = earlier.iter().position(|s| s.id == section.id) {
                return Err(SectionIndexError::DuplicateId {
                    id: section.id.clone(),
                    first,
                    second,
                });
            }
            if let Some(first) = earlier.iter().position(|s| s.target == section.target) {
                return Err(SectionIndexError::DuplicateTarget {
                    target: section.target.clone(),
                    first,
                    second,
                });
            }
        }
        Ok(Self {
            sections: sections.into(),
        })
    }

    /// An index with no sections.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when there are no sections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Position of the section with this id.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Section with this id.
    pub fn by_id(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// All sections as a slice.
    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }
}

impl<'a> IntoIterator for &'a SectionIndex {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
