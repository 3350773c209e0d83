#![forbid(unsafe_code)]

//! Core: a headless section navigator.
//!
//! # Role in WheelNav
//! `wheelnav-core` owns every piece of navigator behavior that does not
//! depend on how the navigator is drawn. Presentation shells in
//! `wheelnav-widgets` translate raw terminal events into the inputs defined
//! here and render the resulting state.
//!
//! # Primary responsibilities
//! - **SectionIndex**: the fixed, ordered list of navigable sections.
//! - **LocationMapper**: maps any location to its enclosing section.
//! - **SelectionEngine**: the highlighted index, stepping and commit rules.
//! - **EngagementTracker**: hover / focus-within engagement.
//! - **GesturePump**: quantizes wheel, drag and key input into steps.
//! - **ScrollCapture**: scoped ownership of host scroll resources.
//! - **Navigator**: one mounted instance wiring all of the above.
//!
//! # Data flow
//! input → [`gesture::GesturePump`] → [`selection::SelectionEngine`] →
//! shells re-render → on commit the host navigates → the new location flows
//! back through [`location::LocationMapper`] and resynchronizes the
//! selection once engagement ends.

pub mod config;
pub mod engagement;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod location;
pub mod logging;
pub mod navigator;
pub mod scroll;
pub mod section;
pub mod selection;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};

pub use navigator::{NavOutcome, Navigate, Navigator, NavigatorProps};
pub use section::{Section, SectionId, SectionIndex, SectionIndexError};
