#![forbid(unsafe_code)]

//! One mounted navigator instance.
//!
//! [`Navigator`] wires the location mapper, selection engine, engagement
//! tracker, gesture pump and scroll capture together. Presentation shells
//! feed it high-level inputs (pointer enter/leave, focus, wheel, drag, keys,
//! clicks) and act on the returned [`NavOutcome`].
//!
//! # Invariants
//!
//! 1. `highlighted()` is always a valid position (or 0 for an empty index).
//! 2. The current location index is derived on every query, never cached.
//! 3. On every engaged → released edge the highlight snaps back to the
//!    current location exactly once, and the wheel capture is released.
//! 4. `NavOutcome::Navigate` is produced once per commit and never for an
//!    empty index.
//! 5. Dropping the navigator releases any held wheel capture.
//! 6. Highlight-moving inputs (wheel, drag, keys, clicks, direct sets) are
//!    ignored while disengaged, so a disengaged navigator on a navigable
//!    location always highlights the current section.

use std::rc::Rc;

use web_time::Instant;

use crate::config::NavigatorConfig;
use crate::engagement::{EngagementChange, EngagementTracker, FocusId, FocusScope};
use crate::event::KeyEvent;
use crate::gesture::{GestureConfig, GesturePump, NavCommand};
use crate::location::{ItemMatcher, LocationMapper};
use crate::scroll::{ListenerId, ScrollCapture, WheelDisposition, WheelOrigin, WheelRouter};
use crate::section::{Section, SectionId, SectionIndex};
use crate::selection::{ClickOutcome, Direction, SelectionEngine};

#[cfg(feature = "tracing")]
use crate::logging::{debug, info};
#[cfg(not(feature = "tracing"))]
use crate::{debug, info};

/// Host navigation callback.
pub trait Navigate {
    /// Navigate the host to `target`.
    fn navigate(&mut self, target: &str);
}

impl<F: FnMut(&str)> Navigate for F {
    fn navigate(&mut self, target: &str) {
        self(target)
    }
}

/// Host-facing switches of one navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorProps {
    /// Render the usage hint.
    pub show_hint: bool,
    /// Capture the page's wheel while engaged.
    pub capture_scroll_on_engage: bool,
}

impl Default for NavigatorProps {
    fn default() -> Self {
        Self {
            show_hint: true,
            capture_scroll_on_engage: true,
        }
    }
}

impl From<&NavigatorConfig> for NavigatorProps {
    fn from(config: &NavigatorConfig) -> Self {
        Self {
            show_hint: config.show_hint,
            capture_scroll_on_engage: config.capture_scroll_on_engage,
        }
    }
}

/// What a navigator input did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing visible changed.
    Idle,
    /// The highlight moved.
    Moved,
    /// The host should navigate to this target.
    Navigate(String),
    /// Focus should leave the navigator (Escape).
    Blurred,
}

impl NavOutcome {
    /// Hand a `Navigate` outcome to the host. Returns true if it navigated.
    pub fn dispatch(&self, host: &mut impl Navigate) -> bool {
        match self {
            Self::Navigate(target) => {
                host.navigate(target);
                true
            }
            _ => false,
        }
    }

    /// Whether shells need to redraw.
    #[inline]
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Result of offering a wheel event to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelResponse {
    /// Whether the host must suppress its default scroll.
    pub disposition: WheelDisposition,
    /// Effect on the navigator.
    pub outcome: NavOutcome,
}

/// A mounted navigator.
#[derive(Debug)]
pub struct Navigator {
    mapper: LocationMapper,
    selection: SelectionEngine,
    engagement: EngagementTracker,
    pump: GesturePump,
    capture: ScrollCapture,
    scope: FocusScope,
    props: NavigatorProps,
    location: String,
}

impl Navigator {
    /// Mount a navigator over `index` with `config`.
    pub fn new(index: SectionIndex, config: &NavigatorConfig) -> Self {
        let mut nav = Self {
            mapper: LocationMapper::new(index.clone()),
            selection: SelectionEngine::new(index),
            engagement: EngagementTracker::new(),
            pump: GesturePump::new(config.gesture.clone()),
            capture: ScrollCapture::new(),
            scope: FocusScope::default(),
            props: NavigatorProps::from(config),
            location: String::from("/"),
        };
        nav.resync();
        nav
    }

    /// Install a host `is_item_current` predicate.
    #[must_use]
    pub fn with_matcher(mut self, matcher: ItemMatcher) -> Self {
        self.mapper = self.mapper.with_matcher(matcher);
        self.resync();
        self
    }

    /// Override the props derived from the config.
    #[must_use]
    pub fn with_props(mut self, props: NavigatorProps) -> Self {
        self.props = props;
        self
    }

    /// Declare the focus ids that belong to this navigator.
    #[must_use]
    pub fn with_scope(mut self, scope: FocusScope) -> Self {
        self.scope = scope;
        self
    }

    /// Connect the host's window wheel router.
    pub fn attach_host(&mut self, router: Rc<dyn WheelRouter>, listener: ListenerId) {
        self.capture.attach_host(router, listener);
        self.capture
            .sync(self.engaged(), self.props.capture_scroll_on_engage);
    }

    // --- Queries ---

    /// The sections.
    #[inline]
    pub fn sections(&self) -> &SectionIndex {
        self.selection.index()
    }

    /// Props in effect.
    #[inline]
    pub fn props(&self) -> NavigatorProps {
        self.props
    }

    /// The focus scope owned by this navigator.
    #[inline]
    pub fn scope(&self) -> &FocusScope {
        &self.scope
    }

    /// The real current location.
    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Highlighted position.
    #[inline]
    pub fn highlighted(&self) -> usize {
        self.selection.highlighted()
    }

    /// Highlighted section.
    pub fn highlighted_section(&self) -> Option<&Section> {
        self.selection.highlighted_section()
    }

    /// Position of the section matching the real location.
    pub fn current_index(&self) -> Option<usize> {
        self.mapper.current_index(&self.location)
    }

    /// Identifier of the section matching the real location.
    pub fn current_section(&self) -> Option<SectionId> {
        self.mapper.map_to_section(&self.location)
    }

    /// Whether the navigator should render for the current location.
    pub fn is_navigable(&self) -> bool {
        self.mapper.is_navigable_location(&self.location)
    }

    /// Whether `index` is the real current section.
    pub fn is_current(&self, index: usize) -> bool {
        self.current_index() == Some(index)
    }

    /// Hover or focus within.
    #[inline]
    pub fn engaged(&self) -> bool {
        self.engagement.engaged()
    }

    /// Engagement details.
    #[inline]
    pub fn engagement(&self) -> &EngagementTracker {
        &self.engagement
    }

    /// Whether the window wheel is captured.
    #[inline]
    pub fn is_capturing_scroll(&self) -> bool {
        self.capture.is_capturing()
    }

    /// Gesture thresholds in effect.
    #[inline]
    pub fn gesture_config(&self) -> &GestureConfig {
        self.pump.config()
    }

    /// Whether wheel steps are suppressed at `now`.
    #[inline]
    pub fn is_wheel_locked(&self, now: Instant) -> bool {
        self.pump.is_locked(now)
    }

    // --- Location ---

    /// Record the host's new location; resyncs unless engaged.
    pub fn set_location(&mut self, location: impl Into<String>) -> NavOutcome {
        self.location = location.into();
        debug!(location = %self.location, "location changed");
        if self.resync() {
            NavOutcome::Moved
        } else {
            NavOutcome::Idle
        }
    }

    fn resync(&mut self) -> bool {
        let current = self.mapper.map_to_section(&self.location);
        self.selection
            .sync_to_location(current.as_ref(), self.engagement.engaged())
    }

    // --- Engagement ---

    fn on_engagement(&mut self, change: EngagementChange) -> NavOutcome {
        match change {
            EngagementChange::Engaged => {
                self.capture
                    .sync(true, self.props.capture_scroll_on_engage);
                NavOutcome::Idle
            }
            EngagementChange::Released => {
                self.capture.release();
                self.pump.reset();
                if self.resync() {
                    NavOutcome::Moved
                } else {
                    NavOutcome::Idle
                }
            }
            EngagementChange::Unchanged => NavOutcome::Idle,
        }
    }

    /// Pointer entered the navigator.
    pub fn pointer_enter(&mut self) -> NavOutcome {
        let change = self.engagement.pointer_enter();
        self.on_engagement(change)
    }

    /// Pointer left the navigator.
    pub fn pointer_leave(&mut self) -> NavOutcome {
        let change = self.engagement.pointer_leave();
        self.on_engagement(change)
    }

    /// A node inside the navigator received focus.
    pub fn focus_in(&mut self) -> NavOutcome {
        let change = self.engagement.focus_capture();
        self.on_engagement(change)
    }

    /// A node inside the navigator lost focus to `related_target`.
    pub fn focus_out(&mut self, related_target: Option<FocusId>) -> NavOutcome {
        let change = self.engagement.blur_capture(related_target, &self.scope);
        self.on_engagement(change)
    }

    /// Drop hover and focus at once (modal close, unmount).
    pub fn release(&mut self) -> NavOutcome {
        let change = self.engagement.release_all();
        self.on_engagement(change)
    }

    // --- Gestures ---

    fn step(&mut self, direction: Direction) -> NavOutcome {
        if self.engaged() && self.selection.step(direction) {
            NavOutcome::Moved
        } else {
            NavOutcome::Idle
        }
    }

    /// Offer a wheel event.
    ///
    /// Events the navigator does not own are passed through untouched and
    /// never reach the pump. Viewport events are still owned while
    /// disengaged but do not step.
    pub fn wheel(&mut self, delta: f32, now: Instant, origin: WheelOrigin) -> WheelResponse {
        let disposition = self.capture.route(origin);
        let outcome = match disposition {
            WheelDisposition::PassThrough => NavOutcome::Idle,
            WheelDisposition::Capture if !self.engaged() => NavOutcome::Idle,
            WheelDisposition::Capture => match self.pump.wheel(delta, now) {
                Some(direction) => self.step(direction),
                None => NavOutcome::Idle,
            },
        };
        WheelResponse {
            disposition,
            outcome,
        }
    }

    /// Drag / touch started at `y`.
    pub fn touch_start(&mut self, y: f32) {
        self.pump.touch_start(y);
    }

    /// Drag / touch moved to `y`.
    pub fn touch_move(&mut self, y: f32) -> NavOutcome {
        match self.pump.touch_move(y) {
            Some(direction) => self.step(direction),
            None => NavOutcome::Idle,
        }
    }

    /// Drag / touch ended.
    pub fn touch_end(&mut self) {
        self.pump.touch_end();
    }

    /// Handle a key while the navigator has focus.
    pub fn key(&mut self, key: &KeyEvent) -> NavOutcome {
        if !self.engaged() {
            return NavOutcome::Idle;
        }
        match self.pump.key(key) {
            Some(NavCommand::Step(direction)) => self.step(direction),
            Some(NavCommand::First) => self.moved_if(|s| s.jump_first()),
            Some(NavCommand::Last) => self.moved_if(|s| s.jump_last()),
            Some(NavCommand::Commit) => self.commit(),
            Some(NavCommand::Release) => {
                self.focus_out(None);
                NavOutcome::Blurred
            }
            None => NavOutcome::Idle,
        }
    }

    fn moved_if(&mut self, f: impl FnOnce(&mut SelectionEngine) -> bool) -> NavOutcome {
        if self.engaged() && f(&mut self.selection) {
            NavOutcome::Moved
        } else {
            NavOutcome::Idle
        }
    }

    /// Highlight `index` directly (clamped).
    pub fn set_highlighted(&mut self, index: usize) -> NavOutcome {
        self.moved_if(|s| s.set_highlighted(index))
    }

    /// Navigate to the highlighted section.
    pub fn commit(&mut self) -> NavOutcome {
        match self.selection.commit() {
            Some(section) => {
                info!(section = %section.id, location = %section.target, "navigate");
                NavOutcome::Navigate(section.target.clone())
            }
            None => NavOutcome::Idle,
        }
    }

    /// Click on item `index`: preview first, commit on the matching click.
    pub fn click(&mut self, index: usize) -> NavOutcome {
        if !self.engaged() {
            return NavOutcome::Idle;
        }
        match self.selection.click(index) {
            ClickOutcome::Preview(_) => NavOutcome::Moved,
            ClickOutcome::Commit(section) => {
                info!(section = %section.id, location = %section.target, "navigate");
                NavOutcome::Navigate(section.target)
            }
            ClickOutcome::Ignored => NavOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyCode;
    use std::cell::RefCell;
    use std::sync::Arc;
    use web_time::Duration;

    fn three() -> SectionIndex {
        SectionIndex::new(vec![
            Section::new("home", "Home", "/"),
            Section::new("projects", "Projects", "/projects"),
            Section::new("gallery", "Gallery", "/gallery"),
        ])
        .unwrap()
    }

    fn mounted(location: &str) -> Navigator {
        let mut nav = Navigator::new(three(), &NavigatorConfig::default());
        nav.set_location(location);
        nav
    }

    #[derive(Default)]
    struct Router {
        attached: RefCell<Vec<ListenerId>>,
    }

    impl WheelRouter for Router {
        fn attach(&self, listener: ListenerId) {
            self.attached.borrow_mut().push(listener);
        }
        fn detach(&self, listener: ListenerId) {
            self.attached.borrow_mut().retain(|l| *l != listener);
        }
    }

    #[test]
    fn mount_syncs_to_location() {
        let nav = mounted("/projects/42");
        assert!(nav.is_navigable());
        assert_eq!(nav.current_section(), Some("projects".into()));
        assert_eq!(nav.highlighted(), 1);
    }

    #[test]
    fn location_change_while_engaged_does_not_move_highlight() {
        let mut nav = mounted("/");
        nav.pointer_enter();
        nav.key(&KeyEvent::new(KeyCode::Down));
        assert_eq!(nav.set_location("/gallery"), NavOutcome::Idle);
        assert_eq!(nav.highlighted(), 1);
        assert_eq!(nav.pointer_leave(), NavOutcome::Moved);
        assert_eq!(nav.highlighted(), 2);
    }

    #[test]
    fn release_snaps_back_to_current() {
        let mut nav = mounted("/");
        nav.focus_in();
        nav.key(&KeyEvent::new(KeyCode::End));
        assert_eq!(nav.highlighted(), 2);
        assert_eq!(nav.focus_out(None), NavOutcome::Moved);
        assert_eq!(nav.highlighted(), 0);
    }

    #[test]
    fn focus_moving_inside_scope_keeps_highlight() {
        let mut nav = mounted("/").with_scope(FocusScope::new([1, 2, 3]));
        nav.focus_in();
        nav.key(&KeyEvent::new(KeyCode::Down));
        assert_eq!(nav.focus_out(Some(2)), NavOutcome::Idle);
        assert_eq!(nav.highlighted(), 1);
        assert!(nav.engaged());
    }

    #[test]
    fn enter_commits_highlighted() {
        let mut nav = mounted("/");
        nav.focus_in();
        nav.key(&KeyEvent::new(KeyCode::Down));
        let outcome = nav.key(&KeyEvent::new(KeyCode::Enter));
        assert_eq!(outcome, NavOutcome::Navigate("/projects".into()));

        let mut seen = Vec::new();
        assert!(outcome.dispatch(&mut |t: &str| seen.push(t.to_owned())));
        assert_eq!(seen, ["/projects"]);
    }

    #[test]
    fn escape_blurs() {
        let mut nav = mounted("/");
        nav.focus_in();
        assert_eq!(nav.key(&KeyEvent::new(KeyCode::Escape)), NavOutcome::Blurred);
        assert!(!nav.engaged());
    }

    #[test]
    fn click_twice_navigates() {
        let mut nav = mounted("/");
        nav.pointer_enter();
        assert_eq!(nav.click(2), NavOutcome::Moved);
        assert_eq!(nav.click(2), NavOutcome::Navigate("/gallery".into()));
    }

    #[test]
    fn window_wheel_passes_through_without_capture() {
        let mut nav = mounted("/");
        let t = Instant::now();
        let response = nav.wheel(20.0, t, WheelOrigin::Window);
        assert_eq!(response.disposition, WheelDisposition::PassThrough);
        assert_eq!(nav.highlighted(), 0);
        assert!(!nav.is_wheel_locked(t));
    }

    #[test]
    fn engaged_capture_takes_over_window_wheel() {
        let router = Rc::new(Router::default());
        let mut nav = mounted("/");
        nav.attach_host(router.clone(), ListenerId(9));
        nav.pointer_enter();
        assert!(nav.is_capturing_scroll());

        let t = Instant::now();
        let response = nav.wheel(20.0, t, WheelOrigin::Window);
        assert_eq!(response.disposition, WheelDisposition::Capture);
        assert_eq!(response.outcome, NavOutcome::Moved);

        // Suppressed but still owned inside the lock window.
        let response = nav.wheel(20.0, t + Duration::from_millis(20), WheelOrigin::Window);
        assert_eq!(response.disposition, WheelDisposition::Capture);
        assert_eq!(response.outcome, NavOutcome::Idle);

        nav.pointer_leave();
        assert!(!nav.is_capturing_scroll());
        assert!(router.attached.borrow().is_empty());
    }

    #[test]
    fn capture_disabled_by_props() {
        let router = Rc::new(Router::default());
        let mut nav = mounted("/").with_props(NavigatorProps {
            show_hint: false,
            capture_scroll_on_engage: false,
        });
        nav.attach_host(router.clone(), ListenerId(1));
        nav.pointer_enter();
        assert!(!nav.is_capturing_scroll());
        let response = nav.wheel(20.0, Instant::now(), WheelOrigin::Window);
        assert_eq!(response.disposition, WheelDisposition::PassThrough);
    }

    #[test]
    fn drop_while_engaged_releases_capture() {
        let router = Rc::new(Router::default());
        {
            let mut nav = mounted("/");
            nav.attach_host(router.clone(), ListenerId(4));
            nav.focus_in();
            assert_eq!(router.attached.borrow().len(), 1);
        }
        assert!(router.attached.borrow().is_empty());
    }

    #[test]
    fn release_resets_wheel_lock() {
        let mut nav = mounted("/");
        nav.pointer_enter();
        let t = Instant::now();
        nav.wheel(20.0, t, WheelOrigin::Viewport);
        assert!(nav.is_wheel_locked(t));
        nav.pointer_leave();
        assert!(!nav.is_wheel_locked(t));
    }

    #[test]
    fn drag_steps_through_sections() {
        let mut nav = mounted("/");
        nav.pointer_enter();
        nav.touch_start(100.0);
        assert_eq!(nav.touch_move(70.0), NavOutcome::Moved);
        assert_eq!(nav.highlighted(), 1);
        nav.touch_end();
        assert_eq!(nav.touch_move(0.0), NavOutcome::Idle);
    }

    #[test]
    fn disengaged_inputs_leave_highlight_on_current() {
        let mut nav = mounted("/projects");
        let t = Instant::now();
        assert_eq!(nav.click(2), NavOutcome::Idle);
        assert_eq!(nav.key(&KeyEvent::new(KeyCode::Down)), NavOutcome::Idle);
        assert_eq!(nav.set_highlighted(0), NavOutcome::Idle);
        nav.touch_start(100.0);
        assert_eq!(nav.touch_move(20.0), NavOutcome::Idle);
        nav.touch_end();
        let response = nav.wheel(40.0, t, WheelOrigin::Viewport);
        assert_eq!(response.disposition, WheelDisposition::Capture);
        assert_eq!(response.outcome, NavOutcome::Idle);
        assert!(!nav.is_wheel_locked(t));
        assert_eq!(nav.highlighted(), 1);
    }

    #[test]
    fn mount_highlights_root_section_wherever_it_sits() {
        let index = SectionIndex::new(vec![
            Section::new("about", "About", "/about"),
            Section::new("home", "Home", "/"),
        ])
        .unwrap();
        let nav = Navigator::new(index, &NavigatorConfig::default());
        assert_eq!(nav.current_index(), Some(1));
        assert_eq!(nav.highlighted(), 1);
    }

    #[test]
    fn custom_matcher_drives_current_index() {
        let nav = Navigator::new(three(), &NavigatorConfig::default()).with_matcher(Arc::new(
            |s: &Section, loc: &str| s.id.as_str() == "gallery" && loc == "/",
        ));
        assert_eq!(nav.current_index(), Some(2));
        assert_eq!(nav.highlighted(), 2);
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn commit_and_engagement_edges_are_logged() {
        let mut nav = mounted("/");
        nav.pointer_enter();
        nav.click(1);
        nav.click(1);
        assert!(logs_contain("engagement edge"));
        assert!(logs_contain("navigate"));
        assert!(logs_contain("/projects"));
    }
}
