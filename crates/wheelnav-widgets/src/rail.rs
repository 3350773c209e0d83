#![forbid(unsafe_code)]

//! Always-visible side rail.
//!
//! The rail owns one [`Navigator`] and translates terminal events into its
//! inputs. Scroll ticks inside the rail are the rail's own; ticks elsewhere
//! on screen are offered through the navigator's scroll capture, so the page
//! keeps scrolling unless the rail is engaged.
//!
//! # State Machine
//!
//! ```text
//!  idle ──pointer over rail──▶ hovered ──click──▶ hovered+focused
//!   ▲                            │                    │
//!   └────── pointer leaves ──────┘    Esc / Tab / click elsewhere
//! ```
//!
//! # Failure Modes
//!
//! - On a location no section owns, the rail renders nothing and drops any
//!   engagement it held.

use web_time::Instant;
use wheelnav_core::config::{EmphasisConfig, NavigatorConfig};
use wheelnav_core::event::{
    Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind, TouchEvent, TouchPhase,
    WheelEvent,
};
use wheelnav_core::geometry::Rect;
use wheelnav_core::scroll::{WheelDisposition, WheelOrigin};
use wheelnav_core::{NavOutcome, Navigator, SectionIndex};

use crate::Widget;
use crate::buffer::{Buffer, Tone};
use crate::wheel;

/// Host units one terminal row is worth when dragging.
pub const ROW_UNITS: f32 = 16.0;

/// Usage hint drawn on the rail's last row.
pub const HINT: &str = "scroll · ↑↓ · enter";

/// What a rail event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailResponse {
    /// Effect on the navigator.
    pub outcome: NavOutcome,
    /// `Capture` when the page must not scroll for this event.
    pub scroll: WheelDisposition,
    /// Whether the rail needs repainting.
    pub redraw: bool,
}

impl RailResponse {
    fn ignored() -> Self {
        Self {
            outcome: NavOutcome::Idle,
            scroll: WheelDisposition::PassThrough,
            redraw: false,
        }
    }

    fn from_outcome(outcome: NavOutcome) -> Self {
        let redraw = outcome.needs_redraw();
        Self {
            outcome,
            scroll: WheelDisposition::PassThrough,
            redraw,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    item: Option<usize>,
    dragged: bool,
}

/// Keep the more significant of two outcomes.
fn merge(first: NavOutcome, second: NavOutcome) -> NavOutcome {
    match second {
        NavOutcome::Idle => first,
        other => other,
    }
}

/// Side-rail presentation of a navigator.
#[derive(Debug)]
pub struct DesktopRail {
    nav: Navigator,
    emphasis: EmphasisConfig,
    focused: bool,
    press: Option<Press>,
    /// A touch drag engaged the rail and releases it when lifted.
    touching: bool,
}

impl DesktopRail {
    /// A rail over `index` configured by `config`.
    pub fn new(index: SectionIndex, config: &NavigatorConfig) -> Self {
        Self::from_navigator(Navigator::new(index, config), config.emphasis.clone())
    }

    /// Wrap an existing navigator.
    pub fn from_navigator(nav: Navigator, emphasis: EmphasisConfig) -> Self {
        Self {
            nav,
            emphasis,
            focused: false,
            press: None,
            touching: false,
        }
    }

    #[inline]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[inline]
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.nav
    }

    /// Whether the rail holds keyboard focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Forward the host's location.
    pub fn set_location(&mut self, location: &str) -> NavOutcome {
        let outcome = self.nav.set_location(location);
        if !self.nav.is_navigable() {
            self.reset();
        }
        outcome
    }

    /// Give the rail keyboard focus.
    pub fn focus(&mut self) -> NavOutcome {
        if self.focused {
            return NavOutcome::Idle;
        }
        self.focused = true;
        #[cfg(feature = "tracing")]
        tracing::debug!("rail focused");
        self.nav.focus_in()
    }

    /// Take keyboard focus away from the rail.
    pub fn blur(&mut self) -> NavOutcome {
        if !self.focused {
            return NavOutcome::Idle;
        }
        self.focused = false;
        #[cfg(feature = "tracing")]
        tracing::debug!("rail blurred");
        self.nav.focus_out(None)
    }

    fn reset(&mut self) -> NavOutcome {
        self.focused = false;
        self.press = None;
        self.touching = false;
        self.nav.touch_end();
        self.nav.release()
    }

    /// Split `area` into the item wheel and the optional hint row.
    pub fn layout(&self, area: Rect) -> (Rect, Option<Rect>) {
        if self.nav.props().show_hint && area.height >= 3 {
            let (items, hint) = (
                Rect::new(area.x, area.y, area.width, area.height - 1),
                Rect::new(area.x, area.bottom() - 1, area.width, 1),
            );
            (items, Some(hint))
        } else {
            (area, None)
        }
    }

    /// Handle one terminal event; `area` is where the rail was drawn.
    pub fn handle_event(&mut self, event: &Event, area: Rect, now: Instant) -> RailResponse {
        if !self.nav.is_navigable() {
            return RailResponse::from_outcome(self.reset());
        }
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, area, now),
            Event::Wheel(wheel) => self.handle_wheel(wheel, area, now),
            Event::Touch(touch) => RailResponse::from_outcome(self.handle_touch(touch)),
            Event::Key(key) if self.focused => RailResponse::from_outcome(self.handle_key(key)),
            Event::Focus(false) => RailResponse::from_outcome(self.reset()),
            _ => RailResponse::ignored(),
        }
    }

    fn track_hover(&mut self, inside: bool) -> NavOutcome {
        match (inside, self.nav.engagement().hovered()) {
            (true, false) => self.nav.pointer_enter(),
            (false, true) => self.nav.pointer_leave(),
            _ => NavOutcome::Idle,
        }
    }

    fn handle_wheel(&mut self, wheel: &WheelEvent, area: Rect, now: Instant) -> RailResponse {
        let inside = area.contains(wheel.x, wheel.y);
        let hover = self.track_hover(inside);
        let origin = if inside {
            WheelOrigin::Viewport
        } else {
            WheelOrigin::Window
        };
        let response = self.nav.wheel(wheel.delta_y, now, origin);
        let redraw = hover.needs_redraw() || response.outcome.needs_redraw();
        RailResponse {
            outcome: merge(hover, response.outcome),
            scroll: response.disposition,
            redraw,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect, now: Instant) -> RailResponse {
        let tick = self.nav.gesture_config().scroll_tick_delta;
        if let Some(wheel) = WheelEvent::from_scroll_tick(mouse, tick) {
            return self.handle_wheel(&wheel, area, now);
        }

        let inside = area.contains(mouse.x, mouse.y);
        let hover = match mouse.kind {
            MouseEventKind::Drag(_) => NavOutcome::Idle,
            _ => self.track_hover(inside),
        };
        let (items, _) = self.layout(area);
        let y = f32::from(mouse.y) * ROW_UNITS;

        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let item = wheel::item_at(items, &self.nav, &self.emphasis, mouse.x, mouse.y);
                self.press = Some(Press {
                    item,
                    dragged: false,
                });
                self.nav.touch_start(y);
                self.focus()
            }
            MouseEventKind::Down(_) if !inside => self.blur(),
            MouseEventKind::Drag(MouseButton::Left) if self.press.is_some() => {
                let outcome = self.nav.touch_move(y);
                if let (NavOutcome::Moved, Some(press)) = (&outcome, self.press.as_mut()) {
                    press.dragged = true;
                }
                outcome
            }
            MouseEventKind::Up(MouseButton::Left) => match self.press.take() {
                Some(press) => {
                    self.nav.touch_end();
                    let released_on =
                        wheel::item_at(items, &self.nav, &self.emphasis, mouse.x, mouse.y);
                    match (press.dragged, press.item, released_on) {
                        (false, Some(pressed), Some(released)) if pressed == released => {
                            self.nav.click(pressed)
                        }
                        _ => NavOutcome::Idle,
                    }
                }
                None => NavOutcome::Idle,
            },
            _ => NavOutcome::Idle,
        };

        let redraw = hover.needs_redraw() || action.needs_redraw();
        RailResponse {
            outcome: merge(hover, action),
            scroll: WheelDisposition::PassThrough,
            redraw,
        }
    }

    fn handle_touch(&mut self, touch: &TouchEvent) -> NavOutcome {
        match touch.phase {
            TouchPhase::Start => {
                let outcome = if self.nav.engagement().hovered() {
                    NavOutcome::Idle
                } else {
                    self.touching = true;
                    self.nav.pointer_enter()
                };
                self.nav.touch_start(touch.y);
                outcome
            }
            TouchPhase::Move => self.nav.touch_move(touch.y),
            TouchPhase::End | TouchPhase::Cancel => {
                self.nav.touch_end();
                if std::mem::take(&mut self.touching) {
                    self.nav.pointer_leave()
                } else {
                    NavOutcome::Idle
                }
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> NavOutcome {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab if key.is_press() => self.blur(),
            _ => {
                let outcome = self.nav.key(key);
                if outcome == NavOutcome::Blurred {
                    self.focused = false;
                }
                outcome
            }
        }
    }
}

impl Widget for DesktopRail {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || !self.nav.is_navigable() {
            return;
        }
        let (items, hint) = self.layout(area);
        wheel::render_items(&self.nav, &self.emphasis, None, items, buf);
        if let Some(hint) = hint {
            buf.set_string(hint.x, hint.y, HINT, Tone::Faint, hint.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelnav_core::Section;

    fn rail() -> DesktopRail {
        let index = SectionIndex::new(vec![
            Section::new("home", "Home", "/"),
            Section::new("projects", "Projects", "/projects"),
            Section::new("gallery", "Gallery", "/gallery"),
        ])
        .unwrap();
        let mut rail = DesktopRail::new(index, &NavigatorConfig::default());
        rail.set_location("/");
        rail
    }

    // 7 rows: items on rows 0..6 (highlight on row 2), hint on row 6.
    const AREA: Rect = Rect::new(60, 0, 20, 7);

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, y))
    }

    #[test]
    fn hover_engages_and_leaving_releases() {
        let mut rail = rail();
        let t = Instant::now();
        rail.handle_event(&mouse(MouseEventKind::Moved, 61, 1), AREA, t);
        assert!(rail.navigator().engaged());
        rail.handle_event(&mouse(MouseEventKind::Moved, 10, 1), AREA, t);
        assert!(!rail.navigator().engaged());
    }

    #[test]
    fn scroll_inside_steps_and_captures() {
        let mut rail = rail();
        let r = rail.handle_event(&mouse(MouseEventKind::ScrollDown, 61, 2), AREA, Instant::now());
        assert_eq!(r.outcome, NavOutcome::Moved);
        assert_eq!(r.scroll, WheelDisposition::Capture);
        assert_eq!(rail.navigator().highlighted(), 1);
    }

    #[test]
    fn scroll_outside_passes_through_when_idle() {
        let mut rail = rail();
        let r = rail.handle_event(&mouse(MouseEventKind::ScrollDown, 5, 2), AREA, Instant::now());
        assert_eq!(r.scroll, WheelDisposition::PassThrough);
        assert_eq!(rail.navigator().highlighted(), 0);
    }

    #[test]
    fn click_previews_then_commits() {
        let mut rail = rail();
        let t = Instant::now();
        // Gallery is two rows below the highlight.
        rail.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 62, 4), AREA, t);
        let r = rail.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 62, 4), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Moved);
        assert_eq!(rail.navigator().highlighted(), 2);
        assert!(rail.is_focused());

        // Gallery now sits on the highlight row.
        rail.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 62, 2), AREA, t);
        let r = rail.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 62, 2), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Navigate("/gallery".into()));
    }

    #[test]
    fn drag_steps_without_clicking() {
        let mut rail = rail();
        let t = Instant::now();
        rail.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 62, 4), AREA, t);
        let r = rail.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 62, 2), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Moved);
        let r = rail.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 62, 2), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Idle);
        assert_eq!(rail.navigator().highlighted(), 1);
    }

    fn touch(phase: TouchPhase, y: f32) -> Event {
        Event::Touch(TouchEvent::new(phase, y))
    }

    #[test]
    fn touch_drag_engages_and_lift_snaps_back() {
        let mut rail = rail();
        let t = Instant::now();
        rail.handle_event(&touch(TouchPhase::Start, 100.0), AREA, t);
        assert!(rail.navigator().engaged());
        let r = rail.handle_event(&touch(TouchPhase::Move, 60.0), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Moved);
        assert_eq!(rail.navigator().highlighted(), 1);

        let r = rail.handle_event(&touch(TouchPhase::End, 60.0), AREA, t);
        assert_eq!(r.outcome, NavOutcome::Moved);
        assert!(!rail.navigator().engaged());
        assert_eq!(rail.navigator().highlighted(), 0);
    }

    #[test]
    fn cancelled_touch_releases_too() {
        let mut rail = rail();
        let t = Instant::now();
        rail.handle_event(&touch(TouchPhase::Start, 100.0), AREA, t);
        rail.handle_event(&touch(TouchPhase::Move, 40.0), AREA, t);
        rail.handle_event(&touch(TouchPhase::Cancel, 40.0), AREA, t);
        assert!(!rail.navigator().engaged());
        assert_eq!(rail.navigator().highlighted(), 0);
    }

    #[test]
    fn touch_lift_keeps_existing_hover() {
        let mut rail = rail();
        let t = Instant::now();
        rail.handle_event(&mouse(MouseEventKind::Moved, 61, 1), AREA, t);
        rail.handle_event(&touch(TouchPhase::Start, 100.0), AREA, t);
        rail.handle_event(&touch(TouchPhase::Move, 60.0), AREA, t);
        rail.handle_event(&touch(TouchPhase::End, 60.0), AREA, t);
        assert!(rail.navigator().engaged());
        assert_eq!(rail.navigator().highlighted(), 1);
    }

    #[test]
    fn keys_only_when_focused() {
        let mut rail = rail();
        let t = Instant::now();
        let down = Event::Key(KeyEvent::new(KeyCode::Down));
        assert_eq!(rail.handle_event(&down, AREA, t).outcome, NavOutcome::Idle);
        rail.focus();
        assert_eq!(rail.handle_event(&down, AREA, t).outcome, NavOutcome::Moved);
        let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
        assert_eq!(rail.handle_event(&esc, AREA, t).outcome, NavOutcome::Blurred);
        assert!(!rail.is_focused());
        assert_eq!(rail.navigator().highlighted(), 0);
    }

    #[test]
    fn tab_moves_focus_out() {
        let mut rail = rail();
        rail.focus();
        let tab = Event::Key(KeyEvent::new(KeyCode::Tab));
        rail.handle_event(&tab, AREA, Instant::now());
        assert!(!rail.is_focused());
        assert!(!rail.navigator().engaged());
    }

    #[test]
    fn renders_wheel_and_hint() {
        let rail = rail();
        let mut buf = Buffer::new(80, 7);
        rail.render(AREA, &mut buf);
        assert!(buf.row_text(2).contains("›• Home"));
        assert!(buf.row_text(3).contains("Projects"));
        assert!(buf.row_text(6).contains(HINT));
    }

    #[test]
    fn hidden_on_unknown_location() {
        let mut rail = rail();
        rail.focus();
        rail.set_location("/elsewhere");
        assert!(!rail.navigator().engaged());
        let mut buf = Buffer::new(80, 7);
        rail.render(AREA, &mut buf);
        assert!((0..7).all(|y| buf.row_text(y).trim().is_empty()));
    }
}
