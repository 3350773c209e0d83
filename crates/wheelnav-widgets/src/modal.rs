#![forbid(unsafe_code)]

//! Trigger button plus bottom sheet for narrow terminals.
//!
//! # State Machine
//!
//! ```text
//!  Closed ──trigger──▶ Open(focus pending) ──after_paint──▶ Open(focused)
//!    ▲                                                        │
//!    └──── Esc / backdrop / close button / commit ────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. While open, the page scroll lock is held and focus stays inside the
//!    sheet (close button and items).
//! 2. The first paint after opening moves focus to the current location's
//!    item, or item 0 when the location belongs to no section.
//! 3. Every close path releases the scroll lock and returns focus to the
//!    trigger.
//! 4. Dropping an open modal releases the scroll lock.

use std::fmt;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;
use web_time::Instant;
use wheelnav_core::config::{EmphasisConfig, NavigatorConfig};
use wheelnav_core::engagement::{FocusId, FocusScope};
use wheelnav_core::event::{
    Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind, TouchPhase, WheelEvent,
};
use wheelnav_core::geometry::Rect;
use wheelnav_core::scroll::{PageScroll, ScrollLockGuard, WheelOrigin};
use wheelnav_core::{NavOutcome, Navigator, SectionIndex};

use crate::Widget;
use crate::buffer::{Buffer, Cell, Tone};
use crate::focus::FocusTrap;
use crate::rail::{HINT, ROW_UNITS};
use crate::wheel;

/// Label of the trigger button.
pub const TRIGGER_LABEL: &str = "[≡ Sections]";
const CLOSE_LABEL: &str = "[x]";
const TITLE: &str = "Sections";

/// What a modal event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResponse {
    /// Not for the modal.
    Ignored,
    /// Modal state changed; redraw.
    Redraw,
    /// The sheet opened; focus moves on the next paint.
    Opened,
    /// The sheet closed and focus went back to the trigger.
    Closed,
    /// The sheet closed and the host should navigate.
    Navigate(String),
}

/// Rectangles of one modal frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// Trigger button, top right of the screen.
    pub trigger: Rect,
    /// Bordered sheet anchored to the bottom.
    pub sheet: Rect,
    /// Close button on the title row.
    pub close: Rect,
    /// Item wheel.
    pub list: Rect,
    /// Hint row under the list, when shown.
    pub hint: Option<Rect>,
}

#[derive(Debug)]
struct OpenSheet {
    _lock: ScrollLockGuard,
    trap: FocusTrap,
}

/// Modal presentation of a navigator.
///
/// Focus ids are allocated from `base`: the trigger is `base`, the close
/// button `base + 1` and item `i` is `base + 2 + i`. Ids saturate at
/// `FocusId::MAX`.
pub struct MobileModal {
    nav: Navigator,
    emphasis: EmphasisConfig,
    page: Rc<dyn PageScroll>,
    base: FocusId,
    focused: Option<FocusId>,
    pending_focus: Option<FocusId>,
    sheet: Option<OpenSheet>,
}

impl fmt::Debug for MobileModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MobileModal")
            .field("nav", &self.nav)
            .field("base", &self.base)
            .field("focused", &self.focused)
            .field("pending_focus", &self.pending_focus)
            .field("open", &self.is_open())
            .finish()
    }
}

impl MobileModal {
    pub fn new(
        index: SectionIndex,
        config: &NavigatorConfig,
        page: Rc<dyn PageScroll>,
        base: FocusId,
    ) -> Self {
        Self::from_navigator(
            Navigator::new(index, config),
            config.emphasis.clone(),
            page,
            base,
        )
    }

    pub fn from_navigator(
        nav: Navigator,
        emphasis: EmphasisConfig,
        page: Rc<dyn PageScroll>,
        base: FocusId,
    ) -> Self {
        let len = FocusId::try_from(nav.sections().len()).unwrap_or(FocusId::MAX);
        let first_item = base.saturating_add(2);
        let scope = FocusScope::new(base.saturating_add(1)..first_item.saturating_add(len));
        Self {
            nav: nav.with_scope(scope),
            emphasis,
            page,
            base,
            focused: None,
            pending_focus: None,
            sheet: None,
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

    #[inline]
    pub fn trigger_id(&self) -> FocusId {
        self.base
    }

    #[inline]
    pub fn close_id(&self) -> FocusId {
        self.base.saturating_add(1)
    }

    #[inline]
    pub fn item_id(&self, index: usize) -> FocusId {
        let index = FocusId::try_from(index).unwrap_or(FocusId::MAX);
        self.base.saturating_add(2).saturating_add(index)
    }

    fn item_of(&self, id: FocusId) -> Option<usize> {
        let index = usize::try_from(id.checked_sub(self.base.checked_add(2)?)?).ok()?;
        (index < self.nav.sections().len()).then_some(index)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.sheet.is_some()
    }

    /// The focused node, as far as the modal knows.
    #[inline]
    pub fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    /// Focus scheduled for the next paint.
    #[inline]
    pub fn pending_focus(&self) -> Option<FocusId> {
        self.pending_focus
    }

    /// Host moved focus onto the trigger (or elsewhere with `None`).
    pub fn set_focus(&mut self, id: Option<FocusId>) {
        if self.sheet.is_none() {
            self.focused = id;
        }
    }

    /// Forward the host's location.
    pub fn set_location(&mut self, location: &str) -> NavOutcome {
        self.nav.set_location(location)
    }

    /// Open the sheet. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        if self.sheet.is_some() {
            return false;
        }
        let lock = ScrollLockGuard::acquire(Rc::clone(&self.page));
        let mut order = vec![self.close_id()];
        order.extend((0..self.nav.sections().len()).map(|i| self.item_id(i)));
        let trap = FocusTrap::new(order, Some(self.trigger_id()));
        self.sheet = Some(OpenSheet { _lock: lock, trap });
        self.nav.focus_in();
        self.pending_focus = Some(if self.nav.sections().is_empty() {
            self.close_id()
        } else {
            self.item_id(self.nav.current_index().unwrap_or(0))
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(pending_focus = ?self.pending_focus, "modal opened");
        true
    }

    /// Apply focus scheduled by [`open`](Self::open). Call once the opened
    /// sheet has been drawn. Returns true if focus moved.
    pub fn after_paint(&mut self) -> bool {
        let Some(id) = self.pending_focus.take() else {
            return false;
        };
        self.focus_in_sheet(id)
    }

    fn focus_in_sheet(&mut self, id: FocusId) -> bool {
        let Some(sheet) = self.sheet.as_mut() else {
            return false;
        };
        if !sheet.trap.focus(id) {
            return false;
        }
        self.focused = Some(id);
        if let Some(index) = self.item_of(id) {
            self.nav.set_highlighted(index);
        }
        true
    }

    /// Close the sheet. Returns false if it was not open.
    pub fn close(&mut self) -> bool {
        let Some(sheet) = self.sheet.take() else {
            return false;
        };
        self.focused = sheet.trap.release();
        self.pending_focus = None;
        self.nav.touch_end();
        self.nav.release();
        #[cfg(feature = "tracing")]
        tracing::debug!("modal closed");
        true
    }

    /// Frame layout for `screen`.
    pub fn layout(&self, screen: Rect) -> ModalLayout {
        let trigger_width = (TRIGGER_LABEL.width() as u16).min(screen.width);
        let trigger = Rect::new(screen.right() - trigger_width, screen.y, trigger_width, 1);

        let wanted = u16::try_from(self.nav.sections().len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = wanted.max(5).min(screen.height);
        let sheet = Rect::new(screen.x, screen.bottom() - height, screen.width, height);
        let inner = sheet.inner();
        let (title, body) = inner.split_top(1);
        let close_width = (CLOSE_LABEL.len() as u16).min(title.width);
        let close = Rect::new(title.right() - close_width, title.y, close_width, title.height);
        let (list, hint) = if self.nav.props().show_hint && body.height >= 3 {
            (
                Rect::new(body.x, body.y, body.width, body.height - 1),
                Some(Rect::new(body.x, body.bottom() - 1, body.width, 1)),
            )
        } else {
            (body, None)
        };
        ModalLayout {
            trigger,
            sheet,
            close,
            list,
            hint,
        }
    }

    /// Handle one terminal event over the full `screen`.
    pub fn handle_event(&mut self, event: &Event, screen: Rect, now: Instant) -> ModalResponse {
        let layout = self.layout(screen);
        if self.sheet.is_none() {
            return self.handle_closed(event, &layout);
        }
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, &layout, now),
            Event::Wheel(wheel) if layout.sheet.contains(wheel.x, wheel.y) => {
                let outcome = self.nav.wheel(wheel.delta_y, now, WheelOrigin::Viewport).outcome;
                self.follow_highlight(outcome)
            }
            Event::Touch(touch) => match touch.phase {
                TouchPhase::Start => {
                    self.nav.touch_start(touch.y);
                    ModalResponse::Ignored
                }
                TouchPhase::Move => {
                    let outcome = self.nav.touch_move(touch.y);
                    self.follow_highlight(outcome)
                }
                TouchPhase::End | TouchPhase::Cancel => {
                    self.nav.touch_end();
                    ModalResponse::Ignored
                }
            },
            Event::Resize { .. } => ModalResponse::Redraw,
            _ => ModalResponse::Ignored,
        }
    }

    fn handle_closed(&mut self, event: &Event, layout: &ModalLayout) -> ModalResponse {
        let activate = match event {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                x,
                y,
                ..
            }) => layout.trigger.contains(*x, *y),
            Event::Key(key) if key.is_press() && self.focused == Some(self.trigger_id()) => {
                matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            _ => false,
        };
        if activate && self.open() {
            ModalResponse::Opened
        } else {
            ModalResponse::Ignored
        }
    }

    /// Keep keyboard focus on the highlighted item after it moved.
    fn follow_highlight(&mut self, outcome: NavOutcome) -> ModalResponse {
        match outcome {
            NavOutcome::Idle => ModalResponse::Ignored,
            NavOutcome::Navigate(target) => {
                self.close();
                ModalResponse::Navigate(target)
            }
            NavOutcome::Blurred => {
                self.close();
                ModalResponse::Closed
            }
            NavOutcome::Moved => {
                let id = self.item_id(self.nav.highlighted());
                if let Some(sheet) = self.sheet.as_mut() {
                    if sheet.trap.focus(id) {
                        self.focused = Some(id);
                    }
                }
                ModalResponse::Redraw
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ModalResponse {
        if !key.is_press() {
            return ModalResponse::Ignored;
        }
        if key.code == KeyCode::Escape {
            self.close();
            return ModalResponse::Closed;
        }
        if let Some(sheet) = self.sheet.as_mut() {
            if sheet.trap.handle_key(key) {
                if let Some(id) = sheet.trap.focused() {
                    self.focused = Some(id);
                    if let Some(index) = self.item_of(id) {
                        self.nav.set_highlighted(index);
                    }
                }
                return ModalResponse::Redraw;
            }
        }
        if key.code == KeyCode::Enter && self.focused == Some(self.close_id()) {
            self.close();
            return ModalResponse::Closed;
        }
        let outcome = self.nav.key(key);
        self.follow_highlight(outcome)
    }

    fn handle_mouse(
        &mut self,
        mouse: &MouseEvent,
        layout: &ModalLayout,
        now: Instant,
    ) -> ModalResponse {
        let tick = self.nav.gesture_config().scroll_tick_delta;
        if let Some(wheel) = WheelEvent::from_scroll_tick(mouse, tick) {
            if !layout.sheet.contains(wheel.x, wheel.y) {
                return ModalResponse::Ignored;
            }
            let outcome = self.nav.wheel(wheel.delta_y, now, WheelOrigin::Viewport).outcome;
            return self.follow_highlight(outcome);
        }
        let (x, y) = mouse.position();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !layout.sheet.contains(x, y) || layout.close.contains(x, y) {
                    self.close();
                    return ModalResponse::Closed;
                }
                match wheel::item_at(layout.list, &self.nav, &self.emphasis, x, y) {
                    Some(index) => {
                        self.nav.touch_start(f32::from(y) * ROW_UNITS);
                        let outcome = self.nav.click(index);
                        self.follow_highlight(outcome)
                    }
                    None => ModalResponse::Ignored,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let outcome = self.nav.touch_move(f32::from(y) * ROW_UNITS);
                self.follow_highlight(outcome)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.nav.touch_end();
                ModalResponse::Ignored
            }
            _ => ModalResponse::Ignored,
        }
    }

    fn render_sheet(&self, layout: &ModalLayout, screen: Rect, buf: &mut Buffer) {
        // Dim the page behind the sheet.
        for y in screen.y..screen.bottom() {
            for x in screen.x..screen.right() {
                if let Some(cell) = buf.get_mut(x, y) {
                    if cell.tone != Tone::Hidden {
                        cell.tone = Tone::Faint;
                    }
                }
            }
        }

        let sheet = layout.sheet;
        buf.fill(sheet, Cell::default());
        draw_border(sheet, buf);
        let inner = sheet.inner();
        buf.set_string(inner.x, inner.y, TITLE, Tone::Normal, inner.width);
        let close_tone = if self.focused == Some(self.close_id()) {
            Tone::Accent
        } else {
            Tone::Muted
        };
        let close = layout.close;
        buf.set_string(close.x, close.y, CLOSE_LABEL, close_tone, close.width);

        let focused_item = self.focused.and_then(|id| self.item_of(id));
        wheel::render_items(&self.nav, &self.emphasis, focused_item, layout.list, buf);
        if let Some(hint) = layout.hint {
            buf.set_string(hint.x, hint.y, HINT, Tone::Faint, hint.width);
        }
    }
}

fn draw_border(area: Rect, buf: &mut Buffer) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);
    for x in area.x..=right {
        buf.set(x, area.y, Cell::new('─', Tone::Muted));
        buf.set(x, bottom, Cell::new('─', Tone::Muted));
    }
    for y in area.y..=bottom {
        buf.set(area.x, y, Cell::new('│', Tone::Muted));
        buf.set(right, y, Cell::new('│', Tone::Muted));
    }
    buf.set(area.x, area.y, Cell::new('┌', Tone::Muted));
    buf.set(right, area.y, Cell::new('┐', Tone::Muted));
    buf.set(area.x, bottom, Cell::new('└', Tone::Muted));
    buf.set(right, bottom, Cell::new('┘', Tone::Muted));
}

impl Widget for MobileModal {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let layout = self.layout(area);
        if self.sheet.is_some() {
            self.render_sheet(&layout, area, buf);
        } else {
            let tone = if self.focused == Some(self.trigger_id()) {
                Tone::Accent
            } else {
                Tone::Normal
            };
            let trigger = layout.trigger;
            buf.set_string(trigger.x, trigger.y, TRIGGER_LABEL, tone, trigger.width);
        }
    }
}
