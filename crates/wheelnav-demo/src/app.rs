//! Demo application state: one page, one navigator shell, a status line.
//!
//! The app is terminal-agnostic: it consumes [`Event`]s and draws into a
//! [`Buffer`]; `terminal` moves both to and from the real screen.

use std::rc::Rc;

use web_time::Instant;
use wheelnav_core::config::NavigatorConfig;
use wheelnav_core::event::{Event, KeyCode, KeyEvent, MouseEventKind};
use wheelnav_core::geometry::Rect;
use wheelnav_core::scroll::{ListenerId, PageScroll, WheelDisposition, WheelRouter};
use wheelnav_core::{NavOutcome, SectionIndex};
use wheelnav_widgets::{Buffer, DesktopRail, MobileModal, ModalResponse, Tone, Widget};

use crate::cli::LayoutMode;
use crate::host::Host;
use crate::routes::{self, PROJECTS, Page};

/// Columns reserved for the rail.
pub const RAIL_WIDTH: u16 = 24;
/// Page rows moved per scroll tick.
const SCROLL_ROWS: isize = 3;
/// Focus id base for the modal's nodes.
const MODAL_FOCUS_BASE: u64 = 1_000;
const RAIL_LISTENER: ListenerId = ListenerId(1);

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub page: Rect,
    pub rail: Option<Rect>,
    pub status: Rect,
}

#[derive(Debug)]
pub struct App {
    host: Rc<Host>,
    layout: LayoutMode,
    rail: DesktopRail,
    modal: MobileModal,
    location: String,
    page: Page,
    width: u16,
    height: u16,
    quit: bool,
}

impl App {
    pub fn new(
        index: SectionIndex,
        config: &NavigatorConfig,
        layout: LayoutMode,
        location: &str,
        (width, height): (u16, u16),
    ) -> Self {
        let host = Rc::new(Host::new());
        let mut rail = DesktopRail::new(index.clone(), config);
        let router: Rc<dyn WheelRouter> = host.clone();
        rail.navigator_mut().attach_host(router, RAIL_LISTENER);
        let page: Rc<dyn PageScroll> = host.clone();
        let modal = MobileModal::new(index, config, page, MODAL_FOCUS_BASE);

        let mut app = Self {
            host,
            layout,
            rail,
            modal,
            location: String::new(),
            page: routes::page_for(location),
            width,
            height,
            quit: false,
        };
        app.navigate(location);
        app
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn rail(&self) -> &DesktopRail {
        &self.rail
    }

    #[inline]
    pub fn modal(&self) -> &MobileModal {
        &self.modal
    }

    pub fn uses_rail(&self) -> bool {
        self.layout.uses_rail(self.width)
    }

    pub fn frame(&self) -> Frame {
        let screen = Rect::from_size(self.width, self.height);
        let body = Rect::new(0, 0, screen.width, screen.height.saturating_sub(1));
        let status = Rect::new(0, body.bottom(), screen.width, screen.height - body.height);
        if self.uses_rail() {
            let (page, rail) = body.split_right(RAIL_WIDTH.min(body.width / 2));
            Frame {
                page: Rect::new(page.x, page.y, page.width.saturating_sub(1), page.height),
                rail: Some(rail),
                status,
            }
        } else {
            let (_, page) = body.split_top(1);
            Frame {
                page,
                rail: None,
                status,
            }
        }
    }

    /// Area the modal lays itself out in (everything above the status line).
    fn modal_area(&self) -> Rect {
        Rect::from_size(self.width, self.height.saturating_sub(1))
    }

    /// Host navigation: every commit lands here.
    pub fn navigate(&mut self, target: &str) {
        tracing::info!(from = %self.location, to = target, "navigate");
        self.location = target.to_owned();
        self.page = routes::page_for(target);
        self.host.reset_offset();
        self.rail.set_location(target);
        self.modal.set_location(target);
    }

    fn max_offset(&self) -> usize {
        let rows = usize::from(self.frame().page.height.saturating_sub(1)).max(1);
        self.page.lines.len().saturating_sub(rows)
    }

    fn scroll_page(&mut self, rows: isize) {
        let max = self.max_offset();
        self.host.scroll_by(rows, max);
    }

    fn resize(&mut self, width: u16, height: u16) {
        let had_rail = self.uses_rail();
        self.width = width;
        self.height = height;
        if had_rail != self.uses_rail() {
            tracing::debug!(width, rail = self.uses_rail(), "layout switched");
            if had_rail {
                self.rail.blur();
                self.rail.navigator_mut().release();
            } else {
                self.modal.close();
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) if is_quit(key) => {
                self.quit = true;
                return;
            }
            Event::Resize { width, height } => self.resize(*width, *height),
            _ => {}
        }
        if self.uses_rail() {
            self.handle_with_rail(event, now);
        } else {
            self.handle_with_modal(event, now);
        }
    }

    fn handle_with_rail(&mut self, event: &Event, now: Instant) {
        if let Event::Key(key) = event {
            if key.code == KeyCode::Tab && key.is_press() && !self.rail.is_focused() {
                self.rail.focus();
                return;
            }
        }
        let area = self.frame().rail.unwrap_or_default();
        let was_focused = self.rail.is_focused();
        let response = self.rail.handle_event(event, area, now);
        if let NavOutcome::Navigate(target) = &response.outcome {
            self.navigate(target);
            return;
        }
        if let Some(rows) = scroll_rows(event) {
            if response.scroll == WheelDisposition::PassThrough {
                self.scroll_page(rows);
            }
            return;
        }
        if let Event::Key(key) = event {
            if !was_focused {
                self.page_key(key);
            }
        }
    }

    fn handle_with_modal(&mut self, event: &Event, now: Instant) {
        let trigger = self.modal.trigger_id();
        if let Event::Key(key) = event {
            if key.code == KeyCode::Tab && key.is_press() && !self.modal.is_open() {
                let next = match self.modal.focused() {
                    Some(id) if id == trigger => None,
                    _ => Some(trigger),
                };
                self.modal.set_focus(next);
                return;
            }
        }
        match self.modal.handle_event(event, self.modal_area(), now) {
            ModalResponse::Navigate(target) => self.navigate(&target),
            ModalResponse::Ignored => {
                if let Some(rows) = scroll_rows(event) {
                    self.scroll_page(rows);
                } else if let Event::Key(key) = event {
                    if !self.modal.is_open() && self.modal.focused() != Some(trigger) {
                        self.page_key(key);
                    }
                }
            }
            ModalResponse::Redraw | ModalResponse::Opened | ModalResponse::Closed => {}
        }
    }

    /// Keys for the page itself.
    fn page_key(&mut self, key: &KeyEvent) {
        if !key.is_press() {
            return;
        }
        match key.code {
            KeyCode::Up => self.scroll_page(-1),
            KeyCode::Down => self.scroll_page(1),
            KeyCode::PageUp => self.scroll_page(-10),
            KeyCode::PageDown => self.scroll_page(10),
            KeyCode::Backspace => {
                let parent = routes::parent_of(&self.location).to_owned();
                self.navigate(&parent);
            }
            KeyCode::Char(c) if self.location == "/projects" => {
                if let Some((id, _)) = PROJECTS.iter().find(|(id, _)| id.starts_with(c)) {
                    self.navigate(&format!("/projects/{id}"));
                }
            }
            _ => {}
        }
    }

    /// Apply deferred focus once a frame has been shown.
    /// Returns true if another frame is needed.
    pub fn after_paint(&mut self) -> bool {
        !self.uses_rail() && self.modal.after_paint()
    }

    pub fn render(&self, buf: &mut Buffer) {
        buf.clear();
        let frame = self.frame();
        self.render_page(frame.page, buf);
        match frame.rail {
            Some(rail) => {
                for y in rail.y..rail.bottom() {
                    buf.set_string(rail.x.saturating_sub(1), y, "│", Tone::Faint, 1);
                }
                self.rail.render(rail, buf);
            }
            None => self.modal.render(self.modal_area(), buf),
        }
        let status = format!(" {}  ·  Tab: navigator  ·  q: quit", self.location);
        let bar = frame.status;
        buf.set_string(bar.x, bar.y, &status, Tone::Muted, bar.width);
    }

    fn render_page(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = area.row(0) else {
            return;
        };
        let width = area.width.saturating_sub(1);
        buf.set_string(title.x + 1, title.y, &self.page.title, Tone::Accent, width);
        let rows = usize::from(area.height.saturating_sub(1));
        let visible = self.page.lines.iter().skip(self.host.offset()).take(rows);
        for (row, line) in visible.enumerate() {
            let y = area.y + 1 + row as u16;
            buf.set_string(area.x + 1, y, line, Tone::Normal, width);
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.is_press() && (key.is_char('q') || (key.ctrl() && key.is_char('c')))
}

/// Page rows a scroll tick asks for.
fn scroll_rows(event: &Event) -> Option<isize> {
    match event {
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(SCROLL_ROWS),
            MouseEventKind::ScrollUp => Some(-SCROLL_ROWS),
            _ => None,
        },
        Event::Wheel(wheel) if wheel.delta_y > 0.0 => Some(SCROLL_ROWS),
        Event::Wheel(wheel) if wheel.delta_y < 0.0 => Some(-SCROLL_ROWS),
        _ => None,
    }
}
