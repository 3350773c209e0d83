//! Mobile modal lifecycle: open, focus placement, every close path, and
//! scroll-lock release.
//!
//! 1. **Open focus**: the first paint after opening focuses the current
//!    location's item, or item 0 when no section owns the location.
//! 2. **Close paths**: Escape, backdrop click, the close button (mouse or
//!    Enter) and a commit all release the page lock and refocus the trigger.
//! 3. **Abnormal exit**: dropping an open modal releases the page lock.

use std::cell::Cell;
use std::rc::Rc;

use web_time::Instant;
use wheelnav_core::config::NavigatorConfig;
use wheelnav_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use wheelnav_core::geometry::Rect;
use wheelnav_core::scroll::{Overflow, PageScroll};
use wheelnav_core::{Section, SectionIndex};
use wheelnav_widgets::{MobileModal, ModalResponse};

const SCREEN: Rect = Rect::new(0, 0, 40, 20);

#[derive(Default)]
struct Page {
    overflow: Cell<Overflow>,
    writes: Cell<u32>,
}

impl PageScroll for Page {
    fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    fn set_overflow(&self, overflow: Overflow) {
        self.overflow.set(overflow);
        self.writes.set(self.writes.get() + 1);
    }
}

fn portfolio() -> SectionIndex {
    SectionIndex::new(vec![
        Section::new("home", "Home", "/"),
        Section::new("projects", "Projects", "/projects"),
        Section::new("gallery", "Gallery", "/gallery"),
    ])
    .unwrap()
}

fn setup(location: &str) -> (MobileModal, Rc<Page>) {
    let page = Rc::new(Page::default());
    let mut modal = MobileModal::new(portfolio(), &NavigatorConfig::default(), page.clone(), 10);
    modal.set_location(location);
    (modal, page)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

fn left_click(x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
}

fn open_via_trigger(modal: &mut MobileModal) {
    let trigger = modal.layout(SCREEN).trigger;
    let response = modal.handle_event(&left_click(trigger.x, trigger.y), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Opened);
    modal.after_paint();
}

fn assert_closed_cleanly(modal: &MobileModal, page: &Page) {
    assert!(!modal.is_open());
    assert_eq!(page.overflow(), Overflow::Auto);
    assert_eq!(modal.focused(), Some(modal.trigger_id()));
    assert!(!modal.navigator().engaged());
}

#[test]
fn open_focuses_current_item_on_next_paint() {
    let (mut modal, page) = setup("/projects/42");
    let trigger = modal.layout(SCREEN).trigger;
    modal.handle_event(&left_click(trigger.x, trigger.y), SCREEN, Instant::now());
    assert_eq!(page.overflow(), Overflow::Hidden);
    // Focus lands only once the sheet has been drawn.
    assert_eq!(modal.focused(), None);
    assert_eq!(modal.pending_focus(), Some(modal.item_id(1)));
    assert!(modal.after_paint());
    assert_eq!(modal.focused(), Some(modal.item_id(1)));
    assert!(!modal.after_paint());
}

#[test]
fn open_on_unknown_location_focuses_first_item() {
    let (mut modal, _page) = setup("/nowhere");
    open_via_trigger(&mut modal);
    assert_eq!(modal.focused(), Some(modal.item_id(0)));
    assert_eq!(modal.navigator().highlighted(), 0);
}

#[test]
fn escape_closes_and_returns_focus() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    let response = modal.handle_event(&key(KeyCode::Escape), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Closed);
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn backdrop_click_closes() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    let response = modal.handle_event(&left_click(5, 2), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Closed);
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn close_button_click_closes() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    let close = modal.layout(SCREEN).close;
    let response = modal.handle_event(&left_click(close.x + 1, close.y), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Closed);
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn enter_on_close_button_closes() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    // Items 0..3 follow the close button; Shift+Tab from item 0 wraps to it.
    modal.handle_event(&key(KeyCode::BackTab), SCREEN, Instant::now());
    assert_eq!(modal.focused(), Some(modal.close_id()));
    let response = modal.handle_event(&key(KeyCode::Enter), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Closed);
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn commit_closes_and_navigates() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    let t = Instant::now();
    assert_eq!(modal.handle_event(&key(KeyCode::Down), SCREEN, t), ModalResponse::Redraw);
    assert_eq!(modal.focused(), Some(modal.item_id(1)));
    let response = modal.handle_event(&key(KeyCode::Enter), SCREEN, t);
    assert_eq!(response, ModalResponse::Navigate("/projects".into()));
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn keyboard_opens_from_focused_trigger() {
    let (mut modal, page) = setup("/gallery");
    let t = Instant::now();
    assert_eq!(modal.handle_event(&key(KeyCode::Enter), SCREEN, t), ModalResponse::Ignored);
    modal.set_focus(Some(modal.trigger_id()));
    assert_eq!(modal.handle_event(&key(KeyCode::Enter), SCREEN, t), ModalResponse::Opened);
    modal.after_paint();
    assert_eq!(modal.focused(), Some(modal.item_id(2)));
    assert_eq!(page.overflow(), Overflow::Hidden);
}

#[test]
fn drop_while_open_releases_lock() {
    let page = Rc::new(Page::default());
    {
        let mut modal =
            MobileModal::new(portfolio(), &NavigatorConfig::default(), page.clone(), 10);
        modal.set_location("/");
        modal.open();
        assert_eq!(page.overflow(), Overflow::Hidden);
    }
    assert_eq!(page.overflow(), Overflow::Auto);
    assert_eq!(page.writes.get(), 2);
}

#[test]
fn lock_restores_prior_overflow() {
    let (mut modal, page) = setup("/");
    page.overflow.set(Overflow::Hidden);
    modal.open();
    modal.close();
    assert_eq!(page.overflow(), Overflow::Hidden);
}

#[test]
fn reopen_after_close_takes_a_fresh_lock() {
    let (mut modal, page) = setup("/");
    for _ in 0..3 {
        open_via_trigger(&mut modal);
        assert_eq!(page.overflow(), Overflow::Hidden);
        modal.handle_event(&key(KeyCode::Escape), SCREEN, Instant::now());
        assert_closed_cleanly(&modal, &page);
    }
}

#[test]
fn first_click_on_item_previews_second_commits() {
    let (mut modal, page) = setup("/");
    open_via_trigger(&mut modal);
    let list = modal.layout(SCREEN).list;
    // Highlight (item 0) sits on the list's middle row; item 1 is below it.
    let center = list.y + (list.height - 1) / 2;
    let t = Instant::now();
    assert_eq!(
        modal.handle_event(&left_click(list.x + 2, center + 1), SCREEN, t),
        ModalResponse::Redraw
    );
    assert_eq!(modal.navigator().highlighted(), 1);
    assert!(modal.is_open());
    assert_eq!(
        modal.handle_event(&left_click(list.x + 2, center), SCREEN, t),
        ModalResponse::Navigate("/projects".into())
    );
    assert_closed_cleanly(&modal, &page);
}

#[test]
fn empty_index_focuses_close_button() {
    let page = Rc::new(Page::default());
    let mut modal =
        MobileModal::new(SectionIndex::empty(), &NavigatorConfig::default(), page.clone(), 10);
    modal.open();
    modal.after_paint();
    assert_eq!(modal.focused(), Some(modal.close_id()));
    let response = modal.handle_event(&key(KeyCode::Enter), SCREEN, Instant::now());
    assert_eq!(response, ModalResponse::Closed);
    assert_eq!(page.overflow(), Overflow::Auto);
}
