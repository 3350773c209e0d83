#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The navigator consumes these events regardless of where they came from:
//! a terminal (via [`Event::from_crossterm`]), a test, or an embedding host
//! that reports continuous wheel deltas and touch positions.
//!
//! # Design Notes
//!
//! - Mouse coordinates are 0-indexed cells.
//! - Terminal scroll ticks arrive as [`MouseEventKind::ScrollUp`] /
//!   [`MouseEventKind::ScrollDown`]; shells convert them to [`WheelEvent`]
//!   with [`WheelEvent::from_scroll_tick`].
//! - Positive `delta_y` means "scroll down", i.e. towards later sections.
//! - `KeyEventKind` defaults to `Press` when not available from the source.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// A continuous wheel event (pixel-like delta units).
    Wheel(WheelEvent),

    /// A vertical touch / drag sample.
    Touch(TouchEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Host window focus gained (`true`) or lost (`false`).
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// True for presses and auto-repeats, false for releases.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F24).
    F(u8),
    /// Anything the navigator does not distinguish.
    Other,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),
    /// Mouse button released.
    Up(MouseButton),
    /// Mouse dragged while button held.
    Drag(MouseButton),
    /// Mouse moved (no button pressed).
    Moved,
    /// Mouse wheel scrolled up.
    ScrollUp,
    /// Mouse wheel scrolled down.
    ScrollDown,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// A continuous wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Vertical delta. Positive scrolls down.
    pub delta_y: f32,
    /// Pointer column at the time of the event.
    pub x: u16,
    /// Pointer row at the time of the event.
    pub y: u16,
}

impl WheelEvent {
    /// Create a wheel event.
    #[must_use]
    pub const fn new(delta_y: f32, x: u16, y: u16) -> Self {
        Self { delta_y, x, y }
    }

    /// Convert a terminal scroll tick into a wheel event.
    ///
    /// One tick is worth `tick_delta` units. Returns `None` for mouse
    /// events that are not scroll ticks.
    #[must_use]
    pub fn from_scroll_tick(mouse: &MouseEvent, tick_delta: f32) -> Option<Self> {
        let delta_y = match mouse.kind {
            MouseEventKind::ScrollDown => tick_delta,
            MouseEventKind::ScrollUp => -tick_delta,
            _ => return None,
        };
        Some(Self::new(delta_y, mouse.x, mouse.y))
    }
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger down.
    Start,
    /// Finger moved.
    Move,
    /// Finger lifted.
    End,
    /// Gesture interrupted by the host.
    Cancel,
}

/// A single vertical touch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Lifecycle phase.
    pub phase: TouchPhase,
    /// Vertical position in host units.
    pub y: f32,
}

impl TouchEvent {
    /// Create a touch sample.
    #[must_use]
    pub const fn new(phase: TouchPhase, y: f32) -> Self {
        Self { phase, y }
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::*;
    use crossterm::event as ct;

    impl Event {
        /// Convert a Crossterm event.
        ///
        /// Paste events have no navigator meaning and map to `None`.
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => Some(Self::Key(convert_key(key))),
                ct::Event::Mouse(mouse) => convert_mouse(mouse).map(Self::Mouse),
                ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
                ct::Event::FocusGained => Some(Self::Focus(true)),
                ct::Event::FocusLost => Some(Self::Focus(false)),
                _ => None,
            }
        }
    }

    fn convert_key(key: ct::KeyEvent) -> KeyEvent {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => KeyCode::Other,
        };
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        KeyEvent {
            code,
            modifiers: convert_modifiers(key.modifiers),
            kind,
        }
    }

    fn convert_mouse(mouse: ct::MouseEvent) -> Option<MouseEvent> {
        let kind = match mouse.kind {
            ct::MouseEventKind::Down(b) => MouseEventKind::Down(convert_button(b)),
            ct::MouseEventKind::Up(b) => MouseEventKind::Up(convert_button(b)),
            ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(convert_button(b)),
            ct::MouseEventKind::Moved => MouseEventKind::Moved,
            ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            // Horizontal scroll has no meaning for a vertical wheel.
            ct::MouseEventKind::ScrollLeft | ct::MouseEventKind::ScrollRight => return None,
        };
        Some(MouseEvent {
            kind,
            x: mouse.column,
            y: mouse.row,
            modifiers: convert_modifiers(mouse.modifiers),
        })
    }

    fn convert_button(button: ct::MouseButton) -> MouseButton {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }

    fn convert_modifiers(mods: ct::KeyModifiers) -> Modifiers {
        let mut out = Modifiers::NONE;
        if mods.contains(ct::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if mods.contains(ct::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        if mods.contains(ct::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if mods.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META) {
            out |= Modifiers::SUPER;
        }
        out
    }
}
