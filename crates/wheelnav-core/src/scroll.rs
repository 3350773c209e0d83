#![forbid(unsafe_code)]

//! Scroll ownership and scoped host resources.
//!
//! Two pieces of host-global state are touched by navigators:
//!
//! - **Page scroll lock**: while the mobile sheet is open the page behind it
//!   must not scroll. [`ScrollLockGuard`] saves the previous overflow,
//!   suppresses scrolling, and restores the saved value on drop.
//! - **Window wheel capture**: while an engaged navigator is configured to
//!   capture scroll, it registers with the host's [`WheelRouter`] so wheel
//!   events anywhere on screen reach it. [`WheelCaptureGuard`] detaches on
//!   drop.
//!
//! # Lifecycle Guarantees
//!
//! 1. Every acquisition registers its release at acquisition time (`Drop`).
//! 2. Release runs on every exit path: close, disengage, or the owning
//!    navigator being dropped while still engaged.
//! 3. Nested scroll locks restore in LIFO order, so the outermost guard
//!    restores the value that existed before any lock.
//!
//! Hosts are single-threaded UI environments; the traits take `&self` and
//! implementations use interior mutability, like a document handle would.

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "tracing")]
use crate::logging::debug;
#[cfg(not(feature = "tracing"))]
use crate::debug;

/// Page overflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    /// The page scrolls normally.
    #[default]
    Auto,
    /// Page scrolling is suppressed.
    Hidden,
}

/// Host page whose scrolling can be suppressed.
pub trait PageScroll {
    /// Current overflow state.
    fn overflow(&self) -> Overflow;
    /// Replace the overflow state.
    fn set_overflow(&self, overflow: Overflow);
}

/// Host dispatcher for window-level wheel events.
pub trait WheelRouter {
    /// Start delivering window wheel events to `listener`.
    fn attach(&self, listener: ListenerId);
    /// Stop delivering window wheel events to `listener`.
    fn detach(&self, listener: ListenerId);
}

/// Identifier of a wheel listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Suppresses page scrolling for as long as it lives.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    page: Rc<dyn PageScroll>,
    saved: Overflow,
}

impl ScrollLockGuard {
    /// Save the current overflow and suppress scrolling.
    pub fn acquire(page: Rc<dyn PageScroll>) -> Self {
        let saved = page.overflow();
        page.set_overflow(Overflow::Hidden);
        debug!(?saved, "page scroll locked");
        Self { page, saved }
    }

    /// The overflow that will be restored.
    #[inline]
    pub fn saved(&self) -> Overflow {
        self.saved
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("saved", &self.saved)
            .finish()
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.page.set_overflow(self.saved);
        debug!(restored = ?self.saved, "page scroll unlocked");
    }
}

/// Keeps a window wheel registration alive.
#[must_use = "the capture is released as soon as the guard is dropped"]
pub struct WheelCaptureGuard {
    router: Rc<dyn WheelRouter>,
    listener: ListenerId,
}

impl WheelCaptureGuard {
    /// Register `listener` with the router.
    pub fn acquire(router: Rc<dyn WheelRouter>, listener: ListenerId) -> Self {
        router.attach(listener);
        debug!(listener = listener.0, "wheel capture acquired");
        Self { router, listener }
    }

    /// The registered listener.
    #[inline]
    pub fn listener(&self) -> ListenerId {
        self.listener
    }
}

impl fmt::Debug for WheelCaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelCaptureGuard")
            .field("listener", &self.listener)
            .finish()
    }
}

impl Drop for WheelCaptureGuard {
    fn drop(&mut self) {
        self.router.detach(self.listener);
        debug!(listener = self.listener.0, "wheel capture released");
    }
}

// ---------------------------------------------------------------------------
// Arbitration
// ---------------------------------------------------------------------------

/// Where a wheel event was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelOrigin {
    /// Inside the navigator's own scrollable viewport.
    Viewport,
    /// Anywhere else on the page (window-level listener).
    Window,
}

/// What the host should do with a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDisposition {
    /// Not ours; let the page scroll.
    PassThrough,
    /// Ours; prevent the page's default scroll.
    Capture,
}

/// Owns the window-level wheel capture of one navigator.
#[derive(Default)]
pub struct ScrollCapture {
    router: Option<(Rc<dyn WheelRouter>, ListenerId)>,
    guard: Option<WheelCaptureGuard>,
}

impl fmt::Debug for ScrollCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCapture")
            .field("listener", &self.router.as_ref().map(|(_, l)| *l))
            .field("capturing", &self.is_capturing())
            .finish()
    }
}

impl ScrollCapture {
    /// A capture with no host attached; it never holds the window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a host router. Any held capture is released first.
    pub fn attach_host(&mut self, router: Rc<dyn WheelRouter>, listener: ListenerId) {
        self.guard = None;
        self.router = Some((router, listener));
    }

    /// Whether the window wheel is currently captured.
    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.guard.is_some()
    }

    /// Acquire the capture while `engaged && enabled`, release otherwise.
    pub fn sync(&mut self, engaged: bool, enabled: bool) {
        let want = engaged && enabled;
        match (want, self.guard.is_some()) {
            (true, false) => {
                if let Some((router, listener)) = &self.router {
                    self.guard = Some(WheelCaptureGuard::acquire(Rc::clone(router), *listener));
                }
            }
            (false, true) => self.guard = None,
            _ => {}
        }
    }

    /// Decide whether a wheel event belongs to the navigator.
    ///
    /// Viewport events are always the navigator's (its own handler runs).
    /// Window events are the navigator's only while the capture is held; the
    /// window listener skips events that started inside the viewport so
    /// those are never counted twice.
    pub fn route(&self, origin: WheelOrigin) -> WheelDisposition {
        match origin {
            WheelOrigin::Viewport => WheelDisposition::Capture,
            WheelOrigin::Window if self.is_capturing() => WheelDisposition::Capture,
            WheelOrigin::Window => WheelDisposition::PassThrough,
        }
    }

    /// Release any held capture.
    pub fn release(&mut self) {
        self.guard = None;
    }
}
