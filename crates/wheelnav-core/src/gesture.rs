#![forbid(unsafe_code)]

//! Gesture quantization: raw wheel / drag / key input → discrete commands.
//!
//! [`GesturePump`] turns high-frequency, noisy input into "one gesture, one
//! step" commands for the selection engine.
//!
//! # State Machine
//!
//! - **Wheel**: a tick whose magnitude reaches `min_wheel_delta` steps once
//!   in the direction of its sign, then opens a refractory *lock window* of
//!   `lock` during which every further tick is ignored. A continuous scroll
//!   therefore yields one step per lock window.
//! - **Drag**: a running anchor tracks the last emitted position. Once the
//!   finger has travelled `touch_step_distance` from the anchor, one step is
//!   emitted and the anchor moves to the current position, so a long drag
//!   produces several evenly spaced steps.
//! - **Keys**: discrete by nature and never rate limited.
//!
//! # Invariants
//!
//! 1. At most one wheel step is emitted per lock window.
//! 2. Ticks below the threshold neither step nor extend the lock.
//! 3. A drag never emits without a preceding `touch_start`.
//! 4. After `reset()` the pump is idle: no lock, no anchor.

use web_time::{Duration, Instant};

use crate::event::{KeyCode, KeyEvent};
use crate::selection::Direction;

#[cfg(feature = "tracing")]
use crate::logging::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and timeouts for gesture quantization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureConfig {
    /// Minimum |delta| for a wheel tick to count (default: 4.0).
    pub min_wheel_delta: f32,
    /// Refractory window after a wheel step (default: 140ms).
    #[cfg_attr(
        feature = "config",
        serde(rename = "lock_ms", with = "crate::config::duration_ms")
    )]
    pub lock: Duration,
    /// Vertical drag distance per step (default: 24.0).
    pub touch_step_distance: f32,
    /// Delta units one terminal scroll tick is worth (default: 16.0).
    pub scroll_tick_delta: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_wheel_delta: 4.0,
            lock: Duration::from_millis(140),
            touch_step_distance: 24.0,
            scroll_tick_delta: 16.0,
        }
    }
}

/// Discrete command produced from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    /// Move the highlight one section.
    Step(Direction),
    /// Jump to the first section.
    First,
    /// Jump to the last section.
    Last,
    /// Navigate to the highlighted section.
    Commit,
    /// Drop focus from the navigator.
    Release,
}

// ---------------------------------------------------------------------------
// GesturePump
// ---------------------------------------------------------------------------

/// Stateful input quantizer.
#[derive(Debug, Clone)]
pub struct GesturePump {
    config: GestureConfig,
    locked_until: Option<Instant>,
    touch_anchor: Option<f32>,
}

impl GesturePump {
    /// Create a pump with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            locked_until: None,
            touch_anchor: None,
        }
    }

    /// Feed a wheel delta observed at `now`.
    pub fn wheel(&mut self, delta: f32, now: Instant) -> Option<Direction> {
        if !(delta.abs() >= self.config.min_wheel_delta) {
            trace!(delta, "wheel tick below threshold");
            return None;
        }
        if self.is_locked(now) {
            trace!(delta, "wheel tick inside lock window");
            return None;
        }
        let direction = Direction::from_delta(delta)?;
        self.locked_until = Some(now + self.config.lock);
        Some(direction)
    }

    /// Whether wheel input is currently suppressed.
    #[inline]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Finger down (or drag start) at vertical position `y`.
    pub fn touch_start(&mut self, y: f32) {
        self.touch_anchor = Some(y);
    }

    /// Finger moved to `y`.
    ///
    /// Moving up (decreasing `y`) steps forward, like scrolling down.
    pub fn touch_move(&mut self, y: f32) -> Option<Direction> {
        let anchor = self.touch_anchor?;
        let travelled = anchor - y;
        if !(travelled.abs() >= self.config.touch_step_distance) {
            return None;
        }
        self.touch_anchor = Some(y);
        Direction::from_delta(travelled)
    }

    /// Finger lifted or gesture cancelled.
    pub fn touch_end(&mut self) {
        self.touch_anchor = None;
    }

    /// Whether a drag is being tracked.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.touch_anchor.is_some()
    }

    /// Translate a key press into a command.
    pub fn key(&self, key: &KeyEvent) -> Option<NavCommand> {
        if !key.is_press() {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(NavCommand::Step(Direction::Backward)),
            KeyCode::Down => Some(NavCommand::Step(Direction::Forward)),
            KeyCode::Home => Some(NavCommand::First),
            KeyCode::End => Some(NavCommand::Last),
            KeyCode::Enter => Some(NavCommand::Commit),
            KeyCode::Escape => Some(NavCommand::Release),
            _ => None,
        }
    }

    /// Reset all gesture state to idle.
    pub fn reset(&mut self) {
        self.locked_until = None;
        self.touch_anchor = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

impl Default for GesturePump {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEventKind;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_139: Duration = Duration::from_millis(139);
    const MS_140: Duration = Duration::from_millis(140);

    // --- Wheel ---

    #[test]
    fn qualifying_tick_steps_in_sign_direction() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        assert_eq!(pump.wheel(10.0, t), Some(Direction::Forward));

        let mut pump = GesturePump::default();
        assert_eq!(pump.wheel(-10.0, t), Some(Direction::Backward));
    }

    #[test]
    fn tick_within_lock_window_ignored() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        assert!(pump.wheel(10.0, t).is_some());
        assert_eq!(pump.wheel(10.0, t + MS_50), None);
        assert_eq!(pump.wheel(-10.0, t + MS_139), None);
        assert!(pump.is_locked(t + MS_139));
    }

    #[test]
    fn lock_expires_exactly_at_window_end() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        pump.wheel(10.0, t);
        assert!(!pump.is_locked(t + MS_140));
        assert_eq!(pump.wheel(10.0, t + MS_140), Some(Direction::Forward));
    }

    #[test]
    fn jitter_below_threshold_does_not_lock() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        assert_eq!(pump.wheel(3.9, t), None);
        assert!(!pump.is_locked(t));
        assert_eq!(pump.wheel(4.0, t + MS_50), Some(Direction::Forward));
    }

    #[test]
    fn nan_delta_ignored() {
        let mut pump = GesturePump::default();
        assert_eq!(pump.wheel(f32::NAN, Instant::now()), None);
    }

    #[test]
    fn continuous_scroll_yields_one_step_per_window() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        let steps = (0..60)
            .filter_map(|i| pump.wheel(8.0, t + Duration::from_millis(i * 10)))
            .count();
        // 0..590ms with a 140ms window: steps at 0, 140, 280, 420, 560.
        assert_eq!(steps, 5);
    }

    // --- Drag ---

    #[test]
    fn drag_quantized_into_steps() {
        let mut pump = GesturePump::default();
        pump.touch_start(100.0);
        assert_eq!(pump.touch_move(90.0), None);
        assert_eq!(pump.touch_move(76.0), Some(Direction::Forward));
        // Anchor reset to 76.
        assert_eq!(pump.touch_move(60.0), None);
        assert_eq!(pump.touch_move(52.0), Some(Direction::Forward));
        assert_eq!(pump.touch_move(80.0), Some(Direction::Backward));
    }

    #[test]
    fn drag_without_start_is_silent() {
        let mut pump = GesturePump::default();
        assert_eq!(pump.touch_move(0.0), None);
        pump.touch_start(0.0);
        pump.touch_end();
        assert_eq!(pump.touch_move(500.0), None);
        assert!(!pump.is_dragging());
    }

    // --- Keys ---

    #[test]
    fn key_mapping() {
        let pump = GesturePump::default();
        let cases = [
            (KeyCode::Up, Some(NavCommand::Step(Direction::Backward))),
            (KeyCode::Down, Some(NavCommand::Step(Direction::Forward))),
            (KeyCode::Home, Some(NavCommand::First)),
            (KeyCode::End, Some(NavCommand::Last)),
            (KeyCode::Enter, Some(NavCommand::Commit)),
            (KeyCode::Escape, Some(NavCommand::Release)),
            (KeyCode::Char('j'), None),
            (KeyCode::Tab, None),
        ];
        for (code, expected) in cases {
            assert_eq!(pump.key(&KeyEvent::new(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn keys_not_rate_limited() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        pump.wheel(10.0, t);
        assert!(pump.is_locked(t));
        assert_eq!(
            pump.key(&KeyEvent::new(KeyCode::Down)),
            Some(NavCommand::Step(Direction::Forward))
        );
    }

    #[test]
    fn key_release_ignored() {
        let pump = GesturePump::default();
        let release = KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Release);
        assert_eq!(pump.key(&release), None);
    }

    #[test]
    fn reset_clears_all_state() {
        let mut pump = GesturePump::default();
        let t = Instant::now();
        pump.wheel(10.0, t);
        pump.touch_start(5.0);
        pump.reset();
        assert!(!pump.is_locked(t));
        assert!(!pump.is_dragging());
    }

    #[test]
    fn default_config_values() {
        let config = GestureConfig::default();
        assert_eq!(config.min_wheel_delta, 4.0);
        assert_eq!(config.lock, Duration::from_millis(140));
        assert_eq!(config.touch_step_distance, 24.0);
        assert_eq!(config.scroll_tick_delta, 16.0);
    }

    #[test]
    fn config_getter_and_setter() {
        let mut pump = GesturePump::default();
        pump.set_config(GestureConfig {
            lock: Duration::from_millis(10),
            ..GestureConfig::default()
        });
        assert_eq!(pump.config().lock, Duration::from_millis(10));
    }
}
