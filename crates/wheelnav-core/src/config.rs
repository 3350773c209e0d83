#![forbid(unsafe_code)]

//! Navigator configuration.
//!
//! Groups every tunable of a navigator instance into [`NavigatorConfig`].
//! With the `config` feature it can be loaded from TOML or JSON at startup.
//!
//! ```toml
//! capture_scroll_on_engage = true
//! show_hint = false
//!
//! [gesture]
//! min_wheel_delta = 4.0
//! lock_ms = 140
//!
//! [emphasis]
//! scale_falloff = 0.12
//! ```
//!
//! # Defaults
//!
//! `NavigatorConfig::default()` carries the tuned constants. The lock window
//! and delta thresholds are empirical feel, not load-bearing algorithm
//! parameters, which is why they live here.

#[cfg(feature = "config")]
use std::path::Path;

use thiserror::Error;

use crate::gesture::GestureConfig;

/// Distance-based de-emphasis curve parameters.
///
/// Items `d` positions away from the highlight are drawn at
/// `scale = max(min_scale, 1 - scale_falloff * d)` and
/// `opacity = max(min_opacity, 1 - opacity_falloff * d)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EmphasisConfig {
    /// Scale lost per step of distance (default: 0.12).
    pub scale_falloff: f32,
    /// Opacity lost per step of distance (default: 0.28).
    pub opacity_falloff: f32,
    /// Floor for scale (default: 0.6).
    pub min_scale: f32,
    /// Floor for opacity (default: 0.0).
    pub min_opacity: f32,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            scale_falloff: 0.12,
            opacity_falloff: 0.28,
            min_scale: 0.6,
            min_opacity: 0.0,
        }
    }
}

/// Top-level navigator configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavigatorConfig {
    /// Gesture thresholds and lock window.
    pub gesture: GestureConfig,
    /// Take over the page's wheel while engaged (default: true).
    pub capture_scroll_on_engage: bool,
    /// Render the usage hint line (default: true).
    pub show_hint: bool,
    /// De-emphasis curve for presentation shells.
    pub emphasis: EmphasisConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            capture_scroll_on_engage: true,
            show_hint: true,
            emphasis: EmphasisConfig::default(),
        }
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse failure.
    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse failure.
    #[cfg(feature = "config")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but values are out of range.
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl NavigatorConfig {
    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Return `self` if valid, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let g = &self.gesture;
        if !(g.min_wheel_delta.is_finite() && g.min_wheel_delta >= 0.0) {
            errors.push(format!(
                "gesture.min_wheel_delta must be finite and >= 0, got {}",
                g.min_wheel_delta
            ));
        }
        if !(g.touch_step_distance.is_finite() && g.touch_step_distance > 0.0) {
            errors.push(format!(
                "gesture.touch_step_distance must be finite and > 0, got {}",
                g.touch_step_distance
            ));
        }
        if !(g.scroll_tick_delta.is_finite() && g.scroll_tick_delta > 0.0) {
            errors.push(format!(
                "gesture.scroll_tick_delta must be finite and > 0, got {}",
                g.scroll_tick_delta
            ));
        }

        let e = &self.emphasis;
        for (name, value) in [
            ("scale_falloff", e.scale_falloff),
            ("opacity_falloff", e.opacity_falloff),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("emphasis.{name} must be finite and >= 0, got {value}"));
            }
        }
        if !(e.min_scale > 0.0 && e.min_scale <= 1.0) {
            errors.push(format!("emphasis.min_scale must be in (0, 1], got {}", e.min_scale));
        }
        if !(e.min_opacity >= 0.0 && e.min_opacity <= 1.0) {
            errors.push(format!(
                "emphasis.min_opacity must be in [0, 1], got {}",
                e.min_opacity
            ));
        }
        errors
    }
}

/// Serialize `Duration` as integer milliseconds.
#[cfg(feature = "config")]
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u128::from(u64::MAX)) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
