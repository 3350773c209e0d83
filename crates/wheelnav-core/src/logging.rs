#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, the crate-root macros of the same names expand to
//! nothing, so instrumented code carries no cost when logging is off.
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use crate::logging::debug;
//! #[cfg(not(feature = "tracing"))]
//! use crate::debug;
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace, warn};

/// No-op `debug!` used when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

/// No-op `trace!` used when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

/// No-op `info!` used when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}

/// No-op `warn!` used when the `tracing` feature is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

/// Install a JSON `tracing-subscriber` writing to `writer` as the global
/// default.
///
/// `filter` uses `EnvFilter` directive syntax (for example
/// `"wheelnav_core=debug"`). Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json<W>(filter: &str, writer: W) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(writer)
        .try_init()
}
