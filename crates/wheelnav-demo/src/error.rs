use std::path::PathBuf;

use thiserror::Error;
use wheelnav_core::SectionIndexError;
use wheelnav_core::config::ConfigError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid routing table: {0}")]
    Sections(#[from] SectionIndexError),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("logging setup failed: {message}")]
    Logging { message: String },

    #[error("terminal too small: {width}x{height}")]
    TerminalTooSmall { width: u16, height: u16 },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Sections(_) => 2,
            _ => 1,
        }
    }
}
