use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Browse a small portfolio site with the wheel navigator.
#[derive(Debug, Clone, Parser)]
#[command(name = "wheelnav-demo", version, about)]
pub struct Cli {
    /// Navigator configuration (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Location to start on.
    #[arg(long, default_value = "/")]
    pub location: String,

    /// Which navigator shell to show.
    #[arg(long, value_enum, default_value_t = LayoutMode::Auto)]
    pub layout: LayoutMode,

    /// Write logs to this file.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log line format.
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    #[arg(long = "log-filter", default_value = "wheelnav_core=debug,wheelnav_widgets=debug,wheelnav_demo=info")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutMode {
    /// Rail at 80 columns and wider, modal below.
    Auto,
    Rail,
    Modal,
}

impl LayoutMode {
    /// Columns at which `Auto` switches to the rail.
    pub const RAIL_MIN_WIDTH: u16 = 80;

    /// Whether the rail is used at `width` columns.
    pub fn uses_rail(self, width: u16) -> bool {
        match self {
            Self::Auto => width >= Self::RAIL_MIN_WIDTH,
            Self::Rail => true,
            Self::Modal => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
