#![forbid(unsafe_code)]

//! Terminal portfolio demo for the WheelNav navigator.
//!
//! Wide terminals get the always-visible rail, narrow ones the modal sheet.
//! The page to the left scrolls with the wheel until the navigator is
//! engaged, at which point the navigator owns the wheel.

pub mod app;
pub mod cli;
pub mod error;
pub mod host;
pub mod routes;
pub mod terminal;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use web_time::{Duration, Instant};
use wheelnav_core::config::NavigatorConfig;
use wheelnav_core::event::Event;
use wheelnav_widgets::Buffer;

use crate::app::App;
use crate::cli::{Cli, LogFormat};
use crate::error::{DemoError, Result};
use crate::terminal::TerminalSession;

/// Smallest usable screen.
const MIN_SIZE: (u16, u16) = (20, 8);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_format, &cli.log_filter)?;
    }
    let config = load_config(cli.config.as_deref())?;
    let index = routes::portfolio()?;
    tracing::info!(sections = index.len(), layout = ?cli.layout, "starting");

    let mut session = TerminalSession::new()?;
    let (width, height) = session.size()?;
    if width < MIN_SIZE.0 || height < MIN_SIZE.1 {
        drop(session);
        return Err(DemoError::TerminalTooSmall { width, height });
    }

    let mut app = App::new(index, &config, cli.layout, &cli.location, (width, height));
    let mut buf = Buffer::new(width, height);
    let mut dirty = true;

    while !app.should_quit() {
        if dirty {
            draw(&mut session, &app, &mut buf)?;
            if app.after_paint() {
                draw(&mut session, &app, &mut buf)?;
            }
            dirty = false;
        }
        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Some(event) = Event::from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let Event::Resize { width, height } = event {
            buf.resize(width, height);
        }
        app.handle_event(&event, Instant::now());
        dirty = true;
    }
    tracing::info!(location = app.location(), "exiting");
    Ok(())
}

fn draw(session: &mut TerminalSession, app: &App, buf: &mut Buffer) -> Result<()> {
    app.render(buf);
    session.draw(buf)?;
    Ok(())
}

/// Defaults, overlaid by the TOML file when given.
pub fn load_config(path: Option<&Path>) -> Result<NavigatorConfig> {
    match path {
        Some(path) => {
            let config = NavigatorConfig::from_toml_file(path)?;
            tracing::info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(NavigatorConfig::default()),
    }
}

fn init_logging(path: &Path, format: LogFormat, filter: &str) -> Result<()> {
    let file = File::create(path).map_err(|source| DemoError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| filter.to_owned());
    let result = match format {
        LogFormat::Json => wheelnav_core::logging::init_json(&filter, Mutex::new(file)),
        LogFormat::Text => EnvFilter::try_new(&filter)
            .map_err(Into::into)
            .and_then(|env_filter| {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .try_init()
            }),
    };
    result.map_err(|err| DemoError::Logging {
        message: err.to_string(),
    })
}
