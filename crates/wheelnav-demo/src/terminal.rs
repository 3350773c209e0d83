//! Terminal session lifecycle and frame output.
//!
//! # Invariants
//!
//! - Raw mode, the alternate screen and mouse capture are undone on drop
//!   and, through the panic hook, on panic.
//! - Frames are written in one flush; cells are grouped into runs of equal
//!   tone so style changes are only emitted at run boundaries.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::{cursor, event, execute, queue, terminal};
use wheelnav_widgets::{Buffer, Tone};

/// Owns the terminal's raw-mode state for the lifetime of the app.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalSession {
    /// Enter raw mode, the alternate screen and mouse capture.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");
        let mut session = Self {
            alternate_screen: false,
            mouse_capture: false,
        };

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        session.alternate_screen = true;

        execute!(stdout, event::EnableMouseCapture, event::EnableFocusChange)?;
        session.mouse_capture = true;
        tracing::info!("mouse capture enabled");
        Ok(session)
    }

    /// Current size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Write `buf` to the screen.
    pub fn draw(&mut self, buf: &Buffer) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, terminal::BeginSynchronizedUpdate)?;
        for y in 0..buf.height() {
            queue!(stdout, cursor::MoveTo(0, y))?;
            let mut run = String::new();
            let mut run_tone = None;
            for x in 0..buf.width() {
                let Some(cell) = buf.get(x, y) else { continue };
                if cell.continuation {
                    continue;
                }
                if run_tone != Some(cell.tone) {
                    if let Some(tone) = run_tone {
                        write_run(&mut stdout, tone, &run)?;
                    }
                    run.clear();
                    run_tone = Some(cell.tone);
                }
                run.push(if cell.tone == Tone::Hidden { ' ' } else { cell.ch });
            }
            if let Some(tone) = run_tone {
                write_run(&mut stdout, tone, &run)?;
            }
        }
        queue!(stdout, terminal::EndSynchronizedUpdate)?;
        stdout.flush()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_capture {
            let _ = execute!(stdout, event::DisableFocusChange, event::DisableMouseCapture);
            self.mouse_capture = false;
        }
        if self.alternate_screen {
            let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn write_run(out: &mut impl Write, tone: Tone, text: &str) -> io::Result<()> {
    let (color, attribute) = match tone {
        Tone::Accent => (Color::Cyan, Attribute::Bold),
        Tone::Normal => (Color::Reset, Attribute::Reset),
        Tone::Muted => (Color::Grey, Attribute::Reset),
        Tone::Faint => (Color::DarkGrey, Attribute::Dim),
        Tone::Hidden => (Color::Reset, Attribute::Reset),
    };
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(color),
        SetAttribute(attribute),
        Print(text)
    )
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Restore the terminal on paths that skip `Drop`.
fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, event::DisableFocusChange, event::DisableMouseCapture);
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}
