//! Terminal mode management and window-size discovery.
//!
//! Raw mode is a scoped acquisition: every exit path — normal quit, error
//! return, panic unwind — must restore the terminal, so the backend hands
//! out an RAII guard and also restores on its own drop as a last resort.

use anyhow::Result;
use crossterm::{
    cursor::{self, Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if the caller
/// early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}

/// Query the terminal dimensions as `(rows, cols)`.
///
/// The direct OS size query is authoritative. When it fails or reports a
/// zero width, fall back to parking the cursor at the far corner and
/// reading its position back — best effort only: some terminals answer
/// the position report late or not at all, so the fallback may misreport
/// and callers should treat it as a plausible guess, not a guarantee.
pub fn window_size() -> Result<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => Ok((rows, cols)),
        _ => probe_window_size(),
    }
}

fn probe_window_size() -> Result<(u16, u16)> {
    execute!(stdout(), cursor::SavePosition, cursor::MoveTo(9999, 9999))?;
    let probed = cursor::position();
    execute!(stdout(), cursor::RestorePosition)?;
    let (col, row) = probed?;
    Ok((row + 1, col + 1))
}
