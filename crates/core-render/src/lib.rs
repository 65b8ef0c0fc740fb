//! Screen compositor: turns editor state into one composed byte stream
//! per redraw.
//!
//! Every frame is queued in full into an internal buffer (cursor hide,
//! home, text rows with inline color transitions, status bar, message
//! bar, cursor placement, cursor show) and then handed to the output sink
//! with a single `write_all` + `flush`. Writing atomically is what keeps
//! a slow terminal from ever showing a half-painted frame.

use anyhow::Result;
use core_state::EditorState;
use crossterm::{
    cursor,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

pub mod style;

pub use style::highlight_color;

/// Shown centered in an empty, nameless buffer.
const WELCOME: &str = concat!("Kiln editor -- version ", env!("CARGO_PKG_VERSION"));

/// Frame builder. Owns the queue buffer so repeated redraws reuse its
/// allocation.
#[derive(Debug, Default)]
pub struct Compositor {
    buffer: Vec<u8>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose and emit one frame. Scrolls first so the cursor invariant
    /// holds for everything drawn afterwards.
    pub fn refresh_screen<W: Write>(&mut self, out: &mut W, state: &mut EditorState) -> Result<()> {
        state.scroll();
        self.buffer.clear();
        queue!(self.buffer, cursor::Hide, cursor::MoveTo(0, 0))?;
        self.draw_rows(state)?;
        self.draw_status_bar(state)?;
        self.draw_message_bar(state)?;
        let screen_x = state.cursor.render_x.saturating_sub(state.viewport.col_offset) as u16;
        let screen_y = state.cursor.y.saturating_sub(state.viewport.row_offset) as u16;
        queue!(
            self.buffer,
            cursor::MoveTo(screen_x, screen_y),
            cursor::Show
        )?;
        tracing::trace!(target: "render", bytes = self.buffer.len(), "frame_flushed");
        out.write_all(&self.buffer)?;
        out.flush()?;
        Ok(())
    }

    fn draw_rows(&mut self, state: &EditorState) -> Result<()> {
        let viewport = state.viewport;
        for y in 0..viewport.rows {
            let file_row = y + viewport.row_offset;
            if file_row >= state.document.num_rows() {
                if state.document.is_empty() && y == viewport.rows / 3 {
                    self.draw_welcome(viewport.cols)?;
                } else {
                    queue!(self.buffer, Print("~"))?;
                }
            } else {
                self.draw_file_row(state, file_row)?;
            }
            queue!(
                self.buffer,
                Clear(ClearType::UntilNewLine),
                Print("\r\n")
            )?;
        }
        Ok(())
    }

    fn draw_welcome(&mut self, cols: usize) -> Result<()> {
        let banner: String = WELCOME.chars().take(cols).collect();
        let mut padding = (cols - banner.chars().count()) / 2;
        if padding > 0 {
            queue!(self.buffer, Print("~"))?;
            padding -= 1;
        }
        for _ in 0..padding {
            queue!(self.buffer, Print(" "))?;
        }
        queue!(self.buffer, Print(banner))?;
        Ok(())
    }

    /// Emit one visible document row. Color escapes are written only when
    /// the classification changes between adjacent cells; control cells
    /// render reverse-video as printable stand-ins, restoring whatever
    /// color was active.
    fn draw_file_row(&mut self, state: &EditorState, file_row: usize) -> Result<()> {
        let Some(row) = state.document.row(file_row) else {
            return Ok(());
        };
        let viewport = state.viewport;
        let cells = row
            .rendered()
            .chars()
            .zip(row.highlight().iter().copied())
            .skip(viewport.col_offset)
            .take(viewport.cols);

        let mut current: Option<Color> = None;
        for (c, tag) in cells {
            if c.is_control() {
                let sym = if (c as u32) <= 26 {
                    char::from(b'@' + c as u8)
                } else {
                    '?'
                };
                queue!(
                    self.buffer,
                    SetAttribute(Attribute::Reverse),
                    Print(sym),
                    SetAttribute(Attribute::Reset)
                )?;
                if let Some(color) = current {
                    queue!(self.buffer, SetForegroundColor(color))?;
                }
                continue;
            }
            match highlight_color(tag) {
                None => {
                    if current.take().is_some() {
                        queue!(self.buffer, ResetColor)?;
                    }
                }
                Some(color) => {
                    if current != Some(color) {
                        current = Some(color);
                        queue!(self.buffer, SetForegroundColor(color))?;
                    }
                }
            }
            queue!(self.buffer, Print(c))?;
        }
        queue!(self.buffer, ResetColor)?;
        Ok(())
    }

    /// Reverse-video bar: file name (truncated), line count, dirty
    /// marker on the left; file type and cursor line on the right.
    fn draw_status_bar(&mut self, state: &EditorState) -> Result<()> {
        let cols = state.viewport.cols;
        let name = state
            .file_name
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string());
        let short_name: String = name.chars().take(20).collect();
        let modified = if state.is_dirty() { " (modified)" } else { "" };
        let left = format!(
            "{short_name} - {} lines{modified}",
            state.document.num_rows()
        );
        let right = format!(
            "{} | {}/{}",
            state.syntax.map_or("no ft", |s| s.file_type),
            state.cursor.y + 1,
            state.document.num_rows()
        );

        let mut bar: String = left.chars().take(cols).collect();
        loop {
            let used = bar.chars().count();
            if used >= cols {
                break;
            }
            if cols - used == right.chars().count() {
                bar.push_str(&right);
                break;
            }
            bar.push(' ');
        }

        queue!(
            self.buffer,
            SetAttribute(Attribute::Reverse),
            Print(bar),
            SetAttribute(Attribute::Reset),
            Print("\r\n")
        )?;
        Ok(())
    }

    /// Transient message line under the status bar; the state decides
    /// whether the message is still within its visibility window.
    fn draw_message_bar(&mut self, state: &EditorState) -> Result<()> {
        queue!(self.buffer, Clear(ClearType::UntilNewLine))?;
        if let Some(text) = state.status_text() {
            let visible: String = text.chars().take(state.viewport.cols).collect();
            queue!(self.buffer, Print(visible))?;
        }
        Ok(())
    }
}
