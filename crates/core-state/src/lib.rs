//! Editor state: document, cursor, viewport, status message, and the
//! operations the dispatcher applies to them.
//!
//! Everything lives in one explicit [`EditorState`] value passed into each
//! operation — no ambient globals — so every component tests in isolation.
//! Edits funnel through here so the highlighter re-runs from the touched
//! row before anything reads classification again.

use core_syntax::SyntaxProfile;
use core_text::{Document, Row};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod search;

/// Quitting with unsaved changes must be confirmed this many times.
pub const QUIT_CONFIRM_TIMES: u8 = 3;

/// Status-bar messages stay visible this long.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Cursor in raw-character space plus its derived render column.
///
/// `y` may rest on the virtual line one past the last row (empty document,
/// or appending at the end); `x` is clamped to the destination row length
/// on every vertical move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub render_x: usize,
}

/// The rectangular window of the document currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Pull the offsets so `(cursor_row, render_col)` falls inside the
    /// window. Pure in its inputs and idempotent: a second call with the
    /// same arguments changes nothing.
    pub fn scroll(&mut self, cursor_row: usize, render_col: usize) {
        if cursor_row < self.row_offset {
            self.row_offset = cursor_row;
        }
        if cursor_row >= self.row_offset + self.rows {
            self.row_offset = (cursor_row + 1).saturating_sub(self.rows);
        }
        if render_col < self.col_offset {
            self.col_offset = render_col;
        }
        if render_col >= self.col_offset + self.cols {
            self.col_offset = (render_col + 1).saturating_sub(self.cols);
        }
    }

    /// True when the cursor invariant holds for these coordinates.
    pub fn contains(&self, cursor_row: usize, render_col: usize) -> bool {
        (self.row_offset..self.row_offset + self.rows).contains(&cursor_row)
            && (self.col_offset..self.col_offset + self.cols).contains(&render_col)
    }
}

/// Single-step cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    created: Instant,
}

/// The whole mutable editor: document + cursor + viewport + selected
/// syntax profile + transient status, owned by the single control thread.
pub struct EditorState {
    pub document: Document,
    pub cursor: Cursor,
    pub viewport: Viewport,
    pub syntax: Option<&'static SyntaxProfile>,
    pub file_name: Option<PathBuf>,
    pub quit_times: u8,
    status: Option<StatusMessage>,
}

impl EditorState {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            document: Document::new(),
            cursor: Cursor::default(),
            viewport: Viewport::new(rows, cols),
            syntax: None,
            file_name: None,
            quit_times: QUIT_CONFIRM_TIMES,
            status: None,
        }
    }

    /// Swap in a freshly loaded document and classify it.
    pub fn replace_document(&mut self, document: Document) {
        tracing::debug!(target: "state", rows = document.num_rows(), "document_replaced");
        self.document = document;
        core_syntax::refresh_all(&mut self.document, self.syntax);
    }

    /// Associate a file name, re-select the syntax profile from it, and
    /// re-classify the whole document under the new profile.
    pub fn set_file_name(&mut self, path: Option<PathBuf>) {
        self.syntax = path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .and_then(core_syntax::select);
        tracing::debug!(
            target: "state",
            file_type = self.syntax.map(|s| s.file_type),
            "profile_selected"
        );
        self.file_name = path;
        core_syntax::refresh_all(&mut self.document, self.syntax);
    }

    pub fn current_row(&self) -> Option<&Row> {
        self.document.row(self.cursor.y)
    }

    fn current_row_len(&self) -> usize {
        self.current_row().map_or(0, Row::char_len)
    }

    /// Insert one printable character at the cursor and advance it.
    pub fn insert_char(&mut self, c: char) {
        self.document.insert_char(self.cursor.y, self.cursor.x, c);
        core_syntax::refresh_row(&mut self.document, self.syntax, self.cursor.y);
        self.cursor.x += 1;
    }

    /// Split the current line at the cursor; the cursor moves to the start
    /// of the new line.
    pub fn insert_newline(&mut self) {
        self.document.split_line(self.cursor.y, self.cursor.x);
        core_syntax::refresh_row(&mut self.document, self.syntax, self.cursor.y);
        core_syntax::refresh_row(&mut self.document, self.syntax, self.cursor.y + 1);
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Backspace: delete left of the cursor, merging lines at column 0.
    pub fn delete_char(&mut self) {
        if self.cursor.y >= self.document.num_rows() {
            return;
        }
        let (y, x) = self.document.delete_char(self.cursor.y, self.cursor.x);
        self.cursor.y = y;
        self.cursor.x = x;
        core_syntax::refresh_row(&mut self.document, self.syntax, y);
    }

    /// One-step cursor motion with the line-wrapping rules: left at column
    /// 0 climbs to the previous line end, right at line end descends to
    /// the next line start, vertical moves clamp the column afterwards.
    pub fn move_cursor(&mut self, motion: CursorMove) {
        match motion {
            CursorMove::Left => {
                if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                } else if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.cursor.x = self.current_row_len();
                }
            }
            CursorMove::Right => {
                if let Some(row) = self.current_row() {
                    if self.cursor.x < row.char_len() {
                        self.cursor.x += 1;
                    } else {
                        self.cursor.y += 1;
                        self.cursor.x = 0;
                    }
                }
            }
            CursorMove::Up => {
                self.cursor.y = self.cursor.y.saturating_sub(1);
            }
            CursorMove::Down => {
                if self.cursor.y < self.document.num_rows() {
                    self.cursor.y += 1;
                }
            }
        }
        let len = self.current_row_len();
        if self.cursor.x > len {
            self.cursor.x = len;
        }
    }

    /// Page up: cursor to the window top, then one window of row steps.
    pub fn page_up(&mut self) {
        self.cursor.y = self.viewport.row_offset;
        for _ in 0..self.viewport.rows {
            self.move_cursor(CursorMove::Up);
        }
    }

    /// Page down: cursor to the window bottom edge, then one window of
    /// row steps.
    pub fn page_down(&mut self) {
        self.cursor.y = (self.viewport.row_offset + self.viewport.rows)
            .saturating_sub(1)
            .min(self.document.num_rows());
        for _ in 0..self.viewport.rows {
            self.move_cursor(CursorMove::Down);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.x = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.x = self.current_row_len();
    }

    /// Recompute the render column from the raw column, then pull the
    /// viewport offsets so the cursor stays visible. Called once per
    /// redraw, before composing the frame.
    pub fn scroll(&mut self) {
        self.cursor.render_x = self
            .current_row()
            .map_or(0, |row| row.char_col_to_render_col(self.cursor.x));
        self.viewport.scroll(self.cursor.y, self.cursor.render_x);
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            created: Instant::now(),
        });
    }

    /// The status-bar message, while its visibility window lasts.
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| m.created.elapsed() < MESSAGE_TIMEOUT)
            .map(|m| m.text.as_str())
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(lines: &[&str], rows: usize, cols: usize) -> EditorState {
        let mut state = EditorState::new(rows, cols);
        state.replace_document(Document::from_lines(lines.iter().map(|s| s.to_string())));
        state
    }

    #[test]
    fn insert_advances_cursor_and_dirties() {
        let mut state = state_with(&[], 10, 40);
        state.insert_char('h');
        state.insert_char('i');
        assert_eq!(state.document.row(0).unwrap().raw(), "hi");
        assert_eq!(state.cursor.x, 2);
        assert!(state.is_dirty());
    }

    #[test]
    fn newline_moves_cursor_to_new_line_start() {
        let mut state = state_with(&["hello"], 10, 40);
        state.cursor.x = 2;
        state.insert_newline();
        assert_eq!(state.cursor, Cursor { x: 0, y: 1, render_x: 0 });
        assert_eq!(state.document.row(0).unwrap().raw(), "he");
        assert_eq!(state.document.row(1).unwrap().raw(), "llo");
    }

    #[test]
    fn backspace_at_line_start_merges_and_relocates() {
        let mut state = state_with(&["ab", "cd"], 10, 40);
        state.cursor.y = 1;
        state.delete_char();
        assert_eq!(state.cursor, Cursor { x: 2, y: 0, render_x: 0 });
        assert_eq!(state.document.row(0).unwrap().raw(), "abcd");
    }

    #[test]
    fn left_at_column_zero_climbs_to_previous_line_end() {
        let mut state = state_with(&["abc", "d"], 10, 40);
        state.cursor.y = 1;
        state.move_cursor(CursorMove::Left);
        assert_eq!((state.cursor.x, state.cursor.y), (3, 0));
    }

    #[test]
    fn right_at_line_end_descends_to_next_line_start() {
        let mut state = state_with(&["ab", "c"], 10, 40);
        state.cursor.x = 2;
        state.move_cursor(CursorMove::Right);
        assert_eq!((state.cursor.x, state.cursor.y), (0, 1));
    }

    #[test]
    fn vertical_move_clamps_column_to_row_length() {
        let mut state = state_with(&["long line here", "x"], 10, 40);
        state.cursor.x = 10;
        state.move_cursor(CursorMove::Down);
        assert_eq!((state.cursor.x, state.cursor.y), (1, 1));
    }

    #[test]
    fn cursor_may_rest_past_last_line() {
        let mut state = state_with(&["a"], 10, 40);
        state.move_cursor(CursorMove::Down);
        assert_eq!(state.cursor.y, 1);
        state.move_cursor(CursorMove::Down);
        assert_eq!(state.cursor.y, 1);
    }

    #[test]
    fn scroll_keeps_cursor_inside_viewport() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let mut state = EditorState::new(5, 10);
        state.replace_document(Document::from_lines(lines));
        for _ in 0..30 {
            state.move_cursor(CursorMove::Down);
        }
        state.scroll();
        assert!(state.viewport.contains(state.cursor.y, state.cursor.render_x));
        for _ in 0..25 {
            state.move_cursor(CursorMove::Up);
        }
        state.scroll();
        assert!(state.viewport.contains(state.cursor.y, state.cursor.render_x));
    }

    #[test]
    fn scroll_is_idempotent() {
        let mut state = state_with(&["some text that is fairly long"], 3, 8);
        state.cursor.x = 20;
        state.scroll();
        let vp = state.viewport;
        state.scroll();
        assert_eq!(state.viewport, vp);
    }

    #[test]
    fn horizontal_scroll_tracks_render_column() {
        let mut state = state_with(&["\tabc"], 5, 4);
        state.cursor.x = 1; // render column 8, past a 4-cell window
        state.scroll();
        assert_eq!(state.cursor.render_x, 8);
        assert!(state.viewport.contains(state.cursor.y, state.cursor.render_x));
    }

    #[test]
    fn viewport_invariant_random_walk() {
        let lines: Vec<String> = (0..40)
            .map(|i| "x".repeat(1 + (i * 7) % 30))
            .collect();
        let mut state = EditorState::new(8, 12);
        state.replace_document(Document::from_lines(lines));
        let moves = [
            CursorMove::Down,
            CursorMove::Right,
            CursorMove::Right,
            CursorMove::Down,
            CursorMove::Left,
            CursorMove::Up,
            CursorMove::Right,
        ];
        for step in 0..200 {
            state.move_cursor(moves[step % moves.len()]);
            state.scroll();
            assert!(
                state.viewport.contains(state.cursor.y, state.cursor.render_x),
                "cursor escaped viewport at step {step}"
            );
        }
    }

    #[test]
    fn page_moves_stay_in_bounds() {
        let lines: Vec<String> = (0..100).map(|i| format!("{i}")).collect();
        let mut state = EditorState::new(10, 20);
        state.replace_document(Document::from_lines(lines));
        state.page_down();
        state.scroll();
        assert!(state.viewport.contains(state.cursor.y, state.cursor.render_x));
        state.page_up();
        state.scroll();
        assert_eq!(state.cursor.y, 0);
    }

    #[test]
    fn status_message_expires() {
        let mut state = state_with(&[], 5, 5);
        assert!(state.status_text().is_none());
        state.set_status_message("saved");
        assert_eq!(state.status_text(), Some("saved"));
    }

    #[test]
    fn file_name_selects_profile() {
        let mut state = state_with(&["int x;"], 5, 40);
        state.set_file_name(Some(PathBuf::from("/tmp/test.c")));
        assert_eq!(state.syntax.unwrap().file_type, "c");
        assert_eq!(
            state.document.row(0).unwrap().highlight()[0],
            core_text::Highlight::KeywordSecondary
        );
        state.set_file_name(Some(PathBuf::from("/tmp/notes.txt")));
        assert!(state.syntax.is_none());
        assert_eq!(
            state.document.row(0).unwrap().highlight()[0],
            core_text::Highlight::Normal
        );
    }
}
