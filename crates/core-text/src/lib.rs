//! Row-based text store: an ordered sequence of [`Row`]s plus the edit
//! operations the editor applies to them.
//!
//! The document owns its rows exclusively. Every mutation re-indexes the
//! affected tail and regenerates the touched row's render before
//! returning, so render-space queries made afterwards are always against
//! fresh data. Highlight classification beyond the all-`Normal` reset is
//! the highlighter's job and is re-run by the editor layer after each
//! edit.

pub mod row;

pub use row::{Highlight, Row, TAB_STOP};

/// Ordered sequence of rows (order = line order in file) plus the dirty
/// flag every mutation raises.
#[derive(Debug, Default, Clone)]
pub struct Document {
    rows: Vec<Row>,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from newline-stripped lines. The result is clean:
    /// loading a file is not an edit.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let rows = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| Row::new(i, line))
            .collect();
        Self { rows, dirty: false }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (successful save).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Insert a new row at `at` (0..=num_rows), shifting and re-indexing
    /// all following rows. Out-of-range indices are ignored.
    pub fn insert_row(&mut self, at: usize, text: String) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(at, text));
        self.reindex_from(at);
        self.dirty = true;
    }

    /// Remove the row at `at`, re-indexing all following rows.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.reindex_from(at);
        self.dirty = true;
    }

    /// Insert one character at `(row, col)`. A cursor resting on the
    /// virtual line past the last row grows the document by one empty row
    /// first; the column is clamped by the row itself.
    pub fn insert_char(&mut self, row: usize, col: usize, c: char) {
        if row == self.rows.len() {
            self.rows.push(Row::new(row, String::new()));
        }
        if let Some(r) = self.rows.get_mut(row) {
            r.insert_char(col, c);
            self.dirty = true;
        }
    }

    /// Remove the character left of `(row, col)` and return the resulting
    /// cursor position. At column 0 the row merges into its predecessor
    /// (the cursor lands on the merge point); at the document start, and on
    /// the virtual line past the end, this is a no-op.
    pub fn delete_char(&mut self, row: usize, col: usize) -> (usize, usize) {
        if row >= self.rows.len() || (row == 0 && col == 0) {
            return (row, col);
        }
        if col > 0 {
            self.rows[row].delete_char(col - 1);
            self.dirty = true;
            return (row, col - 1);
        }
        let merged = self.rows.remove(row);
        let prev = &mut self.rows[row - 1];
        let merge_col = prev.char_len();
        prev.append_str(merged.raw());
        self.reindex_from(row);
        self.dirty = true;
        (row - 1, merge_col)
    }

    /// Split the row at `(row, col)`: the original keeps `[0, col)`, a new
    /// row starting with the tail is inserted below. Newline insertion.
    pub fn split_line(&mut self, row: usize, col: usize) {
        if col == 0 {
            self.insert_row(row, String::new());
            return;
        }
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let tail = r.split_off(col);
        self.insert_row(row + 1, tail);
    }

    /// Serialize all rows for saving; every row gains a trailing newline.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(row.raw());
            out.push('\n');
        }
        out
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.set_index(i);
        }
    }
}
