//! Single-line row model: raw text, its tab-expanded render, and the
//! per-cell highlight classification kept parallel to the render.

/// Number of cells a tab advances to (next multiple of this stop).
pub const TAB_STOP: usize = 8;

/// Per-cell classification tag. One entry per rendered cell; the render
/// pass resets every cell to `Normal` and the highlighter refines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    KeywordPrimary,
    KeywordSecondary,
    Comment,
    BlockComment,
    String,
    Number,
    Match,
}

/// One line of the document.
///
/// Invariant: `highlight.len()` equals the rendered cell count at all
/// times. `rendered` and `highlight` are regenerated together by
/// [`Row::update`] after every mutation of `raw`; render-space queries are
/// only valid once that has run (every mutator here calls it).
#[derive(Debug, Clone)]
pub struct Row {
    index: usize,
    raw: String,
    rendered: String,
    highlight: Vec<Highlight>,
    continues_comment: bool,
}

impl Row {
    pub fn new(index: usize, raw: String) -> Self {
        let mut row = Self {
            index,
            raw,
            rendered: String::new(),
            highlight: Vec::new(),
            continues_comment: false,
        };
        row.update();
        row
    }

    /// Position of this row within the document. The document re-indexes
    /// all following rows on insert/delete.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The logical character sequence the user edits (no trailing newline).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The display sequence: `raw` with each tab expanded to spaces up to
    /// the next multiple of [`TAB_STOP`].
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Length of `raw` in characters (cursor columns).
    pub fn char_len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Length of the render in cells.
    pub fn render_len(&self) -> usize {
        self.highlight.len()
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Mutable view of the classification cells. A slice, so the parallel
    /// length invariant cannot be broken through it.
    pub fn highlight_mut(&mut self) -> &mut [Highlight] {
        &mut self.highlight
    }

    /// Replace the full classification row. Length must match the render.
    pub fn set_highlight(&mut self, highlight: Vec<Highlight>) {
        debug_assert_eq!(highlight.len(), self.rendered.chars().count());
        self.highlight = highlight;
    }

    /// True if an unterminated multi-line comment is still open at the end
    /// of this row's rendered text.
    pub fn continues_comment(&self) -> bool {
        self.continues_comment
    }

    pub fn set_continues_comment(&mut self, open: bool) {
        self.continues_comment = open;
    }

    /// Insert one character at character column `at` (clamped to the row
    /// length when out of range).
    pub fn insert_char(&mut self, at: usize, c: char) {
        let at = at.min(self.char_len());
        let byte = self.byte_of_char(at);
        self.raw.insert(byte, c);
        self.update();
    }

    /// Remove the character at character column `at`. No-op past the end.
    pub fn delete_char(&mut self, at: usize) {
        if at >= self.char_len() {
            return;
        }
        let byte = self.byte_of_char(at);
        self.raw.remove(byte);
        self.update();
    }

    /// Append raw text to this row (line-merge on backspace at column 0).
    pub fn append_str(&mut self, s: &str) {
        self.raw.push_str(s);
        self.update();
    }

    /// Truncate this row at character column `at` and return the tail
    /// (newline insertion splits through here).
    pub fn split_off(&mut self, at: usize) -> String {
        let byte = self.byte_of_char(at.min(self.char_len()));
        let tail = self.raw.split_off(byte);
        self.update();
        tail
    }

    /// Translate a character column into a render column. A tab at raw
    /// position `j` advances the render column to the next multiple of
    /// [`TAB_STOP`]; every other character occupies one cell.
    pub fn char_col_to_render_col(&self, col: usize) -> usize {
        let mut rx = 0;
        for c in self.raw.chars().take(col) {
            if c == '\t' {
                rx += TAB_STOP - (rx % TAB_STOP);
            } else {
                rx += 1;
            }
        }
        rx
    }

    /// Exact inverse of [`Self::char_col_to_render_col`]: walk raw columns
    /// accumulating the same tab rule until the target render column is
    /// reached or exceeded.
    pub fn render_col_to_char_col(&self, render_col: usize) -> usize {
        let mut rx = 0;
        for (cx, c) in self.raw.chars().enumerate() {
            if c == '\t' {
                rx += TAB_STOP - 1 - (rx % TAB_STOP);
            }
            rx += 1;
            if rx > render_col {
                return cx;
            }
        }
        self.char_len()
    }

    /// Regenerate `rendered` and reset `highlight` to all-`Normal` at the
    /// matching length. Must run after every `raw` mutation before any
    /// render-space query; this ordering is a correctness requirement, not
    /// an optimization (the mutators above all end with it).
    fn update(&mut self) {
        self.rendered.clear();
        let mut cells = 0;
        for c in self.raw.chars() {
            if c == '\t' {
                self.rendered.push(' ');
                cells += 1;
                while cells % TAB_STOP != 0 {
                    self.rendered.push(' ');
                    cells += 1;
                }
            } else {
                self.rendered.push(c);
                cells += 1;
            }
        }
        self.highlight = vec![Highlight::Normal; cells];
    }

    fn byte_of_char(&self, at: usize) -> usize {
        self.raw
            .char_indices()
            .nth(at)
            .map(|(b, _)| b)
            .unwrap_or(self.raw.len())
    }
}
