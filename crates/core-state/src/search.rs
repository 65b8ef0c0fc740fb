//! Incremental search over the document's rendered text.
//!
//! The prompt drives this once per keystroke through [`search_step`]; the
//! session records the last match, the scan direction, and the highlight
//! row temporarily overwritten to show the match, restored before every
//! re-evaluation and when the session ends.

use crate::EditorState;
use core_text::Highlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// What the current prompt keystroke means to the search state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
    /// Enter: keep the cursor at the last match and end the session.
    Confirm,
    /// Escape: end the session (the caller restores the pre-search view).
    Cancel,
    Next,
    Previous,
    /// The query text changed; restart matching from the top.
    Edited,
}

#[derive(Debug)]
struct SavedOverlay {
    row: usize,
    highlight: Vec<Highlight>,
}

/// Ephemeral state for one active search prompt.
#[derive(Debug, Default)]
pub struct SearchSession {
    last_match: Option<usize>,
    backward: bool,
    saved: Option<SavedOverlay>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    fn restore_overlay(&mut self, state: &mut EditorState) {
        if let Some(saved) = self.saved.take()
            && let Some(row) = state.document.row_mut(saved.row)
            && row.highlight().len() == saved.highlight.len()
        {
            row.highlight_mut().copy_from_slice(&saved.highlight);
        }
    }
}

/// Evaluate one prompt keystroke: restore the previous overlay, update
/// direction/match state, then scan for the query (wrapping once around
/// the whole document). A full pass with no match leaves the cursor and
/// match index unchanged.
pub fn search_step(
    state: &mut EditorState,
    session: &mut SearchSession,
    query: &str,
    input: SearchInput,
) {
    session.restore_overlay(state);

    match input {
        SearchInput::Confirm | SearchInput::Cancel => {
            session.last_match = None;
            session.backward = false;
            return;
        }
        SearchInput::Next => session.backward = false,
        SearchInput::Previous => session.backward = true,
        SearchInput::Edited => {
            session.last_match = None;
            session.backward = false;
        }
    }
    if session.last_match.is_none() {
        // Nothing to step from yet; the first hit always scans forward.
        session.backward = false;
    }

    let num_rows = state.document.num_rows();
    let mut current = session.last_match;
    for _ in 0..num_rows {
        current = Some(match (current, session.backward) {
            (None, _) => 0,
            (Some(0), true) => num_rows - 1,
            (Some(i), true) => i - 1,
            (Some(i), false) if i + 1 == num_rows => 0,
            (Some(i), false) => i + 1,
        });
        let index = current.unwrap_or(0);
        let Some(row) = state.document.row(index) else {
            break;
        };
        let Some(byte_pos) = row.rendered().find(query) else {
            continue;
        };
        let cell_pos = row.rendered()[..byte_pos].chars().count();
        let span = query.chars().count();

        session.last_match = Some(index);
        state.cursor.y = index;
        state.cursor.x = row.render_col_to_char_col(cell_pos);
        // Force the next scroll to land the match row at the top of the
        // window by pushing the offset past the document end.
        state.viewport.row_offset = num_rows;

        session.saved = Some(SavedOverlay {
            row: index,
            highlight: row.highlight().to_vec(),
        });
        if let Some(row) = state.document.row_mut(index) {
            let end = (cell_pos + span).min(row.highlight().len());
            for cell in &mut row.highlight_mut()[cell_pos..end] {
                *cell = Highlight::Match;
            }
        }
        return;
    }
}

/// End a search session unconditionally, restoring any overlay. Used by
/// the prompt teardown paths.
pub fn end_session(state: &mut EditorState, session: &mut SearchSession) {
    session.restore_overlay(state);
    session.last_match = None;
    session.backward = false;
}
