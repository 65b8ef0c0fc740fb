//! Incremental, multi-line-aware syntax highlighter.
//!
//! Rows are classified left to right over their rendered text; the only
//! state that crosses row boundaries is whether a multi-line comment is
//! still open, carried in each row's `continues_comment` flag. When an
//! edit flips that flag, classification is re-propagated forward row by
//! row until a row's open/closed state stops changing — an explicit
//! work-list loop, so stack depth stays bounded regardless of document
//! size, at worst-case O(rows) per edit.

use bitflags::bitflags;
use core_text::{Document, Highlight};

mod profiles;

pub use profiles::{PROFILES, SyntaxProfile, select};

bitflags! {
    /// Per-profile toggles for the optional classification passes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 1 << 0;
        const STRINGS = 1 << 1;
    }
}

/// Word-boundary set: whitespace, NUL, and the punctuation characters
/// keyword and number detection treat as separators.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\0' || ",.()+-/*=~%<>[];".contains(c)
}

/// Classify one rendered row. `starts_in_comment` is the previous row's
/// open-comment state (false on the first row). Returns the cell tags and
/// whether a multi-line comment is still open at end of row.
pub fn scan_row(
    rendered: &str,
    starts_in_comment: bool,
    profile: &SyntaxProfile,
) -> (Vec<Highlight>, bool) {
    let cells: Vec<char> = rendered.chars().collect();
    let mut hl = vec![Highlight::Normal; cells.len()];
    let mut prev_sep = true;
    let mut in_string: Option<char> = None;
    let mut in_comment = starts_in_comment;

    let mut i = 0;
    while i < cells.len() {
        let c = cells[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(marker) = profile.singleline_comment
            && in_string.is_none()
            && !in_comment
            && matches_at(&cells, i, marker)
        {
            for cell in &mut hl[i..] {
                *cell = Highlight::Comment;
            }
            break;
        }

        if let Some((open, close)) = profile.multiline_comment
            && in_string.is_none()
        {
            if in_comment {
                if matches_at(&cells, i, close) {
                    for cell in &mut hl[i..i + close.len()] {
                        *cell = Highlight::BlockComment;
                    }
                    i += close.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            } else if matches_at(&cells, i, open) {
                for cell in &mut hl[i..i + open.len()] {
                    *cell = Highlight::BlockComment;
                }
                i += open.len();
                in_comment = true;
                continue;
            }
        }

        if profile.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == '\\' && i + 1 < cells.len() {
                    // Escape: both cells belong to the string.
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == '"' || c == '\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == '.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = keyword_at(&cells, i, profile) {
            for cell in &mut hl[i..i + len] {
                *cell = class;
            }
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

/// Re-classify the row at `at`, then propagate forward while the
/// open-comment state keeps changing (or the document ends).
pub fn refresh_row(document: &mut Document, profile: Option<&SyntaxProfile>, at: usize) {
    let mut index = at;
    while index < document.num_rows() {
        let starts_open = index > 0
            && document
                .row(index - 1)
                .is_some_and(|row| row.continues_comment());
        let Some(row) = document.row_mut(index) else {
            return;
        };
        let (hl, open) = match profile {
            Some(p) => scan_row(row.rendered(), starts_open, p),
            None => (vec![Highlight::Normal; row.render_len()], false),
        };
        row.set_highlight(hl);
        let changed = row.continues_comment() != open;
        row.set_continues_comment(open);
        if !changed {
            return;
        }
        index += 1;
    }
}

/// Classify every row from the top; used when a profile is (re)selected.
pub fn refresh_all(document: &mut Document, profile: Option<&SyntaxProfile>) {
    let mut open = false;
    for index in 0..document.num_rows() {
        let Some(row) = document.row_mut(index) else {
            return;
        };
        let (hl, now_open) = match profile {
            Some(p) => scan_row(row.rendered(), open, p),
            None => (vec![Highlight::Normal; row.render_len()], false),
        };
        row.set_highlight(hl);
        row.set_continues_comment(now_open);
        open = now_open;
    }
}

/// Marker comparison against the cell slice at `at`. Markers are ASCII,
/// so per-char comparison is exact.
fn matches_at(cells: &[char], at: usize, marker: &str) -> bool {
    let mut chars = marker.chars();
    let mut i = at;
    for expected in chars.by_ref() {
        if cells.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}

/// Keyword lookup at `at`. Both priority classes must be followed by a
/// separator (end of row counts) so `forward` does not light up `for`.
fn keyword_at(
    cells: &[char],
    at: usize,
    profile: &SyntaxProfile,
) -> Option<(usize, Highlight)> {
    let classes = [
        (profile.keywords_primary, Highlight::KeywordPrimary),
        (profile.keywords_secondary, Highlight::KeywordSecondary),
    ];
    for (keywords, class) in classes {
        for keyword in keywords {
            let len = keyword.len();
            if matches_at(cells, at, keyword)
                && cells.get(at + len).is_none_or(|&c| is_separator(c))
            {
                return Some((len, class));
            }
        }
    }
    None
}
