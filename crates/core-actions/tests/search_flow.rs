//! End-to-end search and prompt flows driven by scripted key sequences.

use core_actions::prompt::{find, run_prompt};
use core_input::{Key, ScriptedInput};
use core_state::EditorState;
use core_text::{Document, Highlight};

fn state_with(lines: &[&str]) -> EditorState {
    let mut state = EditorState::new(10, 40);
    state.replace_document(Document::from_lines(lines.iter().map(|s| s.to_string())));
    state
}

fn no_redraw() -> impl FnMut(&mut EditorState) -> anyhow::Result<()> {
    |_state: &mut EditorState| Ok(())
}

#[test]
fn prompt_returns_typed_line_on_enter() {
    let mut state = state_with(&[]);
    let mut keys = ScriptedInput::new("name.txt".chars().map(Key::Char).chain([Key::Enter]));
    let mut redraw = no_redraw();
    let entered = run_prompt(&mut state, &mut keys, &mut redraw, "Save as: {}", None).unwrap();
    assert_eq!(entered.as_deref(), Some("name.txt"));
}

#[test]
fn prompt_escape_cancels() {
    let mut state = state_with(&[]);
    let mut keys = ScriptedInput::new([Key::Char('a'), Key::Escape]);
    let mut redraw = no_redraw();
    let entered = run_prompt(&mut state, &mut keys, &mut redraw, "Save as: {}", None).unwrap();
    assert_eq!(entered, None);
}

#[test]
fn prompt_backspace_edits_and_empty_enter_is_ignored() {
    let mut state = state_with(&[]);
    let mut keys = ScriptedInput::new([
        Key::Char('a'),
        Key::Backspace,
        Key::Enter, // empty: ignored
        Key::Char('b'),
        Key::Enter,
    ]);
    let mut redraw = no_redraw();
    let entered = run_prompt(&mut state, &mut keys, &mut redraw, "p: {}", None).unwrap();
    assert_eq!(entered.as_deref(), Some("b"));
}

#[test]
fn find_confirm_leaves_cursor_on_match() {
    let mut state = state_with(&["alpha", "beta", "gamma"]);
    let mut keys = ScriptedInput::new("gam".chars().map(Key::Char).chain([Key::Enter]));
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    assert_eq!((state.cursor.y, state.cursor.x), (2, 0));
}

#[test]
fn find_cancel_restores_cursor_and_viewport() {
    let mut state = state_with(&["alpha", "beta", "gamma"]);
    state.cursor.y = 1;
    state.cursor.x = 2;
    let before_viewport = state.viewport;
    let mut keys = ScriptedInput::new("gam".chars().map(Key::Char).chain([Key::Escape]));
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    assert_eq!((state.cursor.y, state.cursor.x), (1, 2));
    assert_eq!(state.viewport, before_viewport);
}

#[test]
fn find_wraps_forward_and_backward_without_crashing() {
    // Query present only on row 0 of a 5-row document; cursor starts on
    // row 3. The first hit scans from the top and lands on row 0; Next
    // wraps the long way around back to row 0; Previous walks the bottom
    // rows (no match anywhere) and arrives at row 0 again.
    let mut state = state_with(&["needle", "a", "b", "c", "d"]);
    state.cursor.y = 3;
    let mut keys = ScriptedInput::new(
        "needle"
            .chars()
            .map(Key::Char)
            .chain([Key::ArrowDown, Key::ArrowUp, Key::Enter]),
    );
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    assert_eq!(state.cursor.y, 0);
    assert_eq!(state.cursor.x, 0);
}

#[test]
fn find_miss_keeps_cursor_after_cancel_free_exit() {
    let mut state = state_with(&["aaa", "bbb"]);
    state.cursor.y = 1;
    let mut keys = ScriptedInput::new("zz".chars().map(Key::Char).chain([Key::Enter]));
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    // No match ever happened: Enter confirms in place.
    assert_eq!(state.cursor.y, 1);
}

#[test]
fn find_overlay_does_not_survive_the_session() {
    let mut state = state_with(&["int needle;"]);
    state.set_file_name(Some("t.c".into()));
    let before = state.document.row(0).unwrap().highlight().to_vec();
    let mut keys = ScriptedInput::new("needle".chars().map(Key::Char).chain([Key::Enter]));
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    let after = state.document.row(0).unwrap().highlight().to_vec();
    assert_eq!(after, before);
    assert!(!after.contains(&Highlight::Match));
}

#[test]
fn find_incremental_requery_follows_the_text() {
    let mut state = state_with(&["abc", "abd"]);
    // "ab" matches row 0; extending to "abd" re-scans from the top and
    // lands on row 1.
    let mut keys = ScriptedInput::new("abd".chars().map(Key::Char).chain([Key::Enter]));
    let mut redraw = no_redraw();
    find(&mut state, &mut keys, &mut redraw).unwrap();
    assert_eq!(state.cursor.y, 1);
}
