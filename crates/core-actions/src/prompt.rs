//! Status-bar line editor and the interactive search flow built on it.
//!
//! The prompt takes its redraw as a closure and its keys through
//! [`KeySource`], and notifies an observer once per keystroke. The
//! observer is the seam the search flow plugs into — and what lets tests
//! drive the whole interaction with a scripted key sequence, no terminal
//! involved.

use anyhow::Result;
use core_input::{Key, KeySource};
use core_state::EditorState;
use core_state::search::{SearchInput, SearchSession, end_session, search_step};

/// Called after every prompt keystroke with the current query text and
/// the key that produced it.
pub type PromptObserver<'a> = &'a mut dyn FnMut(&mut EditorState, &str, Key);

/// Redraw callback; the binary passes the compositor, tests pass a no-op.
pub type Redraw<'a> = &'a mut dyn FnMut(&mut EditorState) -> Result<()>;

/// Run a line-edit prompt over the status bar. `template` contains a
/// `{}` placeholder for the input echoed back to the user. Returns the
/// entered text, or `None` when cancelled with Escape. Enter submits only
/// a non-empty line.
pub fn run_prompt<K>(
    state: &mut EditorState,
    keys: &mut K,
    redraw: Redraw<'_>,
    template: &str,
    mut observer: Option<PromptObserver<'_>>,
) -> Result<Option<String>>
where
    K: KeySource + ?Sized,
{
    let mut input = String::new();
    loop {
        state.set_status_message(template.replacen("{}", &input, 1));
        redraw(state)?;
        let Some(key) = keys.next_key()? else {
            continue;
        };
        match key {
            Key::Backspace | Key::Ctrl('h') | Key::Delete => {
                input.pop();
            }
            Key::Escape => {
                state.set_status_message("");
                if let Some(cb) = observer.as_mut() {
                    cb(state, &input, key);
                }
                return Ok(None);
            }
            Key::Enter if !input.is_empty() => {
                state.set_status_message("");
                if let Some(cb) = observer.as_mut() {
                    cb(state, &input, key);
                }
                return Ok(Some(input));
            }
            Key::Char(c) if !c.is_control() => input.push(c),
            _ => {}
        }
        if let Some(cb) = observer.as_mut() {
            cb(state, &input, key);
        }
    }
}

/// Interactive search: prompt for a query, re-evaluating the match on
/// every keystroke. Escape restores the pre-search cursor and viewport;
/// Enter leaves the cursor on the last match.
pub fn find<K>(state: &mut EditorState, keys: &mut K, redraw: Redraw<'_>) -> Result<()>
where
    K: KeySource + ?Sized,
{
    let saved_cursor = state.cursor;
    let saved_viewport = state.viewport;

    let mut session = SearchSession::new();
    let mut observer = |state: &mut EditorState, query: &str, key: Key| {
        let input = match key {
            Key::Enter => SearchInput::Confirm,
            Key::Escape => SearchInput::Cancel,
            Key::ArrowRight | Key::ArrowDown => SearchInput::Next,
            Key::ArrowLeft | Key::ArrowUp => SearchInput::Previous,
            _ => SearchInput::Edited,
        };
        search_step(state, &mut session, query, input);
    };
    let query = run_prompt(
        state,
        keys,
        redraw,
        "Search: {} (Use ESC/Arrows/Enter)",
        Some(&mut observer),
    )?;
    end_session(state, &mut session);

    if query.is_none() {
        state.cursor = saved_cursor;
        state.viewport = saved_viewport;
    }
    Ok(())
}
