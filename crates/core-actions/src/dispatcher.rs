//! Translate one decoded key into editor-state mutations.

use core_input::Key;
use core_state::{CursorMove, EditorState, QUIT_CONFIRM_TIMES};

/// What the main loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    /// Ctrl-S: the caller runs the save flow (it may need to prompt for a
    /// file name, which is outside plain dispatch).
    Save,
    /// Ctrl-F: the caller runs the interactive search flow.
    Find,
}

/// Apply one key press. The dirty-quit guard lives here: quitting an
/// unsaved buffer takes [`QUIT_CONFIRM_TIMES`] further presses, and any
/// other key rearms the counter.
pub fn dispatch_key(state: &mut EditorState, key: Key) -> Outcome {
    match key {
        Key::Enter => state.insert_newline(),
        Key::Ctrl('q') => {
            if state.is_dirty() && state.quit_times > 0 {
                let remaining = state.quit_times;
                state.set_status_message(format!(
                    "Warning! File has unsaved changes. \
                     Press Ctrl-Q {remaining} more times to quit."
                ));
                state.quit_times -= 1;
                return Outcome::Continue;
            }
            tracing::info!(target: "dispatch", "quit");
            return Outcome::Quit;
        }
        Key::Ctrl('s') => {
            state.quit_times = QUIT_CONFIRM_TIMES;
            return Outcome::Save;
        }
        Key::Ctrl('f') => {
            state.quit_times = QUIT_CONFIRM_TIMES;
            return Outcome::Find;
        }
        Key::Home => state.move_home(),
        Key::End => state.move_end(),
        Key::Backspace | Key::Ctrl('h') => state.delete_char(),
        Key::Delete => {
            // Delete-under-cursor = step right, then backspace.
            state.move_cursor(CursorMove::Right);
            state.delete_char();
        }
        Key::PageUp => state.page_up(),
        Key::PageDown => state.page_down(),
        Key::ArrowLeft => state.move_cursor(CursorMove::Left),
        Key::ArrowRight => state.move_cursor(CursorMove::Right),
        Key::ArrowUp => state.move_cursor(CursorMove::Up),
        Key::ArrowDown => state.move_cursor(CursorMove::Down),
        // Ctrl-L traditionally forces a repaint; the loop repaints every
        // iteration anyway. A bare Escape is ignored.
        Key::Ctrl('l') | Key::Escape => {}
        Key::Char(c) => state.insert_char(c),
        Key::Ctrl(_) => {}
    }
    state.quit_times = QUIT_CONFIRM_TIMES;
    Outcome::Continue
}
