//! Key acquisition: decoded logical keys behind a swappable source.
//!
//! The crossterm source blocks for at most one poll interval so the main
//! loop stays responsive without busy-waiting; a timeout surfaces as
//! `None` and the loop simply comes around again. The scripted source
//! replays a fixed sequence so flows that normally read the keyboard
//! (dispatch, prompts, search) can run inside tests.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

/// How long one read blocks before reporting "no key".
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// A decoded logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (tabs included).
    Char(char),
    /// A control chord, stored as the plain lowercase letter.
    Ctrl(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Anything that yields logical keys. `Ok(None)` means the bounded wait
/// elapsed without input.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Option<Key>>;
}

/// Terminal-backed source decoding crossterm events.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermInput {
    fn next_key(&mut self) -> Result<Option<Key>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                Ok(decode(key.code, key.modifiers))
            }
            other => {
                tracing::trace!(target: "input", event = ?other, "ignored_event");
                Ok(None)
            }
        }
    }
}

/// Map a crossterm key event onto the editor's key space. Unmapped
/// combinations are swallowed.
fn decode(code: KeyCode, mods: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) if mods.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Tab => Key::Char('\t'),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}

/// Replays a fixed key sequence. Running past the end is an error rather
/// than a timeout, so a test that forgets to script an exit key fails
/// loudly instead of spinning.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Convenience: printable characters from a string, one key each.
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(Key::Char))
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn is_exhausted(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for ScriptedInput {
    fn next_key(&mut self) -> Result<Option<Key>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => Err(anyhow::anyhow!("scripted input exhausted")),
        }
    }
}
