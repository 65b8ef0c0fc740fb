//! Kiln entrypoint: startup, the synchronous render/key loop, and the
//! save/find flows that need prompting.

use anyhow::Result;
use clap::Parser;
use core_actions::{
    Outcome, SaveError, dispatch_key, find, open_document, run_prompt, save_document,
};
use core_input::{CrosstermInput, KeySource};
use core_render::Compositor;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, window_size};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;

/// Rows reserved below the text area: status bar and message bar.
const RESERVED_ROWS: u16 = 2;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "Kiln editor")]
struct Args {
    /// Optional path to open at startup. If omitted an empty unnamed
    /// buffer is used.
    pub path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();

    let mut backend = CrosstermBackend::new();
    backend.set_title("kiln")?;
    let _terminal = backend.enter_guard()?;

    let (rows, cols) = window_size()?;
    let mut state = EditorState::new(rows.saturating_sub(RESERVED_ROWS) as usize, cols as usize);

    if let Some(path) = args.path {
        // Failure to open is fatal: better to abort startup (through the
        // guard, restoring the screen) than edit a buffer that silently
        // lost its backing file.
        let document = open_document(&path)?;
        state.replace_document(document);
        state.set_file_name(Some(path));
    }
    state.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
    tracing::info!(target: "runtime", rows, cols, "startup");

    run(&mut state)
}

/// Alternate synchronously between "render current state" and "block for
/// one key" — a poll timeout just comes back around the loop.
fn run(state: &mut EditorState) -> Result<()> {
    let mut compositor = Compositor::new();
    let mut keys = CrosstermInput::new();
    let mut out = stdout();
    loop {
        compositor.refresh_screen(&mut out, state)?;
        let Some(key) = keys.next_key()? else {
            continue;
        };
        match dispatch_key(state, key) {
            Outcome::Continue => {}
            Outcome::Quit => return Ok(()),
            Outcome::Save => save_flow(state, &mut keys, &mut compositor, &mut out)?,
            Outcome::Find => {
                let mut redraw =
                    |state: &mut EditorState| compositor.refresh_screen(&mut out, state);
                find(state, &mut keys, &mut redraw)?;
            }
        }
    }
}

/// Ctrl-S: prompt for a name when the buffer has none, then write. Save
/// errors surface on the status bar and leave everything else untouched.
fn save_flow(
    state: &mut EditorState,
    keys: &mut CrosstermInput,
    compositor: &mut Compositor,
    out: &mut Stdout,
) -> Result<()> {
    if state.file_name.is_none() {
        let mut redraw = |state: &mut EditorState| compositor.refresh_screen(out, state);
        let name = run_prompt(
            state,
            keys,
            &mut redraw,
            "Save as: {} (ESC to cancel)",
            None,
        )?;
        match name {
            Some(name) => state.set_file_name(Some(PathBuf::from(name))),
            None => {
                state.set_status_message("Save aborted");
                return Ok(());
            }
        }
    }
    match save_document(state) {
        Ok(bytes) => state.set_status_message(format!("{bytes} bytes written to disk")),
        Err(SaveError::NoFileName) => state.set_status_message("Save aborted"),
        Err(err) => {
            tracing::warn!(target: "io", %err, "save_failed");
            state.set_status_message(format!("Can't save! {err}"));
        }
    }
    Ok(())
}

/// Logs go to a file: stdout belongs to the compositor while raw mode is
/// active.
fn configure_logging() -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(".", "kiln.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => {
            // Global subscriber already installed; drop the writer guard.
            None
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
