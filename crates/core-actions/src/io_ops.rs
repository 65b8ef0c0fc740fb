//! File open/save operations. The editor touches the filesystem only
//! here, at document-open and explicit save points.

use anyhow::{Context, Result};
use core_state::EditorState;
use core_text::Document;
use std::path::Path;
use thiserror::Error;

/// Why a save did not happen. `NoFileName` is the prompt-for-a-name case;
/// `Io` is surfaced to the status bar with the buffer left untouched so
/// the user can retry.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no file name")]
    NoFileName,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a file into a fresh document, newline-stripped. Failure here is
/// fatal by design: the caller aborts startup rather than editing a
/// buffer that silently lost its backing file.
pub fn open_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let document = Document::from_lines(content.lines().map(str::to_string));
    tracing::info!(
        target: "io",
        path = %path.display(),
        rows = document.num_rows(),
        "file_opened"
    );
    Ok(document)
}

/// Write the document back to its file name and return the byte count.
/// On error the buffer, cursor, and dirty flag are all left unchanged.
pub fn save_document(state: &mut EditorState) -> Result<usize, SaveError> {
    let path = state.file_name.clone().ok_or(SaveError::NoFileName)?;
    let contents = state.document.contents();
    std::fs::write(&path, contents.as_bytes())?;
    state.document.mark_clean();
    tracing::info!(
        target: "io",
        path = %path.display(),
        bytes = contents.len(),
        "file_saved"
    );
    Ok(contents.len())
}
