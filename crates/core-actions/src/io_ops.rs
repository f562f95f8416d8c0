//! File IO helpers kept apart from key dispatch.
//!
//! Synchronous and minimal: open reads the file row by row into a fresh
//! buffer, write flattens the buffer back out. Callers translate the
//! result enums into status messages; the editing session never dies on a
//! persistence failure.

use core_state::EditorState;
use core_text::TextBuffer;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, error};

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Opened(TextBuffer),
    Error(std::io::Error),
}

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Saved { bytes: usize },
    NoFilename,
    Error(std::io::Error),
}

/// Load `path` into a fresh buffer, one row per line, trailing CR/LF
/// stripped. Every line is read into its own allocation; file content is
/// treated as raw bytes and need not be valid UTF-8.
pub fn open_file(path: &Path, tab_stop: usize) -> OpenFileResult {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            error!(target: "io", file = %path.display(), error = %e, "file_open_error");
            return OpenFileResult::Error(e);
        }
    };
    let mut reader = BufReader::new(file);
    let mut buffer = TextBuffer::new(tab_stop);
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                while matches!(line.last(), Some(b'\n' | b'\r')) {
                    line.pop();
                }
                buffer.append_row(&line);
            }
            Err(e) => {
                error!(target: "io", file = %path.display(), error = %e, "file_read_error");
                return OpenFileResult::Error(e);
            }
        }
    }
    debug!(target: "io", file = %path.display(), rows = buffer.row_count(), "file_read_ok");
    OpenFileResult::Opened(buffer)
}

/// Serialize the buffer out to the state's file name: every row followed
/// by exactly one newline.
pub fn write_file(state: &EditorState) -> WriteFileResult {
    let Some(path) = state.file_name.as_deref() else {
        debug!(target: "io", "save_skipped_no_filename");
        return WriteFileResult::NoFilename;
    };
    let content = state.buffer.serialize();
    match std::fs::write(path, &content) {
        Ok(()) => {
            debug!(target: "io", file = %path.display(), bytes = content.len(), "file_write_ok");
            WriteFileResult::Saved {
                bytes: content.len(),
            }
        }
        Err(e) => {
            error!(target: "io", file = %path.display(), error = %e, "file_write_error");
            WriteFileResult::Error(e)
        }
    }
}
