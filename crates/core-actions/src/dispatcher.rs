//! Dispatch table from decoded keys to editor operations.

use crate::io_ops::{self, WriteFileResult};
use core_events::{ESC, Key, ctrl};
use core_state::{EditorState, Move, Page};
use tracing::trace;

/// Terminate the session immediately, no confirmation, no save.
pub const QUIT_KEY: Key = ctrl(b'q');
/// Serialize the buffer to its file.
pub const SAVE_KEY: Key = ctrl(b's');

const ENTER: Key = Key::Byte(b'\r');
const REFRESH: Key = ctrl(b'l');
const BACKSPACE_CHORD: Key = ctrl(b'h');
const ESCAPE: Key = Key::Byte(ESC);

/// What the main loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Route one decoded key to its editor operation.
pub fn dispatch(state: &mut EditorState, key: Key) -> Outcome {
    match key {
        QUIT_KEY => return Outcome::Quit,
        SAVE_KEY => save(state),
        Key::ArrowUp => state.move_cursor(Move::Up),
        Key::ArrowDown => state.move_cursor(Move::Down),
        Key::ArrowLeft => state.move_cursor(Move::Left),
        Key::ArrowRight => state.move_cursor(Move::Right),
        Key::PageUp => state.move_page(Page::Up),
        Key::PageDown => state.move_page(Page::Down),
        Key::Home => state.line_home(),
        Key::End => state.line_end(),
        // Recognized but deliberately inert: line splitting, deletion and
        // manual repaint are not implemented.
        ENTER | Key::Backspace | BACKSPACE_CHORD | Key::Delete | REFRESH | ESCAPE => {
            trace!(target: "actions", ?key, "unimplemented_key_ignored");
        }
        Key::Byte(b) => state.insert_byte(b),
    }
    Outcome::Continue
}

fn save(state: &mut EditorState) {
    match io_ops::write_file(state) {
        WriteFileResult::Saved { bytes } => {
            state.set_status(format!("{bytes} bytes written to disk"));
        }
        // Nothing to write to; stays quiet like the rest of the no-ops.
        WriteFileResult::NoFilename => {}
        WriteFileResult::Error(e) => {
            state.set_status(format!("Can't save! I/O error: {e}"));
        }
    }
}
