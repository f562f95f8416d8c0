//! Per-frame output buffer.
//!
//! The compositor appends every segment of a frame here and the whole
//! buffer reaches the terminal in one write; no partial frame is ever
//! observable. The control codes are fixed byte sequences because the
//! terminal contract pins them exactly (`ESC[H`, not a parameterized
//! equivalent).

use anyhow::Result;
use std::io::{Write, stdout};

pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
pub const CLEAR_LINE: &[u8] = b"\x1b[K";
pub const REVERSE_VIDEO: &[u8] = b"\x1b[7m";
pub const RESET_STYLE: &[u8] = b"\x1b[m";

/// Growable byte buffer holding one composed frame.
#[derive(Debug, Default)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append the cursor-positioning code for 1-based `(row, col)`.
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        self.push(format!("\x1b[{row};{col}H").as_bytes());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write the frame to the terminal as a single atomic operation.
    pub fn flush(self) -> Result<()> {
        let mut out = stdout().lock();
        out.write_all(&self.buf)?;
        out.flush()?;
        Ok(())
    }
}
