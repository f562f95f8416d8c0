//! Finite-state decoder from raw bytes to [`Key`] events.
//!
//! Escape sequences are ambiguous prefix codes: after an ESC byte the
//! decoder cannot know whether more of a sequence follows or the user
//! pressed the Escape key alone. Every continuation read is therefore
//! bounded by a short timeout, and a timed-out read resolves to the
//! shortest valid interpretation, the lone ESC. Malformed sequences
//! resolve the same way; decoding never fails and never blocks forever.

use crate::ByteSource;
use anyhow::Result;
use core_events::{ESC, Key};
use std::time::Duration;

/// Poll granularity while idle waiting for the first byte of a key.
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Bounded wait for escape-sequence continuation bytes.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Block (in bounded polls) until one whole key event is available.
    pub fn read_key(&mut self) -> Result<Key> {
        let first = loop {
            if let Some(b) = self.source.read_timeout(KEY_POLL_INTERVAL)? {
                break b;
            }
        };
        if first != ESC {
            return Ok(literal(first));
        }

        // Up to three bytes of lookahead; any gap means the sequence ended.
        let Some(b0) = self.source.read_timeout(ESCAPE_TIMEOUT)? else {
            return Ok(Key::Byte(ESC));
        };
        let Some(b1) = self.source.read_timeout(ESCAPE_TIMEOUT)? else {
            return Ok(Key::Byte(ESC));
        };

        let key = match (b0, b1) {
            (b'[', b'0'..=b'9') => match self.source.read_timeout(ESCAPE_TIMEOUT)? {
                Some(b'~') => vt_key(b1),
                _ => Key::Byte(ESC),
            },
            (b'[', _) => csi_key(b1),
            (b'O', b'H') => Key::Home,
            (b'O', b'F') => Key::End,
            _ => Key::Byte(ESC),
        };
        if key == Key::Byte(ESC) {
            tracing::trace!(target: "input.decode", b0, b1, "unmatched_escape_sequence");
        }
        Ok(key)
    }
}

fn literal(b: u8) -> Key {
    match b {
        0x7f => Key::Backspace,
        _ => Key::Byte(b),
    }
}

/// `ESC [ <digit> ~` VT sequences.
fn vt_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Byte(ESC),
    }
}

/// `ESC [ <letter>` CSI sequences.
fn csi_key(letter: u8) -> Key {
    match letter {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Byte(ESC),
    }
}
