//! Editor state: text buffer, cursor, viewport offsets, status message.
//!
//! All mutable editor state lives in one owned [`EditorState`] passed by
//! reference to every operation; there is no process-wide singleton. Three
//! coordinate systems meet here: `cx` indexes a row's raw content, `rx`
//! indexes its tab-expanded render, and the screen position is derived by
//! subtracting the scroll offsets. `rx` is a pure function of the current
//! row and `cx`; [`EditorState::scroll`] recomputes it before every frame
//! and never persists it independently of its inputs.
//!
//! Every motion clamps rather than rejects: out-of-range targets land on
//! the nearest valid position, and no operation here can fail.

use core_text::TextBuffer;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a status message stays visible on screen.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Rows reserved at the bottom of the terminal for the status bar and the
/// message bar.
pub const RESERVED_ROWS: usize = 2;

/// Single-step cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Full-viewport jump direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Up,
    Down,
}

/// One-line message with its creation time; the compositor shows it only
/// while it is younger than [`MESSAGE_TTL`].
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    created: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created(&self) -> Instant {
        self.created
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.duration_since(self.created) < MESSAGE_TTL
    }
}

/// The whole of the editor's mutable state.
#[derive(Debug)]
pub struct EditorState {
    pub buffer: TextBuffer,
    /// Cursor column into the current row's raw content.
    pub cx: usize,
    /// Cursor row; may equal `buffer.row_count()` (the virtual append line).
    pub cy: usize,
    /// Cursor column into the current row's render; derived by `scroll`.
    pub rx: usize,
    /// First visible buffer row.
    pub row_off: usize,
    /// First visible render column.
    pub col_off: usize,
    /// Visible text rows (terminal height minus the reserved bars).
    pub screen_rows: usize,
    /// Visible columns.
    pub screen_cols: usize,
    pub file_name: Option<PathBuf>,
    status: Option<StatusMessage>,
}

impl EditorState {
    /// `screen_cols`/`screen_rows` are the full terminal dimensions; two
    /// rows are reserved for the status and message bars.
    pub fn new(buffer: TextBuffer, screen_cols: usize, screen_rows: usize) -> Self {
        Self {
            buffer,
            cx: 0,
            cy: 0,
            rx: 0,
            row_off: 0,
            col_off: 0,
            screen_rows: screen_rows.saturating_sub(RESERVED_ROWS),
            screen_cols,
            file_name: None,
            status: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Move the cursor one step. Left at column 0 wraps to the end of the
    /// previous row; Right at end-of-row wraps to the start of the next.
    /// After any step the column clamps to the new row's length.
    pub fn move_cursor(&mut self, dir: Move) {
        match dir {
            Move::Left => {
                if self.cx != 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.buffer.row_len(self.cy);
                }
            }
            Move::Right => {
                if let Some(row) = self.buffer.row(self.cy) {
                    if self.cx < row.len() {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Move::Up => {
                if self.cy != 0 {
                    self.cy -= 1;
                }
            }
            Move::Down => {
                if self.cy < self.buffer.row_count() {
                    self.cy += 1;
                }
            }
        }

        // The landing row may be shorter than where we came from.
        let len = self.buffer.row_len(self.cy);
        if self.cx > len {
            self.cx = len;
        }
    }

    /// Jump the cursor one viewport up or down: first to the viewport
    /// edge, then a full screen of single-line steps so every clamping
    /// rule of [`EditorState::move_cursor`] applies uniformly.
    pub fn move_page(&mut self, dir: Page) {
        match dir {
            Page::Up => self.cy = self.row_off,
            Page::Down => {
                self.cy = (self.row_off + self.screen_rows).saturating_sub(1);
                if self.cy > self.buffer.row_count() {
                    self.cy = self.buffer.row_count();
                }
            }
        }
        let step = match dir {
            Page::Up => Move::Up,
            Page::Down => Move::Down,
        };
        for _ in 0..self.screen_rows {
            self.move_cursor(step);
        }
    }

    pub fn line_home(&mut self) {
        self.cx = 0;
    }

    pub fn line_end(&mut self) {
        if self.cy < self.buffer.row_count() {
            self.cx = self.buffer.row_len(self.cy);
        }
    }

    /// Recompute `rx` and pull the scroll offsets so the cursor is inside
    /// the visible window. Pure projection of the current cursor: calling
    /// it twice without an intervening mutation changes nothing.
    pub fn scroll(&mut self) {
        self.rx = if self.cy < self.buffer.row_count() {
            self.buffer.cx_to_rx(self.cy, self.cx)
        } else {
            0
        };

        let (old_row_off, old_col_off) = (self.row_off, self.col_off);
        if self.cy < self.row_off {
            self.row_off = self.cy;
        }
        if self.cy >= self.row_off + self.screen_rows {
            self.row_off = self.cy + 1 - self.screen_rows;
        }
        if self.rx < self.col_off {
            self.col_off = self.rx;
        }
        if self.rx >= self.col_off + self.screen_cols {
            self.col_off = self.rx + 1 - self.screen_cols;
        }

        if (old_row_off, old_col_off) != (self.row_off, self.col_off) {
            tracing::trace!(
                target: "state.scroll",
                row_off = self.row_off,
                col_off = self.col_off,
                cy = self.cy,
                rx = self.rx,
                "offsets_adjusted"
            );
        }
    }

    /// Insert a byte at the cursor and advance one column. On the virtual
    /// last line the buffer grows by a row first.
    pub fn insert_byte(&mut self, b: u8) {
        self.buffer.insert_byte(self.cy, self.cx, b);
        self.cx += 1;
    }
}
