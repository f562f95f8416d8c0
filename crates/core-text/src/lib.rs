//! Row-based text buffer with tab-aware render derivation.
//!
//! A buffer is an ordered sequence of [`Row`]s, one per line, in file order.
//! Each row owns two byte sequences: `content`, the authoritative text of
//! the line (no trailing newline), and `render`, derived from `content` by
//! expanding tabs to the next tab-stop multiple. `render` is rebuilt
//! synchronously on every content mutation, so a stale render is never
//! observable.
//!
//! Rows store raw bytes rather than `String`: column arithmetic is defined
//! in byte units, and insertion at an arbitrary clamped index must always
//! succeed regardless of what the underlying file contained.

/// Default tab stop width. The effective value travels with the buffer so
/// configuration can override it at load time.
pub const TAB_STOP: usize = 8;

/// One line of text: raw content plus its tab-expanded render image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    content: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    pub fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        let mut row = Self {
            content: bytes.to_vec(),
            render: Vec::new(),
        };
        row.rebuild_render(tab_stop);
        row
    }

    /// Raw line content, excluding any line terminator.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Tab-expanded content as drawn on screen.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of the raw content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Insert `b` at raw index `at`, clamped to `[0, len]`, then re-derive
    /// the render image. Always succeeds.
    pub fn insert_byte(&mut self, at: usize, b: u8, tab_stop: usize) {
        let at = at.min(self.content.len());
        self.content.insert(at, b);
        self.rebuild_render(tab_stop);
    }

    /// Map a raw column to its render column. A tab before `cx` advances
    /// the render column to the next tab-stop multiple (at least 1, at
    /// most `tab_stop` cells); every other byte advances by one.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &b in self.content.iter().take(cx) {
            if b == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    fn rebuild_render(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        let mut render = Vec::with_capacity(self.content.len());
        for &b in &self.content {
            if b == b'\t' {
                render.push(b' ');
                while render.len() % tab_stop != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(b);
            }
        }
        self.render = render;
    }
}

/// Ordered collection of rows; index is the 0-based line number.
///
/// A cursor row index equal to [`TextBuffer::row_count`] denotes the
/// virtual one-past-end line used when appending at the bottom of the file.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rows: Vec<Row>,
    tab_stop: usize,
}

impl TextBuffer {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a buffer from in-memory text, one row per line. Trailing
    /// carriage returns are stripped; line feeds act as separators only.
    pub fn from_str(text: &str, tab_stop: usize) -> Self {
        let mut buffer = Self::new(tab_stop);
        for line in text.lines() {
            buffer.append_row(line.trim_end_matches('\r').as_bytes());
        }
        buffer
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Byte length of the row at `idx`, 0 for the virtual past-end line.
    pub fn row_len(&self, idx: usize) -> usize {
        self.rows.get(idx).map_or(0, Row::len)
    }

    /// Append one row to the end of the buffer; used both by file loading
    /// and by insertion on the virtual last line.
    pub fn append_row(&mut self, bytes: &[u8]) {
        self.rows.push(Row::from_bytes(bytes, self.tab_stop));
    }

    /// Insert `b` at `(cy, cx)`. A `cy` on the virtual last line grows the
    /// buffer by one empty row first; `cx` clamps inside the row.
    pub fn insert_byte(&mut self, cy: usize, cx: usize, b: u8) {
        let cy = cy.min(self.rows.len());
        if cy == self.rows.len() {
            self.append_row(b"");
        }
        let tab_stop = self.tab_stop;
        self.rows[cy].insert_byte(cx, b, tab_stop);
    }

    /// Render column for `(cy, cx)`; 0 when `cy` is past the last row.
    pub fn cx_to_rx(&self, cy: usize, cx: usize) -> usize {
        self.rows
            .get(cy)
            .map_or(0, |row| row.cx_to_rx(cx, self.tab_stop))
    }

    /// Flatten the buffer for persistence: every row's content followed by
    /// exactly one newline, in row order.
    pub fn serialize(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(&row.content);
            out.push(b'\n');
        }
        out
    }
}
