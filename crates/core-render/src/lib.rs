//! Screen compositor: turns editor state into one terminal frame.
//!
//! [`compose`] is a pure function of the state and the clock; it assumes
//! the caller has already run the scroll recompute for this frame. The
//! resulting [`Frame`] reaches the terminal through a single write, so the
//! terminal never observes a half-drawn screen.

pub mod frame;
pub mod status;

pub use frame::Frame;

use core_state::EditorState;
use status::StatusContext;
use std::time::Instant;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filler glyph for screen rows past the end of the buffer.
const FILLER: &[u8] = b"~";

/// Compose one complete frame: text rows, status bar, message bar, and the
/// cursor placed at its viewport-relative position.
pub fn compose(state: &EditorState, now: Instant) -> Frame {
    let mut out = Frame::new();
    out.push(frame::HIDE_CURSOR);
    out.push(frame::CURSOR_HOME);

    draw_rows(state, &mut out);
    draw_status_bar(state, &mut out);
    draw_message_bar(state, now, &mut out);

    out.position_cursor(
        state.cy.saturating_sub(state.row_off) + 1,
        state.rx.saturating_sub(state.col_off) + 1,
    );
    out.push(frame::SHOW_CURSOR);
    out
}

fn draw_rows(state: &EditorState, out: &mut Frame) {
    for y in 0..state.screen_rows {
        let file_row = y + state.row_off;
        match state.buffer.row(file_row) {
            Some(row) => {
                let render = row.render();
                let start = state.col_off.min(render.len());
                let end = (state.col_off + state.screen_cols).min(render.len());
                out.push(&render[start..end]);
            }
            None => {
                if state.buffer.is_empty()
                    && state.file_name.is_none()
                    && y == state.screen_rows / 3
                {
                    draw_welcome(state, out);
                } else {
                    out.push(FILLER);
                }
            }
        }
        out.push(frame::CLEAR_LINE);
        out.push(b"\r\n");
    }
}

/// Centered banner, shown only on a fresh session with nothing to edit.
fn draw_welcome(state: &EditorState, out: &mut Frame) {
    let banner: String = format!("Quill editor -- version {VERSION}")
        .chars()
        .take(state.screen_cols)
        .collect();
    let mut padding = (state.screen_cols - banner.chars().count()) / 2;
    if padding > 0 {
        out.push(FILLER);
        padding -= 1;
    }
    out.push(" ".repeat(padding).as_bytes());
    out.push(banner.as_bytes());
}

fn draw_status_bar(state: &EditorState, out: &mut Frame) {
    let bar = status::format_status(&StatusContext {
        file_name: state.file_name.as_deref(),
        row_count: state.buffer.row_count(),
        cy: state.cy,
        width: state.screen_cols,
    });
    out.push(frame::REVERSE_VIDEO);
    out.push(bar.as_bytes());
    out.push(frame::RESET_STYLE);
    out.push(b"\r\n");
}

fn draw_message_bar(state: &EditorState, now: Instant, out: &mut Frame) {
    out.push(frame::CLEAR_LINE);
    let message = status::format_message(state.status(), now, state.screen_cols);
    out.push(message.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{TAB_STOP, TextBuffer};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn state(text: &str, cols: usize, total_rows: usize) -> EditorState {
        EditorState::new(TextBuffer::from_str(text, TAB_STOP), cols, total_rows)
    }

    fn frame_string(state: &EditorState, now: Instant) -> String {
        String::from_utf8(compose(state, now).as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn golden_frame_for_small_buffer() {
        let mut st = state("abc\nde\tf", 12, 5); // 3 text rows
        st.scroll();
        let got = frame_string(&st, Instant::now());
        let expected = concat!(
            "\x1b[?25l",
            "\x1b[H",
            "abc\x1b[K\r\n",
            "de      f\x1b[K\r\n",
            "~\x1b[K\r\n",
            "\x1b[7m[No Name] - \x1b[m\r\n",
            "\x1b[K",
            "\x1b[1;1H",
            "\x1b[?25h",
        );
        assert_eq!(got, expected);
    }

    #[test]
    fn rows_slice_by_column_offset() {
        let mut st = state("0123456789abcdef", 6, 5);
        st.cx = 16;
        st.scroll(); // rx 16 -> col_off 11
        let got = frame_string(&st, Instant::now());
        assert!(got.contains("bcdef\x1b[K"), "frame: {got:?}");
    }

    #[test]
    fn column_offset_past_render_yields_empty_slice() {
        let mut st = state("ab\nlonger line here", 8, 6);
        st.cy = 1;
        st.cx = 16;
        st.scroll();
        let got = frame_string(&st, Instant::now());
        // First row scrolled entirely off screen: nothing before the clear.
        assert!(got.contains("\x1b[H\x1b[K\r\n"), "frame: {got:?}");
    }

    #[test]
    fn welcome_banner_centered_on_empty_session() {
        let mut st = state("", 40, 14); // 12 text rows, banner on row 4
        st.scroll();
        let got = frame_string(&st, Instant::now());
        let rows: Vec<&str> = got.split("\r\n").collect();
        let banner_row = rows[12 / 3];
        assert!(banner_row.starts_with('~'), "row: {banner_row:?}");
        assert!(
            banner_row.contains("Quill editor -- version"),
            "row: {banner_row:?}"
        );
        // Every other filler row is a bare tilde.
        assert!(rows[0].starts_with("\x1b[?25l\x1b[H~\x1b[K"));
    }

    #[test]
    fn no_banner_once_a_file_is_open() {
        let mut st = state("", 40, 14);
        st.file_name = Some("empty.txt".into());
        st.scroll();
        let got = frame_string(&st, Instant::now());
        assert!(!got.contains("Quill editor"));
    }

    #[test]
    fn no_banner_when_buffer_has_content() {
        let mut st = state("text", 40, 14);
        st.scroll();
        let got = frame_string(&st, Instant::now());
        assert!(!got.contains("Quill editor"));
    }

    #[test]
    fn cursor_code_is_viewport_relative() {
        let text = (0..40).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut st = state(&text, 80, 12); // 10 text rows
        st.cy = 25;
        st.cx = 1;
        st.scroll(); // row_off 16
        let got = frame_string(&st, Instant::now());
        assert!(got.ends_with("\x1b[10;2H\x1b[?25h"), "frame: {got:?}");
    }

    #[test]
    fn message_bar_honors_ttl() {
        let mut st = state("x", 40, 6);
        st.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit");
        st.scroll();
        let created = st.status().unwrap().created();
        let fresh = frame_string(&st, created);
        assert!(fresh.contains("HELP: Ctrl-S"));
        let stale = frame_string(&st, created + Duration::from_secs(6));
        assert!(!stale.contains("HELP"));
    }

    #[test]
    fn status_bar_is_reverse_video_and_full_width() {
        let mut st = state("a\nb\nc", 24, 8);
        st.file_name = Some("notes.txt".into());
        st.cy = 2;
        st.scroll();
        let got = frame_string(&st, Instant::now());
        assert!(got.contains("\x1b[7mnotes.txt - 3 lines"));
        assert!(got.contains("3/3\x1b[m\r\n"), "frame: {got:?}");
    }
}
